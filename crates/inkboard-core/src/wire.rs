//! Flat JSON record exchanged with the shape CRUD layer.
//!
//! The persistence layer stores every kind in one loosely typed object:
//!
//! ```json
//! { "id": "…", "type": "rectangle", "start": {"x": 1, "y": 2}, "end": {…},
//!   "color": "#fff", "rotation": 30, "pageId": "…" }
//! ```
//!
//! [`ShapeRecord`] mirrors that object verbatim. Converting it into a
//! [`Shape`] checks that the fields the kind needs are present; records that
//! fail are dropped by [`decode_shapes`] instead of failing the whole list.

use crate::error::ShapeError;
use crate::shapes::{
    Arrow, Circle, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, Freehand, Line, Rectangle, Shape,
    ShapeId, ShapeKind, Text,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// One shape as stored by the CRUD layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl ShapeRecord {
    /// Attach the page association key.
    pub fn with_page(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = ShapeError;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or(ShapeError::MissingId)?;
        let kind_name = record
            .kind
            .ok_or_else(|| ShapeError::MissingKind(id.clone()))?;
        let kind = ShapeKind::from_name(&kind_name).ok_or_else(|| ShapeError::UnknownKind {
            id: id.clone(),
            kind: kind_name,
        })?;

        let color = record.color.unwrap_or_default();
        // Absent endpoints are treated as the origin.
        let start = record.start.unwrap_or(Point::ZERO);
        let end = record.end.unwrap_or(Point::ZERO);
        let rotation = record.rotation.unwrap_or(0.0);

        let shape = match kind {
            ShapeKind::Freehand => {
                let path = record.path.ok_or_else(|| ShapeError::MissingField {
                    id: id.clone(),
                    kind: kind.name(),
                    field: "path",
                })?;
                if path.is_empty() {
                    return Err(ShapeError::EmptyPath(id));
                }
                Shape::Freehand(Freehand::from_points(ShapeId::from(id), path, color))
            }
            ShapeKind::Line => Shape::Line(Line::new(ShapeId::from(id), start, end, color)),
            ShapeKind::Circle => Shape::Circle(Circle::new(ShapeId::from(id), start, end, color)),
            ShapeKind::Arrow => Shape::Arrow(Arrow::new(ShapeId::from(id), start, end, color)),
            ShapeKind::Rectangle => Shape::Rectangle(
                Rectangle::new(ShapeId::from(id), start, end, color).with_rotation(rotation),
            ),
            ShapeKind::Text => {
                let text = record.text.ok_or_else(|| ShapeError::MissingField {
                    id: id.clone(),
                    kind: kind.name(),
                    field: "text",
                })?;
                let position = Point::new(record.x.unwrap_or(0.0), record.y.unwrap_or(0.0));
                Shape::Text(
                    Text::new(ShapeId::from(id), position, text, color)
                        .with_font(
                            record
                                .font_family
                                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
                            record.font_size.unwrap_or(DEFAULT_FONT_SIZE),
                        )
                        .with_rotation(rotation),
                )
            }
        };
        Ok(shape)
    }
}

impl From<Shape> for ShapeRecord {
    fn from(shape: Shape) -> Self {
        let mut record = ShapeRecord {
            id: Some(shape.id().to_string()),
            kind: Some(shape.kind().name().to_string()),
            color: Some(shape.color().to_string()),
            ..Default::default()
        };
        match shape {
            Shape::Freehand(s) => record.path = Some(s.path),
            Shape::Line(Line { start, end, .. })
            | Shape::Circle(Circle { start, end, .. })
            | Shape::Arrow(Arrow { start, end, .. }) => {
                record.start = Some(start);
                record.end = Some(end);
            }
            Shape::Rectangle(s) => {
                record.start = Some(s.start);
                record.end = Some(s.end);
                record.rotation = Some(s.rotation);
            }
            Shape::Text(s) => {
                record.x = Some(s.position.x);
                record.y = Some(s.position.y);
                record.text = Some(s.text);
                record.font_size = Some(s.font_size);
                record.font_family = Some(s.font_family);
                record.rotation = Some(s.rotation);
            }
        }
        record
    }
}

/// Convert records, skipping the ones that do not describe a valid shape.
pub fn decode_records(records: impl IntoIterator<Item = ShapeRecord>) -> Vec<Shape> {
    records
        .into_iter()
        .filter_map(|record| match Shape::try_from(record) {
            Ok(shape) => Some(shape),
            Err(e) => {
                log::warn!("Skipping malformed shape: {}", e);
                None
            }
        })
        .collect()
}

/// Decode a JSON array of shape records.
///
/// Only a document that is not a JSON array is an error. Individual elements
/// with wrong field types or invalid contents are logged and skipped.
pub fn decode_shapes(json: &str) -> Result<Vec<Shape>, serde_json::Error> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let records = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ShapeRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Skipping unreadable shape record: {}", e);
                None
            }
        });
    Ok(decode_records(records))
}

/// Encode shapes as a JSON array of records tagged with `page_id`.
pub fn encode_shapes(shapes: &[Shape], page_id: Option<&str>) -> Result<String, serde_json::Error> {
    let records: Vec<ShapeRecord> = shapes
        .iter()
        .cloned()
        .map(|shape| {
            let record = ShapeRecord::from(shape);
            match page_id {
                Some(page) => record.with_page(page),
                None => record,
            }
        })
        .collect();
    serde_json::to_string(&records)
}
