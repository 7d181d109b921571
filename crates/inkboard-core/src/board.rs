//! Pages and their shape lists.
//!
//! Each page owns its shape list behind an [`Arc`]. Edits never touch a
//! published list; a new list replaces it and the page revision increases, so
//! a reader holding a snapshot always sees one consistent list.

use crate::error::{BoardError, BoardResult};
use crate::ids::{IdGenerator, UuidIds};
use crate::shapes::Shape;
use crate::wire::{decode_shapes, encode_shapes};
use std::sync::Arc;

/// A named page of shapes.
#[derive(Debug, Clone)]
pub struct Page {
    id: String,
    pub name: String,
    shapes: Arc<Vec<Shape>>,
    revision: u64,
}

impl Page {
    fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            shapes: Arc::new(Vec::new()),
            revision: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shared handle to the current list.
    pub fn snapshot(&self) -> Arc<Vec<Shape>> {
        Arc::clone(&self.shapes)
    }

    /// Bumped on every replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Publish a new shape list.
    pub fn replace_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = Arc::new(shapes);
        self.revision += 1;
    }

    /// Shapes as CRUD records tagged with this page's id.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        encode_shapes(&self.shapes, Some(&self.id))
    }
}

/// An ordered set of pages with one active page.
pub struct Board {
    pages: Vec<Page>,
    active: usize,
    ids: Box<dyn IdGenerator>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Box::new(UuidIds))
    }
}

impl Board {
    /// A board with a single empty page.
    pub fn new(mut ids: Box<dyn IdGenerator>) -> Self {
        let first = Page::new(ids.next_id(), "Page 1".to_string());
        Self {
            pages: vec![first],
            active: 0,
            ids,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn active_page(&self) -> &Page {
        &self.pages[self.active]
    }

    pub fn active_page_mut(&mut self) -> &mut Page {
        &mut self.pages[self.active]
    }

    fn index_of(&self, id: &str) -> BoardResult<usize> {
        self.pages
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| BoardError::PageNotFound(id.to_string()))
    }

    /// Append a page named after its position and make it active.
    pub fn create_page(&mut self) -> String {
        let id = self.ids.next_id();
        let name = format!("Page {}", self.pages.len() + 1);
        log::debug!("Creating page {} ({})", name, id);
        self.pages.push(Page::new(id.clone(), name));
        self.active = self.pages.len() - 1;
        id
    }

    pub fn rename_page(&mut self, id: &str, name: impl Into<String>) -> BoardResult<()> {
        let index = self.index_of(id)?;
        self.pages[index].name = name.into();
        Ok(())
    }

    pub fn select_page(&mut self, id: &str) -> BoardResult<()> {
        self.active = self.index_of(id)?;
        Ok(())
    }

    /// Remove a page and its shapes. The last page cannot be removed.
    pub fn delete_page(&mut self, id: &str) -> BoardResult<()> {
        let index = self.index_of(id)?;
        if self.pages.len() == 1 {
            return Err(BoardError::LastPage);
        }
        self.pages.remove(index);
        if self.active > index || self.active == self.pages.len() {
            self.active -= 1;
        }
        Ok(())
    }

    /// Replace a page's shapes with records decoded from JSON.
    ///
    /// Malformed records are skipped. Returns how many shapes were loaded.
    pub fn load_page_json(&mut self, id: &str, json: &str) -> BoardResult<usize> {
        let index = self.index_of(id)?;
        let shapes = decode_shapes(json)?;
        let count = shapes.len();
        self.pages[index].replace_shapes(shapes);
        Ok(count)
    }
}
