//! Synchronous text prompt used by the text tool.

/// Asks the user for a line of text.
///
/// Returns `None` when the user cancels.
pub trait TextPrompt {
    fn request_text(&mut self, initial: &str) -> Option<String>;
}

/// A prompt that always cancels. Used when the host has no modal input.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl TextPrompt for NoPrompt {
    fn request_text(&mut self, _initial: &str) -> Option<String> {
        None
    }
}

/// Replies from a fixed queue of answers, then cancels.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<Option<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| a.map(Into::into)).collect(),
        }
    }
}

impl TextPrompt for ScriptedPrompt {
    fn request_text(&mut self, _initial: &str) -> Option<String> {
        self.answers.pop_front().flatten()
    }
}

impl<F> TextPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn request_text(&mut self, initial: &str) -> Option<String> {
        self(initial)
    }
}
