//! Composer state: the collapsible note-writing panel.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

use notes::NoteColor;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub expanded: bool,
    pub content: String,
    pub color: NoteColor,
}

impl ComposerState {
    pub fn expand(&mut self) {
        self.expanded = true;
    }

    /// Collapse without touching the draft or the chosen color.
    pub fn cancel(&mut self) {
        self.expanded = false;
    }

    /// Send is enabled only for non-blank content.
    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty()
    }

    /// Take the draft for sending: returns the content as typed and the
    /// selected color, then clears the text and collapses.
    pub fn take_submission(&mut self) -> Option<(String, NoteColor)> {
        if !self.can_submit() {
            return None;
        }
        let content = std::mem::take(&mut self.content);
        self.expanded = false;
        Some((content, self.color))
    }
}
