//! # TitleBar Component
//!
//! Top status bar showing the push policy, the last status message, and a
//! warning when the two paths disagree on length.
//!
//! Purely presentational: all data arrives as props.
//!
//! ## Conditional Formatting
//!
//! 1. **Out of sync**: `"navstack (unique pushes) | Pushed inbox | ⚠ out of sync"`
//! 2. **Status message**: `"navstack (duplicates allowed) | Pushed inbox"`
//! 3. **Default**: `"navstack (duplicates allowed)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar component.
pub struct TitleBar {
    /// Whether pushes may repeat a page already on the stack
    pub allow_duplicates: bool,
    /// Transient status (e.g. "Pushed inbox", "Duplicate push dropped")
    pub status_message: String,
    /// Whether both paths currently have the same length
    pub consistent: bool,
}

impl TitleBar {
    pub fn new(allow_duplicates: bool, status_message: String, consistent: bool) -> Self {
        Self {
            allow_duplicates,
            status_message,
            consistent,
        }
    }

    fn text(&self) -> String {
        let policy = if self.allow_duplicates {
            "duplicates allowed"
        } else {
            "unique pushes"
        };
        let mut text = format!("navstack ({policy})");
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if !self.consistent {
            text.push_str(" | ⚠ out of sync");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::raw(self.text()), area);
    }
}
