//! # KeyHints Component
//!
//! Bottom line listing the key bindings. Page digits only go as high as the
//! catalogue does.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct KeyHints {
    pub page_count: usize,
}

impl KeyHints {
    pub fn new(page_count: usize) -> Self {
        Self { page_count }
    }

    fn hints(&self) -> Vec<(String, &'static str)> {
        let digits = match self.page_count.min(9) {
            0 => None,
            1 => Some("1".to_string()),
            n => Some(format!("1-{n}")),
        };

        let mut hints = Vec::new();
        if let Some(digits) = digits {
            hints.push((digits, "push"));
        }
        hints.extend([
            ("d".to_string(), "dupes"),
            ("s".to_string(), "set all"),
            ("x".to_string(), "pop 2"),
            ("⌫".to_string(), "host back"),
            ("h".to_string(), "host push"),
            ("r".to_string(), "restore"),
            ("q".to_string(), "quit"),
        ]);
        hints
    }
}

impl Component for KeyHints {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Yellow);
        let desc_style = Style::default().fg(Color::DarkGray);

        let spans: Vec<Span> = self
            .hints()
            .into_iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(key, key_style),
                    Span::styled(format!(" {desc}  "), desc_style),
                ]
            })
            .collect();
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_range_follows_catalogue() {
        assert_eq!(KeyHints::new(4).hints()[0].0, "1-4");
        assert_eq!(KeyHints::new(1).hints()[0].0, "1");
        assert_eq!(KeyHints::new(20).hints()[0].0, "1-9");
        assert_eq!(KeyHints::new(0).hints()[0].0, "d");
    }
}
