//! # StackPanel Component
//!
//! A bordered list showing one navigation path, top of stack first.
//!
//! Used twice side by side: once for the opaque path (what the host sees)
//! and once for the projected path (what the app knows).

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

/// One row of a stack panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackRow {
    pub label: String,
    /// Rows the app cannot account for are dimmed.
    pub dimmed: bool,
}

impl StackRow {
    pub fn known(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dimmed: false,
        }
    }

    pub fn unknown(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            dimmed: true,
        }
    }
}

pub struct StackPanel {
    pub title: String,
    /// Bottom of the stack first, as stored in the path.
    pub rows: Vec<StackRow>,
    pub accent: Color,
}

impl StackPanel {
    pub fn new(title: impl Into<String>, rows: Vec<StackRow>, accent: Color) -> Self {
        Self {
            title: title.into(),
            rows,
            accent,
        }
    }

    fn lines(&self) -> Vec<Line<'_>> {
        if self.rows.is_empty() {
            return vec![Line::from(Span::styled(
                "(empty)",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let depth = self.rows.len();
        self.rows
            .iter()
            .enumerate()
            .rev()
            .map(|(index, row)| {
                let mut style = Style::default().fg(self.accent);
                if row.dimmed {
                    style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
                }
                if index + 1 == depth {
                    style = style.add_modifier(Modifier::BOLD);
                }
                Line::from(vec![
                    Span::styled(format!("{index:>2} "), Style::default().fg(Color::DarkGray)),
                    Span::styled(row.label.as_str(), style),
                ])
            })
            .collect()
    }
}

impl Component for StackPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!("{} ({})", self.title, self.rows.len());
        let paragraph = Paragraph::new(self.lines()).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(self.accent).add_modifier(Modifier::DIM)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered_rows(panel: &mut StackPanel, height: u16) -> Vec<String> {
        let backend = TestBackend::new(30, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| panel.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..30u16)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_top_of_stack_renders_first() {
        let mut panel = StackPanel::new(
            "Projected",
            vec![StackRow::known("home"), StackRow::unknown("*"), StackRow::known("inbox")],
            Color::Cyan,
        );
        let rows = rendered_rows(&mut panel, 5);

        assert!(rows[0].contains("Projected (3)"));
        assert!(rows[1].contains("2 inbox"));
        assert!(rows[2].contains("1 *"));
        assert!(rows[3].contains("0 home"));
    }

    #[test]
    fn test_empty_panel_shows_placeholder() {
        let mut panel = StackPanel::new("Opaque", Vec::new(), Color::Green);
        let rows = rendered_rows(&mut panel, 3);

        assert!(rows[0].contains("Opaque (0)"));
        assert!(rows[1].contains("(empty)"));
    }
}
