use crate::core::page::AnyPage;
use crate::core::path::{OpaquePath, ProjectedEntry, ProjectedPath};
use crate::core::router::Router;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{KeyHints, StackPanel, StackRow, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Color;

pub fn draw_ui(frame: &mut Frame, router: &Router<String>, tui: &TuiState) {
    use Constraint::{Length, Min, Percentage};
    let [title_area, main_area, hints_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [opaque_area, projected_area] =
        Layout::horizontal([Percentage(50), Percentage(50)]).areas(main_area);

    TitleBar::new(
        tui.allow_duplicates,
        tui.status_message.clone(),
        router.is_consistent(),
    )
    .render(frame, title_area);

    StackPanel::new("Host stack", opaque_rows(&router.opaque_path()), Color::Green)
        .render(frame, opaque_area);
    StackPanel::new("Projected", projected_rows(&router.projected_path()), Color::Cyan)
        .render(frame, projected_area);

    KeyHints::new(tui.pages.len()).render(frame, hints_area);
}

/// Pages the app pushed are `String`s; anything else came from the host.
pub fn opaque_rows(path: &OpaquePath<AnyPage>) -> Vec<StackRow> {
    path.iter()
        .map(|element| match element.downcast_ref::<String>() {
            Some(page) => StackRow::known(page.as_str()),
            None => StackRow::unknown(format!("{element:?}")),
        })
        .collect()
}

pub fn projected_rows(path: &ProjectedPath<String>) -> Vec<StackRow> {
    path.iter()
        .map(|entry| match entry {
            ProjectedEntry::Known(page) => StackRow::known(page.as_str()),
            ProjectedEntry::External => StackRow::unknown("external"),
        })
        .collect()
}
