//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::action::{NavigationAction, RoutedAction};
use crate::core::path::{ProjectedEntry, ProjectedPath};
use crate::core::router::Router;

/// A small page type, shaped like a real app's screen enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Home,
    Inbox,
    Thread(u32),
    Settings,
}

/// An app-wide action enum that carries navigation alongside other things.
#[derive(Debug)]
pub enum AppAction {
    Navigate(NavigationAction<Screen>),
    Refresh,
}

impl RoutedAction<Screen> for AppAction {
    fn into_navigation(self) -> Option<NavigationAction<Screen>> {
        match self {
            AppAction::Navigate(action) => Some(action),
            AppAction::Refresh => None,
        }
    }
}

/// Builds a projected path made only of known pages.
pub fn known<P: crate::core::page::Page>(pages: impl IntoIterator<Item = P>) -> ProjectedPath<P> {
    pages.into_iter().map(ProjectedEntry::Known).collect()
}

/// Reads the opaque path back as screens. Elements pushed by the host with
/// some other type come back as `None`.
pub fn opaque_screens(router: &Router<Screen>) -> Vec<Option<Screen>> {
    router
        .opaque_path()
        .iter()
        .map(|element| element.downcast_ref::<Screen>().cloned())
        .collect()
}
