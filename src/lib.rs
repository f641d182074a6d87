//! navstack library exports

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{AnyPage, NavigationAction, OpaquePath, ProjectedEntry, ProjectedPath, Reduced, RoutedAction, Router};
