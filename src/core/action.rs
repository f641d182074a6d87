//! # Actions
//!
//! Every programmatic navigation becomes a `NavigationAction`.
//! User taps a row? That's `NavigationAction::Push { page, .. }`.
//! Logout flow wants a fresh stack? That's `NavigationAction::Set(vec![Home])`.
//!
//! The router's `reduce()` takes an action and mutates the projected path;
//! the opaque path follows through reconciliation.
//!
//! ```text
//! Router + Action  →  reduce()  →  projected path  →  opaque path
//! ```
//!
//! Applications usually have one action enum for everything. Implement
//! [`RoutedAction`] on it so the router can pick out its own variant and
//! ignore the rest.

use serde::{Deserialize, Serialize};

/// A request to change the navigation stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationAction<P> {
    /// Push `page`. With `allow_duplicates == false` the push is dropped
    /// when `page` is already a known entry anywhere on the stack.
    Push { page: P, allow_duplicates: bool },
    /// Replace the whole stack with `pages`.
    Set { pages: Vec<P> },
    /// Pop `count` pages, clamped to the stack height.
    RemoveLast { count: usize },
}

impl<P> NavigationAction<P> {
    pub fn push(page: P) -> Self {
        NavigationAction::Push {
            page,
            allow_duplicates: true,
        }
    }

    pub fn push_unique(page: P) -> Self {
        NavigationAction::Push {
            page,
            allow_duplicates: false,
        }
    }

    pub fn set(pages: impl IntoIterator<Item = P>) -> Self {
        NavigationAction::Set {
            pages: pages.into_iter().collect(),
        }
    }

    pub fn remove_last(count: usize) -> Self {
        NavigationAction::RemoveLast { count }
    }

    /// Short label for logs and traces.
    pub fn name(&self) -> &'static str {
        match self {
            NavigationAction::Push { .. } => "push",
            NavigationAction::Set { .. } => "set",
            NavigationAction::RemoveLast { .. } => "remove_last",
        }
    }
}

/// An application action that may carry a navigation action.
pub trait RoutedAction<P> {
    /// Returns the embedded navigation action, or `None` if this action is
    /// meant for some other consumer.
    fn into_navigation(self) -> Option<NavigationAction<P>>;
}

impl<P> RoutedAction<P> for NavigationAction<P> {
    fn into_navigation(self) -> Option<NavigationAction<P>> {
        Some(self)
    }
}

/// What `reduce()` did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduced {
    /// The paths were updated.
    Applied,
    /// A duplicate-avoiding push found its page already on the stack.
    Duplicate,
    /// Not a navigation action.
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            NavigationAction::push_unique("inbox"),
            NavigationAction::Push {
                page: "inbox",
                allow_duplicates: false
            }
        );
        assert_eq!(
            NavigationAction::set(["a", "b"]),
            NavigationAction::Set {
                pages: vec!["a", "b"]
            }
        );
        assert_eq!(NavigationAction::<&str>::remove_last(2).name(), "remove_last");
    }

    #[test]
    fn test_navigation_action_routes_to_itself() {
        let action = NavigationAction::push("home");
        assert_eq!(action.clone().into_navigation(), Some(action));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&NavigationAction::push("home")).unwrap();
        assert_eq!(json, r#"{"type":"push","page":"home","allow_duplicates":true}"#);
        let parsed: NavigationAction<String> =
            serde_json::from_str(r#"{"type":"remove_last","count":3}"#).unwrap();
        assert_eq!(parsed, NavigationAction::remove_last(3));
    }
}
