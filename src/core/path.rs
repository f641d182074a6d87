//! # Paths
//!
//! The two representations of the navigation stack.
//!
//! ```text
//! OpaquePath<E>        ProjectedPath<P>
//! ┌───────────┐        ┌──────────────────┐
//! │ e0        │  <──>  │ Known(Inbox)     │
//! │ e1        │  <──>  │ External         │   pushed by a host gesture
//! │ e2        │  <──>  │ Known(Thread(7)) │
//! └───────────┘        └──────────────────┘
//! ```
//!
//! `OpaquePath` deliberately exposes nothing beyond append, remove-from-end,
//! replace and count (plus read access for renderers). `ProjectedPath` keeps
//! the provenance of every slot.

use std::slice;

use serde::{Deserialize, Serialize};

use crate::core::page::{Page, PathElement};

/// The host-controlled stack. Elements are opaque to the engine.
#[derive(Debug, Clone)]
pub struct OpaquePath<E: PathElement> {
    elements: Vec<E>,
}

impl<E: PathElement> Default for OpaquePath<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PathElement> OpaquePath<E> {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn append(&mut self, element: E) {
        self.elements.push(element);
    }

    /// Removes up to `count` elements from the end. Returns how many went.
    pub fn remove_last(&mut self, count: usize) -> usize {
        let removed = count.min(self.elements.len());
        self.elements.truncate(self.elements.len() - removed);
        removed
    }

    pub fn replace(&mut self, elements: Vec<E>) {
        self.elements = elements;
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.elements.iter()
    }

    pub fn last(&self) -> Option<&E> {
        self.elements.last()
    }
}

impl<E: PathElement> Extend<E> for OpaquePath<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<E: PathElement> FromIterator<E> for OpaquePath<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

/// One slot of the projected path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum ProjectedEntry<P> {
    /// Pushed through an action; the page is known.
    Known(P),
    /// Appeared through a direct opaque-path mutation.
    External,
}

impl<P> ProjectedEntry<P> {
    pub fn page(&self) -> Option<&P> {
        match self {
            ProjectedEntry::Known(page) => Some(page),
            ProjectedEntry::External => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ProjectedEntry::External)
    }
}

/// The application-owned mirror of the opaque path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectedPath<P> {
    entries: Vec<ProjectedEntry<P>>,
}

impl<P> Default for ProjectedPath<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<P: Page> ProjectedPath<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ProjectedEntry<P>] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, ProjectedEntry<P>> {
        self.entries.iter()
    }

    /// True if `page` was pushed and is still somewhere on the stack.
    pub fn contains_known(&self, page: &P) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.page().is_some_and(|known| known == page))
    }

    /// Known pages in stack order, skipping external slots.
    pub fn known_pages(&self) -> impl Iterator<Item = &P> {
        self.entries.iter().filter_map(ProjectedEntry::page)
    }

    pub fn external_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_external()).count()
    }

    pub(crate) fn push(&mut self, entry: ProjectedEntry<P>) {
        self.entries.push(entry);
    }

    pub(crate) fn extend<I: IntoIterator<Item = ProjectedEntry<P>>>(&mut self, entries: I) {
        self.entries.extend(entries);
    }

    pub(crate) fn remove_last(&mut self, count: usize) -> usize {
        let removed = count.min(self.entries.len());
        self.entries.truncate(self.entries.len() - removed);
        removed
    }

    pub(crate) fn replace(&mut self, entries: Vec<ProjectedEntry<P>>) {
        self.entries = entries;
    }
}

impl<P: Page> FromIterator<ProjectedEntry<P>> for ProjectedPath<P> {
    fn from_iter<I: IntoIterator<Item = ProjectedEntry<P>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
