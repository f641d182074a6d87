//! # Reconciliation Pipelines
//!
//! The two one-directional sync rules, as pure functions over lengths and
//! entries. The router wires them to its observables; keeping them pure means
//! the policy can be tested without any subscription plumbing.
//!
//! ```text
//! opaque changed     diff = len(opaque) - len(projected)
//!   diff == 0  →  nothing
//!   diff <  0  →  truncate projected by |diff|
//!   diff >  0  →  append diff × External to projected
//!
//! projected changed  diff = len(projected) - len(opaque)
//!   diff == 0  →  nothing
//!   diff <  0  →  truncate opaque by |diff|
//!   diff >  0  →  append the Known pages of the new suffix to opaque,
//!                 skipping External slots
//! ```

use std::cmp::Ordering;
use std::iter;

use crate::core::page::Page;
use crate::core::path::ProjectedEntry;

/// What one pipeline wants done to the path it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation<T> {
    Unchanged,
    /// Remove this many items from the end.
    Truncate(usize),
    /// Append these items, in order.
    Append(Vec<T>),
}

impl<T> Reconciliation<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Reconciliation::Unchanged)
    }
}

/// Pipeline A: bring the projected path in line with the opaque path.
pub fn project_opaque<P: Page>(
    opaque_len: usize,
    projected_len: usize,
) -> Reconciliation<ProjectedEntry<P>> {
    match opaque_len.cmp(&projected_len) {
        Ordering::Equal => Reconciliation::Unchanged,
        Ordering::Less => Reconciliation::Truncate(projected_len - opaque_len),
        Ordering::Greater => Reconciliation::Append(
            iter::repeat_with(|| ProjectedEntry::External)
                .take(opaque_len - projected_len)
                .collect(),
        ),
    }
}

/// Pipeline B: bring the opaque path in line with the projected path.
///
/// On growth only `Known` entries produce opaque elements, so the result can
/// be shorter than the length difference when the new suffix holds
/// `External` slots. An all-external suffix yields `Unchanged`.
pub fn realize_projected<P: Page>(
    projected: &[ProjectedEntry<P>],
    opaque_len: usize,
) -> Reconciliation<P> {
    match projected.len().cmp(&opaque_len) {
        Ordering::Equal => Reconciliation::Unchanged,
        Ordering::Less => Reconciliation::Truncate(opaque_len - projected.len()),
        Ordering::Greater => {
            let pages: Vec<P> = projected[opaque_len..]
                .iter()
                .filter_map(ProjectedEntry::page)
                .cloned()
                .collect();
            if pages.is_empty() {
                Reconciliation::Unchanged
            } else {
                Reconciliation::Append(pages)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProjectedEntry::{External, Known};

    #[test]
    fn test_project_equal_lengths_is_noop() {
        assert!(project_opaque::<&str>(2, 2).is_unchanged());
        assert!(project_opaque::<&str>(0, 0).is_unchanged());
    }

    #[test]
    fn test_project_growth_appends_external() {
        assert_eq!(
            project_opaque::<&str>(3, 0),
            Reconciliation::Append(vec![External, External, External])
        );
    }

    #[test]
    fn test_project_shrink_truncates() {
        assert_eq!(project_opaque::<&str>(1, 4), Reconciliation::Truncate(3));
    }

    #[test]
    fn test_realize_growth_appends_known_suffix() {
        let projected = [Known("home"), Known("inbox"), Known("thread")];
        assert_eq!(
            realize_projected(&projected, 1),
            Reconciliation::Append(vec!["inbox", "thread"])
        );
    }

    #[test]
    fn test_realize_shrink_truncates() {
        let projected = [Known("home")];
        assert_eq!(realize_projected(&projected, 3), Reconciliation::Truncate(2));
    }

    #[test]
    fn test_realize_skips_external_in_suffix() {
        // Two new slots, only one produces an opaque element.
        let projected = [Known("a"), External];
        assert_eq!(
            realize_projected(&projected, 0),
            Reconciliation::Append(vec!["a"])
        );
    }

    #[test]
    fn test_realize_all_external_suffix_is_unchanged() {
        let projected: [ProjectedEntry<&str>; 2] = [Known("a"), External];
        assert!(realize_projected(&projected, 1).is_unchanged());
    }
}
