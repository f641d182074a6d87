//! # Router
//!
//! Owns both representations of the navigation stack and keeps them in sync.
//!
//! ```text
//! Router<P>
//! └── RouterState<P>  (Rc, pipelines hold Weak back-references)
//!     ├── opaque: Observable<OpaquePath<AnyPage>>     // host writes here
//!     ├── projected: Observable<ProjectedPath<P>>     // only the router writes here
//!     └── pipelines: [Subscription; 2]                // A: opaque → projected
//!                                                     // B: projected → opaque
//! ```
//!
//! Two ways in:
//!
//! 1. The host mutates `opaque()` directly (back gesture, swipe). Pipeline A
//!    pads the projected path with `External` slots or trims it.
//! 2. The app calls `reduce(action)`. The router edits the projected path and
//!    pipeline B appends or trims opaque elements to match.
//!
//! Every change to either path fires its pipeline, including changes made by
//! observers while another pipeline is running. A pipeline leaves both lengths
//! equal, and at equal lengths the reciprocal pipeline is a no-op, so the
//! exchange settles after one round trip.
//!
//! `Set` and `RemoveLast` edit both paths before anyone is notified. The opaque
//! path is announced first, so pipeline A has the last word on length.

use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, info, trace, warn};

use crate::core::action::{NavigationAction, Reduced, RoutedAction};
use crate::core::observable::{Observable, Subscription};
use crate::core::page::{AnyPage, Page};
use crate::core::path::{OpaquePath, ProjectedEntry, ProjectedPath};
use crate::core::reconcile::{self, Reconciliation};

/// The navigation sync engine.
///
/// Not `Send`: create it on the UI thread and keep it there.
pub struct Router<P: Page> {
    state: Rc<RouterState<P>>,
}

struct RouterState<P: Page> {
    opaque: Observable<OpaquePath<AnyPage>>,
    projected: Observable<ProjectedPath<P>>,
    _pipelines: [Subscription; 2],
}

impl<P: Page> Router<P> {
    pub fn new() -> Self {
        let state = Rc::new_cyclic(|weak: &Weak<RouterState<P>>| {
            let opaque = Observable::new(OpaquePath::new());
            let projected = Observable::new(ProjectedPath::new());

            let owner = weak.clone();
            let opaque_to_projected = opaque.subscribe(move |_: &OpaquePath<AnyPage>| {
                if let Some(state) = owner.upgrade() {
                    state.project_opaque();
                }
            });
            let owner = weak.clone();
            let projected_to_opaque = projected.subscribe(move |_: &ProjectedPath<P>| {
                if let Some(state) = owner.upgrade() {
                    state.realize_projected();
                }
            });

            RouterState {
                opaque,
                projected,
                _pipelines: [opaque_to_projected, projected_to_opaque],
            }
        });
        Self { state }
    }

    /// The host's stack. Mutate it to simulate or forward host navigation.
    pub fn opaque(&self) -> &Observable<OpaquePath<AnyPage>> {
        &self.state.opaque
    }

    pub fn opaque_path(&self) -> OpaquePath<AnyPage> {
        self.state.opaque.get()
    }

    pub fn projected_path(&self) -> ProjectedPath<P> {
        self.state.projected.get()
    }

    /// Observe the projected path. The callback runs after every change.
    pub fn subscribe_projected(&self, callback: impl Fn(&ProjectedPath<P>) + 'static) -> Subscription {
        self.state.projected.subscribe(callback)
    }

    /// Height of the stack, as the host sees it.
    pub fn len(&self) -> usize {
        self.state.opaque.with(OpaquePath::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when both paths have the same length.
    pub fn is_consistent(&self) -> bool {
        self.len() == self.state.projected.with(ProjectedPath::len)
    }

    /// Clears both paths.
    pub fn restore(&self) {
        info!("Restoring navigation state ({} entries dropped)", self.len());
        self.replace_all(Vec::new());
    }

    /// Applies a navigation action. Anything else is ignored.
    pub fn reduce<A: RoutedAction<P>>(&self, action: A) -> Reduced {
        let Some(action) = action.into_navigation() else {
            trace!("Ignoring non-navigation action");
            return Reduced::Ignored;
        };
        debug!("Reducing {:?}", action);

        match action {
            NavigationAction::Push {
                page,
                allow_duplicates,
            } => {
                if !allow_duplicates && self.state.projected.with(|path| path.contains_known(&page)) {
                    debug!("Dropping duplicate push of {:?}", page);
                    return Reduced::Duplicate;
                }
                self.state
                    .projected
                    .mutate(|path| path.push(ProjectedEntry::Known(page)));
            }
            NavigationAction::Set { pages } => self.replace_all(pages),
            NavigationAction::RemoveLast { count } => {
                // Clamp against the host's stack; both paths shrink by the same amount.
                let count = count.min(self.len());
                if count > 0 {
                    self.state.edit_both(
                        |opaque| {
                            opaque.remove_last(count);
                        },
                        |projected| {
                            projected.remove_last(count);
                        },
                    );
                }
            }
        }
        Reduced::Applied
    }

    fn replace_all(&self, pages: Vec<P>) {
        let elements: OpaquePath<AnyPage> = pages.iter().cloned().map(AnyPage::new).collect();
        let entries: ProjectedPath<P> = pages.into_iter().map(ProjectedEntry::Known).collect();
        self.state.edit_both(
            |opaque| *opaque = elements,
            |projected| *projected = entries,
        );
    }
}

impl<P: Page> Default for Router<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Page> fmt::Debug for Router<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("opaque", &self.state.opaque)
            .field("projected", &self.state.projected)
            .finish()
    }
}

impl<P: Page> RouterState<P> {
    /// Applies both edits, then announces the opaque path and the projected
    /// path in that order. Observers never see one edit without the other.
    fn edit_both(
        &self,
        opaque_edit: impl FnOnce(&mut OpaquePath<AnyPage>),
        projected_edit: impl FnOnce(&mut ProjectedPath<P>),
    ) {
        self.projected.mutate_deferred(projected_edit);
        self.opaque.mutate_deferred(opaque_edit);
        self.opaque.flush();
        self.projected.flush();
    }

    /// Pipeline A: opaque → projected.
    fn project_opaque(&self) {
        let opaque_len = self.opaque.with(OpaquePath::len);
        let projected_len = self.projected.with(ProjectedPath::len);

        match reconcile::project_opaque::<P>(opaque_len, projected_len) {
            Reconciliation::Unchanged => {}
            Reconciliation::Truncate(count) => {
                debug!("Host popped {count}; trimming projected path");
                self.projected.mutate(|path| {
                    path.remove_last(count);
                });
            }
            Reconciliation::Append(entries) => {
                debug!("Host pushed {}; adding external entries", entries.len());
                self.projected.mutate(|path| path.extend(entries));
            }
        }
    }

    /// Pipeline B: projected → opaque.
    fn realize_projected(&self) {
        let opaque_len = self.opaque.with(OpaquePath::len);
        let (projected_len, plan) = self.projected.with(|path| {
            (path.len(), reconcile::realize_projected(path.entries(), opaque_len))
        });

        match plan {
            Reconciliation::Unchanged => {
                if projected_len != opaque_len {
                    warn!(
                        "Projected path grew by external entries only; lengths now {projected_len} vs {opaque_len}"
                    );
                }
            }
            Reconciliation::Truncate(count) => {
                debug!("Popping {count} from opaque path");
                self.opaque.mutate(|path| {
                    path.remove_last(count);
                });
            }
            Reconciliation::Append(pages) => {
                if opaque_len + pages.len() != projected_len {
                    warn!(
                        "Skipped {} external entries while growing opaque path",
                        projected_len - opaque_len - pages.len()
                    );
                }
                debug!("Appending {} page(s) to opaque path", pages.len());
                self.opaque
                    .mutate(|path| path.extend(pages.into_iter().map(AnyPage::new)));
            }
        }
    }
}
