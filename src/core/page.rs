//! # Pages and Path Elements
//!
//! Two capabilities live here:
//!
//! - [`Page`]: what the application pushes. Anything clonable, comparable and
//!   printable qualifies, so plain enums and strings work out of the box.
//! - [`PathElement`]: what the opaque path stores. The host only ever sees
//!   elements, never pages.
//!
//! [`AnyPage`] bridges the two. It erases a page's concrete type so the opaque
//! path can hold pages of any type side by side, just like a host navigation
//! stack that only knows "something was pushed here".

use std::any::{Any, type_name};
use std::fmt;
use std::rc::Rc;

/// A value the application can push onto the navigation stack.
pub trait Page: Clone + PartialEq + fmt::Debug + 'static {}

impl<T> Page for T where T: Clone + PartialEq + fmt::Debug + 'static {}

/// An element of an opaque path. The path itself only counts them.
pub trait PathElement: Clone + fmt::Debug {}

impl<T> PathElement for T where T: Clone + fmt::Debug {}

/// A type-erased page.
///
/// Cloning is a refcount bump. The concrete type name is kept for `Debug`
/// output only; the engine never inspects it.
#[derive(Clone)]
pub struct AnyPage {
    value: Rc<dyn Any>,
    debug: Rc<str>,
    type_name: &'static str,
}

impl AnyPage {
    pub fn new<P: Page>(page: P) -> Self {
        Self {
            debug: Rc::from(format!("{page:?}")),
            value: Rc::new(page),
            type_name: type_name::<P>(),
        }
    }

    /// Returns the wrapped page if it has type `P`.
    pub fn downcast_ref<P: Page>(&self) -> Option<&P> {
        self.value.downcast_ref::<P>()
    }

    pub fn is<P: Page>(&self) -> bool {
        self.value.is::<P>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for AnyPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnyPage({})", self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Screen {
        Inbox,
        Thread(u32),
    }

    #[test]
    fn test_downcast_to_original_type() {
        let erased = AnyPage::new(Screen::Thread(7));
        assert_eq!(erased.downcast_ref::<Screen>(), Some(&Screen::Thread(7)));
        assert!(erased.is::<Screen>());
    }

    #[test]
    fn test_downcast_to_wrong_type_is_none() {
        let erased = AnyPage::new(Screen::Inbox);
        assert!(erased.downcast_ref::<String>().is_none());
        assert!(!erased.is::<u32>());
    }

    #[test]
    fn test_clone_shares_value() {
        let erased = AnyPage::new("settings".to_string());
        let cloned = erased.clone();
        assert!(Rc::ptr_eq(&erased.value, &cloned.value));
    }

    #[test]
    fn test_debug_shows_wrapped_value() {
        let erased = AnyPage::new(Screen::Thread(3));
        assert_eq!(format!("{erased:?}"), "AnyPage(Thread(3))");
        assert!(erased.type_name().ends_with("Screen"));
    }
}
