//! # Observable Values
//!
//! A minimal synchronous publish/subscribe cell. Every mutation notifies all
//! subscribers before the mutating call returns.
//!
//! ```text
//! mutate(f) ──> f(&mut value) ──> release borrow ──> snapshot ──> cb1(&snap), cb2(&snap), ...
//! ```
//!
//! No borrow of the value is held while callbacks run, so a callback may read
//! or mutate this observable (or another one that points back here). When a
//! callback mutates the value, the nested notification reaches every
//! subscriber with the newer value and the outer delivery stops, so the last
//! value any subscriber sees is the current one.
//!
//! Single-threaded by construction: everything is `Rc`/`RefCell`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback<T>)>>,
}

trait Unsubscribe {
    fn unsubscribe(&self, id: u64);
}

impl<T> Unsubscribe for Subscribers<T> {
    fn unsubscribe(&self, id: u64) {
        self.entries.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
    }
}

/// A value that tells its subscribers whenever it changes.
pub struct Observable<T> {
    value: RefCell<T>,
    subscribers: Rc<Subscribers<T>>,
    generation: Cell<u64>,
    pending: Cell<bool>,
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: Rc::new(Subscribers {
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
            generation: Cell::new(0),
            pending: Cell::new(false),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Reads the current value without copying it.
    ///
    /// The closure must not mutate this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.value.borrow())
    }

    /// Replaces the value and notifies subscribers.
    pub fn set(&self, value: T) {
        self.mutate(|current| *current = value);
    }

    /// Mutates the value in place and notifies subscribers.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = {
            let mut value = self.value.borrow_mut();
            f(&mut *value)
        };
        self.notify();
        result
    }

    /// Mutates the value without notifying. Subscribers hear about it on the
    /// next [`flush`](Self::flush) or mutation.
    pub(crate) fn mutate_deferred<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut *self.value.borrow_mut());
        self.pending.set(true);
        result
    }

    /// Notifies subscribers if a deferred mutation has not been announced yet.
    pub(crate) fn flush(&self) {
        if self.pending.get() {
            self.notify();
        }
    }

    /// Registers `callback`. It stays registered until the returned
    /// [`Subscription`] is dropped or the observable itself goes away.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.subscribers.next_id.get();
        self.subscribers.next_id.set(id + 1);
        self.subscribers
            .entries
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let source: Weak<dyn Unsubscribe> = Rc::downgrade(&self.subscribers) as Weak<dyn Unsubscribe>;
        Subscription { id, source }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.entries.borrow().len()
    }

    fn notify(&self) {
        self.pending.set(false);
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        // Copy the callback list first: callbacks may subscribe or unsubscribe.
        let callbacks: Vec<Callback<T>> = self
            .subscribers
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        if callbacks.is_empty() {
            return;
        }

        let snapshot = self.get();
        for callback in callbacks {
            if self.generation.get() != generation {
                // A nested notify already delivered a newer value to everyone.
                return;
            }
            callback(&snapshot);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.entries.borrow().len())
            .finish()
    }
}

/// Keeps a callback registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    source: Weak<dyn Unsubscribe>,
}

impl Subscription {
    /// False once the observable it was registered on has been dropped.
    pub fn is_active(&self) -> bool {
        self.source.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.upgrade() {
            source.unsubscribe(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutate_notifies_with_new_value() {
        let counter = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = counter.subscribe(move |value| sink.borrow_mut().push(*value));

        counter.set(3);
        let returned = counter.mutate(|value| {
            *value += 1;
            *value * 10
        });

        assert_eq!(returned, 40);
        assert_eq!(*seen.borrow(), vec![3, 4]);
    }

    #[test]
    fn test_drop_subscription_unsubscribes() {
        let counter = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let sink = Rc::clone(&hits);
        let sub = counter.subscribe(move |_| sink.set(sink.get() + 1));

        counter.set(1);
        drop(sub);
        counter.set(2);

        assert_eq!(hits.get(), 1);
        assert_eq!(counter.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outlives_observable() {
        let counter = Observable::new(0);
        let sub = counter.subscribe(|_| {});
        assert!(sub.is_active());
        drop(counter);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_callback_may_mutate_source() {
        // Clamp to 10 from inside a subscriber; the nested notify must not panic.
        let value = Rc::new(Observable::new(0));
        let weak = Rc::downgrade(&value);
        let _sub = value.subscribe(move |current| {
            if *current > 10 {
                if let Some(value) = weak.upgrade() {
                    value.set(10);
                }
            }
        });

        value.set(42);
        assert_eq!(value.get(), 10);
    }

    #[test]
    fn test_later_subscriber_ends_on_current_value() {
        let value = Rc::new(Observable::new(0));
        let weak = Rc::downgrade(&value);
        let _clamp = value.subscribe(move |current| {
            if *current == 1 {
                if let Some(value) = weak.upgrade() {
                    value.set(10);
                }
            }
        });
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _recorder = value.subscribe(move |current| sink.borrow_mut().push(*current));

        value.set(1);

        assert_eq!(value.get(), 10);
        assert_eq!(*seen.borrow(), vec![10]);
    }

    #[test]
    fn test_deferred_mutation_notifies_once_on_flush() {
        let counter = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = counter.subscribe(move |value| sink.borrow_mut().push(*value));

        counter.mutate_deferred(|value| *value = 5);
        assert!(seen.borrow().is_empty());

        counter.flush();
        counter.flush();
        assert_eq!(*seen.borrow(), vec![5]);

        // A regular mutation announces pending changes too.
        counter.mutate_deferred(|value| *value += 1);
        counter.set(7);
        counter.flush();
        assert_eq!(*seen.borrow(), vec![5, 7]);
    }

    #[test]
    fn test_with_reads_without_clone() {
        let names = Observable::new(vec!["a".to_string()]);
        assert_eq!(names.with(|v| v.len()), 1);
    }
}
