#![forbid(unsafe_code)]

//! Subscriber registry shared by the three notification channels.
//!
//! Each channel stores its callbacks as `Weak` references; the strong `Rc`
//! lives inside the [`Subscription`] guard handed back to the caller.
//! Dropping the guard is the unsubscribe operation, so a handler can never
//! be "unsubscribed twice" and duplicate handlers are unambiguous (each
//! registration has its own guard). Dead entries are pruned lazily the next
//! time the channel fires.

use std::rc::{Rc, Weak};

/// A subscriber callback stored as a strong `Rc` inside the guard, handed
/// to the channel as `Weak`.
type CallbackRc<A> = Rc<dyn Fn(&A)>;
type CallbackWeak<A> = Weak<dyn Fn(&A)>;

/// Subscribers of a single notification channel, in registration order.
pub(crate) struct SubscriberSet<A> {
    entries: Vec<CallbackWeak<A>>,
}

// `new` and `len` stay unbounded so callers generic over any `A` (the
// `Debug` impl on the list, for one) can use them; only storing and firing
// callbacks needs `A: 'static`.
impl<A> SubscriberSet<A> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of registered entries, including dead ones not yet pruned.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<A: 'static> SubscriberSet<A> {
    /// Register a callback. The channel keeps only a `Weak`; the returned
    /// guard owns the strong reference.
    pub(crate) fn insert(&mut self, callback: impl Fn(&A) + 'static) -> Subscription {
        let strong: CallbackRc<A> = Rc::new(callback);
        self.entries.push(Rc::downgrade(&strong));
        // `Rc<dyn Fn(&A)>` cannot coerce to `Rc<dyn Any>` directly, so the
        // guard type-erases it behind a `Box<dyn Any>` instead.
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Prune dead entries and return the live callbacks in registration
    /// order, ready to be invoked outside any interior borrow.
    pub(crate) fn live(&mut self) -> Vec<CallbackRc<A>> {
        self.entries.retain(|w| w.strong_count() > 0);
        self.entries.iter().filter_map(Weak::upgrade).collect()
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` causes the associated callback to become
/// unreachable: the strong `Rc` is dropped, so the `Weak` in the channel's
/// subscriber list fails to upgrade on the next emission and is pruned.
#[must_use = "dropping the Subscription immediately unsubscribes"]
pub struct Subscription {
    /// Type-erased strong reference keeping the callback `Rc` alive.
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn live_preserves_registration_order() {
        let mut set: SubscriberSet<u32> = SubscriberSet::new();
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _s1 = set.insert(move |_| l1.borrow_mut().push('A'));
        let l2 = Rc::clone(&log);
        let _s2 = set.insert(move |_| l2.borrow_mut().push('B'));

        for cb in set.live() {
            cb(&0);
        }
        assert_eq!(*log.borrow(), vec!['A', 'B']);
    }

    #[test]
    fn dropped_guard_is_pruned_on_next_live() {
        let mut set: SubscriberSet<u32> = SubscriberSet::new();
        let count = Rc::new(Cell::new(0u32));

        let c = Rc::clone(&count);
        let sub = set.insert(move |_| c.set(c.get() + 1));
        assert_eq!(set.len(), 1);

        drop(sub);
        // Dead entry still counted until the next emission prunes it.
        assert_eq!(set.len(), 1);

        assert!(set.live().is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn debug_format() {
        let mut set: SubscriberSet<()> = SubscriberSet::new();
        let sub = set.insert(|_| {});
        assert!(format!("{sub:?}").contains("Subscription"));
    }
}
