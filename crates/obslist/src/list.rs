#![forbid(unsafe_code)]

//! Observable ordered list with synchronous change notification.
//!
//! # Design
//!
//! [`ObservableList<T>`] keeps an ordered `Vec<T>` in shared,
//! reference-counted storage (`Rc<RefCell<..>>`) alongside three independent
//! subscriber channels (ItemAdded, ItemRemoved, Cleared). Each successful
//! mutation notifies the matching channel synchronously: after the sequence
//! change is durable, before the mutating call returns, in subscriber
//! registration order.
//!
//! # Performance
//!
//! | Operation        | Complexity                    |
//! |------------------|-------------------------------|
//! | `push()`         | O(1) + O(S) notification      |
//! | `len()` / `get()`| O(1)                          |
//! | `remove()`       | O(n) + O(S) notification      |
//! | `contains()`     | O(n)                          |
//! | `clear()`        | O(n) drop + O(S) notification |
//! | `iter()`         | O(n) snapshot                 |
//!
//! where S is the subscriber count of the fired channel.
//!
//! # Reentrancy
//!
//! Callbacks run outside the interior borrow, so a handler may call back
//! into the same list. The results are only as well-defined as direct
//! recursive mutation would be; nothing guards against it. Likewise the
//! snapshot taken by an in-flight [`Iter`] is fixed when `iter()` is
//! called and does not observe later mutation.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::error::ListError;
use crate::subscription::{SubscriberSet, Subscription};

/// Shared interior for [`ObservableList<T>`].
struct ListInner<T> {
    items: Vec<T>,
    added: SubscriberSet<T>,
    removed: SubscriberSet<T>,
    cleared: SubscriberSet<()>,
}

/// An ordered, duplicate-permitting list that notifies subscribers
/// synchronously on add, remove, and clear.
///
/// Cloning an `ObservableList` creates a new handle to the **same** inner
/// state — both handles see the same elements and share subscribers.
///
/// # Invariants
///
/// 1. Element order is insertion order; removal excises in place and shifts
///    later elements down one position.
/// 2. `push` fires exactly one ItemAdded per call; `remove` fires exactly
///    one ItemRemoved per successful removal and none otherwise; `clear`
///    fires exactly one Cleared per call, even on an empty list.
/// 3. Subscribers of the fired channel are invoked in registration order.
/// 4. Dead subscribers (dropped [`Subscription`] guards) are pruned lazily
///    on the next emission of their channel.
pub struct ObservableList<T> {
    inner: Rc<RefCell<ListInner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ObservableList")
            .field("items", &inner.items)
            .field("added_subscribers", &inner.added.len())
            .field("removed_subscribers", &inner.removed.len())
            .field("cleared_subscribers", &inner.cleared.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> ObservableList<T> {
    /// Create an empty list with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ListInner {
                items: Vec::new(),
                added: SubscriberSet::new(),
                removed: SubscriberSet::new(),
                cleared: SubscriberSet::new(),
            })),
        }
    }

    /// Create a list holding a snapshot of `source`, in order.
    ///
    /// An absent (`None`) source is an error; an empty source is a valid
    /// empty list. The guard lives here rather than with callers so the
    /// distinction between "no sequence" and "no elements" is checked in
    /// exactly one place. Construction fires no events.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidArgument`] when `source` is `None`.
    pub fn from_source<I>(source: Option<I>) -> Result<Self, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        match source {
            Some(items) => Ok(items.into_iter().collect()),
            None => Err(ListError::InvalidArgument("source sequence is absent")),
        }
    }

    /// Number of elements currently present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Whether the list currently holds no elements. Derived from [`len`],
    /// not stored separately.
    ///
    /// [`len`]: Self::len
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any element equals `item` under `T`'s `PartialEq`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.inner.borrow().items.contains(item)
    }

    /// Clone of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] when `index >= len()`. Negative
    /// indices are unrepresentable.
    pub fn get(&self, index: usize) -> Result<T, ListError> {
        let inner = self.inner.borrow();
        inner
            .items
            .get(index)
            .cloned()
            .ok_or(ListError::IndexOutOfRange {
                index,
                len: inner.items.len(),
            })
    }

    /// Append `item` to the end unconditionally; duplicates and
    /// `None`-valued elements (for `T = Option<_>`) are appended like any
    /// other value.
    ///
    /// Fires exactly one ItemAdded notification carrying the added item,
    /// after it is part of the sequence and before `push` returns.
    pub fn push(&self, item: T) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            inner.items.push(item.clone());
            trace!(len = inner.items.len(), "item added");
            inner.added.live()
        };
        for cb in &callbacks {
            cb(&item);
        }
    }

    /// Remove the first element equal to `item`, preserving the order of
    /// the remaining elements. Returns whether a removal happened.
    ///
    /// Fires exactly one ItemRemoved notification carrying the removed
    /// element, only when removal occurred, after excision and before
    /// `remove` returns. No match means no event and no error.
    pub fn remove(&self, item: &T) -> bool {
        let (removed, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            match inner.items.iter().position(|x| x == item) {
                Some(pos) => {
                    let removed = inner.items.remove(pos);
                    trace!(len = inner.items.len(), "item removed");
                    (Some(removed), inner.removed.live())
                }
                None => (None, Vec::new()),
            }
        };
        match removed {
            Some(removed) => {
                for cb in &callbacks {
                    cb(&removed);
                }
                true
            }
            None => false,
        }
    }

    /// Remove all elements unconditionally.
    ///
    /// Always fires exactly one Cleared notification (no payload), even when
    /// the list was already empty, after the sequence is empty and before
    /// `clear` returns.
    pub fn clear(&self) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            inner.items.clear();
            trace!("cleared");
            inner.cleared.live()
        };
        for cb in &callbacks {
            cb(&());
        }
    }

    /// Lazy, restartable iterator over a snapshot of the elements taken
    /// when `iter()` is called. Mutating the list afterwards affects the
    /// list, not the in-flight snapshot.
    #[must_use]
    pub fn iter(&self) -> Iter<T> {
        Iter {
            items: self.to_vec().into_iter(),
        }
    }

    /// Owned snapshot of all current elements, in order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.borrow().items.clone()
    }

    /// Clone all current elements into `dest[offset..offset + len()]`.
    /// Nothing is written on failure.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] when `offset > dest.len()`;
    /// [`ListError::InvalidArgument`] when the space past `offset` cannot
    /// hold all `len()` elements. A negative offset is unrepresentable.
    pub fn copy_to(&self, dest: &mut [T], offset: usize) -> Result<(), ListError> {
        let inner = self.inner.borrow();
        if offset > dest.len() {
            return Err(ListError::IndexOutOfRange {
                index: offset,
                len: dest.len(),
            });
        }
        if dest.len() - offset < inner.items.len() {
            return Err(ListError::InvalidArgument(
                "destination cannot hold the list contents",
            ));
        }
        for (slot, item) in dest[offset..].iter_mut().zip(&inner.items) {
            *slot = item.clone();
        }
        Ok(())
    }

    /// Subscribe to ItemAdded. The callback receives each added item.
    ///
    /// Returns a [`Subscription`] guard; dropping it unsubscribes (the
    /// callback will not run after drop, though its slot may linger in the
    /// channel until the next emission prunes it).
    pub fn on_item_added(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.borrow_mut().added.insert(callback)
    }

    /// Subscribe to ItemRemoved. The callback receives each removed item.
    pub fn on_item_removed(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.borrow_mut().removed.insert(callback)
    }

    /// Subscribe to Cleared. The callback carries no payload.
    pub fn on_cleared(&self, callback: impl Fn() + 'static) -> Subscription {
        self.inner
            .borrow_mut()
            .cleared
            .insert(move |_: &()| callback())
    }

    /// Registered ItemAdded subscribers, including dead entries not yet
    /// pruned.
    #[must_use]
    pub fn added_subscriber_count(&self) -> usize {
        self.inner.borrow().added.len()
    }

    /// Registered ItemRemoved subscribers, including dead entries not yet
    /// pruned.
    #[must_use]
    pub fn removed_subscriber_count(&self) -> usize {
        self.inner.borrow().removed.len()
    }

    /// Registered Cleared subscribers, including dead entries not yet
    /// pruned.
    #[must_use]
    pub fn cleared_subscriber_count(&self) -> usize {
        self.inner.borrow().cleared.len()
    }
}

impl<T: Clone + PartialEq + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Construction from an iterator fires no events: no subscriber can exist
// before the list does.
impl<T: Clone + PartialEq + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let list = Self::new();
        list.inner.borrow_mut().items.extend(iter);
        list
    }
}

impl<T: Clone + PartialEq + 'static> IntoIterator for &ObservableList<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

/// Snapshot iterator over an [`ObservableList`]'s elements.
///
/// Holds clones taken when [`ObservableList::iter`] was called; calling
/// `iter()` again restarts from a fresh snapshot.
#[derive(Debug)]
pub struct Iter<T> {
    items: std::vec::IntoIter<T>,
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<T> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
