#![forbid(unsafe_code)]

//! Ordered list with synchronous change notification.
//!
//! # Role
//! [`ObservableList<T>`] is a minimal primitive for consumers who need to
//! react to append/remove/clear events on a sequence. It composes a plain
//! ordered `Vec<T>` with three independent notification channels:
//!
//! - **ItemAdded**: fired by [`ObservableList::push`] with the added item.
//! - **ItemRemoved**: fired by [`ObservableList::remove`] with the removed
//!   item, only when a removal actually happened.
//! - **Cleared**: fired by [`ObservableList::clear`] unconditionally, with
//!   no payload.
//!
//! Handlers run synchronously on the caller's stack, after the mutation is
//! durable and before the mutating call returns. Subscribing returns a
//! [`Subscription`] guard; dropping the guard unsubscribes.
//!
//! # What this is not
//! Not a general list replacement: no indexed insertion or removal, no batch
//! notifications, no internal locking. Handles are `!Send + !Sync`; callers
//! needing cross-thread access must wrap the whole list externally.
//!
//! # Example
//! ```
//! use obslist::ObservableList;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let list = ObservableList::new();
//! let last_added = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&last_added);
//! let _sub = list.on_item_added(move |n: &i32| sink.set(*n));
//!
//! list.push(7);
//! assert_eq!(last_added.get(), 7);
//! assert_eq!(list.len(), 1);
//! ```

pub mod error;
pub mod list;
pub mod subscription;

pub use error::ListError;
pub use list::{Iter, ObservableList};
pub use subscription::Subscription;
