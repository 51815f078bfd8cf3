// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection store: the two-way binding that decides which popover is shown.
//!
//! A [`Selection`] is a cheap, cloneable handle to one optional identifier.
//! The host application owns it and writes to it; the popover coordinator
//! subscribes to it and only writes back when the user taps the background.
//!
//! Observers run synchronously on the thread that calls [`Selection::set`], and only when the value changes.
//! Writes made from inside an observer are queued and applied in order once the current notification round ends,
//! so every observer sees every value.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tether_popover::selection::Selection;
//!
//! let selection: Selection<&str> = Selection::new(None);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! let _sub = selection.subscribe(move |v| log.borrow_mut().push(v.copied()));
//!
//! selection.set(Some("share"));
//! selection.set(Some("share")); // unchanged, no notification
//! selection.clear();
//! assert_eq!(*seen.borrow(), vec![Some("share"), None]);
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::rc::Rc;

/// Handle returned by [`Selection::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<K> = Box<dyn FnMut(Option<&K>)>;

struct Inner<K> {
    value: Option<K>,
    revision: u64,
    next_subscription: u64,
    observers: Vec<(SubscriptionId, Observer<K>)>,
    notifying: bool,
    queued: VecDeque<Option<K>>,
    // Ids of the observers checked out for the current notification round.
    checked_out: Vec<SubscriptionId>,
    // Unsubscribed while checked out; skipped for the rest of the round.
    cancelled: Vec<SubscriptionId>,
}

/// Shared, observable optional identifier.
///
/// Clones share the same value and observers.
pub struct Selection<K> {
    inner: Rc<RefCell<Inner<K>>>,
}

impl<K> Clone for Selection<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Debug> Debug for Selection<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Selection")
            .field("value", &inner.value)
            .field("revision", &inner.revision)
            .field("observers", &inner.observers.len())
            .finish_non_exhaustive()
    }
}

impl<K: Clone + PartialEq + 'static> Default for Selection<K> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<K: Clone + PartialEq + 'static> Selection<K> {
    /// Create a selection holding `initial`.
    pub fn new(initial: Option<K>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value: initial,
                revision: 0,
                next_subscription: 0,
                observers: Vec::new(),
                notifying: false,
                queued: VecDeque::new(),
                checked_out: Vec::new(),
                cancelled: Vec::new(),
            })),
        }
    }

    /// The current value.
    pub fn get(&self) -> Option<K> {
        self.inner.borrow().value.clone()
    }

    /// Returns true if something is selected.
    pub fn is_some(&self) -> bool {
        self.inner.borrow().value.is_some()
    }

    /// Number of value changes applied so far.
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    /// Clear the selection.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Replace the value and notify observers if it changed.
    ///
    /// Called from inside an observer, the write is queued until the current round of notifications finishes.
    pub fn set(&self, value: Option<K>) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                inner.queued.push_back(value);
                return;
            }
            if inner.value == value {
                return;
            }
            inner.value = value;
            inner.revision += 1;
            inner.notifying = true;
        }
        self.notify_until_settled();
    }

    fn notify_until_settled(&self) {
        loop {
            let (mut observers, current) = {
                let mut inner = self.inner.borrow_mut();
                let observers = core::mem::take(&mut inner.observers);
                inner.checked_out = observers.iter().map(|(id, _)| *id).collect();
                (observers, inner.value.clone())
            };
            for (id, observer) in &mut observers {
                if self.inner.borrow().cancelled.contains(id) {
                    continue;
                }
                observer(current.as_ref());
            }

            let cancelled = {
                let mut inner = self.inner.borrow_mut();
                inner.checked_out.clear();
                core::mem::take(&mut inner.cancelled)
            };
            let (kept, dropped): (Vec<_>, Vec<_>) = observers
                .into_iter()
                .partition(|(id, _)| !cancelled.contains(id));
            drop(dropped);

            let mut inner = self.inner.borrow_mut();
            // Observers added during the round go after the existing ones.
            let added = core::mem::replace(&mut inner.observers, kept);
            inner.observers.extend(added);

            let mut next = None;
            while let Some(value) = inner.queued.pop_front() {
                if inner.value != value {
                    next = Some(value);
                    break;
                }
            }
            match next {
                Some(value) => {
                    inner.value = value;
                    inner.revision += 1;
                }
                None => {
                    inner.notifying = false;
                    return;
                }
            }
        }
    }

    /// Register an observer called with each new value.
    pub fn subscribe(&self, observer: impl FnMut(Option<&K>) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns true if it was registered.
    ///
    /// Called during a notification round, the observer is not called again, even later in that round.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if let Some(i) = inner.observers.iter().position(|(sid, _)| *sid == id) {
            let removed = inner.observers.remove(i);
            // The observer may own captured handles; drop it with the store released.
            drop(inner);
            drop(removed);
            return true;
        }
        if inner.checked_out.contains(&id) && !inner.cancelled.contains(&id) {
            inner.cancelled.push(id);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(sel: &Selection<u32>) -> (SubscriptionId, Rc<RefCell<Vec<Option<u32>>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let id = sel.subscribe(move |v| log.borrow_mut().push(v.copied()));
        (id, seen)
    }

    #[test]
    fn notifies_only_on_change() {
        let sel = Selection::new(Some(1));
        let (_, seen) = recorder(&sel);
        sel.set(Some(1));
        sel.set(Some(2));
        sel.set(Some(2));
        sel.clear();
        sel.clear();
        assert_eq!(*seen.borrow(), vec![Some(2), None]);
        assert_eq!(sel.revision(), 2);
        assert_eq!(sel.get(), None);
    }

    #[test]
    fn clones_share_state() {
        let a: Selection<u32> = Selection::default();
        let b = a.clone();
        let (_, seen) = recorder(&a);
        b.set(Some(9));
        assert_eq!(a.get(), Some(9));
        assert!(a.is_some());
        assert_eq!(*seen.borrow(), vec![Some(9)]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let sel = Selection::new(None);
        let (id, seen) = recorder(&sel);
        sel.set(Some(1));
        assert!(sel.unsubscribe(id));
        assert!(!sel.unsubscribe(id));
        sel.set(Some(2));
        assert_eq!(*seen.borrow(), vec![Some(1)]);
    }

    // An observer that writes back is applied after the round, and every observer sees both values.
    #[test]
    fn reentrant_set_is_queued() {
        let sel: Selection<u32> = Selection::new(None);
        let writer = sel.clone();
        let _ = sel.subscribe(move |v| {
            if v == Some(&1) {
                writer.set(Some(2));
            }
        });
        let (_, seen) = recorder(&sel);
        sel.set(Some(1));
        assert_eq!(*seen.borrow(), vec![Some(1), Some(2)]);
        assert_eq!(sel.get(), Some(2));
        assert_eq!(sel.revision(), 2);
    }

    #[test]
    fn reentrant_write_of_same_value_is_dropped() {
        let sel: Selection<u32> = Selection::new(None);
        let writer = sel.clone();
        let _ = sel.subscribe(move |v| writer.set(v.copied()));
        let (_, seen) = recorder(&sel);
        sel.set(Some(5));
        assert_eq!(*seen.borrow(), vec![Some(5)]);
    }

    #[test]
    fn unsubscribe_during_notification() {
        let sel: Selection<u32> = Selection::new(None);
        let (target, seen) = recorder(&sel);
        let handle = sel.clone();
        let _ = sel.subscribe(move |_| {
            let _ = handle.unsubscribe(target);
        });
        sel.set(Some(1));
        sel.set(Some(2));
        assert_eq!(*seen.borrow(), vec![Some(1)]);
    }

    // Unsubscribing an observer that comes later in the round stops it from running in that round.
    #[test]
    fn unsubscribe_later_observer_during_notification() {
        let sel: Selection<u32> = Selection::new(None);
        let handle = sel.clone();
        let target = Rc::new(RefCell::new(None));
        let returned = Rc::new(RefCell::new(Vec::new()));
        let (target_ref, returned_log) = (target.clone(), returned.clone());
        let _ = sel.subscribe(move |_| {
            if let Some(id) = *target_ref.borrow() {
                returned_log.borrow_mut().push(handle.unsubscribe(id));
            }
        });
        let (id, seen) = recorder(&sel);
        *target.borrow_mut() = Some(id);
        sel.set(Some(1));
        sel.set(Some(2));
        assert!(seen.borrow().is_empty(), "unsubscribed observer must not run");
        assert_eq!(*returned.borrow(), vec![true, false]);
    }

    #[test]
    fn stale_unsubscribe_during_notification_is_false() {
        let sel: Selection<u32> = Selection::new(None);
        let (stale, _) = recorder(&sel);
        assert!(sel.unsubscribe(stale));
        let handle = sel.clone();
        let result = Rc::new(RefCell::new(None));
        let result_log = result.clone();
        let _ = sel.subscribe(move |_| {
            *result_log.borrow_mut() = Some(handle.unsubscribe(stale));
        });
        sel.set(Some(1));
        assert_eq!(*result.borrow(), Some(false));
    }

    #[test]
    fn subscribe_during_notification() {
        let sel: Selection<u32> = Selection::new(None);
        let late = Rc::new(RefCell::new(Vec::new()));
        let handle = sel.clone();
        let late_log = late.clone();
        let mut added = false;
        let _ = sel.subscribe(move |_| {
            if !added {
                added = true;
                let log = late_log.clone();
                let _ = handle.subscribe(move |v| log.borrow_mut().push(v.copied()));
            }
        });
        sel.set(Some(1));
        sel.set(Some(2));
        assert_eq!(*late.borrow(), vec![Some(2)]);
    }
}
