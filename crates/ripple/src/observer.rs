//! Per-container publish/subscribe over mutation actions.
//!
//! An [`Observer`] keeps an ordered list of subscriber records in a
//! [`RecordStore`] and a running union of their action masks. Notification
//! short-circuits on that union, so a vector whose subscribers ignore an
//! action pays one bit test for it.

use std::fmt;

use crate::action::ActionSet;
use crate::error::VectorError;
use crate::event::Event;
use crate::store::RecordStore;

/// Handle identifying one subscriber within one [`Observer`].
///
/// Returned by `subscribe` and used for `extend_subscription` and
/// `unsubscribe`. Handles are never reused within an observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Boxed subscriber callback.
///
/// Captured state replaces the opaque `extra` pointer of C-style observer
/// designs; the closure owns whatever it needs and frees it on drop.
pub type EventFn<T> = Box<dyn FnMut(&Event<'_, T>)>;

/// One subscriber record: handle, action mask, callback.
struct Subscriber<T> {
    id: SubscriptionId,
    mask: ActionSet,
    callback: EventFn<T>,
}

/// Publish/subscribe dispatcher for one container's mutation events.
///
/// Owned by the [`Vector`](crate::Vector) that notifies through it, and
/// created lazily on the first subscription. Usable standalone as well.
pub struct Observer<T> {
    /// Union of every subscriber's mask; the `notify` fast path.
    watched: ActionSet,
    subscribers: RecordStore<Subscriber<T>>,
    next_id: u64,
}

impl<T> Observer<T> {
    /// Create an observer with no subscribers.
    pub fn new() -> Self {
        Self {
            watched: ActionSet::EMPTY,
            subscribers: RecordStore::new(),
            next_id: 1,
        }
    }

    /// Register `callback` for every action in `mask`.
    ///
    /// An empty mask is rejected. Returns the handle for later mask
    /// changes. To widen an existing subscription instead of registering
    /// the callback a second time, use [`Observer::extend_subscription`].
    pub fn subscribe<F>(&mut self, mask: ActionSet, callback: F) -> Result<SubscriptionId, VectorError>
    where
        F: FnMut(&Event<'_, T>) + 'static,
    {
        if mask.is_empty() {
            return Err(VectorError::EmptyActionSet);
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            mask,
            callback: Box::new(callback),
        });
        self.watched |= mask;
        Ok(id)
    }

    /// OR `mask` into the subscription's action set.
    ///
    /// Returns the union mask now in effect for the subscriber.
    pub fn extend_subscription(
        &mut self,
        id: SubscriptionId,
        mask: ActionSet,
    ) -> Result<ActionSet, VectorError> {
        let sub = self
            .subscribers
            .iter_mut()
            .find(|sub| sub.id == id)
            .ok_or(VectorError::UnknownSubscription(id))?;
        sub.mask = sub.mask.union(mask);
        let merged = sub.mask;
        self.watched |= mask;
        Ok(merged)
    }

    /// Clear the bits of `mask` from the subscription.
    ///
    /// When the remaining mask becomes empty the record is removed and the
    /// callback (with its captured state) is dropped. Returns the mask
    /// still in effect, empty on full removal.
    pub fn unsubscribe(
        &mut self,
        id: SubscriptionId,
        mask: ActionSet,
    ) -> Result<ActionSet, VectorError> {
        let index = self
            .subscribers
            .iter()
            .position(|sub| sub.id == id)
            .ok_or(VectorError::UnknownSubscription(id))?;
        let remaining = {
            let sub = self.subscribers.get_mut(index).expect("index from position");
            sub.mask = sub.mask.difference(mask);
            sub.mask
        };
        if remaining.is_empty() {
            self.subscribers.erase_at(index);
        }
        self.recompute_watched();
        Ok(remaining)
    }

    /// Deliver `event` to every subscriber whose mask contains its action.
    ///
    /// Returns the number of callbacks invoked. When no subscriber watches
    /// the action, returns 0 without scanning the subscriber list.
    pub fn notify(&mut self, event: &Event<'_, T>) -> usize {
        let action = event.action();
        if !self.watched.contains(action) {
            return 0;
        }
        let mut invoked = 0;
        for sub in self.subscribers.iter_mut() {
            if sub.mask.contains(action) {
                (sub.callback)(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Union of all subscriber masks.
    pub fn watched(&self) -> ActionSet {
        self.watched
    }

    /// Number of subscriber records.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if no subscriber is registered.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    fn recompute_watched(&mut self) {
        self.watched = self
            .subscribers
            .iter()
            .fold(ActionSet::EMPTY, |acc, sub| acc.union(sub.mask));
    }
}

impl<T> Default for Observer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("watched", &self.watched)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
