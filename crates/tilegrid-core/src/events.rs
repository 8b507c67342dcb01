//! Cell-changed notification.
//!
//! Every [`Grid`](crate::Grid) owns its own [`Subscribers`] list; two grids
//! never share subscribers, even when they hold the same payload type.
//! Delivery is synchronous and happens in subscription order before the
//! triggering `set_value` returns.

use std::fmt;

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(i32, i32, &T)>;

/// An ordered list of cell-changed callbacks.
///
/// Callbacks receive `(x, y, new_value)`. They are handed the value only,
/// never the grid, so a callback cannot mutate the grid it observes.
pub struct Subscribers<T> {
    entries: Vec<(SubscriptionId, Callback<T>)>,
    /// Monotonically increasing; ids are never reused.
    next_id: u64,
}

impl<T> Subscribers<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Register a callback and return its id.
    pub fn subscribe(&mut self, callback: impl FnMut(i32, i32, &T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(eid, _)| *eid != id);
        self.entries.len() != before
    }

    /// Deliver `(x, y, value)` to every current subscriber.
    pub fn notify(&mut self, x: i32, y: i32, value: &T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(x, y, value);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.entries.len())
            .finish()
    }
}
