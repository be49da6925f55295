//! Change notification for the navigator and the pressure history.
//!
//! A `Subscribers` list holds plain callback handles. Delivery is
//! synchronous on the calling thread and fires at most once per mutation.
//! Callbacks receive no payload; they re-read current state on wake-up.
//! A callback must not mutate the object that is notifying it.

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
pub type SubscriberId = u64;

type Callback = Box<dyn FnMut()>;

/// Ordered list of change-notification callbacks.
#[derive(Default)]
pub struct Subscribers {
    next_id: SubscriberId,
    entries: Vec<(SubscriberId, Callback)>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; returns the handle needed to remove it.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Remove a previously registered callback.
    /// Returns false if the handle is unknown (already removed).
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Invoke every callback once, in registration order.
    pub fn notify(&mut self) {
        for (_, callback) in &mut self.entries {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_notify_reaches_every_subscriber() {
        let mut subscribers = Subscribers::new();
        let count = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let count = Rc::clone(&count);
            subscribers.subscribe(move || count.set(count.get() + 1));
        }

        subscribers.notify();
        assert_eq!(count.get(), 3);

        subscribers.notify();
        assert_eq!(count.get(), 6);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut subscribers = Subscribers::new();
        let count = Rc::new(Cell::new(0));

        let id = {
            let count = Rc::clone(&count);
            subscribers.subscribe(move || count.set(count.get() + 1))
        };

        assert!(subscribers.unsubscribe(id));
        assert!(!subscribers.unsubscribe(id));

        subscribers.notify();
        assert_eq!(count.get(), 0);
        assert!(subscribers.is_empty());
    }

    #[test]
    fn test_handles_stay_distinct() {
        let mut subscribers = Subscribers::new();
        let a = subscribers.subscribe(|| {});
        let b = subscribers.subscribe(|| {});
        assert_ne!(a, b);

        assert!(subscribers.unsubscribe(a));
        assert_eq!(subscribers.len(), 1);
        assert!(subscribers.unsubscribe(b));
    }
}
