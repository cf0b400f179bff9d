// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::signal::{Listener, ListenerId, Signal};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Simple signal implementation based on [Arc] and [RwLock] to get/set a value and notify listeners when it changes.
///
/// You can also mutate the inner value, but only in a set scope via [StateSignal::mutate].
/// Clones share the value and the listener list.
///
/// Listeners run after the lock is released, so a listener may read the signal
/// (or register further listeners) without deadlocking.
pub struct StateSignal<T: 'static> {
    value: Arc<RwLock<T>>,
    listeners: Arc<RwLock<Vec<(ListenerId, Listener<T>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<T: Clone + Send + Sync + 'static> StateSignal<T> {
    /// Creates a new signal with the given value.
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            listeners: Arc::new(RwLock::new(Vec::with_capacity(1))),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Mutate the inner value in a set scope. This scope is needed in order to notify listeners.
    pub fn mutate(&self, op: impl FnOnce(&mut T)) {
        op(&mut self.value.write().unwrap_or_else(PoisonError::into_inner));
        self.notify();
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> StateSignal<T> {
    /// Mutate the inner value, notifying listeners only if it actually changed.
    ///
    /// Returns `true` if the value changed.
    pub fn mutate_if_changed(&self, op: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            let before = value.clone();
            op(&mut value);
            *value != before
        };

        if changed {
            self.notify();
        }
        changed
    }
}

impl<T: Clone + Send + Sync + 'static> Signal<T> for StateSignal<T> {
    fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_value(&self, value: T) {
        self.mutate(move |old| *old = value);
    }

    fn listen(&self, listener: Listener<T>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }

    fn notify(&self) {
        let value = self.get();
        let listeners: Vec<Listener<T>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&value);
        }
    }
}

impl<T: 'static> Clone for StateSignal<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            listeners: self.listeners.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_set_notifies_listeners() {
        let signal = StateSignal::new(1);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        signal.listen(Arc::new(move |v: &i32| sink.lock().unwrap().push(*v)));

        signal.set(2);
        signal.mutate(|v| *v += 10);

        assert_eq!(signal.get(), 12);
        assert_eq!(*seen.lock().unwrap(), vec![2, 12]);
    }

    #[test]
    fn test_unlisten() {
        let signal = StateSignal::new(0);
        let calls = Arc::new(Mutex::new(0));

        let counter = calls.clone();
        let id = signal.listen(Arc::new(move |_: &i32| *counter.lock().unwrap() += 1));
        signal.set(1);
        signal.unlisten(id);
        signal.set(2);

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_mutate_if_changed_skips_noop() {
        let signal = StateSignal::new("a".to_string());
        let calls = Arc::new(Mutex::new(0));

        let counter = calls.clone();
        signal.listen(Arc::new(move |_: &String| *counter.lock().unwrap() += 1));

        assert!(!signal.mutate_if_changed(|v| *v = "a".into()));
        assert!(signal.mutate_if_changed(|v| *v = "b".into()));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let signal = StateSignal::new(5);
        let other = signal.clone();
        other.set(6);
        assert_eq!(signal.get(), 6);
    }

    #[test]
    fn test_listener_can_read_signal() {
        let signal = StateSignal::new(0);
        let observed = Arc::new(Mutex::new(None));

        let reader = signal.clone();
        let sink = observed.clone();
        signal.listen(Arc::new(move |_: &i32| {
            *sink.lock().unwrap() = Some(reader.get());
        }));

        signal.set(3);
        assert_eq!(*observed.lock().unwrap(), Some(3));
    }
}
