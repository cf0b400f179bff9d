// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reactive values that notify listeners when they change.
//!
//! Signals are how state owned by the shell (the theme, for one) propagates
//! to every screen that reads it: a screen registers a [Listener] and
//! re-renders when it fires, instead of polling a global.

use std::sync::Arc;

/// Contains the [state::StateSignal] implementation.
pub mod state;

/// A callback invoked with the new value every time a signal changes.
pub type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifies a registered listener so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Base trait for all signals.
pub trait Signal<T: Clone + Send + Sync + 'static> {
    /// Get a snapshot of the current value.
    fn get(&self) -> T;

    /// Replace the value and notify listeners.
    fn set_value(&self, value: T);

    /// Alias for [Signal::set_value].
    fn set(&self, value: T) {
        self.set_value(value);
    }

    /// Register a listener. It stays registered until [Signal::unlisten] is called.
    fn listen(&self, listener: Listener<T>) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);

    /// Invoke every listener with the current value.
    fn notify(&self);
}
