// SPDX-License-Identifier: MIT OR Apache-2.0
//! Navigation requests handed from background callbacks to the UI context.
//!
//! Playback status callbacks may run outside the context that is allowed to
//! change screens. They push a [NavigationRequest] into a queue with a
//! [NavigationSender]; the UI loop drains the [NavigationQueue] and applies
//! each request to its [Navigator].

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A screen route, e.g. `/onboarding`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(Arc<str>);

impl Route {
    /// Create a route.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    /// The route path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The application's router.
pub trait Navigator {
    /// Replace the current screen with `route`, discarding it from history.
    fn replace(&mut self, route: &Route);
}

/// A request for the UI context to change screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// See [Navigator::replace].
    Replace(Route),
}

impl NavigationRequest {
    /// Apply this request to `navigator`.
    pub fn apply(&self, navigator: &mut impl Navigator) {
        match self {
            Self::Replace(route) => navigator.replace(route),
        }
    }
}

/// Errors returned when handing a request to the UI context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The UI side dropped its [NavigationQueue].
    #[error("Navigation queue closed, dropped {0:?}")]
    QueueClosed(NavigationRequest),
}

/// Sending half of the navigation queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NavigationSender {
    sender: UnboundedSender<NavigationRequest>,
}

impl NavigationSender {
    /// Queue a request for the UI context.
    pub fn send(&self, request: NavigationRequest) -> Result<(), NavigationError> {
        self.sender
            .send(request)
            .map_err(|e| NavigationError::QueueClosed(e.0))
    }

    /// Queue a [NavigationRequest::Replace].
    pub fn replace(&self, route: Route) -> Result<(), NavigationError> {
        self.send(NavigationRequest::Replace(route))
    }

    /// Returns `true` if the UI side is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving half of the navigation queue, owned by the UI loop.
#[derive(Debug)]
pub struct NavigationQueue {
    receiver: UnboundedReceiver<NavigationRequest>,
}

impl NavigationQueue {
    /// Take the next pending request without waiting.
    pub fn try_next(&mut self) -> Option<NavigationRequest> {
        self.receiver.try_recv().ok()
    }

    /// Wait for the next request. Returns `None` once every sender is dropped.
    pub async fn next(&mut self) -> Option<NavigationRequest> {
        self.receiver.recv().await
    }

    /// Apply every pending request to `navigator`, in order. Returns how many were applied.
    ///
    /// Call this from the UI context, e.g. once per frame.
    pub fn drain(&mut self, navigator: &mut impl Navigator) -> usize {
        let mut applied = 0;
        while let Some(request) = self.try_next() {
            log::debug!("Applying {:?}", request);
            request.apply(navigator);
            applied += 1;
        }
        applied
    }
}

/// Create a connected sender/queue pair.
pub fn channel() -> (NavigationSender, NavigationQueue) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (NavigationSender { sender }, NavigationQueue { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNavigator {
        replaced: Vec<Route>,
    }

    impl Navigator for RecordingNavigator {
        fn replace(&mut self, route: &Route) {
            self.replaced.push(route.clone());
        }
    }

    #[test]
    fn test_drain_applies_in_order() {
        let (sender, mut queue) = channel();
        sender.replace(Route::new("/a")).unwrap();
        sender.clone().replace(Route::new("/b")).unwrap();

        let mut navigator = RecordingNavigator::default();
        assert_eq!(queue.drain(&mut navigator), 2);
        assert_eq!(navigator.replaced, vec![Route::new("/a"), Route::new("/b")]);
        assert_eq!(queue.drain(&mut navigator), 0);
    }

    #[test]
    fn test_send_after_queue_dropped() {
        let (sender, queue) = channel();
        drop(queue);

        assert!(sender.is_closed());
        let err = sender.replace(Route::new("/home")).unwrap_err();
        assert_eq!(
            err,
            NavigationError::QueueClosed(NavigationRequest::Replace(Route::new("/home")))
        );
    }

    #[test]
    fn test_next_ends_when_senders_dropped() {
        let (sender, mut queue) = channel();
        sender.replace(Route::new("/home")).unwrap();
        drop(sender);

        pollster::block_on(async {
            assert_eq!(
                queue.next().await,
                Some(NavigationRequest::Replace(Route::new("/home")))
            );
            assert_eq!(queue.next().await, None);
        });
    }
}
