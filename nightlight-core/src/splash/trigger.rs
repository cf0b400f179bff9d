// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt;

use crate::config::SplashConfig;
use crate::navigation::{NavigationSender, Route};
use crate::splash::PlaybackProgress;

/// Latch state of a [PlaybackNavigationTrigger]. Never goes back from `Fired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    /// Waiting for a firing snapshot.
    #[default]
    NotFired,
    /// Navigation was requested.
    Fired,
}

impl TriggerState {
    /// Evaluate one snapshot. Returns the next state and why it fired, if it did.
    pub fn next(self, progress: &PlaybackProgress, overlap_ms: u64) -> (Self, Option<FireReason>) {
        if self == Self::Fired || !progress.is_loaded {
            return (self, None);
        }

        if let Some(fade_start) = progress.fade_start(overlap_ms) {
            if progress.position_millis >= fade_start {
                return (Self::Fired, Some(FireReason::OverlapWindow));
            }
        }

        if progress.did_just_finish {
            return (Self::Fired, Some(FireReason::PlaybackFinished));
        }

        (self, None)
    }
}

/// Why a [PlaybackNavigationTrigger] fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireReason {
    /// Playback entered the overlap window before the end of the media.
    OverlapWindow,
    /// The media reported its natural end.
    PlaybackFinished,
}

impl fmt::Display for FireReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlapWindow => f.write_str("overlap window reached"),
            Self::PlaybackFinished => f.write_str("playback finished"),
        }
    }
}

/// Navigates away from the splash screen exactly once, driven by playback status.
///
/// Feed every status tick to [PlaybackNavigationTrigger::on_playback_status].
/// The first loaded tick at or past `duration - overlap` fires; media no longer
/// than the overlap fires on its end-of-media tick instead. Firing queues a
/// single [crate::navigation::NavigationRequest::Replace] for the UI context.
///
/// Dropping the trigger before it fires cancels nothing, since nothing is pending.
#[derive(Debug)]
pub struct PlaybackNavigationTrigger {
    state: TriggerState,
    overlap_ms: u64,
    destination: Route,
    sender: NavigationSender,
}

impl PlaybackNavigationTrigger {
    /// Create an unfired trigger navigating through `sender`.
    pub fn new(sender: NavigationSender, config: &SplashConfig) -> Self {
        Self {
            state: TriggerState::NotFired,
            overlap_ms: config.overlap_ms,
            destination: config.destination.clone(),
            sender,
        }
    }

    /// Handle one playback status tick. Returns why it fired, on the tick that fires.
    pub fn on_playback_status(&mut self, progress: &PlaybackProgress) -> Option<FireReason> {
        let (state, reason) = self.state.next(progress, self.overlap_ms);
        self.state = state;

        let reason = reason?;
        log::debug!("Splash navigating to '{}': {}", self.destination, reason);

        // The latch is already set; a closed queue means the screen is gone.
        if let Err(e) = self.sender.replace(self.destination.clone()) {
            log::warn!("Splash navigation not delivered: {}", e);
        }

        Some(reason)
    }

    /// The current latch state.
    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Returns `true` once navigation was requested.
    pub fn has_fired(&self) -> bool {
        self.state == TriggerState::Fired
    }

    /// Milliseconds before the end of the media at which navigation fires.
    pub fn overlap_ms(&self) -> u64 {
        self.overlap_ms
    }

    /// The route navigated to.
    pub fn destination(&self) -> &Route {
        &self.destination
    }

    /// Wrap the trigger into a status callback for a media engine.
    pub fn into_callback(mut self) -> impl FnMut(&PlaybackProgress) + Send + 'static {
        move |progress| {
            self.on_playback_status(progress);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{self, NavigationQueue, NavigationRequest};

    fn trigger() -> (PlaybackNavigationTrigger, NavigationQueue) {
        let (sender, queue) = navigation::channel();
        (PlaybackNavigationTrigger::new(sender, &SplashConfig::default()), queue)
    }

    fn pending(queue: &mut NavigationQueue) -> Vec<NavigationRequest> {
        std::iter::from_fn(|| queue.try_next()).collect()
    }

    #[test]
    fn test_before_overlap_window() {
        let (mut trigger, mut queue) = trigger();
        assert_eq!(trigger.on_playback_status(&PlaybackProgress::playing(9083, 10_000)), None);
        assert_eq!(trigger.state(), TriggerState::NotFired);
        assert!(pending(&mut queue).is_empty());
    }

    #[test]
    fn test_fires_at_fade_start() {
        let (mut trigger, mut queue) = trigger();
        assert_eq!(
            trigger.on_playback_status(&PlaybackProgress::playing(9084, 10_000)),
            Some(FireReason::OverlapWindow)
        );
        assert!(trigger.has_fired());
        assert_eq!(
            pending(&mut queue),
            vec![NavigationRequest::Replace(Route::new("/onboarding"))]
        );
    }

    #[test]
    fn test_short_media_waits_for_finish() {
        let (mut trigger, mut queue) = trigger();
        assert_eq!(trigger.on_playback_status(&PlaybackProgress::playing(499, 500)), None);
        assert!(pending(&mut queue).is_empty());

        assert_eq!(
            trigger.on_playback_status(&PlaybackProgress::finished(500)),
            Some(FireReason::PlaybackFinished)
        );
        assert_eq!(pending(&mut queue).len(), 1);
    }

    #[test]
    fn test_duration_equal_to_overlap_uses_fallback() {
        let (mut trigger, _queue) = trigger();
        assert_eq!(trigger.on_playback_status(&PlaybackProgress::playing(916, 916)), None);
        assert_eq!(
            trigger.on_playback_status(&PlaybackProgress::finished(916)),
            Some(FireReason::PlaybackFinished)
        );
    }

    #[test]
    fn test_fires_once() {
        let (mut trigger, mut queue) = trigger();
        trigger.on_playback_status(&PlaybackProgress::playing(9500, 10_000));

        assert_eq!(trigger.on_playback_status(&PlaybackProgress::playing(9600, 10_000)), None);
        assert_eq!(trigger.on_playback_status(&PlaybackProgress::playing(9100, 10_000)), None);
        assert_eq!(trigger.on_playback_status(&PlaybackProgress::finished(10_000)), None);

        assert!(trigger.has_fired());
        assert_eq!(pending(&mut queue).len(), 1);
    }

    #[test]
    fn test_unloaded_never_fires() {
        let (mut trigger, mut queue) = trigger();
        let unloaded = PlaybackProgress {
            is_loaded: false,
            position_millis: 10_000,
            duration_millis: 10_000,
            did_just_finish: true,
        };

        for _ in 0..3 {
            assert_eq!(trigger.on_playback_status(&unloaded), None);
        }
        assert_eq!(trigger.state(), TriggerState::NotFired);
        assert!(pending(&mut queue).is_empty());
    }

    #[test]
    fn test_custom_overlap_and_destination() {
        let (sender, mut queue) = navigation::channel();
        let config = SplashConfig {
            overlap_ms: 400,
            destination: Route::new("/home"),
        };
        let mut trigger = PlaybackNavigationTrigger::new(sender, &config);

        assert_eq!(trigger.on_playback_status(&PlaybackProgress::playing(1599, 2000)), None);
        assert_eq!(
            trigger.on_playback_status(&PlaybackProgress::playing(1600, 2000)),
            Some(FireReason::OverlapWindow)
        );
        assert_eq!(pending(&mut queue), vec![NavigationRequest::Replace(Route::new("/home"))]);
    }

    #[test]
    fn test_closed_queue_still_latches() {
        let (mut trigger, queue) = trigger();
        drop(queue);

        assert!(trigger.on_playback_status(&PlaybackProgress::finished(500)).is_some());
        assert!(trigger.has_fired());
    }

    #[test]
    fn test_latch_is_monotonic() {
        let (state, _) = TriggerState::NotFired.next(&PlaybackProgress::finished(1), 916);
        assert_eq!(state, TriggerState::Fired);
        assert_eq!(
            state.next(&PlaybackProgress::unloaded(), 916),
            (TriggerState::Fired, None)
        );
    }
}
