// SPDX-License-Identifier: MIT OR Apache-2.0
//! Splash screen playback and the navigation that ends it.

mod progress;
mod trigger;

pub use progress::PlaybackProgress;
pub use trigger::{FireReason, PlaybackNavigationTrigger, TriggerState};

/// How the splash media is started. The core never controls playback beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// Start playing immediately.
    pub should_play: bool,
    /// Play without sound.
    pub muted: bool,
    /// Restart once the end is reached.
    pub looping: bool,
}

impl PlaybackRequest {
    /// Single, muted, non-looping playback.
    pub const fn splash() -> Self {
        Self {
            should_play: true,
            muted: true,
            looping: false,
        }
    }
}

impl Default for PlaybackRequest {
    fn default() -> Self {
        Self::splash()
    }
}
