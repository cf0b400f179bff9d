// SPDX-License-Identifier: MIT OR Apache-2.0

/// One playback status tick from the media engine.
///
/// Snapshots are consumed as they arrive and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackProgress {
    /// If the media is ready. Unloaded snapshots carry no meaningful timing.
    pub is_loaded: bool,
    /// Current playback position.
    pub position_millis: u64,
    /// Total media duration.
    pub duration_millis: u64,
    /// Set on the tick that reports the natural end of the media.
    pub did_just_finish: bool,
}

impl PlaybackProgress {
    /// A snapshot from media that is not ready yet.
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// A loaded snapshot at `position_millis` of `duration_millis`.
    pub fn playing(position_millis: u64, duration_millis: u64) -> Self {
        Self {
            is_loaded: true,
            position_millis,
            duration_millis,
            did_just_finish: false,
        }
    }

    /// The end-of-media snapshot for media of `duration_millis`.
    pub fn finished(duration_millis: u64) -> Self {
        Self {
            is_loaded: true,
            position_millis: duration_millis,
            duration_millis,
            did_just_finish: true,
        }
    }

    /// Milliseconds at which the overlap window opens, if the media is longer than `overlap_ms`.
    pub fn fade_start(&self, overlap_ms: u64) -> Option<u64> {
        self.duration_millis
            .checked_sub(overlap_ms)
            .filter(|start| *start > 0)
    }
}
