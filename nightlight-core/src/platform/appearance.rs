// SPDX-License-Identifier: MIT OR Apache-2.0
//! OS appearance (light/dark) monitoring.
//!
//! On Linux with the `xdg-portal` feature the color scheme is read from the
//! XDG Desktop Portal through [ashpd], and changes are streamed for as long as
//! the monitor lives. Elsewhere, and in tests, the appearance is reported by
//! hand through an [AppearanceHandle].

#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
use ashpd::desktop::settings::{ColorScheme as PortalColorScheme, Settings};
#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
use futures_lite::stream::StreamExt;
use nightlight_theme::ColorScheme;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Convert from XDG Desktop Portal ColorScheme. "No preference" reads as light.
#[cfg(all(target_os = "linux", feature = "xdg-portal"))]
fn from_portal(cs: PortalColorScheme) -> ColorScheme {
    match cs {
        PortalColorScheme::PreferDark => ColorScheme::Dark,
        PortalColorScheme::PreferLight => ColorScheme::Light,
        PortalColorScheme::NoPreference => ColorScheme::Light,
    }
}

/// Reports appearance changes into an [AppearanceMonitor].
#[derive(Debug, Clone)]
pub struct AppearanceHandle {
    sender: UnboundedSender<ColorScheme>,
}

impl AppearanceHandle {
    /// Report the current OS appearance. Returns `false` if the monitor is gone.
    pub fn report(&self, scheme: ColorScheme) -> bool {
        self.sender.send(scheme).is_ok()
    }
}

/// A live stream of OS appearance changes.
#[derive(Debug)]
pub struct AppearanceMonitor {
    receiver: UnboundedReceiver<ColorScheme>,
}

impl AppearanceMonitor {
    /// Create a monitor fed by hand through the returned [AppearanceHandle].
    pub fn manual() -> (AppearanceHandle, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (AppearanceHandle { sender }, Self { receiver })
    }

    /// Create a monitor following the platform's appearance setting.
    ///
    /// When no platform source is available the stream ends immediately and
    /// the appearance stays at its default.
    pub fn system() -> Self {
        #[cfg(all(target_os = "linux", feature = "xdg-portal"))]
        {
            Self::portal()
        }
        #[cfg(not(all(target_os = "linux", feature = "xdg-portal")))]
        {
            log::debug!("No platform appearance source, using the default scheme");
            let (_, monitor) = Self::manual();
            monitor
        }
    }

    /// Create a monitor backed by the XDG Desktop Portal.
    ///
    /// The portal task runs on the tokio runner; initialize it first via
    /// [crate::tasks::init].
    #[cfg(all(target_os = "linux", feature = "xdg-portal"))]
    pub fn portal() -> Self {
        let (handle, monitor) = Self::manual();

        let Some(runtime) = crate::tasks::runtime_handle() else {
            log::warn!("XDG Desktop Portal: No tokio runtime available. Appearance monitoring disabled.");
            return monitor;
        };

        runtime.spawn(async move {
            let settings = match Settings::new().await {
                Ok(s) => s,
                Err(e) => {
                    log::warn!("Failed to initialize XDG Desktop Portal settings: {}", e);
                    return;
                },
            };

            // Read initial color scheme
            match settings.color_scheme().await {
                Ok(initial) => {
                    handle.report(from_portal(initial));
                },
                Err(e) => log::debug!("Portal did not report an initial color scheme: {}", e),
            }

            // Monitor color scheme changes
            let mut appearance_changed = match settings.receive_color_scheme_changed().await {
                Ok(stream) => stream,
                Err(e) => {
                    log::warn!("Failed to monitor color scheme changes: {}", e);
                    return;
                },
            };

            while let Some(scheme) = appearance_changed.next().await {
                if !handle.report(from_portal(scheme)) {
                    break;
                }
            }
            log::debug!("XDG Desktop Portal color scheme stream ended");
        });

        monitor
    }

    /// Wait for the next appearance. Returns `None` once the source is gone.
    pub async fn next(&mut self) -> Option<ColorScheme> {
        self.receiver.recv().await
    }

    /// Take the next pending appearance without waiting.
    pub fn try_next(&mut self) -> Option<ColorScheme> {
        self.receiver.try_recv().ok()
    }
}
