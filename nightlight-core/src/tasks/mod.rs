// SPDX-License-Identifier: MIT OR Apache-2.0
//! An executor for running tasks in the background.
//!
//! Fire-and-forget work (persisting the theme preference, following the OS
//! appearance) is handed to a process-wide runner. Until [init] is called the
//! runner spawns onto the `smol` global executor, so detached work always has
//! somewhere to run.
use crate::config::TasksConfig;
use arc_swap::ArcSwap;
use runner::TaskRunner;
use std::future::Future;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// An abstraction over a task runner.
pub mod runner;

static RUNNER: LazyLock<ArcSwap<TaskRunner>> =
    LazyLock::new(|| ArcSwap::new(Arc::new(TaskRunner::Smol)));

/// Serializes runner replacement.
static INIT: Mutex<()> = Mutex::new(());

/// Initializes the task runner, replacing the current one.
///
/// A replaced runner is stopped without waiting for its tasks.
pub fn init(config: TasksConfig) {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    install(config);
}

/// Initializes the task runner unless one is already running.
///
/// Returns `true` if this call started it.
pub fn init_if_unset(config: TasksConfig) -> bool {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if !RUNNER.load().is_fallback() {
        return false;
    }
    install(config);
    true
}

fn install(config: TasksConfig) {
    #[cfg(feature = "tokio-runner")]
    let runner = match runner::tokio_runner::TokioRunner::new(config) {
        Ok(runner) => TaskRunner::Tokio(runner),
        Err(e) => {
            log::warn!("Failed to start tokio task runner, falling back to smol: {}", e);
            TaskRunner::Smol
        },
    };
    #[cfg(not(feature = "tokio-runner"))]
    let runner = {
        let _ = config;
        TaskRunner::Smol
    };

    let previous = RUNNER.swap(Arc::new(runner));
    if let Ok(previous) = Arc::try_unwrap(previous) {
        previous.shutdown_background();
    }
}

/// Spawns the given future (fire-and-forget).
pub fn spawn<F>(fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    let runner = RUNNER.load().clone();
    runner.spawn_detached(fut);
}

/// Blocks on the given future.
pub fn block_on<F>(fut: F) -> F::Output
where
    F: Future,
{
    RUNNER.load().block_on(fut)
}

/// Handle to the tokio runtime, if the tokio runner is active.
///
/// Needed by integrations (such as the XDG portal) that must run inside tokio.
#[cfg(feature = "tokio-runner")]
pub fn runtime_handle() -> Option<tokio::runtime::Handle> {
    let runner = RUNNER.load();
    match &**runner {
        TaskRunner::Tokio(runner) => Some(runner.handle()),
        TaskRunner::Smol => tokio::runtime::Handle::try_current().ok(),
    }
}

/// Shuts down the task runner gracefully.
/// This should be called during application shutdown to prevent hanging.
pub fn shutdown() {
    log::debug!("Shutting down task runner...");

    // Take the current runner and replace with the smol fallback
    let current_runner = RUNNER.swap(Arc::new(TaskRunner::Smol));

    match Arc::try_unwrap(current_runner) {
        Ok(runner) => runner.shutdown(),
        Err(_) => {
            log::warn!("Could not shutdown task runner - still has active references");
        },
    }
}
