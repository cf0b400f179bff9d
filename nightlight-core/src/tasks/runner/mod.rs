// SPDX-License-Identifier: MIT OR Apache-2.0
//! Task runner implementations.
#[cfg(feature = "tokio-runner")]
use self::tokio_runner::TokioRunner;
use std::future::Future;

#[cfg(feature = "tokio-runner")]
pub mod tokio_runner;

/// An abstraction over a task runner.
#[derive(Debug)]
pub enum TaskRunner {
    /// The tokio task runner.
    #[cfg(feature = "tokio-runner")]
    Tokio(TokioRunner),
    /// The `smol` global executor. Used until a runner is initialized.
    Smol,
}

impl TaskRunner {
    /// Blocks on the given future.
    pub fn block_on<F>(&self, fut: F) -> F::Output
    where
        F: Future,
    {
        match self {
            #[cfg(feature = "tokio-runner")]
            TaskRunner::Tokio(runner) => runner.block_on(fut),
            TaskRunner::Smol => pollster::block_on(fut),
        }
    }

    /// Spawns the given future without waiting for it.
    pub fn spawn_detached<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match self {
            #[cfg(feature = "tokio-runner")]
            TaskRunner::Tokio(runner) => runner.spawn_detached(fut),
            TaskRunner::Smol => smol::spawn(fut).detach(),
        }
    }

    /// Returns `true` for the `smol` fallback, i.e. when no runner was initialized.
    pub fn is_fallback(&self) -> bool {
        matches!(self, TaskRunner::Smol)
    }

    /// Consumes the runner without waiting for its worker threads.
    pub fn shutdown_background(self) {
        match self {
            #[cfg(feature = "tokio-runner")]
            TaskRunner::Tokio(runner) => runner.shutdown_background(),
            TaskRunner::Smol => {},
        }
    }

    /// Consumes the runner, stopping its worker threads.
    pub fn shutdown(self) {
        match self {
            #[cfg(feature = "tokio-runner")]
            TaskRunner::Tokio(runner) => runner.shutdown(),
            TaskRunner::Smol => {},
        }
    }
}
