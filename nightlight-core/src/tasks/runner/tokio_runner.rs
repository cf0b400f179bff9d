// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::config::TasksConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};

/// Time given to in-flight tasks (such as a pending preference write) on shutdown.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// A task runner using [tokio] as runtime.
#[derive(Debug)]
pub struct TokioRunner {
    rt: Runtime,
}

impl TokioRunner {
    /// Initializes the tokio task runner with the given config.
    pub(crate) fn new(config: TasksConfig) -> io::Result<Self> {
        // Always multi-threaded: a current-thread runtime only polls spawned
        // tasks inside block_on, and detached work is never awaited.
        let rt = Builder::new_multi_thread()
            .worker_threads(config.workers.get())
            .enable_all()
            .thread_name("nightlight-worker")
            .thread_stack_size(config.stack_size)
            .build()?;

        Ok(Self { rt })
    }

    /// Blocks on the given future.
    pub(crate) fn block_on<F>(&self, fut: F) -> F::Output
    where
        F: Future,
    {
        self.rt.block_on(fut)
    }

    /// Spawns the given future (fire-and-forget).
    pub(crate) fn spawn_detached<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        drop(self.rt.spawn(fut));
    }

    /// Handle for spawning onto this runtime from other contexts.
    pub(crate) fn handle(&self) -> Handle {
        self.rt.handle().clone()
    }

    /// Stops the runtime, giving pending tasks a short grace period.
    pub(crate) fn shutdown(self) {
        self.rt.shutdown_timeout(SHUTDOWN_GRACE);
    }

    /// Stops the runtime without waiting. Safe to call from async contexts.
    pub(crate) fn shutdown_background(self) {
        self.rt.shutdown_background();
    }
}
