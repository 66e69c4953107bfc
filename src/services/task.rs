//! Scoped background tasks
//!
//! A [`ScopedTask`] owns a spawned tokio task and aborts it when dropped, so
//! a view that goes away takes its timers with it.

use tokio::task::{JoinError, JoinHandle};

/// Spawned task that is aborted when the handle is dropped
#[derive(Debug)]
pub struct ScopedTask<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T: Send + 'static> ScopedTask<T> {
    /// Spawn `future` on the current runtime
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }
}

impl<T> ScopedTask<T> {
    /// Request cancellation; the task stops at its next suspension point
    pub fn cancel(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the task; `Err` if it was cancelled or panicked
    pub async fn join(mut self) -> Result<T, JoinError> {
        match self.handle.take() {
            Some(handle) => handle.await,
            None => unreachable!("ScopedTask joined twice"),
        }
    }
}

impl<T> Drop for ScopedTask<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();

        let task = ScopedTask::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(2500)).await;
        drop(task);
        let seen = ticks.load(Ordering::SeqCst);
        assert_eq!(seen, 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn test_join_returns_output_or_cancellation() {
        let task = ScopedTask::spawn(async { 7 });
        assert_eq!(task.join().await.unwrap(), 7);

        let task = ScopedTask::spawn(std::future::pending::<()>());
        task.cancel();
        assert!(task.join().await.unwrap_err().is_cancelled());
    }
}
