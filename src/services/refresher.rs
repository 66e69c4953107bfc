//! Periodic leaderboard refresh

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::task::ScopedTask;
use crate::client::JudgeApi;
use crate::error::AppResult;
use crate::models::{EntityId, LeaderboardEntry};

/// Refetches a contest leaderboard on a fixed interval.
///
/// Unlike submission polling, a failed fetch does not end the schedule; the
/// next tick simply tries again.
pub struct LeaderboardRefresher {
    task: Option<ScopedTask<()>>,
}

impl LeaderboardRefresher {
    /// Fetch now and then every `period`, handing each result to `on_result`
    pub fn start<F>(
        api: Arc<dyn JudgeApi>,
        contest_id: EntityId,
        period: Duration,
        mut on_result: F,
    ) -> Self
    where
        F: FnMut(AppResult<Vec<LeaderboardEntry>>) + Send + 'static,
    {
        tracing::debug!(
            "Refreshing leaderboard of contest {} every {:?}",
            contest_id,
            period
        );

        let task = ScopedTask::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let result = api.get_leaderboard(&contest_id).await;
                if let Err(e) = &result {
                    tracing::error!("Failed to fetch leaderboard: {}", e);
                }
                on_result(result);
            }
        });

        Self { task: Some(task) }
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockJudgeApi;
    use crate::error::AppError;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const PERIOD: Duration = Duration::from_secs(30);

    fn flaky_api(calls: Arc<AtomicUsize>) -> Arc<dyn JudgeApi> {
        let mut api = MockJudgeApi::new();
        api.expect_get_leaderboard().returning(move |_| {
            if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                Err(AppError::Network("timeout".to_string()))
            } else {
                Ok(Vec::new())
            }
        });
        Arc::new(api)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_immediately_then_on_interval() {
        let calls = Arc::new(AtomicUsize::new(0));
        let results = Arc::new(Mutex::new(Vec::new()));
        let sink = results.clone();

        let refresher = LeaderboardRefresher::start(
            flaky_api(calls.clone()),
            EntityId::from("1"),
            PERIOD,
            move |r| sink.lock().unwrap().push(r.is_ok()),
        );

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // the failed second fetch does not stop the schedule
        tokio::time::sleep(PERIOD * 2).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(*results.lock().unwrap(), vec![true, false, true]);
        assert!(refresher.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_and_drop_stop_refresh() {
        let calls = Arc::new(AtomicUsize::new(0));

        let mut refresher =
            LeaderboardRefresher::start(flaky_api(calls.clone()), EntityId::from("1"), PERIOD, |_| {});
        tokio::time::sleep(Duration::from_millis(1)).await;
        refresher.cancel();
        assert!(!refresher.is_active());

        let refresher =
            LeaderboardRefresher::start(flaky_api(calls.clone()), EntityId::from("1"), PERIOD, |_| {});
        drop(refresher);

        tokio::time::sleep(PERIOD * 4).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
