//! Submission status poller
//!
//! After a submit the judge grades in the background; the poller asks for
//! the submission on a fixed interval until the verdict is terminal or a
//! request fails. Failed requests are not retried: the participant
//! resubmits instead.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use super::task::ScopedTask;
use crate::client::JudgeApi;
use crate::error::AppError;
use crate::models::{EntityId, Submission};

/// Decides whether a record ends polling
pub type TerminalPredicate = fn(&Submission) -> bool;

/// Default predicate: the verdict is terminal
pub fn is_terminal(submission: &Submission) -> bool {
    submission.verdict().is_terminal()
}

/// How a poll ended
#[derive(Debug)]
pub enum PollOutcome {
    /// The judge reported a terminal verdict
    Terminal(Submission),
    /// A status request failed; polling stopped
    Failed(AppError),
    /// The poll was cancelled before a verdict arrived
    Cancelled,
}

/// Handle to one running poll; dropping it stops the poll
#[derive(Debug)]
pub struct PollHandle {
    submission_id: EntityId,
    task: ScopedTask<PollOutcome>,
}

impl PollHandle {
    pub fn submission_id(&self) -> &EntityId {
        &self.submission_id
    }

    pub fn cancel(&self) {
        self.task.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the poll to end
    pub async fn join(self) -> PollOutcome {
        match self.task.join().await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => PollOutcome::Cancelled,
            Err(e) => PollOutcome::Failed(AppError::Internal(anyhow::anyhow!(
                "poll task for submission {} panicked: {}",
                self.submission_id,
                e
            ))),
        }
    }
}

/// Polls at most one submission at a time
pub struct SubmissionPoller {
    api: Arc<dyn JudgeApi>,
    interval: Duration,
    is_terminal: TerminalPredicate,
    active: Option<PollHandle>,
}

impl SubmissionPoller {
    pub fn new(api: Arc<dyn JudgeApi>, interval: Duration) -> Self {
        Self {
            api,
            interval,
            is_terminal,
            active: None,
        }
    }

    pub fn with_terminal_predicate(mut self, predicate: TerminalPredicate) -> Self {
        self.is_terminal = predicate;
        self
    }

    /// Start polling `submission_id`, cancelling any poll already running.
    ///
    /// The first request goes out one interval from now. `on_update` sees
    /// every record fetched, including the terminal one.
    pub fn start<F>(&mut self, submission_id: EntityId, on_update: F)
    where
        F: FnMut(Submission) + Send + 'static,
    {
        self.start_with_failure(submission_id, on_update, |_: &AppError| {});
    }

    /// Like [`start`](Self::start), also handing the error that ends a failed
    /// poll to `on_failure`
    pub fn start_with_failure<F, G>(
        &mut self,
        submission_id: EntityId,
        on_update: F,
        on_failure: G,
    ) where
        F: FnMut(Submission) + Send + 'static,
        G: FnOnce(&AppError) + Send + 'static,
    {
        self.cancel();

        tracing::debug!(
            "Polling submission {} every {:?}",
            submission_id,
            self.interval
        );

        let task = ScopedTask::spawn(poll_until_terminal(
            self.api.clone(),
            submission_id.clone(),
            self.interval,
            self.is_terminal,
            on_update,
            on_failure,
        ));

        self.active = Some(PollHandle {
            submission_id,
            task,
        });
    }

    /// Stop the current poll, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            if !handle.is_finished() {
                tracing::debug!("Cancelled polling for submission {}", handle.submission_id);
            }
            handle.cancel();
        }
    }

    /// Whether a poll is still running
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Submission currently (or last) polled
    pub fn submission_id(&self) -> Option<&EntityId> {
        self.active.as_ref().map(PollHandle::submission_id)
    }

    /// Take the running poll out of the poller to await it
    pub fn take_handle(&mut self) -> Option<PollHandle> {
        self.active.take()
    }

    /// Wait for the current poll to end; `None` when nothing was started
    pub async fn wait(&mut self) -> Option<PollOutcome> {
        match self.active.take() {
            Some(handle) => Some(handle.join().await),
            None => None,
        }
    }
}

async fn poll_until_terminal<F, G>(
    api: Arc<dyn JudgeApi>,
    submission_id: EntityId,
    period: Duration,
    is_terminal: TerminalPredicate,
    mut on_update: F,
    on_failure: G,
) -> PollOutcome
where
    F: FnMut(Submission) + Send + 'static,
    G: FnOnce(&AppError) + Send + 'static,
{
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        match api.get_submission(&submission_id).await {
            Ok(submission) => {
                let terminal = is_terminal(&submission);
                on_update(submission.clone());

                if terminal {
                    tracing::info!(
                        "Submission {} finished: {}",
                        submission_id,
                        submission.verdict()
                    );
                    return PollOutcome::Terminal(submission);
                }
            }
            Err(e) => {
                tracing::error!("Polling submission {} failed: {}", submission_id, e);
                on_failure(&e);
                return PollOutcome::Failed(e);
            }
        }
    }
}
