//! Judge service access
//!
//! Everything the client knows about the remote judge goes through
//! [`JudgeApi`]. [`HttpJudgeClient`] is the production implementation.

pub mod http;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Contest, CreateSubmissionRequest, EntityId, LeaderboardEntry, Submission};

pub use http::HttpJudgeClient;

/// Operations offered by the remote judge service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeApi: Send + Sync {
    /// `GET /contests/{contestId}`
    async fn get_contest(&self, contest_id: &EntityId) -> AppResult<Contest>;

    /// `POST /submissions`, returns the new submission id
    async fn submit(&self, request: &CreateSubmissionRequest) -> AppResult<EntityId>;

    /// `GET /submissions/{id}`
    async fn get_submission(&self, submission_id: &EntityId) -> AppResult<Submission>;

    /// `GET /contests/{contestId}/leaderboard`
    async fn get_leaderboard(&self, contest_id: &EntityId) -> AppResult<Vec<LeaderboardEntry>>;
}
