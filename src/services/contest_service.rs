//! Contest service

use crate::{
    client::JudgeApi,
    error::AppResult,
    models::{Contest, EntityId, LeaderboardEntry},
};

/// Contest service for read-only contest data
pub struct ContestService;

impl ContestService {
    /// Get contest with its problems
    pub async fn get_contest(api: &dyn JudgeApi, contest_id: &EntityId) -> AppResult<Contest> {
        let contest = api.get_contest(contest_id).await.map_err(|e| {
            tracing::error!("Failed to load contest {}: {}", contest_id, e);
            e
        })?;

        tracing::debug!(
            "Loaded contest {} ({} problems)",
            contest.id,
            contest.problems.len()
        );
        Ok(contest)
    }

    /// Get leaderboard, in the judge's order
    pub async fn get_leaderboard(
        api: &dyn JudgeApi,
        contest_id: &EntityId,
    ) -> AppResult<Vec<LeaderboardEntry>> {
        api.get_leaderboard(contest_id).await.map_err(|e| {
            tracing::error!("Failed to fetch leaderboard: {}", e);
            e
        })
    }
}
