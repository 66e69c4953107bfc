//! Leaderboard view

use std::sync::Arc;

use tokio::sync::watch;

use crate::constants::EMPTY_LEADERBOARD;
use crate::error::AppResult;
use crate::models::{EntityId, LeaderboardEntry};
use crate::services::LeaderboardRefresher;
use crate::state::ClientContext;

/// What the leaderboard currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardState {
    /// No fetch has completed yet
    pub loading: bool,
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardState {
    fn loading() -> Self {
        Self {
            loading: true,
            entries: Vec::new(),
        }
    }

    /// Fold one fetch result in; a failure keeps the previous entries
    pub fn apply(&mut self, result: AppResult<Vec<LeaderboardEntry>>) {
        if let Ok(entries) = result {
            self.entries = entries;
        }
        self.loading = false;
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Leaderboard\n");

        if self.loading {
            out.push_str("Loading...\n");
            return out;
        }

        if self.entries.is_empty() {
            out.push_str(EMPTY_LEADERBOARD);
            out.push('\n');
            return out;
        }

        for (index, entry) in self.entries.iter().enumerate() {
            out.push_str(&format!(
                "#{:<3} {:<20} ({} solved) {:>8}\n",
                index + 1,
                entry.username,
                entry.solved_problems,
                entry.score
            ));
        }

        out
    }
}

/// Leaderboard of one contest, kept fresh in the background
pub struct LeaderboardView {
    ctx: ClientContext,
    contest_id: EntityId,
    state: Arc<watch::Sender<LeaderboardState>>,
    refresher: Option<LeaderboardRefresher>,
}

impl LeaderboardView {
    pub fn new(ctx: ClientContext, contest_id: EntityId) -> Self {
        let (state, _) = watch::channel(LeaderboardState::loading());
        Self {
            ctx,
            contest_id,
            state: Arc::new(state),
            refresher: None,
        }
    }

    /// Begin refreshing; restarting replaces the previous schedule
    pub fn start(&mut self) {
        let state = self.state.clone();
        self.refresher = Some(LeaderboardRefresher::start(
            self.ctx.api(),
            self.contest_id.clone(),
            self.ctx.config().polling.leaderboard_refresh,
            move |result| state.send_modify(|s| s.apply(result)),
        ));
    }

    pub fn stop(&mut self) {
        if let Some(mut refresher) = self.refresher.take() {
            refresher.cancel();
        }
    }

    /// Fold a result fetched outside the refresher in
    pub fn apply(&self, result: AppResult<Vec<LeaderboardEntry>>) {
        self.state.send_modify(|s| s.apply(result));
    }

    pub fn state(&self) -> LeaderboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LeaderboardState> {
        self.state.subscribe()
    }

    pub fn render(&self) -> String {
        self.state.borrow().render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{JudgeApi, MockJudgeApi};
    use crate::config::Config;
    use crate::error::AppError;
    use crate::session::Session;
    use serde_json::json;
    use std::time::Duration;

    fn entries() -> Vec<LeaderboardEntry> {
        serde_json::from_value(json!([
            {"username": "bob", "score": 3, "solvedProblems": 3},
            {"username": "alice", "score": 1, "solvedProblems": 1}
        ]))
        .unwrap()
    }

    #[test]
    fn test_render_states() {
        let mut state = LeaderboardState::loading();
        assert!(state.render().contains("Loading..."));

        state.apply(Ok(Vec::new()));
        assert!(state.render().contains("No submissions yet"));
        assert!(!state.render().contains('#'));

        state.apply(Ok(entries()));
        let out = state.render();
        let bob = out.find("bob").unwrap();
        let alice = out.find("alice").unwrap();
        assert!(bob < alice, "backend order is kept");
        assert!(out.contains("#1"));
        assert!(out.contains("#2"));
        assert!(out.contains("(3 solved)"));

        state.apply(Err(AppError::Network("down".to_string())));
        assert_eq!(state.entries.len(), 2);
    }

    #[test]
    fn test_failed_first_fetch_stops_loading() {
        let mut state = LeaderboardState::loading();
        state.apply(Err(AppError::Network("down".to_string())));
        assert!(!state.loading);
        assert!(state.render().contains("No submissions yet"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_refreshes_in_background() {
        let mut api = MockJudgeApi::new();
        api.expect_get_leaderboard().returning(|_| Ok(entries()));
        let api: Arc<dyn JudgeApi> = Arc::new(api);

        let ctx = ClientContext::new(api, Session::default(), Config::default());
        let mut view = LeaderboardView::new(ctx, EntityId::from("1"));
        let mut updates = view.subscribe();

        view.start();
        updates.changed().await.unwrap();
        assert_eq!(view.state().entries.len(), 2);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(updates.has_changed().unwrap());

        view.stop();
        updates.borrow_and_update();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(!updates.has_changed().unwrap());
    }
}
