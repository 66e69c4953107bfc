//! Terminal views
//!
//! Each view keeps its own UI state and renders it to plain text. Views own
//! their background work: dropping a view stops its polling.

pub mod contest;
pub mod editor;
pub mod leaderboard;
pub mod problem;

pub use contest::{ContestPage, PageState};
pub use editor::{EditorView, default_code, render_submission_status};
pub use leaderboard::{LeaderboardState, LeaderboardView};
pub use problem::{render_problem, render_problem_view};
