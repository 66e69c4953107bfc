//! Business logic services
//!
//! This module contains the submit flow, contest loading and the background
//! pollers that keep views current.

pub mod contest_service;
pub mod poller;
pub mod refresher;
pub mod submission_service;
pub mod task;

pub use contest_service::ContestService;
pub use poller::{PollHandle, PollOutcome, SubmissionPoller};
pub use refresher::LeaderboardRefresher;
pub use submission_service::SubmissionService;
pub use task::ScopedTask;
