//! Domain models
//!
//! This module contains the DTOs exchanged with the judge service.

pub mod contest;
pub mod id;
pub mod leaderboard;
pub mod problem;
pub mod status;
pub mod submission;
pub mod test_case;

pub use contest::*;
pub use id::*;
pub use leaderboard::*;
pub use problem::*;
pub use status::*;
pub use submission::*;
pub use test_case::*;
