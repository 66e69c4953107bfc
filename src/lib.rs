//! Shodh-a-Code client - contest participation from the terminal
//!
//! This library talks to the Shodh-a-Code judging service: it loads
//! contests, submits solutions, follows their verdicts and keeps a
//! leaderboard up to date. All compilation, execution and scoring happen on
//! the judge; the client only presents them.
//!
//! # Architecture
//!
//! The client follows a layered architecture:
//! - **Views**: terminal rendering and per-view UI state
//! - **Services**: submit flow, contest loading, background pollers
//! - **Client**: the `JudgeApi` seam and its HTTP implementation
//! - **Models**: DTOs and the submission status classification

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use client::{HttpJudgeClient, JudgeApi};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::{Session, SessionStore};
pub use state::ClientContext;
