//! Leaderboard model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::null_as_default;
use crate::utils::time::deserialize_timestamp;

/// Leaderboard row, in the order the judge ranked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub solved_problems: u32,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_submission_time: Option<DateTime<Utc>>,
}
