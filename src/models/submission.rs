//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EntityId, SubmissionStatus, Verdict};
use crate::utils::null_as_default;
use crate::utils::time::{deserialize_timestamp, now_utc};

/// Submission record as returned by `GET /submissions/{id}`.
///
/// Each poll response replaces the previous record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: EntityId,
    #[serde(default)]
    pub user_id: Option<String>,
    /// The judge identifies owners by username
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub problem_id: Option<EntityId>,
    /// Nested problem, sent by judges that embed the entity
    #[serde(default, skip_serializing)]
    pub problem: Option<EntityRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result_message: Option<String>,
}

/// Reference to a nested entity; only its id is read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
}

impl Submission {
    /// Provisional record shown between a successful submit and the first poll
    pub fn provisional(
        id: EntityId,
        username: &str,
        problem_id: EntityId,
        code: String,
        language: String,
    ) -> Self {
        Self {
            id,
            user_id: Some(username.to_string()),
            username: Some(username.to_string()),
            problem_id: Some(problem_id),
            problem: None,
            code,
            language,
            status: SubmissionStatus::from_raw(Some("Pending")),
            created_at: Some(now_utc()),
            finished_at: None,
            result_message: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.status.verdict()
    }

    /// Owning user, whichever way the judge spelled it
    pub fn owner(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.username.as_deref())
    }

    /// Problem id, flat or nested
    pub fn problem_id(&self) -> Option<&EntityId> {
        self.problem_id
            .as_ref()
            .or(self.problem.as_ref().map(|p| &p.id))
    }
}

/// Body of `POST /submissions`
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub contest_id: i64,

    pub problem_id: i64,

    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, max = 1048576))] // 1MB max
    pub code: String,

    #[validate(length(min = 1, max = 20))]
    pub language: String,
}
