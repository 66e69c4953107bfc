//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, Problem};
use crate::utils::null_as_default;
use crate::utils::time::{deserialize_timestamp, now_utc};

/// Contest snapshot, fetched once per page load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub problems: Vec<Problem>,
}

impl Contest {
    /// Get current status of the contest
    pub fn status(&self) -> ContestStatus {
        let now = now_utc();
        match (self.start_time, self.end_time) {
            (Some(start), _) if now < start => ContestStatus::Upcoming,
            (_, Some(end)) if now >= end => ContestStatus::Ended,
            (None, None) => ContestStatus::Unscheduled,
            _ => ContestStatus::Ongoing,
        }
    }

    pub fn problem(&self, id: &EntityId) -> Option<&Problem> {
        self.problems.iter().find(|p| &p.id == id)
    }

    /// Problem selected when the contest page opens
    pub fn first_problem(&self) -> Option<&Problem> {
        self.problems.first()
    }
}

/// Contest status based on its time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Upcoming,
    Ongoing,
    Ended,
    /// The judge did not publish a time window
    Unscheduled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_backend_contest_defaults() {
        let contest: Contest = serde_json::from_value(json!({
            "id": 1,
            "name": "Sample Contest",
            "problems": [
                {"id": 1, "title": "Sum Two"},
                {"id": 2, "title": "Echo"}
            ]
        }))
        .unwrap();

        assert_eq!(contest.description, "");
        assert_eq!(contest.status(), ContestStatus::Unscheduled);
        assert_eq!(contest.first_problem().map(|p| p.title.as_str()), Some("Sum Two"));
        assert_eq!(
            contest.problem(&EntityId::from("2")).map(|p| p.title.as_str()),
            Some("Echo")
        );
    }

    #[test]
    fn test_null_columns_fall_back_to_defaults() {
        let contest: Contest = serde_json::from_value(json!({
            "id": 1,
            "name": "Sample Contest",
            "description": null,
            "startTime": null,
            "problems": [
                {"id": 1, "title": "Sum Two", "description": null, "testCases": null}
            ]
        }))
        .unwrap();

        assert_eq!(contest.description, "");
        assert_eq!(contest.problems[0].description, "");
        assert!(contest.problems[0].test_cases.is_empty());
    }

    #[test]
    fn test_contest_status_window() {
        let now = now_utc();
        let mut contest: Contest = serde_json::from_value(json!({"id": "c1"})).unwrap();

        contest.start_time = Some(now - Duration::hours(1));
        contest.end_time = Some(now + Duration::hours(1));
        assert_eq!(contest.status(), ContestStatus::Ongoing);

        contest.start_time = Some(now + Duration::hours(1));
        assert_eq!(contest.status(), ContestStatus::Upcoming);

        contest.start_time = Some(now - Duration::hours(2));
        contest.end_time = Some(now - Duration::hours(1));
        assert_eq!(contest.status(), ContestStatus::Ended);
    }
}
