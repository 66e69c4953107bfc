//! Submission status model
//!
//! The judge reports status as free text whose spelling is not under our
//! control ("ACCEPTED", "Accepted", "TIMED_OUT", "Time Limit Exceeded", ...).
//! [`normalize`] folds any such value into a [`Verdict`] once, when a record
//! enters the client; everything downstream matches on the verdict.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Canonical submission verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pending,
    Running,
    Accepted,
    WrongAnswer,
    CompilationError,
    TimedOut,
    RuntimeError,
    Error,
    Unknown,
}

impl Verdict {
    /// Get verdict as its canonical string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Accepted => "ACCEPTED",
            Self::WrongAnswer => "WRONG_ANSWER",
            Self::CompilationError => "COMPILATION_ERROR",
            Self::TimedOut => "TIMED_OUT",
            Self::RuntimeError => "RUNTIME_ERROR",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable label; `Unknown` has none of its own and shows the raw value
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::CompilationError => "Compilation Error",
            Self::TimedOut => "Time Limit Exceeded",
            Self::RuntimeError => "Runtime Error",
            Self::Error => "Error",
            Self::Unknown => "Unknown",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Accepted => Severity::Success,
            Self::TimedOut => Severity::Warning,
            Self::WrongAnswer | Self::CompilationError | Self::RuntimeError | Self::Error => {
                Severity::Failure
            }
            Self::Pending | Self::Running | Self::Unknown => Severity::Neutral,
        }
    }

    /// Check if judging is complete and no further updates are expected
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Accepted
                | Self::WrongAnswer
                | Self::CompilationError
                | Self::TimedOut
                | Self::RuntimeError
                | Self::Error
        )
    }

    /// Check if the submission is still queued or being judged
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display severity of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Neutral,
    Success,
    Failure,
    Warning,
}

/// Classification of one raw status value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub verdict: Verdict,
    pub label: String,
    pub severity: Severity,
}

impl StatusInfo {
    fn of(verdict: Verdict) -> Self {
        Self {
            verdict,
            label: verdict.label().to_string(),
            severity: verdict.severity(),
        }
    }
}

/// Classify a raw status string.
///
/// Keywords are tested case-insensitively in a fixed order, first match wins.
/// "TIME" is tested before "RUNTIME", so `RUNTIME_ERROR` lands on
/// [`Verdict::TimedOut`]; judges in use never send that spelling and the
/// order is kept for compatibility with them.
pub fn normalize(raw: Option<&str>) -> StatusInfo {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return StatusInfo::of(Verdict::Pending),
    };

    let s = raw.to_uppercase();
    let verdict = if s.contains("ACCEPT") {
        Verdict::Accepted
    } else if s.contains("WRONG") {
        Verdict::WrongAnswer
    } else if s.contains("COMPIL") {
        Verdict::CompilationError
    } else if s.contains("TIME") || s.contains("TIMED") {
        Verdict::TimedOut
    } else if s.contains("RUNTIME") {
        Verdict::RuntimeError
    } else if s.contains("RUNNING") {
        Verdict::Running
    } else if s.contains("ERROR") {
        Verdict::Error
    } else {
        // unmatched text keeps its own label; only an exact "pending" still counts as queued
        return StatusInfo {
            verdict: if s == Verdict::Pending.as_str() {
                Verdict::Pending
            } else {
                Verdict::Unknown
            },
            label: raw.to_string(),
            severity: Severity::Neutral,
        };
    };

    StatusInfo::of(verdict)
}

/// Classify an arbitrary JSON status value.
///
/// `null`, `false` and `0` count as absent. Other scalars are stringified,
/// structured values are classified by their JSON text.
pub fn normalize_value(raw: &Value) -> StatusInfo {
    match raw_text(raw) {
        Some(text) => normalize(Some(&text)),
        None => normalize(None),
    }
}

fn raw_text(raw: &Value) -> Option<String> {
    match raw {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Status of a submission as received from the judge.
///
/// Keeps the raw value for display alongside the classification made when
/// the value was ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    raw: Option<String>,
    info: StatusInfo,
}

impl SubmissionStatus {
    pub fn from_raw(raw: Option<&str>) -> Self {
        Self {
            raw: raw.filter(|s| !s.is_empty()).map(str::to_string),
            info: normalize(raw),
        }
    }

    pub fn pending() -> Self {
        Self::from_raw(None)
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn verdict(&self) -> Verdict {
        self.info.verdict
    }

    pub fn label(&self) -> &str {
        &self.info.label
    }

    pub fn severity(&self) -> Severity {
        self.info.severity
    }

    pub fn info(&self) -> &StatusInfo {
        &self.info
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        Self::pending()
    }
}

impl Serialize for SubmissionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.raw {
            Some(raw) => serializer.serialize_str(raw),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self {
            raw: raw_text(&value),
            info: normalize_value(&value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn verdict_of(raw: &str) -> Verdict {
        normalize(Some(raw)).verdict
    }

    #[test]
    fn test_accept_anywhere_is_accepted() {
        for raw in ["ACCEPTED", "Accepted", "accepted", "PARTIALLY_ACCEPTED", "not accepted?"] {
            assert_eq!(verdict_of(raw), Verdict::Accepted, "{raw}");
        }
        // ACCEPT outranks every later keyword
        assert_eq!(verdict_of("ACCEPTED_WITH_RUNTIME_ERROR"), Verdict::Accepted);
    }

    #[test]
    fn test_runtime_error_classifies_as_timed_out() {
        let info = normalize(Some("RUNTIME_ERROR"));
        assert_eq!(info.verdict, Verdict::TimedOut);
        assert_eq!(info.label, "Time Limit Exceeded");
        assert_eq!(info.severity, Severity::Warning);
    }

    #[test]
    fn test_absent_or_empty_is_pending() {
        assert_eq!(normalize(None).verdict, Verdict::Pending);
        assert_eq!(normalize(Some("")).verdict, Verdict::Pending);
        assert_eq!(normalize_value(&Value::Null).verdict, Verdict::Pending);
        assert_eq!(normalize_value(&json!(false)).verdict, Verdict::Pending);
        assert_eq!(normalize_value(&json!(0)).verdict, Verdict::Pending);
        assert_eq!(normalize(None).label, "Pending");
    }

    #[test]
    fn test_spelled_out_pending_stays_pending() {
        let info = normalize(Some("Pending"));
        assert_eq!(info.verdict, Verdict::Pending);
        assert_eq!(info.label, "Pending");
        assert_eq!(normalize(Some("PENDING")).label, "PENDING");
        assert_eq!(verdict_of("PENDING_REVIEW"), Verdict::Unknown);
    }

    #[test]
    fn test_backend_vocabulary() {
        assert_eq!(verdict_of("RUNNING"), Verdict::Running);
        assert_eq!(verdict_of("WRONG_ANSWER"), Verdict::WrongAnswer);
        assert_eq!(verdict_of("COMPILATION_ERROR"), Verdict::CompilationError);
        assert_eq!(verdict_of("TIMED_OUT"), Verdict::TimedOut);
        assert_eq!(verdict_of("Time Limit Exceeded"), Verdict::TimedOut);
        assert_eq!(verdict_of("ERROR"), Verdict::Error);
        assert_eq!(verdict_of("Internal error"), Verdict::Error);
    }

    #[test]
    fn test_unknown_keeps_raw_label() {
        let info = normalize(Some("Queued #3"));
        assert_eq!(info.verdict, Verdict::Unknown);
        assert_eq!(info.label, "Queued #3");
        assert_eq!(info.severity, Severity::Neutral);
    }

    #[test]
    fn test_numbers_are_stringified() {
        let info = normalize_value(&json!(7));
        assert_eq!(info.verdict, Verdict::Unknown);
        assert_eq!(info.label, "7");
    }

    #[test]
    fn test_terminal_set() {
        let terminal = [
            Verdict::Accepted,
            Verdict::WrongAnswer,
            Verdict::CompilationError,
            Verdict::TimedOut,
            Verdict::RuntimeError,
            Verdict::Error,
        ];
        for verdict in terminal {
            assert!(verdict.is_terminal());
            assert!(!verdict.is_in_flight());
        }
        for verdict in [Verdict::Pending, Verdict::Running] {
            assert!(!verdict.is_terminal());
            assert!(verdict.is_in_flight());
        }
        assert!(!Verdict::Unknown.is_terminal());
        assert!(!Verdict::Unknown.is_in_flight());
    }

    #[test]
    fn test_status_deserializes_once() {
        let status: SubmissionStatus = serde_json::from_value(json!("Wrong Answer")).unwrap();
        assert_eq!(status.verdict(), Verdict::WrongAnswer);
        assert_eq!(status.raw(), Some("Wrong Answer"));

        let status: SubmissionStatus = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(status.verdict(), Verdict::Pending);
        assert_eq!(status.raw(), None);
    }
}
