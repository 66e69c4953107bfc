//! HTTP/JSON implementation of the judge API

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::JudgeApi;
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Contest, CreateSubmissionRequest, EntityId, LeaderboardEntry, Submission};

/// Judge client speaking JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpJudgeClient {
    client: Client,
    base_url: Url,
}

impl HttpJudgeClient {
    /// Create a client for the configured judge
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::Configuration(format!("JUDGE_API_URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Configuration(format!(
                "JUDGE_API_URL cannot be used as a base: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with the given path segments appended, each percent-encoded
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration("JUDGE_API_URL cannot be used as a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> AppResult<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = ensure_success(response, what)?;
        Ok(response.json::<T>().await?)
    }
}

fn ensure_success(response: Response, what: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::Http {
            status: status.as_u16(),
            message: format!("Failed to fetch {}: {}", what, status.as_u16()),
        })
    }
}

/// Error body of a rejected submission: JSON when it parses, raw text otherwise
fn rejection_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn submission_rejected(status: StatusCode, text: &str) -> AppError {
    AppError::Http {
        status: status.as_u16(),
        message: format!("Submission failed: {} {}", status.as_u16(), rejection_body(text)),
    }
}

/// The judge answers a submit with a bare id, usually a JSON number
fn parse_submission_id(text: &str) -> AppResult<EntityId> {
    let unexpected = || AppError::Decode(format!("expected a submission id, got: {}", text));

    match serde_json::from_str::<EntityId>(text) {
        Ok(id) if !id.as_str().is_empty() => Ok(id),
        Ok(_) => Err(unexpected()),
        Err(_) => {
            let bare = text.trim();
            if bare.is_empty() || bare.starts_with(['{', '[', '"']) {
                Err(unexpected())
            } else {
                Ok(EntityId::new(bare))
            }
        }
    }
}

#[async_trait]
impl JudgeApi for HttpJudgeClient {
    async fn get_contest(&self, contest_id: &EntityId) -> AppResult<Contest> {
        let url = self.endpoint(&["contests", contest_id.as_str()])?;
        self.get_json(url, "contest").await
    }

    async fn submit(&self, request: &CreateSubmissionRequest) -> AppResult<EntityId> {
        let url = self.endpoint(&["submissions"])?;
        tracing::debug!(
            "POST {} (contest={}, problem={}, language={})",
            url,
            request.contest_id,
            request.problem_id,
            request.language
        );

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(submission_rejected(status, &text));
        }

        parse_submission_id(&text)
    }

    async fn get_submission(&self, submission_id: &EntityId) -> AppResult<Submission> {
        let url = self.endpoint(&["submissions", submission_id.as_str()])?;
        self.get_json(url, "submission").await
    }

    async fn get_leaderboard(&self, contest_id: &EntityId) -> AppResult<Vec<LeaderboardEntry>> {
        let url = self.endpoint(&["contests", contest_id.as_str(), "leaderboard"])?;
        self.get_json(url, "leaderboard").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base_url: &str) -> HttpJudgeClient {
        HttpJudgeClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(1),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = client("http://localhost:8081/api");
        let url = api.endpoint(&["contests", "a b/c", "leaderboard"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/api/contests/a%20b%2Fc/leaderboard"
        );

        let api = client("http://localhost:8081/api/");
        let url = api.endpoint(&["submissions", "42"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/api/submissions/42");
    }

    #[test]
    fn test_rejection_message_uses_json_or_text() {
        let err = submission_rejected(StatusCode::BAD_REQUEST, "code is required");
        assert_eq!(
            err.to_string(),
            "Submission failed: 400 \"code is required\""
        );

        let err = submission_rejected(StatusCode::BAD_REQUEST, r#"{"error":"bad"}"#);
        assert_eq!(err.to_string(), r#"Submission failed: 400 {"error":"bad"}"#);
        assert_eq!(err.http_status(), Some(400));
    }

    #[test]
    fn test_parse_submission_id() {
        assert_eq!(parse_submission_id("42").unwrap().as_str(), "42");
        assert_eq!(parse_submission_id("\"abc\"").unwrap().as_str(), "abc");
        assert_eq!(parse_submission_id("17\n").unwrap().as_str(), "17");
        assert_eq!(parse_submission_id("sub-9").unwrap().as_str(), "sub-9");
        assert!(parse_submission_id("").is_err());
        assert!(parse_submission_id("\"\"").is_err());
        assert!(parse_submission_id("{\"id\": 1}").is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = HttpJudgeClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            request_timeout: Duration::from_secs(1),
        });
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
