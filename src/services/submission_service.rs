//! Submission service

use validator::Validate;

use crate::{
    client::JudgeApi,
    constants::languages,
    error::{AppError, AppResult},
    models::{CreateSubmissionRequest, EntityId, Submission},
    session::Session,
    utils::{validate_language, validate_source_code},
};

/// Submission service for the submit flow
pub struct SubmissionService;

impl SubmissionService {
    /// Send code to the judge and return the provisional record.
    ///
    /// Nothing reaches the judge unless the session has a username. The
    /// returned record is PENDING until the first poll replaces it.
    pub async fn submit(
        api: &dyn JudgeApi,
        session: &Session,
        contest_id: &EntityId,
        problem_id: &EntityId,
        code: &str,
        language: &str,
    ) -> AppResult<Submission> {
        let username = session.require_username()?;

        validate_source_code(code).map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let language = match language.trim() {
            "" => languages::DEFAULT,
            language => language,
        };
        validate_language(language).map_err(|e| AppError::InvalidInput(e.to_string()))?;

        let request = CreateSubmissionRequest {
            contest_id: contest_id.as_number()?,
            problem_id: problem_id.as_number()?,
            username: username.to_string(),
            code: code.to_string(),
            language: language.to_string(),
        };
        request.validate()?;

        let submission_id = api.submit(&request).await.map_err(|e| {
            tracing::error!("Submission failed: {}", e);
            e
        })?;

        tracing::info!(
            "Submitted {} solution for problem {} as submission {}",
            language,
            problem_id,
            submission_id
        );

        Ok(Submission::provisional(
            submission_id,
            username,
            problem_id.clone(),
            request.code,
            request.language,
        ))
    }
}
