//! Code editor view
//!
//! Holds the code being written for one problem and the latest state of its
//! submission. Each poll response is published through a `watch` channel,
//! so readers always see the newest record.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::constants::{ACCEPTED_BANNER, NO_DETAILS, POLL_FAILED_PREFIX, languages, templates};
use crate::error::{AppError, AppResult};
use crate::models::{EntityId, Problem, Severity, Submission, Verdict};
use crate::services::{PollOutcome, SubmissionPoller, SubmissionService};
use crate::state::ClientContext;
use crate::utils::validate_language;

/// Starter code for `language`; empty for languages without a template
pub fn default_code(language: &str) -> &'static str {
    match language {
        languages::JAVA => templates::JAVA,
        languages::PYTHON => templates::PYTHON,
        languages::CPP => templates::CPP,
        _ => "",
    }
}

/// Editor for one problem of a contest
pub struct EditorView {
    ctx: ClientContext,
    contest_id: EntityId,
    problem: Problem,
    language: String,
    code: String,
    is_submitting: bool,
    last_error: Option<String>,
    submission: Arc<watch::Sender<Option<Submission>>>,
    /// Error that ended polling of the current submission
    poll_error: Arc<watch::Sender<Option<String>>>,
    /// Bumped whenever the shown submission is replaced or discarded
    epoch: Arc<AtomicU64>,
    poller: SubmissionPoller,
}

impl EditorView {
    pub fn new(ctx: ClientContext, contest_id: EntityId, problem: Problem) -> Self {
        let poller = SubmissionPoller::new(ctx.api(), ctx.config().polling.submission_interval);
        let (submission, _) = watch::channel(None);
        let (poll_error, _) = watch::channel(None);

        Self {
            ctx,
            contest_id,
            problem,
            language: languages::DEFAULT.to_string(),
            code: default_code(languages::DEFAULT).to_string(),
            is_submitting: false,
            last_error: None,
            submission: Arc::new(submission),
            poll_error: Arc::new(poll_error),
            epoch: Arc::new(AtomicU64::new(0)),
            poller,
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Switch language; the code is reset to that language's template
    pub fn set_language(&mut self, language: &str) -> AppResult<()> {
        validate_language(language).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        self.language = language.to_string();
        self.reset_code();
        Ok(())
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Restore the template of the current language
    pub fn reset_code(&mut self) {
        self.code = default_code(&self.language).to_string();
    }

    /// Show another problem; the current submission and its poll are dropped
    pub fn select_problem(&mut self, problem: Problem) {
        if problem.id == self.problem.id {
            return;
        }
        self.discard_submission();
        self.problem = problem;
        self.last_error = None;
    }

    /// Latest known state of the current submission
    pub fn submission(&self) -> Option<Submission> {
        self.submission.borrow().clone()
    }

    /// Receiver notified on every change of the current submission
    pub fn subscribe(&self) -> watch::Receiver<Option<Submission>> {
        self.submission.subscribe()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Error of the last submit, or of the poll that followed it
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .clone()
            .or_else(|| self.poll_error.borrow().clone())
    }

    /// Whether the current submission is still queued or being judged.
    ///
    /// A submission whose poll failed or was stopped is no longer followed
    /// and does not block a resubmit.
    pub fn is_judging(&self) -> bool {
        self.poll_error.borrow().is_none()
            && self.poller.is_active()
            && self
                .submission
                .borrow()
                .as_ref()
                .is_some_and(|s| s.verdict().is_in_flight())
    }

    /// Submitting is blocked while a submit or a judgement is in progress
    pub fn can_submit(&self) -> bool {
        !self.is_submitting && !self.code.trim().is_empty() && !self.is_judging()
    }

    /// Submit the current code and start following its verdict
    pub async fn submit(&mut self) -> AppResult<EntityId> {
        if self.is_judging() {
            return Err(AppError::InvalidInput(
                "The previous submission is still being judged".to_string(),
            ));
        }
        if !self.can_submit() {
            return Err(AppError::InvalidInput(
                "Source code cannot be empty".to_string(),
            ));
        }

        self.is_submitting = true;
        self.last_error = None;

        let api = self.ctx.api();
        let result = SubmissionService::submit(
            api.as_ref(),
            self.ctx.session(),
            &self.contest_id,
            &self.problem.id,
            &self.code,
            &self.language,
        )
        .await;

        self.is_submitting = false;

        match result {
            Ok(stub) => {
                let submission_id = stub.id.clone();
                self.follow(stub);
                Ok(submission_id)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Wait until the current poll ends
    pub async fn wait_for_verdict(&mut self) -> Option<PollOutcome> {
        self.poller.wait().await
    }

    /// Stop polling, keeping the last known record
    pub fn stop_polling(&mut self) {
        self.poller.cancel();
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_active()
    }

    /// Show `stub` and poll the judge for its replacements
    fn follow(&mut self, stub: Submission) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let submission_id = stub.id.clone();
        self.poll_error.send_replace(None);
        self.submission.send_replace(Some(stub));

        let sender = self.submission.clone();
        let current = self.epoch.clone();
        let on_update = move |update: Submission| {
            // the epoch check runs under the channel lock, so a discard cannot interleave
            sender.send_if_modified(|shown| {
                if current.load(Ordering::SeqCst) != epoch {
                    return false;
                }
                *shown = Some(update);
                true
            });
        };

        let errors = self.poll_error.clone();
        let current = self.epoch.clone();
        let on_failure = move |e: &AppError| {
            errors.send_if_modified(|shown| {
                if current.load(Ordering::SeqCst) != epoch {
                    return false;
                }
                *shown = Some(format!("{}{}", POLL_FAILED_PREFIX, e));
                true
            });
        };

        self.poller.start_with_failure(submission_id, on_update, on_failure);
    }

    fn discard_submission(&mut self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.poller.cancel();
        self.poll_error.send_replace(None);
        self.submission.send_replace(None);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Code Editor ({}) - {}\n", self.language, self.problem.title));
        out.push_str(&format!("Lines: {}\n", self.code.split('\n').count()));

        let button = if self.is_submitting {
            "Submitting..."
        } else {
            "Submit Code"
        };
        let state = if self.can_submit() { "" } else { " (disabled)" };
        out.push_str(&format!("[{}]{}\n", button, state));

        if let Some(error) = self.last_error() {
            out.push_str(&format!("Error: {}\n", error));
        }

        if let Some(submission) = self.submission.borrow().as_ref() {
            out.push_str(&render_submission_status(submission));
        }

        out
    }
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Failure => "✗",
        Severity::Warning => "!",
        Severity::Neutral => "·",
    }
}

/// Status line plus the result panel of a submission
pub fn render_submission_status(submission: &Submission) -> String {
    let status = &submission.status;
    let mut out = String::new();

    out.push_str(&format!("Status: {}", status.label()));
    if status.verdict() == Verdict::Running {
        out.push_str(" ...");
    }
    out.push_str(&format!(" {}\n", severity_marker(status.severity())));

    if status.verdict() == Verdict::Accepted {
        out.push_str(ACCEPTED_BANNER);
        out.push('\n');
    } else {
        let details = submission
            .result_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(NO_DETAILS);
        out.push_str(details);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{JudgeApi, MockJudgeApi};
    use crate::config::Config;
    use crate::session::Session;
    use serde_json::json;
    use std::time::Duration;

    fn problem(id: &str, title: &str) -> Problem {
        serde_json::from_value(json!({"id": id, "title": title})).unwrap()
    }

    fn record(status: &str, message: Option<&str>) -> Submission {
        serde_json::from_value(json!({"id": 42, "status": status, "resultMessage": message}))
            .unwrap()
    }

    fn context(api: MockJudgeApi, session: Session) -> ClientContext {
        let mut config = Config::default();
        config.polling.submission_interval = Duration::from_millis(2000);
        let api: Arc<dyn JudgeApi> = Arc::new(api);
        ClientContext::new(api, session, config)
    }

    fn editor(api: MockJudgeApi) -> EditorView {
        let ctx = context(api, Session::join("1", "alice").unwrap());
        EditorView::new(ctx, EntityId::from("1"), problem("1", "Sum Two"))
    }

    #[test]
    fn test_language_switch_resets_template() {
        let mut view = editor(MockJudgeApi::new());
        assert_eq!(view.code(), templates::JAVA);

        view.set_code("print(1)");
        view.set_language("python").unwrap();
        assert_eq!(view.code(), templates::PYTHON);

        view.set_code("");
        view.reset_code();
        assert_eq!(view.code(), templates::PYTHON);

        assert!(view.set_language("cobol").is_err());
        assert_eq!(view.language(), "python");
    }

    #[test]
    fn test_blank_code_blocks_submit() {
        let mut view = editor(MockJudgeApi::new());
        view.set_code("   ");
        assert!(!view.can_submit());
        assert!(view.render().contains("[Submit Code] (disabled)"));
    }

    #[test]
    fn test_render_submission_status() {
        let out = render_submission_status(&record("ACCEPTED", None));
        assert!(out.contains("Status: Accepted ✓"));
        assert!(out.contains(ACCEPTED_BANNER));

        let out = render_submission_status(&record("WRONG_ANSWER", Some("Test 2 failed")));
        assert!(out.contains("Status: Wrong Answer ✗"));
        assert!(out.contains("Test 2 failed"));

        let out = render_submission_status(&record("RUNNING", None));
        assert!(out.contains("Running ..."));
        assert!(out.contains(NO_DETAILS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_poll_to_verdict() {
        let mut api = MockJudgeApi::new();
        api.expect_submit()
            .times(1)
            .returning(|_| Ok(EntityId::from("42")));
        api.expect_get_submission()
            .times(1)
            .returning(|_| Ok(record("ACCEPTED", None)));

        let mut view = editor(api);
        view.set_code("class Main {}");

        let id = view.submit().await.unwrap();
        assert_eq!(id.as_str(), "42");
        assert!(view.is_judging());
        assert!(!view.can_submit());
        assert!(view.render().contains("Status: Pending ·"));

        match view.wait_for_verdict().await {
            Some(PollOutcome::Terminal(s)) => assert_eq!(s.verdict(), Verdict::Accepted),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(view.submission().map(|s| s.verdict()), Some(Verdict::Accepted));
        assert!(view.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_problem_discards_submission() {
        let mut api = MockJudgeApi::new();
        api.expect_submit().returning(|_| Ok(EntityId::from("42")));
        api.expect_get_submission().never();

        let mut view = editor(api);
        view.set_code("class Main {}");
        view.submit().await.unwrap();
        let mut updates = view.subscribe();

        view.select_problem(problem("2", "Echo"));
        assert!(view.submission().is_none());
        assert!(!view.is_polling());
        assert!(updates.has_changed().unwrap());
        assert!(updates.borrow_and_update().is_none());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!updates.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_poll_unlocks_resubmit() {
        let mut api = MockJudgeApi::new();
        api.expect_submit()
            .times(2)
            .returning(|_| Ok(EntityId::from("42")));
        api.expect_get_submission()
            .returning(|_| Err(AppError::Network("connection refused".to_string())));

        let mut view = editor(api);
        view.set_code("class Main {}");
        view.submit().await.unwrap();
        assert!(view.is_judging());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!view.is_polling());
        assert!(!view.is_judging());
        assert!(view.can_submit());
        assert!(view.last_error().unwrap().starts_with(POLL_FAILED_PREFIX));

        let out = view.render();
        assert!(out.contains("Error: Lost track of the submission"));
        assert!(!out.contains("(disabled)"));

        view.submit().await.unwrap();
        assert!(view.last_error().is_none());
        assert!(view.is_judging());
    }

    #[tokio::test]
    async fn test_failed_submit_is_shown_inline() {
        let mut api = MockJudgeApi::new();
        api.expect_submit().returning(|_| {
            Err(AppError::Http {
                status: 500,
                message: "Submission failed: 500 \"boom\"".to_string(),
            })
        });
        api.expect_get_submission().never();

        let mut view = editor(api);
        view.set_code("class Main {}");
        assert!(view.submit().await.is_err());
        assert!(!view.is_polling());
        assert!(view.submission().is_none());
        assert!(view.render().contains("Error: Submission failed: 500 \"boom\""));
    }

    #[tokio::test]
    async fn test_submit_without_session_user() {
        let mut api = MockJudgeApi::new();
        api.expect_submit().never();

        let ctx = context(api, Session::default());
        let mut view = EditorView::new(ctx, EntityId::from("1"), problem("1", "Sum Two"));
        view.set_code("class Main {}");

        assert!(matches!(view.submit().await, Err(AppError::MissingUser)));
        assert_eq!(view.last_error(), Some("User not found".to_string()));
    }
}
