//! Contest page

use crate::constants::CONTEST_LOAD_FAILED;
use crate::error::{AppError, AppResult};
use crate::models::{Contest, ContestStatus, EntityId, Problem};
use crate::services::ContestService;
use crate::state::ClientContext;
use crate::utils::time::{format_duration, time_until};

use super::problem::render_problem_view;

/// Page load state
#[derive(Debug, Clone)]
pub enum PageState {
    Loading,
    /// The contest could not be fetched; the message is shown instead
    Failed(String),
    Ready(Contest),
}

/// Contest page: header, problem tabs and the selected problem
#[derive(Debug, Clone)]
pub struct ContestPage {
    username: String,
    contest_id: EntityId,
    state: PageState,
    selected: Option<EntityId>,
}

impl ContestPage {
    /// Open the page for the session's participant.
    ///
    /// Without a username there is nobody to show the page to and
    /// [`AppError::MissingUser`] is returned. A failed fetch is not an error:
    /// the page renders its failure state.
    pub async fn open(ctx: &ClientContext, contest_id: &EntityId) -> AppResult<Self> {
        let username = ctx.session().require_username()?.to_string();

        let mut page = Self {
            username,
            contest_id: contest_id.clone(),
            state: PageState::Loading,
            selected: None,
        };

        let api = ctx.api();
        let result = ContestService::get_contest(api.as_ref(), contest_id).await;
        page.load(result);
        Ok(page)
    }

    /// Apply a contest fetch result; the first problem is selected
    pub fn load(&mut self, result: AppResult<Contest>) {
        match result {
            Ok(contest) => {
                self.selected = contest.first_problem().map(|p| p.id.clone());
                self.state = PageState::Ready(contest);
            }
            Err(_) => {
                self.selected = None;
                self.state = PageState::Failed(CONTEST_LOAD_FAILED.to_string());
            }
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn contest_id(&self) -> &EntityId {
        &self.contest_id
    }

    pub fn contest(&self) -> Option<&Contest> {
        match &self.state {
            PageState::Ready(contest) => Some(contest),
            _ => None,
        }
    }

    pub fn selected_problem(&self) -> Option<&Problem> {
        let contest = self.contest()?;
        let id = self.selected.as_ref()?;
        contest.problem(id)
    }

    /// Select a problem by id or (case-insensitive) title
    pub fn select_problem(&mut self, key: &str) -> AppResult<&Problem> {
        let contest = self
            .contest()
            .ok_or_else(|| AppError::NotFound("Contest not loaded".to_string()))?;

        let key = key.trim();
        let id = contest
            .problems
            .iter()
            .find(|p| p.id.as_str() == key)
            .or_else(|| {
                contest
                    .problems
                    .iter()
                    .find(|p| p.title.eq_ignore_ascii_case(key))
            })
            .map(|p| p.id.clone())
            .ok_or_else(|| AppError::NotFound(format!("Problem '{}'", key)))?;

        self.selected = Some(id);
        self.selected_problem()
            .ok_or_else(|| AppError::NotFound(format!("Problem '{}'", key)))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        match &self.state {
            PageState::Loading => {
                out.push_str("Loading contest...\n");
            }
            PageState::Failed(message) => {
                out.push_str(message);
                out.push('\n');
            }
            PageState::Ready(contest) => {
                out.push_str(&contest.name);
                out.push('\n');
                out.push_str(&format!("Welcome, {}\n", self.username));
                if let Some(window) = render_window(contest) {
                    out.push_str(&window);
                    out.push('\n');
                }
                if !contest.description.is_empty() {
                    out.push_str(&format!("\n{}\n", contest.description));
                }
                out.push('\n');
                out.push_str(&render_problem_view(contest, self.selected_problem()));
            }
        }

        out
    }
}

fn render_window(contest: &Contest) -> Option<String> {
    match contest.status() {
        ContestStatus::Upcoming => contest
            .start_time
            .and_then(time_until)
            .map(|d| format!("Starts in {}", format_duration(d))),
        ContestStatus::Ongoing => contest
            .end_time
            .and_then(time_until)
            .map(|d| format!("Ends in {}", format_duration(d))),
        ContestStatus::Ended => Some("Contest has ended".to_string()),
        ContestStatus::Unscheduled => None,
    }
}
