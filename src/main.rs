//! Shodh-a-Code client - command line entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shodh_client::{
    AppError, ClientContext, Config, HttpJudgeClient, Session, SessionStore,
    constants::languages,
    models::{EntityId, Submission},
    services::{ContestService, PollOutcome},
    views::{
        ContestPage, EditorView, LeaderboardView, PageState, default_code, render_problem,
        render_submission_status,
    },
};

#[derive(Parser)]
#[command(name = "shodh", about = "Take part in Shodh-a-Code contests", version)]
struct Cli {
    /// Judge API base URL
    #[arg(long, global = true, env = "JUDGE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Join a contest under a username
    Join {
        #[arg(long, short)]
        contest: String,
        #[arg(long, short)]
        username: String,
    },
    /// Forget the local session
    Leave,
    /// Show the contest page
    Contest {
        #[arg(long, short)]
        contest: Option<String>,
    },
    /// Show one problem, by id or title
    Problem {
        problem: String,
        #[arg(long, short)]
        contest: Option<String>,
    },
    /// Print the starter code for a language
    Template {
        #[arg(long, short, default_value = languages::DEFAULT)]
        language: String,
    },
    /// Submit a solution and follow its verdict
    Submit {
        /// Problem id or title
        #[arg(long, short)]
        problem: String,
        /// Source file
        #[arg(long, short)]
        file: PathBuf,
        #[arg(long, short, default_value = languages::DEFAULT)]
        language: String,
        #[arg(long, short)]
        contest: Option<String>,
    },
    /// Show the leaderboard
    Leaderboard {
        #[arg(long, short)]
        contest: Option<String>,
        /// Keep refreshing until interrupted
        #[arg(long, short)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.trim_end_matches('/').to_string();
    }

    // Initialize tracing; stdout is reserved for views
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = SessionStore::new(config.session.path.clone());

    match cli.command {
        Command::Join { contest, username } => {
            let session = Session::join(&contest, &username)?;
            store.save(&session)?;
            println!(
                "Joined contest {} as {}",
                contest.trim(),
                session.username().unwrap_or_default()
            );
        }
        Command::Leave => {
            store.clear()?;
            println!("Left the contest");
        }
        Command::Template { language } => {
            let code = default_code(&language);
            if code.is_empty() {
                bail!("No template for language '{}'", language);
            }
            println!("{}", code);
        }
        Command::Contest { contest } => {
            let ctx = connect(config, &store)?;
            let page = open_page(&ctx, contest).await?;
            print!("{}", page.render());
        }
        Command::Problem { problem, contest } => {
            let ctx = connect(config, &store)?;
            let mut page = open_page(&ctx, contest).await?;
            print!("{}", render_problem(page.select_problem(&problem)?));
        }
        Command::Submit {
            problem,
            file,
            language,
            contest,
        } => {
            let code = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading {}", file.display()))?;

            let ctx = connect(config, &store)?;
            let mut page = open_page(&ctx, contest).await?;
            let problem = page.select_problem(&problem)?.clone();

            let mut editor = EditorView::new(ctx.clone(), page.contest_id().clone(), problem);
            editor.set_language(&language)?;
            editor.set_code(code);

            if let Err(e) = editor.submit().await {
                print!("{}", editor.render());
                return Err(e.into());
            }
            print!("{}", editor.render());

            follow_submission(&mut editor).await?;
        }
        Command::Leaderboard { contest, watch } => {
            let ctx = connect(config, &store)?;
            show_leaderboard(&ctx, contest, watch).await?;
        }
    }

    Ok(())
}

/// Build the client context from the stored session
fn connect(config: Config, store: &SessionStore) -> anyhow::Result<ClientContext> {
    let session = store.load()?;
    let api = HttpJudgeClient::new(&config.api)?;
    tracing::debug!("Using judge at {}", api.base_url());
    Ok(ClientContext::new(Arc::new(api), session, config))
}

async fn show_leaderboard(
    ctx: &ClientContext,
    contest: Option<String>,
    watch: bool,
) -> anyhow::Result<()> {
    let contest_id = resolve_contest(ctx, contest)?;
    let mut view = LeaderboardView::new(ctx.clone(), contest_id.clone());

    if !watch {
        let api = ctx.api();
        view.apply(ContestService::get_leaderboard(api.as_ref(), &contest_id).await);
        print!("{}", view.render());
        return Ok(());
    }

    let mut updates = view.subscribe();
    view.start();
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                print!("\n{}", state.render());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping leaderboard refresh");
                break;
            }
        }
    }
    view.stop();

    Ok(())
}

/// Print each new state of the submission until judging ends
async fn follow_submission(editor: &mut EditorView) -> anyhow::Result<()> {
    let mut updates = editor.subscribe();
    updates.borrow_and_update();
    let mut last_shown: Option<Submission> = editor.submission();

    let outcome = {
        let verdict = editor.wait_for_verdict();
        tokio::pin!(verdict);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break None;
                    }
                    let update = updates.borrow_and_update().clone();
                    if let Some(submission) = update {
                        if last_shown.as_ref() != Some(&submission) {
                            print!("{}", render_submission_status(&submission));
                            last_shown = Some(submission);
                        }
                    }
                }
                outcome = &mut verdict => break outcome,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopped following the submission");
                    break None;
                }
            }
        }
    };

    match outcome {
        Some(PollOutcome::Terminal(submission)) => {
            if last_shown.as_ref() != Some(&submission) {
                print!("{}", render_submission_status(&submission));
            }
            Ok(())
        }
        Some(PollOutcome::Failed(e)) => {
            Err(anyhow::Error::new(e).context("Lost track of the submission; resubmit to retry"))
        }
        Some(PollOutcome::Cancelled) | None => Ok(()),
    }
}

fn resolve_contest(ctx: &ClientContext, contest: Option<String>) -> anyhow::Result<EntityId> {
    match contest.map(EntityId::from).or_else(|| ctx.session().contest_id.clone()) {
        Some(id) if !id.as_str().is_empty() => Ok(id),
        _ => bail!("No contest selected; run `shodh join` first or pass --contest"),
    }
}

async fn open_page(ctx: &ClientContext, contest: Option<String>) -> anyhow::Result<ContestPage> {
    let contest_id = resolve_contest(ctx, contest)?;

    let page = match ContestPage::open(ctx, &contest_id).await {
        Ok(page) => page,
        Err(AppError::MissingUser) => {
            bail!("No user in the local session; run `shodh join` first")
        }
        Err(e) => return Err(e.into()),
    };

    if let PageState::Failed(message) = page.state() {
        bail!("{}", message);
    }
    Ok(page)
}
