//! Local session
//!
//! The judge has no login: a participant is whoever the locally stored
//! username says they are. The session is read once at program entry and
//! passed around explicitly.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{JOIN_FIELDS_REQUIRED, USER_ID_PREFIX};
use crate::error::{AppError, AppResult};
use crate::models::EntityId;
use crate::utils::{now_utc, sanitize_string};

/// Locally persisted participant identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Contest joined last
    #[serde(default)]
    pub contest_id: Option<EntityId>,
}

/// Join form input
#[derive(Debug, Validate)]
pub struct JoinRequest {
    #[validate(length(min = 1))]
    pub contest_id: String,

    #[validate(length(min = 1))]
    pub username: String,
}

impl Session {
    /// Start a session for `username` in `contest_id`
    pub fn join(contest_id: &str, username: &str) -> AppResult<Self> {
        let request = JoinRequest {
            contest_id: sanitize_string(contest_id),
            username: sanitize_string(username),
        };
        request
            .validate()
            .map_err(|_| AppError::InvalidInput(JOIN_FIELDS_REQUIRED.to_string()))?;

        Ok(Self {
            username: Some(request.username),
            user_id: Some(format!("{}{}", USER_ID_PREFIX, now_utc().timestamp_millis())),
            contest_id: Some(EntityId::new(request.contest_id)),
        })
    }

    /// Username, if one is stored and non-blank
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Username or [`AppError::MissingUser`]
    pub fn require_username(&self) -> AppResult<&str> {
        self.username().ok_or(AppError::MissingUser)
    }
}

/// JSON file holding the session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session; a missing file is an empty session
    pub fn load(&self) -> AppResult<Session> {
        match fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                AppError::Session(format!("{}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(session)
            .map_err(|e| AppError::Session(e.to_string()))?;
        fs::write(&self.path, text)?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// Forget the session
    pub fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
