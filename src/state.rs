//! Client context
//!
//! Built once at program entry and handed to every view and service that
//! needs configuration, the judge or the participant's session.

use std::sync::Arc;

use crate::client::JudgeApi;
use crate::config::Config;
use crate::session::Session;

/// Shared client context
#[derive(Clone)]
pub struct ClientContext {
    inner: Arc<ClientContextInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct ClientContextInner {
    /// Judge service client
    api: Arc<dyn JudgeApi>,

    /// Participant identity read at startup
    session: Session,

    /// Client configuration
    config: Config,
}

impl ClientContext {
    /// Create a new client context
    pub fn new(api: Arc<dyn JudgeApi>, session: Session, config: Config) -> Self {
        Self {
            inner: Arc::new(ClientContextInner {
                api,
                session,
                config,
            }),
        }
    }

    /// Get a handle to the judge API
    pub fn api(&self) -> Arc<dyn JudgeApi> {
        self.inner.api.clone()
    }

    /// Get a reference to the session
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}
