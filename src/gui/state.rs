use crate::{
    config::Config,
    core::{ProjectStore, SessionState},
};

#[derive(Debug)]
pub struct AppState {
    pub store: ProjectStore,
    /// The open project. Moved into a step while it saves and moved back out.
    pub session: Option<SessionState>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            store: config.store(),
            session: None,
        }
    }

    pub fn project_name(&self) -> String {
        self.session
            .as_ref()
            .and_then(|session| session.file_name())
            .unwrap_or("Untitled")
            .to_string()
    }
}
