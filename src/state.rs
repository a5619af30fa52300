use std::sync::Arc;

use crate::agents::GeminiAgent;
use crate::config::Config;
use crate::roster::Roster;
use crate::sessions::SessionRegistry;
use crate::store::ComplaintStore;

pub struct AppState {
    pub store: ComplaintStore,
    pub roster: Roster,
    pub sessions: SessionRegistry,
    pub summarizer: GeminiAgent,
    pub config: Arc<Config>,
}
