pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;

use std::sync::Arc;

use config::Config;
use llm::Inference;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ai: Arc<dyn Inference>,
}
