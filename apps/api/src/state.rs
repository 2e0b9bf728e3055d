use std::sync::Arc;

use crate::generation::content::ContentGenerator;
use crate::humanizer::HumanizerClient;
use crate::scheduler::Scheduler;
use crate::store::blogs::BlogStore;
use crate::store::keywords::KeywordStore;
use crate::store::leads::LeadStore;
use crate::store::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub settings: SettingsStore,
    pub keywords: KeywordStore,
    pub blogs: BlogStore,
    pub leads: LeadStore,
    /// Pluggable content generator. Production wires the OpenAI-backed
    /// implementation; tests swap in stubs.
    pub generator: Arc<dyn ContentGenerator>,
    pub humanizer: HumanizerClient,
    pub scheduler: Scheduler,
}
