use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum
/// extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Generative text seam. Production: the Anthropic-backed `LlmClient`;
    /// tests substitute canned generators.
    pub generator: Arc<dyn TextGenerator>,
}
