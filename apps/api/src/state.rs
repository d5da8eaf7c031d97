use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::pdfs::render::PageRenderer;
use crate::pdfs::storage::PdfArchive;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Only pinged by the health check.
    pub redis: RedisClient,
    /// `None` when S3 is not configured; uploads then live in Postgres only.
    pub archive: Option<PdfArchive>,
    /// Default: `LlmClient` against the OpenAI chat completions API.
    pub llm: Arc<dyn LanguageModel>,
    /// Default: `PdftoppmRenderer`.
    pub renderer: Arc<dyn PageRenderer>,
    pub config: Config,
}
