use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_copilot_api::config::Config;
use cv_copilot_api::db::{create_pool, run_migrations};
use cv_copilot_api::llm_client::LlmClient;
use cv_copilot_api::pdfs::render::PdftoppmRenderer;
use cv_copilot_api::pdfs::storage::PdfArchive;
use cv_copilot_api::routes::build_router;
use cv_copilot_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Copilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    if config.run_migrations {
        run_migrations(&db).await?;
    }

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO archive, if configured
    let archive = match &config.s3 {
        Some(s3) => {
            let archive = PdfArchive::connect(s3).await;
            info!("S3 archive enabled (bucket: {})", s3.bucket);
            Some(archive)
        }
        None => {
            info!("S3 archive disabled; PDFs are kept in Postgres only");
            None
        }
    };

    // Initialize LLM client
    let llm = LlmClient::new(config.llm.clone())?;
    info!(
        "LLM client initialized (model: {}, vision model: {})",
        llm.model(),
        config.llm.vision_model
    );

    let renderer = PdftoppmRenderer::new(config.pdf.pdftoppm_path.clone(), config.pdf.render_dpi);

    let state = AppState {
        db,
        redis,
        archive,
        llm: Arc::new(llm),
        renderer: Arc::new(renderer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the recruiter frontend has a fixed host

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
