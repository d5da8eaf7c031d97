pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::pdfs::handlers as pdfs;
use crate::scoring::handlers as scores;
use crate::state::AppState;
use crate::texts::handlers as texts;

/// Upper bound for a multipart CV upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api/v1", api_routes())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job descriptions
        .route(
            "/job-descriptions",
            post(jobs::handle_create).get(jobs::handle_list),
        )
        .route("/job-descriptions/recent", get(jobs::handle_recent))
        .route("/job-descriptions/search", get(jobs::handle_search))
        .route(
            "/job-descriptions/:id",
            get(jobs::handle_get)
                .put(jobs::handle_update)
                .delete(jobs::handle_delete),
        )
        .route("/job-descriptions/:id/process", post(jobs::handle_process))
        .route(
            "/parsed-job-descriptions/:job_id",
            get(jobs::handle_get_parsed),
        )
        // PDFs and their page images
        .route(
            "/pdfs",
            post(pdfs::handle_upload)
                .get(pdfs::handle_list)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/pdfs/:id",
            get(pdfs::handle_get)
                .put(pdfs::handle_rename)
                .delete(pdfs::handle_delete),
        )
        .route("/pdfs/:id/file", get(pdfs::handle_download))
        .route("/pdfs/:id/process", post(pdfs::handle_process))
        .route("/pdfs/:id/images", get(pdfs::handle_list_images))
        .route(
            "/images/:id",
            get(pdfs::handle_get_image).delete(pdfs::handle_delete_image),
        )
        // Texts and match documents
        .route(
            "/texts/:pdf_id/text",
            get(texts::handle_get_text)
                .post(texts::handle_create_text)
                .put(texts::handle_update_text),
        )
        .route("/parsed-texts/:pdf_id", get(texts::handle_get_parsed_text))
        .route(
            "/parsed-texts/:pdf_id/evaluate",
            post(texts::handle_evaluate),
        )
        // Scores
        .route(
            "/scores/process/:pdf_id/:job_description_id",
            post(scores::handle_process_score),
        )
        .route(
            "/scores/:pdf_id/:job_description_id",
            get(scores::handle_get_score),
        )
}
