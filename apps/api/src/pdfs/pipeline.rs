//! End-to-end processing of one CV: text, skill matches, score.

use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::pdfs::repo;
use crate::pdfs::workflow::convert_pdf_to_text;
use crate::scoring::calculation::ScoreBreakdown;
use crate::scoring::service::score_parsed_text;
use crate::state::AppState;
use crate::texts::evaluation::{evaluate_cv_against, require_parsed_job};

#[derive(Debug, Serialize)]
pub struct ProcessReport {
    pub pdf_id: i32,
    pub job_description_id: i32,
    pub text_id: i32,
    pub parsed_text_id: i32,
    pub score_id: i32,
    pub page_count: usize,
    pub breakdown: ScoreBreakdown,
}

pub async fn process_pdf(state: &AppState, pdf_id: i32) -> Result<ProcessReport, AppError> {
    let pdf = repo::require_pdf(&state.db, pdf_id).await?;
    info!("Processing PDF {} for job description {}", pdf.id, pdf.job_id);

    // Fails before rendering when the job was never parsed.
    let parsed_job = require_parsed_job(state, pdf.job_id).await?;

    let converted = convert_pdf_to_text(state, pdf.id)
        .await
        .inspect_err(|e| error!("PDF {pdf_id}: text conversion failed: {e}"))?;
    let parsed = evaluate_cv_against(state, &pdf, &converted.text, &parsed_job)
        .await
        .inspect_err(|e| error!("PDF {pdf_id}: CV evaluation failed: {e}"))?;
    let scored = score_parsed_text(state, &parsed)
        .await
        .inspect_err(|e| error!("PDF {pdf_id}: scoring failed: {e}"))?;

    info!(
        "Processed PDF {pdf_id}: {} pages, score {:.3}",
        converted.page_count, scored.breakdown.score
    );

    Ok(ProcessReport {
        pdf_id: pdf.id,
        job_description_id: pdf.job_id,
        text_id: converted.text.id,
        parsed_text_id: parsed.id,
        score_id: scored.score.id,
        page_count: converted.page_count,
        breakdown: scored.breakdown,
    })
}

/// Runs `process_pdf` detached from the request; the outcome is only logged.
pub fn spawn_process_pdf(state: AppState, pdf_id: i32) {
    tokio::spawn(async move {
        match process_pdf(&state, pdf_id).await {
            Ok(report) => info!(
                "Background processing of PDF {pdf_id} finished with score {:.3}",
                report.breakdown.score
            ),
            Err(e) => error!("Background processing of PDF {pdf_id} failed: {e}"),
        }
    });
}
