//! CV text → skill match document.

use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::repo as job_repo;
use crate::jobs::skills::EvaluationExtract;
use crate::llm_client::{call_json, prompts::with_shared_rules, LanguageModel};
use crate::models::job_description::ParsedJobDescriptionRow;
use crate::models::pdf::PdfRow;
use crate::models::text::{ParsedTextRow, TextRow};
use crate::state::AppState;
use crate::texts::prompts::{CV_MATCH_SYSTEM, CV_MATCH_USER_TEMPLATE};
use crate::texts::repo;

/// Fills the CV prompt. The CV text is inserted last so braces in it are never substituted.
pub fn build_match_prompt(parsed_skills: &serde_json::Value, cv_text: &str) -> String {
    let skills = serde_json::to_string_pretty(parsed_skills)
        .unwrap_or_else(|_| parsed_skills.to_string());
    CV_MATCH_USER_TEMPLATE
        .replace("{parsed_skills}", &skills)
        .replace("{cv_text}", cv_text)
}

/// Asks the LLM to match a CV text against a parsed job description.
pub async fn match_skills(
    llm: &dyn LanguageModel,
    parsed_job: &ParsedJobDescriptionRow,
    cv_text: &str,
) -> Result<EvaluationExtract, AppError> {
    let system = with_shared_rules(CV_MATCH_SYSTEM);
    let user = build_match_prompt(&parsed_job.parsed_skills, cv_text);

    call_json::<EvaluationExtract>(llm, &system, &user)
        .await
        .map_err(|e| AppError::Llm(format!("CV evaluation failed: {e}")))
}

/// Latest parsed job description of a job. A job that was never processed cannot be matched.
pub async fn require_parsed_job(
    state: &AppState,
    job_description_id: i32,
) -> Result<ParsedJobDescriptionRow, AppError> {
    job_repo::latest_parsed_job_description(&state.db, job_description_id)
        .await?
        .ok_or_else(|| {
            AppError::UnprocessableEntity(format!(
                "Job description {job_description_id} has not been processed yet"
            ))
        })
}

/// Matches `text` against the latest parsed job description of the PDF's job and stores it.
pub async fn evaluate_cv(
    state: &AppState,
    pdf: &PdfRow,
    text: &TextRow,
) -> Result<ParsedTextRow, AppError> {
    let parsed_job = require_parsed_job(state, pdf.job_id).await?;
    evaluate_cv_against(state, pdf, text, &parsed_job).await
}

/// Matches `text` against `parsed_job`. The stored document remembers which parsed job it used.
pub async fn evaluate_cv_against(
    state: &AppState,
    pdf: &PdfRow,
    text: &TextRow,
    parsed_job: &ParsedJobDescriptionRow,
) -> Result<ParsedTextRow, AppError> {
    let cv_text = text.text.as_deref().unwrap_or_default();
    if cv_text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "Text {} of PDF {} is empty",
            text.id, pdf.id
        )));
    }

    info!(
        "Evaluating PDF {} against parsed job description {}",
        pdf.id, parsed_job.id
    );
    let extract = match_skills(state.llm.as_ref(), parsed_job, cv_text)
        .await
        .inspect_err(|e| error!("Evaluating PDF {} failed: {e}", pdf.id))?;

    let document = serde_json::to_value(&extract).map_err(anyhow::Error::from)?;
    let parsed = repo::insert_parsed_text(
        &state.db,
        parsed_job,
        text.id,
        pdf.id,
        &document,
    )
    .await?;
    info!("Stored parsed text {} for PDF {}", parsed.id, pdf.id);
    Ok(parsed)
}
