//! Job description → skills document.

use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::prompts::{JOB_SKILLS_SYSTEM, JOB_SKILLS_USER_TEMPLATE};
use crate::jobs::repo;
use crate::jobs::skills::SkillsExtract;
use crate::llm_client::{call_json, prompts::with_shared_rules, LanguageModel};
use crate::models::job_description::{JobDescriptionRow, ParsedJobDescriptionRow};
use crate::state::AppState;

/// Asks the LLM for the skills in a job description.
pub async fn extract_skills(
    llm: &dyn LanguageModel,
    job: &JobDescriptionRow,
) -> Result<SkillsExtract, AppError> {
    let system = with_shared_rules(JOB_SKILLS_SYSTEM);
    let user = JOB_SKILLS_USER_TEMPLATE.replace("{job_description}", &job.description);

    call_json::<SkillsExtract>(llm, &system, &user)
        .await
        .map_err(|e| {
            error!("Skill extraction failed for job description {}: {e}", job.id);
            AppError::Llm(format!("Job description parsing failed: {e}"))
        })
}

/// Extracts skills from `job` and stores them as a new parsed job description.
pub async fn parse_job_description(
    state: &AppState,
    job: &JobDescriptionRow,
) -> Result<ParsedJobDescriptionRow, AppError> {
    info!("Parsing job description {}", job.id);

    let extract = extract_skills(state.llm.as_ref(), job).await?;
    let document = serde_json::to_value(&extract).map_err(anyhow::Error::from)?;
    let parsed = repo::insert_parsed_job_description(&state.db, job.id, &document).await?;

    info!(
        "Stored parsed job description {} for job {} ({} skills)",
        parsed.id,
        job.id,
        extract.skill_count()
    );
    Ok(parsed)
}
