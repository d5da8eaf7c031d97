//! Weighted match score of a CV evaluation.
//!
//! Each of the four skill groups is averaged over its match-state weights
//! (YES 1.0, PARTIAL 0.5, NO 0.0), then weighted by category (required 0.8,
//! nice-to-have 0.2) and kind (hard 0.5, soft 0.5). An empty group adds nothing
//! and the remaining weights are not rescaled, so a job without soft skills caps
//! the score below 1.0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::jobs::skills::{EvaluationExtract, SkillMatch};

pub const REQUIRED_WEIGHT: f64 = 0.8;
pub const NICE_TO_HAVE_WEIGHT: f64 = 0.2;
pub const HARD_SKILLS_WEIGHT: f64 = 0.5;
pub const SOFT_SKILLS_WEIGHT: f64 = 0.5;

/// Per-group averages (`None` for empty groups) and the final score in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub required_hard: Option<f64>,
    pub required_soft: Option<f64>,
    pub nice_to_have_hard: Option<f64>,
    pub nice_to_have_soft: Option<f64>,
    pub score: f64,
}

fn group_average(group: &IndexMap<String, SkillMatch>) -> Option<f64> {
    if group.is_empty() {
        return None;
    }
    let total: f64 = group.values().map(|m| m.state.weight()).sum();
    Some(total / group.len() as f64)
}

pub fn compute_score(matches: &EvaluationExtract) -> ScoreBreakdown {
    let required_hard = group_average(&matches.required_skills.hard_skills);
    let required_soft = group_average(&matches.required_skills.soft_skills);
    let nice_to_have_hard = group_average(&matches.nice_to_have_skills.hard_skills);
    let nice_to_have_soft = group_average(&matches.nice_to_have_skills.soft_skills);

    let weighted = [
        (required_hard, REQUIRED_WEIGHT * HARD_SKILLS_WEIGHT),
        (required_soft, REQUIRED_WEIGHT * SOFT_SKILLS_WEIGHT),
        (nice_to_have_hard, NICE_TO_HAVE_WEIGHT * HARD_SKILLS_WEIGHT),
        (nice_to_have_soft, NICE_TO_HAVE_WEIGHT * SOFT_SKILLS_WEIGHT),
    ];
    let score: f64 = weighted
        .iter()
        .filter_map(|(avg, weight)| avg.map(|a| a * weight))
        .sum();

    ScoreBreakdown {
        required_hard,
        required_soft,
        nice_to_have_hard,
        nice_to_have_soft,
        score: score.clamp(0.0, 1.0),
    }
}

/// Scores a stored match document.
pub fn score_from_document(document: &Value) -> Result<ScoreBreakdown, AppError> {
    let matches = EvaluationExtract::deserialize(document).map_err(|e| {
        AppError::UnprocessableEntity(format!("Stored match document is invalid: {e}"))
    })?;
    Ok(compute_score(&matches))
}
