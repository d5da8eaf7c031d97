//! Skill documents exchanged with the LLM and stored as JSONB.
//!
//! Both documents share one shape: `required_skills` and `nice_to_have_skills`,
//! each split into `hard_skills` and `soft_skills` maps keyed `skill_1`, `skill_2`, ...
//! A job description yields `Skill` entries; a CV evaluation yields `SkillMatch` entries.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Hard and soft skills of one category. Entry order follows the LLM output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct SkillGroup<T> {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hard_skills: IndexMap<String, T>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub soft_skills: IndexMap<String, T>,
}

impl<T> Default for SkillGroup<T> {
    fn default() -> Self {
        Self {
            hard_skills: IndexMap::new(),
            soft_skills: IndexMap::new(),
        }
    }
}

impl<T> SkillGroup<T> {
    pub fn len(&self) -> usize {
        self.hard_skills.len() + self.soft_skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The LLM sometimes writes `"soft_skills": null` for an empty group.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<IndexMap<String, T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub skill_categories: Vec<String>,
}

/// Skills extracted from a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsExtract {
    #[serde(default)]
    pub required_skills: SkillGroup<Skill>,
    #[serde(default)]
    pub nice_to_have_skills: SkillGroup<Skill>,
}

impl SkillsExtract {
    pub fn skill_count(&self) -> usize {
        self.required_skills.len() + self.nice_to_have_skills.len()
    }
}

/// How well a CV covers one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchState {
    Yes,
    Partial,
    No,
    /// Anything else the model answers with.
    #[serde(other)]
    Unknown,
}

impl MatchState {
    pub fn weight(self) -> f64 {
        match self {
            MatchState::Yes => 1.0,
            MatchState::Partial => 0.5,
            MatchState::No | MatchState::Unknown => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub name: String,
    #[serde(rename = "match")]
    pub state: MatchState,
    #[serde(default)]
    pub content_match: String,
    #[serde(default)]
    pub reasoning: String,
}

/// Skill matches of a CV against a parsed job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationExtract {
    #[serde(default)]
    pub required_skills: SkillGroup<SkillMatch>,
    #[serde(default)]
    pub nice_to_have_skills: SkillGroup<SkillMatch>,
}
