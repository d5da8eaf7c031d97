// Prompt constants for job description skill extraction.
// Shared rules are appended via llm_client::prompts::with_shared_rules.

/// System prompt for extracting skills from a (typically Dutch) job description.
pub const JOB_SKILLS_SYSTEM: &str = r#"You are a best-in-class system that parses Dutch job descriptions.
Your objective is to extract the required and nice-to-have skills from the job description, split into hard skills (technical knowledge) and soft skills (e.g. communication).

Keep the skills in the same order as they appear in the job description.
Keep the 'name' of each skill as close as possible to the wording of the job description.
Keep the 'description' of each skill as close as possible to the description in the job description.
For each skill, write a 'long_description' in Dutch using your own knowledge.
For each skill, give a list of 'skill_categories' in Dutch using your own knowledge.
Find at most 10 skills per group.

Answer with this JSON format:
{
  "required_skills": {
    "hard_skills": {
      "skill_1": {
        "name": "<name>",
        "description": "<description>",
        "long_description": "<long description>",
        "skill_categories": ["<category>"]
      }
    },
    "soft_skills": {}
  },
  "nice_to_have_skills": {
    "hard_skills": {},
    "soft_skills": {}
  }
}"#;

/// User prompt. Replace `{job_description}` before sending.
pub const JOB_SKILLS_USER_TEMPLATE: &str =
    "Parse the following job description:\n\n```\n{job_description}\n```";
