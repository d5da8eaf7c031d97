// Shared prompt fragments. Each workflow that calls the LLM keeps its own
// prompts.rs alongside it and appends these where needed.

/// Appended to every system prompt that expects a JSON document back.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You ONLY answer with a single valid JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT include the explanatory comments of the format description in your output.";

/// Keeps the model from inventing facts about a job or a candidate.
pub const FACTUAL_INSTRUCTION: &str = "\
    You are always factual and you never hallucinate. \
    If you don't have enough information, return an empty object or an empty field.";

/// Joins a task-specific system prompt with the shared fragments.
pub fn with_shared_rules(system: &str) -> String {
    format!("{}\n\n{}\n{}", system.trim(), FACTUAL_INSTRUCTION, JSON_ONLY_INSTRUCTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_shared_rules_appends_both_fragments() {
        let prompt = with_shared_rules("  Parse things.  ");
        assert!(prompt.starts_with("Parse things."));
        assert!(prompt.contains("never hallucinate"));
        assert!(prompt.contains("single valid JSON object"));
    }
}
