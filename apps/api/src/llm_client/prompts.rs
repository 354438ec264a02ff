// Prompt constants and prompt-building utilities for contract review calls.
// Every completion request in ClauseCheck is built from these two pieces.

/// System instruction sent with every review call.
pub const REVIEW_SYSTEM: &str = "You are a legal analyst evaluating contract clauses.";

/// Builds the user message for a single checklist prompt: the full contract
/// text followed by the one item to check.
pub fn build_review_prompt(contract_text: &str, prompt: &str) -> String {
    format!("Contract:\n{contract_text}\n\nCheck this:\n{prompt}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_prompt_contains_contract_then_item() {
        let message = build_review_prompt(
            "Section 3: termination requires 30 days notice.",
            "Does clause 3 include a termination notice period?",
        );
        assert!(message.starts_with("Contract:\nSection 3"));
        assert!(message.ends_with("Check this:\nDoes clause 3 include a termination notice period?"));
    }
}
