//! Review evaluation loop — the core of ClauseCheck.
//!
//! Drives one completion call per checklist prompt against a shared contract
//! text, strictly sequentially, preserving prompt order. Per-call failures
//! degrade into placeholder answers; the batch never aborts. No retries: a
//! rate-limited prompt gets the cooldown pause and a fixed placeholder, then
//! the loop moves on.

use tracing::{info, warn};

use crate::llm_client::prompts::{build_review_prompt, REVIEW_SYSTEM};
use crate::llm_client::ChatClient;
use crate::review::models::EvaluationResult;
use crate::review::pacing::Pacer;

/// Answer recorded for a prompt whose call hit the API rate limit.
pub const RATE_LIMIT_PLACEHOLDER: &str = "Rate limit reached. Please wait and try again later.";

/// Evaluates every prompt against the contract, in order.
///
/// Always returns exactly `prompts.len()` results, none dropped. An empty
/// prompt list makes zero completion calls. Consecutive calls are separated
/// by `pacer.pace()`; a rate-limited call takes `pacer.cooldown()` instead.
pub async fn evaluate_prompts(
    llm: &dyn ChatClient,
    pacer: &dyn Pacer,
    contract_text: &str,
    prompts: &[String],
) -> Vec<EvaluationResult> {
    let total = prompts.len();
    let mut results = Vec::with_capacity(total);

    for (i, prompt) in prompts.iter().enumerate() {
        info!(index = i + 1, total, prompt = %prompt, "Processing prompt");

        let user_message = build_review_prompt(contract_text, prompt);
        let mut rate_limited = false;

        let answer = match llm.complete(REVIEW_SYSTEM, &user_message).await {
            Ok(text) => text,
            Err(err) if err.is_rate_limit() => {
                warn!(index = i + 1, "Rate limited, cooling down and skipping prompt");
                rate_limited = true;
                pacer.cooldown().await;
                RATE_LIMIT_PLACEHOLDER.to_string()
            }
            Err(err) => {
                warn!(index = i + 1, error = %err, "Completion call failed, continuing batch");
                format!("Check could not be completed: {err}")
            }
        };

        results.push(EvaluationResult {
            prompt: prompt.clone(),
            answer,
        });

        // The cooldown already spaced out a rate-limited call; no pause
        // after the final prompt either way.
        let is_last = i + 1 == total;
        if !is_last && !rate_limited {
            pacer.pace().await;
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::CompletionError;

    /// Stub completion client: pops scripted outcomes in order and records
    /// every user message it was asked to complete.
    struct StubClient {
        outcomes: Mutex<VecDeque<Result<String, CompletionError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubClient {
        fn scripted(outcomes: Vec<Result<String, CompletionError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Answers every request with a text derived from its exact payload.
        fn echoing() -> Self {
            Self::scripted(Vec::new())
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatClient for StubClient {
        async fn complete(&self, _system: &str, user: &str) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(user.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(format!("answer to: {user}")))
        }
    }

    /// Pacer that records which delays were requested instead of sleeping.
    #[derive(Default)]
    struct RecordingPacer {
        events: Mutex<Vec<&'static str>>,
    }

    impl RecordingPacer {
        fn events(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Pacer for RecordingPacer {
        async fn pace(&self) {
            self.events.lock().unwrap().push("pace");
        }

        async fn cooldown(&self) {
            self.events.lock().unwrap().push("cooldown");
        }
    }

    fn prompts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_one_result_per_prompt_in_input_order() {
        let client = StubClient::scripted(vec![
            Ok("first answer".to_string()),
            Ok("second answer".to_string()),
            Ok("third answer".to_string()),
        ]);
        let pacer = RecordingPacer::default();
        let input = prompts(&["check A", "check B", "check C"]);

        let results = evaluate_prompts(&client, &pacer, "contract body", &input).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].prompt, "check A");
        assert_eq!(results[0].answer, "first answer");
        assert_eq!(results[1].prompt, "check B");
        assert_eq!(results[1].answer, "second answer");
        assert_eq!(results[2].prompt, "check C");
        assert_eq!(results[2].answer, "third answer");
    }

    #[tokio::test]
    async fn test_empty_prompt_list_makes_zero_calls() {
        let client = StubClient::echoing();
        let pacer = RecordingPacer::default();

        let results = evaluate_prompts(&client, &pacer, "contract body", &[]).await;

        assert!(results.is_empty());
        assert_eq!(client.call_count(), 0);
        assert!(pacer.events().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_yields_placeholder_and_batch_continues() {
        let client = StubClient::scripted(vec![
            Ok("fine".to_string()),
            Err(CompletionError::RateLimited),
            Ok("also fine".to_string()),
        ]);
        let pacer = RecordingPacer::default();
        let input = prompts(&["one", "two", "three"]);

        let results = evaluate_prompts(&client, &pacer, "contract body", &input).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[1].answer, RATE_LIMIT_PLACEHOLDER);
        assert_eq!(results[2].answer, "also fine");
        // all three prompts were attempted, the failed one exactly once
        assert_eq!(client.call_count(), 3);
        // pace after call 1, cooldown instead of pace after call 2
        assert_eq!(pacer.events(), vec!["pace", "cooldown"]);
    }

    #[tokio::test]
    async fn test_non_rate_limit_failure_is_annotated_and_skipped_over() {
        let client = StubClient::scripted(vec![
            Err(CompletionError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            }),
            Ok("recovered".to_string()),
        ]);
        let pacer = RecordingPacer::default();
        let input = prompts(&["one", "two"]);

        let results = evaluate_prompts(&client, &pacer, "contract body", &input).await;

        assert_eq!(results.len(), 2);
        assert!(results[0].answer.starts_with("Check could not be completed:"));
        assert!(results[0].answer.contains("upstream exploded"));
        assert_eq!(results[1].answer, "recovered");
        assert_eq!(pacer.events(), vec!["pace"]);
    }

    #[tokio::test]
    async fn test_answers_match_their_own_request_payload() {
        let client = StubClient::echoing();
        let pacer = RecordingPacer::default();
        let input = prompts(&[
            "Does clause 3 include a termination notice period?",
            "Is there a confidentiality clause?",
        ]);
        let contract = "Section 3: ... Section 9: Confidentiality ...";

        let results = evaluate_prompts(&client, &pacer, contract, &input).await;

        assert_eq!(results.len(), 2);
        for (result, prompt) in results.iter().zip(&input) {
            assert_eq!(
                result.answer,
                format!("answer to: {}", build_review_prompt(contract, prompt))
            );
        }
        // each request carried the contract and exactly its own prompt
        let calls = client.calls();
        assert!(calls[0].contains("termination notice"));
        assert!(!calls[0].contains("confidentiality clause"));
        assert!(calls[1].contains("confidentiality clause"));
    }

    #[tokio::test]
    async fn test_no_trailing_pace_after_final_prompt() {
        let client = StubClient::echoing();
        let pacer = RecordingPacer::default();
        let input = prompts(&["only check"]);

        let results = evaluate_prompts(&client, &pacer, "contract body", &input).await;

        assert_eq!(results.len(), 1);
        assert!(pacer.events().is_empty());
    }
}
