use serde::Serialize;

/// One checklist prompt paired with the model's answer (or a placeholder
/// when the call failed). Held in memory for the lifetime of one review
/// request only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub prompt: String,
    pub answer: String,
}

/// Response body for `POST /api/v1/reviews`. Results appear in the same
/// order as the prompts in the uploaded checklist, one per prompt.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub checks_run: usize,
    pub results: Vec<EvaluationResult>,
}
