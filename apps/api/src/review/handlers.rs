//! HTTP handler for running a contract review.
//!
//! `POST /api/v1/reviews` takes a multipart form with two file parts:
//! `prompts` (a `.docx` checklist, one item per line) and `contract`
//! (`.docx` or `.txt`). Both are required; nothing is persisted.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{contract_text_from_upload, extract_docx_text, split_prompts};
use crate::review::evaluator::evaluate_prompts;
use crate::review::models::ReviewResponse;
use crate::state::AppState;

const MISSING_UPLOADS: &str = "Please upload both the prompt and contract documents";

pub async fn handle_create_review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let mut prompts_doc: Option<Bytes> = None;
    let mut contract_doc: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("prompts") => {
                let bytes = read_field(field).await?;
                prompts_doc = Some(bytes);
            }
            Some("contract") => {
                let filename = field
                    .file_name()
                    .unwrap_or("contract.txt")
                    .to_string();
                let bytes = read_field(field).await?;
                contract_doc = Some((filename, bytes));
            }
            // Unknown parts are ignored rather than rejected
            _ => {}
        }
    }

    let prompts_doc = prompts_doc.ok_or_else(|| AppError::Validation(MISSING_UPLOADS.into()))?;
    let (contract_name, contract_doc) =
        contract_doc.ok_or_else(|| AppError::Validation(MISSING_UPLOADS.into()))?;

    let checklist_text = extract_docx_text(&prompts_doc)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read prompt document: {e}")))?;
    let prompts = split_prompts(&checklist_text);

    let contract_text = contract_text_from_upload(&contract_name, &contract_doc).map_err(|e| {
        AppError::UnprocessableEntity(format!("Could not read contract document: {e}"))
    })?;

    info!(
        checks = prompts.len(),
        contract = %contract_name,
        "Running contract review"
    );

    let results = evaluate_prompts(
        state.llm.as_ref(),
        state.pacer.as_ref(),
        &contract_text,
        &prompts,
    )
    .await;

    Ok(Json(ReviewResponse {
        checks_run: results.len(),
        results,
    }))
}

async fn read_field(field: axum::extract::multipart::Field<'_>) -> Result<Bytes, AppError> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))
}
