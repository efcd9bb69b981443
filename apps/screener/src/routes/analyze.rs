//! POST /analyze: screens a single uploaded resume.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::screening::{AnalysisRequest, AnalysisResult, PDF_MIME};
use crate::state::AppState;

/// Both spellings have shipped in clients; either is accepted.
const JOB_DESCRIPTION_FIELDS: [&str; 2] = ["job_desc", "job_description"];
const FILE_FIELD: &str = "file";
const DEFAULT_FILE_NAME: &str = "resume.pdf";

/// POST /analyze
///
/// Multipart form: `job_desc` (or `job_description`) and `file` (PDF).
/// Returns the parsed analysis as JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let request = read_form(multipart).await?;
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        "Analyzing {} ({} bytes)",
        request.file_name,
        request.bytes.len()
    );

    let result = state.screener.analyze(&request).await?;
    info!(%request_id, "Analysis complete: total_score={}", result.total_score);
    Ok(Json(result))
}

async fn read_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut job_description: Option<String> = None;
    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if JOB_DESCRIPTION_FIELDS.contains(&name.as_str()) {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Unreadable {name}: {e}")))?;
            job_description = Some(text);
        } else if name == FILE_FIELD {
            let file_name = field
                .file_name()
                .unwrap_or(DEFAULT_FILE_NAME)
                .to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Unreadable file: {e}")))?;
            file = Some((file_name, content_type, bytes));
        }
    }

    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_desc cannot be empty".to_string()))?;
    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::Validation("file is required".to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }
    if !is_pdf(&file_name, content_type.as_deref()) {
        return Err(AppError::Validation(
            "Only PDF files are allowed".to_string(),
        ));
    }

    Ok(AnalysisRequest {
        job_description,
        file_name,
        bytes,
    })
}

fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    file_name.to_lowercase().ends_with(".pdf") || content_type == Some(PDF_MIME)
}
