//! Single-resume pipeline: stage → upload → poll → prompt → infer → parse.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use crate::errors::ScreenError;
use crate::llm_client::{InferenceApi, UploadedAsset};
use crate::screening::models::AnalysisResult;
use crate::screening::parser::parse_analysis;
use crate::screening::poller::{wait_until_active, PollPolicy};
use crate::screening::prompts::build_screening_prompt;
use crate::screening::staging::stage_bytes;

pub const PDF_MIME: &str = "application/pdf";
const DEFAULT_SUFFIX: &str = ".pdf";

/// One resume plus the job description it is scored against.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub job_description: String,
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct Screener {
    api: Arc<dyn InferenceApi>,
    policy: PollPolicy,
    delete_remote: bool,
}

impl Screener {
    pub fn new(api: Arc<dyn InferenceApi>, policy: PollPolicy) -> Self {
        Self {
            api,
            policy,
            delete_remote: true,
        }
    }

    /// Whether to delete the uploaded asset from the service once scored.
    pub fn with_remote_cleanup(mut self, enabled: bool) -> Self {
        self.delete_remote = enabled;
        self
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ScreenError> {
        let staged = stage_bytes(&request.bytes, &suffix_for(&request.file_name))?;

        info!("Uploading {}", request.file_name);
        let uploaded = self
            .api
            .upload_file(staged.path(), PDF_MIME, &request.file_name)
            .await;
        // the service has its own copy (or the upload failed); either way the local file goes
        drop(staged);
        let asset = uploaded.map_err(ScreenError::Upload)?;

        let asset_name = asset.name.clone();
        let outcome = self.score_asset(asset, &request.job_description).await;

        if self.delete_remote {
            if let Err(e) = self.api.delete_file(&asset_name).await {
                warn!("Could not delete uploaded asset {asset_name}: {e}");
            }
        }

        match &outcome {
            Ok(result) => info!(
                "Scored {} -> {} ({})",
                request.file_name, result.candidate_name, result.total_score
            ),
            Err(e) => warn!("Screening {} failed: {e}", request.file_name),
        }
        outcome
    }

    async fn score_asset(
        &self,
        asset: UploadedAsset,
        job_description: &str,
    ) -> Result<AnalysisResult, ScreenError> {
        let asset = wait_until_active(self.api.as_ref(), asset, &self.policy).await?;
        let prompt = build_screening_prompt(job_description);
        let reply = self
            .api
            .generate_json(&asset, &prompt)
            .await
            .map_err(ScreenError::Transport)?;
        parse_analysis(&reply)
    }
}

fn suffix_for(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_else(|| DEFAULT_SUFFIX.to_string())
}
