//! In-memory `InferenceApi` used by the pipeline, table and route tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{InferenceApi, LlmError, ProcessingState, UploadedAsset};

pub const JANE_DOE_REPLY: &str = r#"{
    "candidate_name": "Jane Doe",
    "total_score": 72,
    "analysis": {
        "skills": {"score": 80, "reasoning": "Go and gRPC in production"},
        "experience_education": {"score": 70, "reasoning": "6 years backend"},
        "knowledge": {"score": 65, "reasoning": "Distributed systems basics"},
        "tools": {"score": 70, "reasoning": "Docker, Kubernetes"}
    },
    "summary": "Strong fit"
}"#;

pub fn asset(state: ProcessingState) -> UploadedAsset {
    UploadedAsset {
        name: "files/test-asset".to_string(),
        display_name: Some("resume.pdf".to_string()),
        mime_type: "application/pdf".to_string(),
        uri: "https://example.test/v1beta/files/test-asset".to_string(),
        state,
    }
}

/// Builds a reply in the model's JSON shape with every criterion set to `total`.
pub fn reply(name: &str, total: u8) -> String {
    serde_json::json!({
        "candidate_name": name,
        "total_score": total,
        "analysis": {
            "experience_education": {"score": total, "reasoning": "experience"},
            "skills": {"score": total, "reasoning": "skills"},
            "knowledge": {"score": total, "reasoning": "knowledge"},
            "tools": {"score": total, "reasoning": "tools"}
        },
        "summary": format!("{name} summary")
    })
    .to_string()
}

#[derive(Default)]
pub struct FakeInference {
    upload_states: Mutex<VecDeque<ProcessingState>>,
    poll_states: Mutex<VecDeque<ProcessingState>>,
    replies: Mutex<VecDeque<Result<String, u16>>>,
    fail_uploads: bool,
    uploaded: Mutex<Vec<(PathBuf, bool)>>,
    deleted: Mutex<Vec<String>>,
    get_calls: AtomicU32,
}

impl FakeInference {
    /// States returned by successive `get_file` calls. Defaults to `ACTIVE`.
    pub fn with_states(self, states: Vec<ProcessingState>) -> Self {
        *self.poll_states.lock().unwrap() = states.into();
        self
    }

    /// State reported by each successive upload. Defaults to `ACTIVE`.
    pub fn with_upload_states(self, states: Vec<ProcessingState>) -> Self {
        *self.upload_states.lock().unwrap() = states.into();
        self
    }

    /// Replies for successive generate calls; `Err(status)` simulates an API error.
    pub fn with_replies(self, replies: Vec<Result<String, u16>>) -> Self {
        *self.replies.lock().unwrap() = replies.into();
        self
    }

    pub fn failing_uploads(mut self) -> Self {
        self.fail_uploads = true;
        self
    }

    pub fn get_calls(&self) -> u32 {
        self.get_calls.load(Ordering::SeqCst)
    }

    /// Paths handed to `upload_file`, with whether each existed at the time.
    pub fn uploaded(&self) -> Vec<(PathBuf, bool)> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceApi for FakeInference {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedAsset, LlmError> {
        self.uploaded
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        if self.fail_uploads {
            return Err(LlmError::Api {
                status: 500,
                message: "upload rejected".to_string(),
            });
        }
        let state = self
            .upload_states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ProcessingState::Active);
        Ok(UploadedAsset {
            name: format!("files/{display_name}"),
            display_name: Some(display_name.to_string()),
            mime_type: mime_type.to_string(),
            uri: format!("https://example.test/v1beta/files/{display_name}"),
            state,
        })
    }

    async fn get_file(&self, name: &str) -> Result<UploadedAsset, LlmError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        let state = self
            .poll_states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ProcessingState::Active);
        let mut current = asset(state);
        current.name = name.to_string();
        Ok(current)
    }

    async fn generate_json(&self, _asset: &UploadedAsset, _prompt: &str) -> Result<String, LlmError> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(status)) => Err(LlmError::Api {
                status,
                message: "model unavailable".to_string(),
            }),
            None => Ok(JANE_DOE_REPLY.to_string()),
        }
    }

    async fn delete_file(&self, name: &str) -> Result<(), LlmError> {
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }
}
