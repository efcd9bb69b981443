//! Status poller: waits for an uploaded asset to leave `PROCESSING`.
//!
//! Fixed interval, no backoff, bounded by `max_attempts` re-checks.

use std::time::Duration;

use tracing::debug;

use crate::errors::ScreenError;
use crate::llm_client::{InferenceApi, ProcessingState, UploadedAsset};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Status re-checks allowed after the initial upload response.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 120,
        }
    }
}

/// Returns the asset once it is `ACTIVE`.
pub async fn wait_until_active(
    api: &dyn InferenceApi,
    mut asset: UploadedAsset,
    policy: &PollPolicy,
) -> Result<UploadedAsset, ScreenError> {
    let mut attempts = 0;
    loop {
        match asset.state {
            ProcessingState::Active => return Ok(asset),
            ProcessingState::Failed => {
                return Err(ScreenError::ProcessingFailed { asset: asset.name })
            }
            ProcessingState::Processing | ProcessingState::Unspecified => {}
        }

        if attempts >= policy.max_attempts {
            return Err(ScreenError::Timeout { attempts });
        }

        tokio::time::sleep(policy.interval).await;
        attempts += 1;
        debug!(
            "Polling {} [{}] (check {attempts})",
            asset.name,
            asset.display_name.as_deref().unwrap_or("-")
        );
        asset = api
            .get_file(&asset.name)
            .await
            .map_err(ScreenError::Transport)?;
    }
}
