//! Uploader staging: writes raw resume bytes to a uniquely named temp file
//! that the inference client can read by path.
//!
//! The file lives exactly as long as the `StagedFile` handle. Dropping it,
//! on any exit path, removes the file from disk.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::errors::ScreenError;

const TEMP_PREFIX: &str = "resume-";

#[derive(Debug)]
pub struct StagedFile {
    inner: NamedTempFile,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        debug!("Removing staged file {}", self.inner.path().display());
    }
}

/// Stages `bytes` on disk with the given suffix (e.g. `.pdf`).
pub fn stage_bytes(bytes: &[u8], suffix: &str) -> Result<StagedFile, ScreenError> {
    let mut inner = Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(suffix)
        .tempfile()?;
    inner.write_all(bytes)?;
    inner.flush()?;
    debug!(
        "Staged {} bytes at {}",
        bytes.len(),
        inner.path().display()
    );
    Ok(StagedFile { inner })
}
