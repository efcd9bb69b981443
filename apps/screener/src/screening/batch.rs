//! Sequential multi-resume run feeding a `ResultTable`.

use bytes::Bytes;

use crate::errors::ScreenError;
use crate::screening::analyzer::{AnalysisRequest, Screener};
use crate::screening::table::ResultTable;

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Progress hooks for whoever is presenting the run.
pub trait BatchObserver {
    fn file_started(&mut self, _index: usize, _total: usize, _file_name: &str) {}
    fn file_failed(&mut self, _file_name: &str, _error: &ScreenError) {}
    fn file_finished(&mut self, _done: usize, _total: usize) {}
}

/// Screens each file in order. A failed file is recorded and the run continues.
pub async fn run_batch(
    screener: &Screener,
    job_description: &str,
    files: Vec<ResumeFile>,
    observer: &mut dyn BatchObserver,
) -> ResultTable {
    let total = files.len();
    let mut table = ResultTable::default();

    for (index, file) in files.into_iter().enumerate() {
        observer.file_started(index, total, &file.file_name);

        let request = AnalysisRequest {
            job_description: job_description.to_string(),
            file_name: file.file_name,
            bytes: file.bytes,
        };
        match screener.analyze(&request).await {
            Ok(result) => table.push_row(request.file_name, result),
            Err(e) => {
                observer.file_failed(&request.file_name, &e);
                table.push_failure(request.file_name, e);
            }
        }

        observer.file_finished(index + 1, total);
    }

    table
}
