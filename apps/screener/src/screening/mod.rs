// Resume screening pipeline.
// Implements: staging, status polling, prompt building, inference, reply
// validation, result aggregation and CSV export.
// All model calls go through llm_client; no direct Gemini calls here.

pub mod analyzer;
pub mod batch;
pub mod export;
pub mod models;
pub mod parser;
pub mod poller;
pub mod prompts;
pub mod staging;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::{AnalysisRequest, Screener, PDF_MIME};
pub use batch::{run_batch, BatchObserver, ResumeFile};
pub use models::{AnalysisResult, Criterion, ScoreBand};
pub use table::ResultTable;
