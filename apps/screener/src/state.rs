use crate::screening::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Runs the upload → poll → prompt → parse pipeline for one resume.
    pub screener: Screener,
}
