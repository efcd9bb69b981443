//! In-memory result table for one screening run.

use serde::Serialize;

use crate::screening::models::{AnalysisResult, ScoreBand};

/// Columns of the summary table, shared by the terminal view and CSV export.
pub const SUMMARY_COLUMNS: [&str; 4] = ["Candidate Name", "Total Score", "Skills Score", "Summary"];

#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub file_name: String,
    pub result: AnalysisResult,
}

impl ResultRow {
    pub fn band(&self) -> ScoreBand {
        self.result.band()
    }

    /// Cells in `SUMMARY_COLUMNS` order.
    pub fn summary_cells(&self) -> [String; 4] {
        [
            self.result.candidate_name.clone(),
            self.result.total_score.to_string(),
            self.result.analysis.skills.score.to_string(),
            self.result.summary.clone(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
    failures: Vec<FileFailure>,
}

impl ResultTable {
    pub fn push_row(&mut self, file_name: impl Into<String>, result: AnalysisResult) {
        self.rows.push(ResultRow {
            file_name: file_name.into(),
            result,
        });
    }

    pub fn push_failure(&mut self, file_name: impl Into<String>, error: impl ToString) {
        self.failures.push(FileFailure {
            file_name: file_name.into(),
            error: error.to_string(),
        });
    }

    /// Rows by total score, highest first. Equal scores keep input order.
    pub fn ranked(&self) -> Vec<&ResultRow> {
        let mut ranked: Vec<&ResultRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| b.result.total_score.cmp(&a.result.total_score));
        ranked
    }

    /// The summary table exactly as displayed: ranked rows, `SUMMARY_COLUMNS` cells.
    pub fn summary_records(&self) -> Vec<[String; 4]> {
        self.ranked().iter().map(|r| r.summary_cells()).collect()
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
