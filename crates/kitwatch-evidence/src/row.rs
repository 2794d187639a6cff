//! Ledger row formatting.

use crate::status::StatusTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source type column for rows written by a run.
pub const SOURCE_TYPE: &str = "Code";

/// Tags carried by every run row, ahead of the status tag.
pub const BASE_TAGS: &str = "#Code #Experiment";

/// Appended to the label in the title column.
pub const LABEL_SUFFIX: &str = " run";

/// One row of the evidence ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRow {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    /// Run label.
    pub label: String,
    /// Derived status tag.
    pub status: StatusTag,
    /// Output excerpt.
    pub excerpt: String,
}

impl EvidenceRow {
    /// The row as written to the ledger, newline included.
    ///
    /// `| <date> | Code | <label> run | #Code #Experiment #<Status> | Output: {<excerpt>} |`
    pub fn render(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for EvidenceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "| {} | {} | {}{} | {} {} | Output: {{{}}} |",
            self.date, SOURCE_TYPE, self.label, LABEL_SUFFIX, BASE_TAGS, self.status, self.excerpt
        )
    }
}
