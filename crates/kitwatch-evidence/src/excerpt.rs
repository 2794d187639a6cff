//! Output excerpts quoted in ledger rows.

use std::path::Path;
use tracing::debug;

/// Substituted when the referenced log file cannot be read.
pub const NO_LOG_PLACEHOLDER: &str = "(no log found)";

/// Separator between excerpt lines.
pub const EXCERPT_SEPARATOR: &str = " / ";

/// The last `limit` non-empty trimmed lines of `text`, joined by
/// [`EXCERPT_SEPARATOR`]. Text with no non-empty lines gives `""`.
pub fn excerpt_text(text: &str, limit: usize) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let start = lines.len().saturating_sub(limit);
    lines[start..].join(EXCERPT_SEPARATOR)
}

/// Excerpt of a log file, or [`NO_LOG_PLACEHOLDER`] if it cannot be read.
pub async fn excerpt_file(path: &Path, limit: usize) -> String {
    match kitwatch_common_fs::read_lossy(path).await {
        Ok(text) => excerpt_text(&text, limit),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "log file unavailable for excerpt");
            NO_LOG_PLACEHOLDER.to_string()
        }
    }
}
