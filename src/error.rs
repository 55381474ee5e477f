use thiserror::Error;

/// Terminal failures of one analysis pass.
///
/// Row-level problems never surface here; they are dropped during cleaning
/// and only reflected in the report's drop count.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("no valid rows after cleaning")]
    NoValidRows,
}
