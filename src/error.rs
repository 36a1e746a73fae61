//! Error types for index construction and queries.

use thiserror::Error;

/// Errors raised while building transcripts or answering a query.
///
/// Construction errors mean the annotation table is corrupt and the whole
/// build must be abandoned; `InvalidRange` is fatal only to the one query.
#[derive(Error, Debug)]
pub enum AnnotationError {
    #[error("Invalid strand '{strand}' for transcript {transcript}: expected '+' or '-'")]
    InvalidStrand { transcript: String, strand: String },

    #[error(
        "Transcript {transcript} declares {expected} exons but lists {starts} starts, {ends} ends and {frames} frames"
    )]
    ExonCountMismatch {
        transcript: String,
        expected: usize,
        starts: usize,
        ends: usize,
        frames: usize,
    },

    #[error("Invalid coordinates for transcript {transcript}: {reason}")]
    InvalidCoordinates { transcript: String, reason: String },

    #[error("Can't parse {field} from '{value}'")]
    FieldParse { field: &'static str, value: String },

    #[error("Expected 15 or 16 columns, found {found}")]
    MissingColumns { found: usize },

    #[error("Invalid query range [{start}, {stop}): stop must be greater than start")]
    InvalidRange { start: u32, stop: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
