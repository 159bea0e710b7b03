pub mod orientation;
pub mod record;
pub mod schema;
pub mod schematic;

use std::path::PathBuf;

// Re-export for convenience
pub use orientation::Rotation;
pub use record::{tokenize, unquote};
pub use schema::*;

/// Errors raised while parsing a schematic hierarchy.
///
/// Anything here is structural: well-formed eeschema output never
/// produces these. Recoverable conditions (invalid header, unknown
/// transform matrix) are handled in place with a diagnostic instead.
#[derive(Debug, thiserror::Error)]
pub enum SchParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("empty record line inside a {0} block")]
    EmptyRecord(&'static str),
    #[error("invalid number in {kind} record: {token:?}")]
    InvalidNumber { kind: &'static str, token: String },
    #[error("sheet block has no linked filename (F1) field")]
    MissingSheetFilename,
    #[error("sheet hierarchy cycle through {0}")]
    SheetCycle(PathBuf),
}
