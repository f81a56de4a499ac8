//! Schema parse errors.

use opal_ir::SymbolError;

/// Error produced when schema text is malformed.
///
/// Offsets are byte offsets into the schema text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unrecognized input `{text}` at offset {offset}")]
    InvalidToken { offset: usize, text: String },

    #[error("expected {expected}, found {found} at offset {offset}")]
    Unexpected {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    #[error("invalid operator name: {0}")]
    InvalidName(#[from] SymbolError),

    #[error("keyword-only marker `*` appears more than once (offset {offset})")]
    DuplicateKwargMarker { offset: usize },

    #[error("`...` must be the last argument (offset {offset})")]
    VarargNotLast { offset: usize },

    #[error("type nesting exceeds {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    #[error("list length `{text}` at offset {offset} is not a valid size")]
    InvalidListLength { offset: usize, text: String },
}
