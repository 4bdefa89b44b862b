//! Error types for pgprep.

use thiserror::Error;

/// Result type alias for statement verification.
pub type QueryResult<T> = Result<T, QueryError>;

/// Inconsistencies reported by [`Statement::verify`](crate::Statement::verify).
///
/// Assembly itself never fails; these only surface when a hand-edited or
/// concatenated statement breaks the placeholder/parameter contract.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The highest `$n` in the text does not match the number of bound values.
    #[error("placeholder mismatch: query references {placeholders} placeholder(s), {params} value(s) bound")]
    PlaceholderMismatch { placeholders: usize, params: usize },

    /// Placeholders are not contiguous from `$1`.
    #[error("placeholder gap: ${missing} is never referenced")]
    PlaceholderGap { missing: usize },
}
