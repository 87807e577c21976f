//! Failure taxonomy. Every fallible operation rejects bad input at the
//! boundary, before any state is touched.

/// Domain errors for board construction, notation parsing, move application
/// and perft invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid UCI square: {0}")]
    InvalidSquare(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("illegal move {mv}: {reason}")]
    IllegalMove { mv: String, reason: &'static str },

    #[error("no moves to unmake")]
    NothingToUnmake,

    #[error("perft depth must be greater than 0")]
    InvalidDepth,
}
