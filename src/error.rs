use thiserror::Error;

/// Errors surfaced at the engine's external boundaries.
///
/// Internal invariant violations (a null move reaching `apply`, a corrupt
/// transposition-table entry) stay `panic!`s — they indicate a bug in this
/// crate, not a caller mistake, and recovering from them would just hide it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid FEN string: {reason} (in \"{fen}\")")]
    InvalidFen { fen: String, reason: String },

    #[error("move is not legal in this position")]
    IllegalMove,

    #[error("move is pseudo-legal but leaves its own king in check")]
    MoveLeavesKingInCheck,
}

pub type EngineResult<T> = Result<T, EngineError>;
