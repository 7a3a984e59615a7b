//! Search and evaluation: the half of the engine that decides which move to play,
//! built on top of the immutable position model in [`crate::game_repr`].

pub mod config;
pub mod engine;
pub mod eval_cache;
pub mod evaluation;
pub mod move_ordering;
pub mod negamax;
pub mod phase;
pub mod quiescence;
pub mod see;
pub mod transposition_table;

pub use config::SearchConfig;
pub use engine::{execute, IterationStats, ProgressObserver, SearchResult, SearchTables};
pub use transposition_table::{NodeType, TranspositionTable, TranspositionTableEntry};

/// Centipawn score assigned to an immediate mate. Scores within [`MATE_SCORE`] - 1000
/// of this are treated as forced-mate scores and shorten the iterative-deepening loop.
pub const MATE_SCORE: i32 = 30_000;
pub const MIN_SCORE: i32 = -MATE_SCORE - 100;
pub const MAX_SCORE: i32 = MATE_SCORE + 100;
