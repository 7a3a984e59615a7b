mod moves;
mod piece;
mod position;
mod piece_moves;
mod zobrist;

pub use moves::*;
pub use piece::*;
pub use position::*;
pub use piece_moves::*;
pub use zobrist::{ZobristKeys, ZOBRIST};
