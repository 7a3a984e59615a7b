use super::super::Move;
use super::super::position::Position;

/// Ray directions as (square offset, "can still step" test on the current square).
/// Squares are numbered a8=0 .. h1=63: file = sq % 8, rank-from-top = sq / 8, so
/// moving towards rank 8 decreases the index and towards rank 1 increases it.
const ROOK_DIRECTIONS: [(i32, fn(u8) -> bool); 4] = [
    (-8, |sq| sq / 8 != 0), // towards rank 8
    (8, |sq| sq / 8 != 7),  // towards rank 1
    (1, |sq| sq % 8 != 7),  // towards h-file
    (-1, |sq| sq % 8 != 0), // towards a-file
];

impl Position {
    pub fn rook_moves_into(&self, idx: u8, moves: &mut Vec<Move>) {
        let piece = self.squares()[idx as usize];
        for &(offset, can_step) in ROOK_DIRECTIONS.iter() {
            let mut sq = idx;
            while can_step(sq) {
                sq = (sq as i32 + offset) as u8;
                let target = self.squares()[sq as usize];
                if target.is_none() {
                    moves.push(Move::QuietMove { piece, from: idx, to: sq });
                } else {
                    if target.color != piece.color {
                        moves.push(Move::CaptureMove { piece, from: idx, to: sq, captured: target });
                    }
                    break;
                }
            }
        }
    }

    pub fn rook_moves(&self, idx: u8) -> Vec<Move> {
        let mut moves = Vec::with_capacity(14);
        self.rook_moves_into(idx, &mut moves);
        moves
    }
}
