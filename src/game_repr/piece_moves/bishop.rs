use super::super::Move;
use super::super::position::Position;

const BISHOP_DIRECTIONS: [(i32, fn(u8) -> bool); 4] = [
    (-7, |sq| sq / 8 != 0 && sq % 8 != 7), // towards rank 8, h-file
    (-9, |sq| sq / 8 != 0 && sq % 8 != 0), // towards rank 8, a-file
    (9, |sq| sq / 8 != 7 && sq % 8 != 7),  // towards rank 1, h-file
    (7, |sq| sq / 8 != 7 && sq % 8 != 0),  // towards rank 1, a-file
];

impl Position {
    pub fn bishop_moves_into(&self, idx: u8, moves: &mut Vec<Move>) {
        let piece = self.squares()[idx as usize];
        for &(offset, can_step) in BISHOP_DIRECTIONS.iter() {
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

    pub fn bishop_moves(&self, idx: u8) -> Vec<Move> {
        let mut moves = Vec::with_capacity(13);
        self.bishop_moves_into(idx, &mut moves);
        moves
    }
}
