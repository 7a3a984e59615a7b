use super::super::Move;
use super::super::position::Position;

impl Position {
    pub fn queen_moves_into(&self, idx: u8, moves: &mut Vec<Move>) {
        self.bishop_moves_into(idx, moves);
        self.rook_moves_into(idx, moves);
    }

    pub fn queen_moves(&self, idx: u8) -> Vec<Move> {
        let mut moves = Vec::with_capacity(27); // 13 diagonal + 14 orthogonal
        self.queen_moves_into(idx, &mut moves);
        moves
    }
}
