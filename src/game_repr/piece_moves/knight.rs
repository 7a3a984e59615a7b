use super::super::Move;
use super::super::position::Position;

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2),
    (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

impl Position {
    pub fn knight_moves_into(&self, idx: u8, moves: &mut Vec<Move>) {
        let piece = self.squares()[idx as usize];
        let file = (idx % 8) as i8;
        let rank = (idx / 8) as i8;

        for &(df, dr) in KNIGHT_STEPS.iter() {
            let (nf, nr) = (file + df, rank + dr);
            if !(0..8).contains(&nf) || !(0..8).contains(&nr) {
                continue;
            }
            let sq = (nr * 8 + nf) as u8;
            let target = self.squares()[sq as usize];
            if target.is_none() {
                moves.push(Move::QuietMove { piece, from: idx, to: sq });
            } else if target.color != piece.color {
                moves.push(Move::CaptureMove { piece, from: idx, to: sq, captured: target });
            }
        }
    }

    pub fn knight_moves(&self, idx: u8) -> Vec<Move> {
        let mut moves = Vec::with_capacity(8);
        self.knight_moves_into(idx, &mut moves);
        moves
    }
}
