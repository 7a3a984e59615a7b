use super::super::{Move, Piece, PromotionBase, Type};
use super::super::position::Position;

impl Position {
    pub fn pawn_moves_into(&self, idx: u8, moves: &mut Vec<Move>) {
        let piece = self.squares()[idx as usize];
        let color = piece.color;
        let file = (idx % 8) as i32;
        let rank = (idx / 8) as i32;
        let forward = color.forward();
        let promotion_rank = (color.promotion_rank_start() / 8) as i32;
        let start_rank = (color.pawn_start_rank_start() / 8) as i32;

        let one_step = (idx as i32 + forward) as u8;
        if self.squares()[one_step as usize].is_none() {
            push_pawn_move(moves, piece, idx, one_step, promotion_rank);

            if rank == start_rank {
                let two_step = (idx as i32 + 2 * forward) as u8;
                if self.squares()[two_step as usize].is_none() {
                    moves.push(Move::PawnDoubleStep { piece, from: idx, to: two_step });
                }
            }
        }

        for df in [-1i32, 1] {
            let target_file = file + df;
            if !(0..8).contains(&target_file) {
                continue;
            }
            let to = (idx as i32 + forward + df) as u8;

            if let Some(ep_target) = self.en_passant_target() {
                if to == ep_target {
                    let captured_square = (ep_target as i32 - forward) as u8;
                    moves.push(Move::EnPassantCapture { piece, from: idx, to, captured_square });
                    continue;
                }
            }

            let target = self.squares()[to as usize];
            if !target.is_none() && target.color != color {
                push_pawn_capture(moves, piece, idx, to, target, promotion_rank);
            }
        }
    }

    pub fn pawn_moves(&self, idx: u8) -> Vec<Move> {
        let mut moves = Vec::with_capacity(12);
        self.pawn_moves_into(idx, &mut moves);
        moves
    }
}

fn push_pawn_move(moves: &mut Vec<Move>, piece: Piece, from: u8, to: u8, promotion_rank: i32) {
    if (to / 8) as i32 == promotion_rank {
        moves.push(Move::Promotion {
            base: PromotionBase::Push { from, to },
            color: piece.color,
            promoted_kind: Type::Queen,
        });
    } else {
        moves.push(Move::PawnPush { piece, from, to });
    }
}

fn push_pawn_capture(
    moves: &mut Vec<Move>,
    piece: Piece,
    from: u8,
    to: u8,
    captured: Piece,
    promotion_rank: i32,
) {
    if (to / 8) as i32 == promotion_rank {
        moves.push(Move::Promotion {
            base: PromotionBase::Capture { from, to, captured },
            color: piece.color,
            promoted_kind: Type::Queen,
        });
    } else {
        moves.push(Move::PawnCapture { piece, from, to, captured });
    }
}
