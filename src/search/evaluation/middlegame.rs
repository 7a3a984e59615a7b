use crate::game_repr::{Color, Position};

use super::piece_square_tables::KingTable;
use super::{score_with_weights, Evaluator, Weights};

/// Middlegame weights, carried over directly from the donor's
/// `TaperedScore.mg` fields in `agent/ai/evaluation.rs` — DESIGN.md's Open
/// Question resolution found no second, divergent middlegame implementation
/// anywhere in the donor worth preferring over this one.
pub struct MiddlegameEvaluator;

const WEIGHTS: Weights = Weights {
    doubled_pawn_penalty: 15,
    isolated_pawn_penalty: 20,
    passed_pawn_bonus: 40,
    pawn_shield_bonus: 15,
    knight_mobility: 4,
    bishop_mobility: 5,
    rook_mobility: 2,
    queen_mobility: 1,
    king_mobility: 0,
    bishop_pair_bonus: 40,
    rook_open_file: 25,
    rook_semi_open_file: 12,
    rook_seventh_rank: 18,
    connected_rooks: 15,
    king_table: KingTable::Middlegame,
};

impl Evaluator for MiddlegameEvaluator {
    fn score(&self, position: &Position, color: Color) -> i32 {
        score_with_weights(position, color, &WEIGHTS)
    }
}
