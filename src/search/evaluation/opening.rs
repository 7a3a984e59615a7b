use crate::game_repr::{Color, Position};

use super::piece_square_tables::KingTable;
use super::{score_with_weights, Evaluator, Weights};

/// Opening-phase weights: mirrors the donor's middlegame weight set
/// (`agent/ai/evaluation.rs`'s `TaperedScore.mg` fields), since the donor
/// never distinguished an opening phase from the middlegame at all. The one
/// deliberate change is a heavier mobility weight — development matters more
/// before the position has settled — noted as a tuning choice in DESIGN.md.
pub struct OpeningEvaluator;

const WEIGHTS: Weights = Weights {
    doubled_pawn_penalty: 15,
    isolated_pawn_penalty: 20,
    passed_pawn_bonus: 40,
    pawn_shield_bonus: 15,
    knight_mobility: 5,
    bishop_mobility: 6,
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

impl Evaluator for OpeningEvaluator {
    fn score(&self, position: &Position, color: Color) -> i32 {
        score_with_weights(position, color, &WEIGHTS)
    }
}
