use crate::game_repr::{Color, Position};

use super::piece_square_tables::KingTable;
use super::{score_with_weights, Evaluator, Weights};

/// Endgame weights, starting from the donor's `TaperedScore.eg` fields
/// (`agent/ai/evaluation.rs`) and the shape of `KING_ENDGAME_TABLE`, then
/// reweighted so king activity and passed pawns dominate — per DESIGN.md's
/// Open Question resolution, king safety (the pawn shield term) stops
/// mattering once material has thinned out, while mobility keeps its donor
/// weight since an active king or rook is exactly what wins king-and-pawn
/// and rook endings.
pub struct EndgameEvaluator;

const WEIGHTS: Weights = Weights {
    doubled_pawn_penalty: 20,
    isolated_pawn_penalty: 25,
    passed_pawn_bonus: 70,
    pawn_shield_bonus: 5,
    knight_mobility: 4,
    bishop_mobility: 5,
    rook_mobility: 4,
    queen_mobility: 2,
    king_mobility: 8,
    bishop_pair_bonus: 50,
    rook_open_file: 25,
    rook_semi_open_file: 12,
    rook_seventh_rank: 25,
    connected_rooks: 15,
    king_table: KingTable::Endgame,
};

impl Evaluator for EndgameEvaluator {
    fn score(&self, position: &Position, color: Color) -> i32 {
        score_with_weights(position, color, &WEIGHTS)
    }
}
