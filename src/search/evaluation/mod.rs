//! Phase-specific evaluators.
//!
//! The donor's `agent/ai/evaluation.rs` is one monolithic `evaluate()` that
//! blends a middlegame and an endgame score by a continuous "game phase"
//! float (`TaperedScore::interpolate`). This crate's phase detector
//! ([`crate::search::phase`]) instead classifies a position into one of three
//! discrete phases and hands it to a dedicated, stateless evaluator — no
//! tapering, no `TaperedScore`. The scoring *ingredients* (material + PST,
//! pawn structure, king safety, mobility, bishop pair, rook features) are
//! carried over from the donor; only the blending mechanism changes.
//!
//! One resolved discrepancy: the donor values a bishop at 320cp in this file
//! but [`crate::game_repr::Type::base_value`] (the rest of the crate's only
//! source of material values) says 300. This module uses `base_value()`
//! everywhere rather than keep a second, disagreeing bishop value alive.

mod endgame;
mod middlegame;
mod opening;
pub mod piece_square_tables;

pub use endgame::EndgameEvaluator;
pub use middlegame::MiddlegameEvaluator;
pub use opening::OpeningEvaluator;

use crate::game_repr::{Color, Position, Type};
use crate::search::phase::{detect_phase, GamePhase};
use piece_square_tables::{pst_value, KingTable};

pub trait Evaluator: Send + Sync {
    /// Score for `color`'s pieces and pawn/king/mobility structure, in
    /// centipawns, from a fixed White-relative sign (higher is always better
    /// for `color`, regardless of which color that is).
    fn score(&self, position: &Position, color: Color) -> i32;
}

pub(super) struct Weights {
    pub doubled_pawn_penalty: i32,
    pub isolated_pawn_penalty: i32,
    pub passed_pawn_bonus: i32,
    pub pawn_shield_bonus: i32,
    pub knight_mobility: i32,
    pub bishop_mobility: i32,
    pub rook_mobility: i32,
    pub queen_mobility: i32,
    pub king_mobility: i32,
    pub bishop_pair_bonus: i32,
    pub rook_open_file: i32,
    pub rook_semi_open_file: i32,
    pub rook_seventh_rank: i32,
    pub connected_rooks: i32,
    pub king_table: KingTable,
}

pub fn evaluator_for(phase: GamePhase) -> &'static dyn Evaluator {
    match phase {
        GamePhase::Opening => &OpeningEvaluator,
        GamePhase::Middlegame => &MiddlegameEvaluator,
        GamePhase::Endgame => &EndgameEvaluator,
    }
}

/// White-minus-Black score: positive favors White regardless of whose turn it is.
pub fn evaluate(position: &Position) -> i32 {
    let evaluator = evaluator_for(detect_phase(position));
    evaluator.score(position, Color::White) - evaluator.score(position, Color::Black)
}

/// [`evaluate`], flipped to the perspective of the side to move — what negamax
/// search wants at every node.
pub fn evaluate_relative(position: &Position) -> i32 {
    let score = evaluate(position);
    match position.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

pub(super) fn score_with_weights(position: &Position, color: Color, weights: &Weights) -> i32 {
    material_and_pst(position, color, weights.king_table)
        + pawn_structure(position, color, weights)
        + king_safety(position, color, weights)
        + mobility(position, color, weights)
        + bishop_pair(position, color, weights)
        + rook_features(position, color, weights)
}

fn material_and_pst(position: &Position, color: Color, king_table: KingTable) -> i32 {
    let mut score = 0;
    for (square, piece) in position.squares().iter().enumerate() {
        if piece.is_none() || piece.color != color {
            continue;
        }
        score += piece.piece_type.base_value();
        score += pst_value(piece.piece_type, square as u8, color, king_table);
    }
    score
}

fn pawn_files(position: &Position, color: Color) -> [u8; 8] {
    let mut files = [0u8; 8];
    for (square, piece) in position.squares().iter().enumerate() {
        if piece.piece_type == Type::Pawn && piece.color == color {
            files[square % 8] += 1;
        }
    }
    files
}

fn pawn_structure(position: &Position, color: Color, weights: &Weights) -> i32 {
    let own_files = pawn_files(position, color);
    let enemy_files = pawn_files(position, color.opposite());
    let mut score = 0;

    for (square, piece) in position.squares().iter().enumerate() {
        if piece.piece_type != Type::Pawn || piece.color != color {
            continue;
        }
        let square = square as u8;
        let file = (square % 8) as usize;

        if own_files[file] > 1 {
            score -= weights.doubled_pawn_penalty;
        }

        let left = file.checked_sub(1).map(|f| own_files[f]).unwrap_or(0);
        let right = own_files.get(file + 1).copied().unwrap_or(0);
        if left == 0 && right == 0 {
            score -= weights.isolated_pawn_penalty;
        }

        if is_passed_pawn(square, color, &enemy_files, position) {
            score += weights.passed_pawn_bonus;
        }
    }
    score
}

fn is_passed_pawn(square: u8, color: Color, enemy_files: &[u8; 8], position: &Position) -> bool {
    let file = (square % 8) as usize;
    let row = square / 8;
    let files_to_check: [usize; 3] = [file.wrapping_sub(1), file, file + 1];

    for &f in &files_to_check {
        if f >= 8 {
            continue;
        }
        if enemy_files[f] == 0 {
            continue;
        }
        // An enemy pawn on a watched file only blocks "passed" status if it
        // sits ahead of us (between this pawn and its promotion square).
        let blocked = position.squares().iter().enumerate().any(|(sq, piece)| {
            let sq = sq as u8;
            piece.piece_type == Type::Pawn
                && piece.color != color
                && (sq % 8) as usize == f
                && is_ahead(sq / 8, row, color)
        });
        if blocked {
            return false;
        }
    }
    true
}

/// True iff row `candidate` is further toward `color`'s promotion rank than `from_row`.
fn is_ahead(candidate_row: u8, from_row: u8, color: Color) -> bool {
    match color {
        Color::White => candidate_row < from_row,
        Color::Black => candidate_row > from_row,
    }
}

fn king_safety(position: &Position, color: Color, weights: &Weights) -> i32 {
    let king_square = position.king_square(color);
    let king_file = (king_square % 8) as i32;
    let king_row = (king_square / 8) as i32;
    let forward_row = color.forward() / 8;

    let mut shield = 0;
    for row_offset in [1, 2] {
        let row = king_row + forward_row * row_offset;
        if !(0..8).contains(&row) {
            continue;
        }
        for df in [-1, 0, 1] {
            let file = king_file + df;
            if !(0..8).contains(&file) {
                continue;
            }
            let square = (row * 8 + file) as u8;
            let piece = position.piece_at(square);
            if piece.piece_type == Type::Pawn && piece.color == color {
                shield += 1;
            }
        }
    }
    shield * weights.pawn_shield_bonus
}

fn mobility(position: &Position, color: Color, weights: &Weights) -> i32 {
    let mut score = 0;
    for (square, piece) in position.squares().iter().enumerate() {
        if piece.is_none() || piece.color != color {
            continue;
        }
        let square = square as u8;
        score += match piece.piece_type {
            Type::Knight => position.knight_moves(square).len() as i32 * weights.knight_mobility,
            Type::Bishop => position.bishop_moves(square).len() as i32 * weights.bishop_mobility,
            Type::Rook => position.rook_moves(square).len() as i32 * weights.rook_mobility,
            Type::Queen => position.queen_moves(square).len() as i32 * weights.queen_mobility,
            Type::King => position.king_moves(square).len() as i32 * weights.king_mobility,
            _ => 0,
        };
    }
    score
}

fn bishop_pair(position: &Position, color: Color, weights: &Weights) -> i32 {
    let bishops = position
        .squares()
        .iter()
        .filter(|p| p.piece_type == Type::Bishop && p.color == color)
        .count();
    if bishops >= 2 {
        weights.bishop_pair_bonus
    } else {
        0
    }
}

fn rook_features(position: &Position, color: Color, weights: &Weights) -> i32 {
    let own_files = pawn_files(position, color);
    let enemy_files = pawn_files(position, color.opposite());
    let seventh_row = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    let rook_squares: Vec<u8> = position
        .squares()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.piece_type == Type::Rook && p.color == color)
        .map(|(sq, _)| sq as u8)
        .collect();

    let mut score = 0;
    for &square in &rook_squares {
        let file = (square % 8) as usize;
        let row = square / 8;
        if own_files[file] == 0 && enemy_files[file] == 0 {
            score += weights.rook_open_file;
        } else if own_files[file] == 0 {
            score += weights.rook_semi_open_file;
        }
        if row == seventh_row {
            score += weights.rook_seventh_rank;
        }
    }

    if rook_squares.len() == 2 && rooks_connected(position, rook_squares[0], rook_squares[1]) {
        score += weights.connected_rooks;
    }

    score
}

/// True iff two rooks share a rank or file with nothing but empty squares between them.
fn rooks_connected(position: &Position, a: u8, b: u8) -> bool {
    let (af, ar) = (a % 8, a / 8);
    let (bf, br) = (b % 8, b / 8);

    let step: i32 = if af == bf {
        if ar < br { 8 } else { -8 }
    } else if ar == br {
        if af < bf { 1 } else { -1 }
    } else {
        return false;
    };

    let mut sq = a as i32 + step;
    while sq != b as i32 {
        if !position.piece_at(sq as u8).is_none() {
            return false;
        }
        sq += step;
    }
    true
}
