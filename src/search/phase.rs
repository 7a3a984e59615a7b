//! Game-phase detection.
//!
//! The donor computes a continuous phase value (`calculate_game_phase`,
//! `agent/ai/evaluation.rs`) purely from remaining non-pawn material, then
//! tapers mg/eg scores by it. This crate instead classifies a position into
//! one of three discrete phases so a dedicated evaluator can be picked per
//! [`crate::search::evaluation::evaluator_for`]. The donor's material-phase
//! idea survives as one of several weighted indicators below; the others
//! (piece count, king activity, minor-piece development, pawn advancement)
//! are this crate's own addition, since one signal alone classifies messy
//! middlegames with heavy trades as "endgame" too eagerly.
//!
//! One indicator the donor's original design sketch called for — "moves
//! played so far" — has no clean equivalent here: `Position` is immutable and
//! only carries its own `parent_move`, not a move history chain. `fullmove_number`
//! is used as the closest available proxy.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::game_repr::{Color, Position, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

const CACHE_CAPACITY: usize = 10_000;

static PHASE_CACHE: RwLock<Option<HashMap<u64, GamePhase>>> = RwLock::new(None);

struct Indicators {
    non_pawn_material: i32,
    piece_count: i32,
    advanced_pawns: i32,
    minors_undeveloped: i32,
    kings_castled_or_centralized: i32,
    move_number: i32,
}

/// Total non-pawn material both sides start with, used as the indicators' baseline.
fn starting_non_pawn_material() -> i32 {
    2 * (2 * Type::Knight.base_value() + 2 * Type::Bishop.base_value() + 2 * Type::Rook.base_value() + Type::Queen.base_value())
}

fn gather_indicators(position: &Position) -> Indicators {
    let mut non_pawn_material = 0;
    let mut piece_count = 0;
    let mut advanced_pawns = 0;
    let mut minors_undeveloped = 0;

    for (square, piece) in position.squares().iter().enumerate() {
        if piece.is_none() {
            continue;
        }
        piece_count += 1;
        let row = (square / 8) as i32;
        match piece.piece_type {
            Type::Knight | Type::Bishop | Type::Rook | Type::Queen => {
                non_pawn_material += piece.piece_type.base_value();
            }
            Type::Pawn => {
                let start_row = match piece.color {
                    Color::White => 6,
                    Color::Black => 1,
                };
                let distance = (start_row - row).unsigned_abs();
                if distance >= 3 {
                    advanced_pawns += 1;
                }
            }
            _ => {}
        }
        if matches!(piece.piece_type, Type::Knight | Type::Bishop) {
            let back_row = match piece.color {
                Color::White => 7,
                Color::Black => 0,
            };
            if row == back_row {
                minors_undeveloped += 1;
            }
        }
    }

    let kings_castled_or_centralized = [Color::White, Color::Black]
        .into_iter()
        .filter(|&c| king_looks_settled(position, c))
        .count() as i32;

    Indicators {
        non_pawn_material,
        piece_count,
        advanced_pawns,
        minors_undeveloped,
        kings_castled_or_centralized,
        move_number: position.fullmove_number() as i32,
    }
}

fn king_looks_settled(position: &Position, color: Color) -> bool {
    let square = position.king_square(color);
    let file = square % 8;
    // Off the e-file counts as "moved" (castled or wandered); either way it's
    // no longer the un-castled starting square.
    file != 4
}

fn score_opening(i: &Indicators) -> i32 {
    let mut score = 0;
    score += i.minors_undeveloped * 15;
    score += (2 - i.kings_castled_or_centralized) * 20;
    score += (20 - i.move_number).max(0) * 8;
    score -= i.advanced_pawns * 10;
    score
}

fn score_middlegame(i: &Indicators) -> i32 {
    let mut score = 0;
    score += i.non_pawn_material / 20;
    score += i.piece_count * 3;
    score -= (i.move_number - 25).unsigned_abs() as i32;
    score
}

fn score_endgame(i: &Indicators) -> i32 {
    let baseline = starting_non_pawn_material();
    let mut score = 0;
    score += (baseline - i.non_pawn_material).max(0) / 15;
    score += (16 - i.piece_count).max(0) * 12;
    score += i.advanced_pawns * 10;
    score
}

/// Classifies `position` into a [`GamePhase`], caching the result by zobrist
/// hash (bounded to [`CACHE_CAPACITY`] entries; evicted by clearing the whole
/// cache on overflow, same "approximate, not LRU" tradeoff as the eval cache).
pub fn detect_phase(position: &Position) -> GamePhase {
    let hash = position.zobrist_hash();
    {
        let cache = PHASE_CACHE.read();
        if let Some(map) = cache.as_ref() {
            if let Some(&phase) = map.get(&hash) {
                return phase;
            }
        }
    }

    let indicators = gather_indicators(position);
    let opening = score_opening(&indicators);
    let middlegame = score_middlegame(&indicators);
    let endgame = score_endgame(&indicators);

    // Tie-break order: ENDGAME > MIDDLEGAME > OPENING.
    let phase = if endgame >= middlegame && endgame >= opening {
        GamePhase::Endgame
    } else if middlegame >= opening {
        GamePhase::Middlegame
    } else {
        GamePhase::Opening
    };

    let mut cache = PHASE_CACHE.write();
    let map = cache.get_or_insert_with(HashMap::new);
    if map.len() >= CACHE_CAPACITY {
        map.clear();
    }
    map.insert(hash, phase);

    phase
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_opening() {
        let position = Position::starting_position();
        assert_eq!(detect_phase(&position), GamePhase::Opening);
    }

    #[test]
    fn bare_kings_and_pawns_is_endgame() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(detect_phase(&position), GamePhase::Endgame);
    }
}
