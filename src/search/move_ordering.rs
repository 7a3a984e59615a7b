//! Move ordering tables and sorters.
//!
//! Grounded on the donor's `agent/ai/move_ordering.rs`: its `KillerMoves`
//! (`[[Option<Move>; 2]; 64]`, two slots per ply) and `HistoryTable`
//! (`depth * depth` bonus on a beta cutoff) carry over directly. Two things
//! are new: a counter-move table (indexed by the move that was just played,
//! not by ply — the donor has no equivalent), and splitting the donor's
//! single `generate_ordered_moves` into a root sorter and an interior sorter,
//! since the two want different priorities (see DESIGN.md).
//!
//! Per the concurrency design, killer and counter-move tables are per-thread
//! (plain `&mut self`, no synchronization needed); the history table is
//! shared across every worker and updated through relaxed atomics — races
//! between two threads bumping the same cell are benign, just a slightly
//! stale ordering hint.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::game_repr::{Move, Position};
use crate::search::see::{is_piece_defended, see};

const MAX_PLY: usize = 64;

pub struct KillerMoves {
    table: Vec<[Option<Move>; 2]>,
}

impl KillerMoves {
    pub fn new() -> Self {
        Self { table: vec![[None; 2]; MAX_PLY] }
    }

    pub fn store(&mut self, ply: u8, mv: Move) {
        let slot = &mut self.table[ply as usize % self.table.len()];
        if slot[0] != Some(mv) {
            slot[1] = slot[0];
            slot[0] = Some(mv);
        }
    }

    pub fn get(&self, ply: u8) -> [Option<Move>; 2] {
        self.table[ply as usize % self.table.len()]
    }
}

impl Default for KillerMoves {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CounterMoveTable {
    table: Box<[[Option<Move>; 64]; 64]>,
}

impl CounterMoveTable {
    pub fn new() -> Self {
        Self { table: Box::new([[None; 64]; 64]) }
    }

    pub fn update(&mut self, last_move: Move, cutoff_move: Move) {
        if let (Some(from), Some(to)) = (last_move.from_square(), last_move.to_square()) {
            self.table[from as usize][to as usize] = Some(cutoff_move);
        }
    }

    pub fn get(&self, last_move: Move) -> Option<Move> {
        let (from, to) = (last_move.from_square()?, last_move.to_square()?);
        self.table[from as usize][to as usize]
    }
}

impl Default for CounterMoveTable {
    fn default() -> Self {
        Self::new()
    }
}

pub struct HistoryTable {
    table: Box<[[AtomicI32; 64]; 64]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self { table: Box::new(std::array::from_fn(|_| std::array::from_fn(|_| AtomicI32::new(0)))) }
    }

    pub fn update(&self, mv: Move, depth: u8) {
        if let (Some(from), Some(to)) = (mv.from_square(), mv.to_square()) {
            let bonus = depth as i32 * depth as i32;
            self.table[from as usize][to as usize].fetch_add(bonus, Ordering::Relaxed);
        }
    }

    pub fn get(&self, mv: Move) -> i32 {
        match (mv.from_square(), mv.to_square()) {
            (Some(from), Some(to)) => self.table[from as usize][to as usize].load(Ordering::Relaxed),
            _ => 0,
        }
    }

    pub fn clear(&self) {
        for row in self.table.iter() {
            for cell in row.iter() {
                cell.store(0, Ordering::Relaxed);
            }
        }
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Root sorter: check-giving moves, then castles, then captures by
/// descending SEE, then quiet moves by descending history score.
pub fn order_root_moves(position: &Position, moves: &[Move], history: &HistoryTable) -> Vec<Move> {
    let mut ordered: Vec<Move> = moves.to_vec();
    ordered.sort_by_cached_key(|&mv| {
        let gives_check = gives_check(position, mv);
        let see_score = if mv.is_capture() { see(position, mv) } else { 0 };
        (
            std::cmp::Reverse(gives_check),
            std::cmp::Reverse(mv.is_castle()),
            std::cmp::Reverse(see_score),
            std::cmp::Reverse(history.get(mv)),
        )
    });
    ordered
}

fn gives_check(position: &Position, mv: Move) -> bool {
    position
        .apply(mv)
        .map(|t| t.position.is_in_check(t.position.side_to_move()))
        .unwrap_or(false)
}

/// Interior sorter: hash move first, then captures of undefended pieces,
/// killers, the counter-move to whatever was just played, captures ordered
/// by descending SEE (positive ahead of non-captures ahead of negative),
/// then quiet moves by descending history score.
#[allow(clippy::too_many_arguments)]
pub fn order_interior_moves(
    position: &Position,
    moves: &[Move],
    hash_move: Option<Move>,
    killers: &KillerMoves,
    ply: u8,
    counters: &CounterMoveTable,
    last_move: Move,
    history: &HistoryTable,
) -> Vec<Move> {
    let killer_slots = killers.get(ply);
    let counter_move = if last_move.is_null() { None } else { counters.get(last_move) };

    let mut ordered: Vec<Move> = moves.to_vec();
    ordered.sort_by_cached_key(|&mv| {
        if Some(mv) == hash_move {
            return (i64::MIN, 0i64, 0i64);
        }

        let see_score = if mv.is_capture() { see(position, mv) } else { 0 };
        let undefended_capture = mv.is_capture()
            && mv
                .to_square()
                .zip(mv.color())
                .map(|(sq, color)| !is_piece_defended(position, sq, color.opposite()))
                .unwrap_or(false);

        let tier: i64 = if undefended_capture {
            0
        } else if killer_slots[0] == Some(mv) {
            1
        } else if killer_slots[1] == Some(mv) {
            2
        } else if counter_move == Some(mv) {
            3
        } else if mv.is_capture() && see_score > 0 {
            4
        } else if !mv.is_capture() {
            5
        } else {
            6
        };

        (tier, -(see_score as i64), -(history.get(mv) as i64))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_repr::{Color, Piece, Type};

    #[test]
    fn killer_moves_keep_two_most_recent_distinct_entries() {
        let mut killers = KillerMoves::new();
        let a = Move::QuietMove { piece: Piece { color: Color::White, piece_type: Type::Knight }, from: 1, to: 18 };
        let b = Move::QuietMove { piece: Piece { color: Color::White, piece_type: Type::Knight }, from: 1, to: 16 };
        killers.store(3, a);
        killers.store(3, b);
        assert_eq!(killers.get(3), [Some(b), Some(a)]);
    }

    #[test]
    fn history_table_accumulates_depth_squared_bonus() {
        let history = HistoryTable::new();
        let mv = Move::QuietMove { piece: Piece { color: Color::White, piece_type: Type::Pawn }, from: 8, to: 16 };
        history.update(mv, 3);
        history.update(mv, 3);
        assert_eq!(history.get(mv), 18);
    }

    #[test]
    fn counter_move_table_round_trips() {
        let mut counters = CounterMoveTable::new();
        let last = Move::QuietMove { piece: Piece { color: Color::Black, piece_type: Type::Pawn }, from: 11, to: 19 };
        let reply = Move::QuietMove { piece: Piece { color: Color::White, piece_type: Type::Knight }, from: 1, to: 18 };
        counters.update(last, reply);
        assert_eq!(counters.get(last), Some(reply));
    }

    #[test]
    fn hash_move_always_sorts_first() {
        let position = Position::starting_position();
        let history = HistoryTable::new();
        let moves = position.legal_moves();
        let hash_move = moves[5];
        let killers = KillerMoves::new();
        let counters = CounterMoveTable::new();
        let ordered = order_interior_moves(&position, moves, Some(hash_move), &killers, 0, &counters, Move::NullMove, &history);
        assert_eq!(ordered[0], hash_move);
    }
}
