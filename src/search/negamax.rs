//! Alpha-beta search over the interior of the tree.
//!
//! Grounded on the donor's `agent/ai/negamax.rs`: the transposition-table
//! probe/store shape, PVS re-search structure, and killer/history updates on
//! a cutoff all carry over. Three structural changes follow from this
//! crate's immutable `Position`:
//!
//! - No make/unmake. Each child is `position.apply(mv)?.position`, a fresh
//!   value; there's no `unmake_move` to call.
//! - Null-move pruning calls [`Position::apply_null_move`] directly instead
//!   of the donor's trick of pushing a dummy zero-length move onto a move
//!   history list to fake a side-to-move flip.
//! - Check status comes for free from `apply`'s returned `MoveStatus`
//!   instead of a separate "is this check" query after the fact.
//!
//! Everything past that — razoring, futility pruning, internal iterative
//! deepening, SEE-based late-capture pruning, check extension, and late move
//! reduction — has no donor counterpart; the donor's search is plain PVS with
//! null-move pruning and nothing else.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::game_repr::{MoveStatus, Position};
use crate::search::move_ordering::{order_interior_moves, CounterMoveTable, HistoryTable, KillerMoves};
use crate::search::quiescence::quiescence_search;
use crate::search::transposition_table::{NodeType, TranspositionTable, TranspositionTableEntry};
use crate::search::{evaluation::evaluate_relative, MATE_SCORE};

const RAZOR_MARGIN: i32 = 300;
const FUTILITY_MARGIN_PER_PLY: i32 = 100;
const SEE_PRUNE_THRESHOLD: i32 = -20;
const NULL_MOVE_MIN_DEPTH: u8 = 3;
const NULL_MOVE_VERIFY_DEPTH: u8 = 6;
const IID_MIN_DEPTH: u8 = 4;
const LMR_MIN_DEPTH: u8 = 3;
const LMR_MIN_MOVE_INDEX: u32 = 4;

#[allow(clippy::too_many_arguments)]
pub fn negamax(
    position: &Position,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    tt: &TranspositionTable,
    killers: &mut KillerMoves,
    history: &HistoryTable,
    counters: &mut CounterMoveTable,
    budget: &mut u32,
    stop: &AtomicBool,
    nodes: &AtomicU64,
) -> i32 {
    if stop.load(Ordering::Relaxed) {
        return evaluate_relative(position);
    }
    nodes.fetch_add(1, Ordering::Relaxed);

    if depth == 0 {
        return quiescence_search(position, alpha, beta, budget, nodes);
    }

    let hash = position.zobrist_hash();
    let mut hash_move = None;
    if let Some(entry) = tt.probe(hash) {
        if entry.depth >= depth {
            match entry.node_type {
                NodeType::Exact => return entry.score,
                NodeType::LowerBound if entry.score >= beta => return beta,
                NodeType::UpperBound if entry.score <= alpha => return alpha,
                _ => {}
            }
        }
        hash_move = entry.best_move;
    }

    let in_check = position.is_in_check(position.side_to_move());
    let static_eval = evaluate_relative(position);

    if depth == 1 && !in_check && static_eval + RAZOR_MARGIN < alpha {
        return quiescence_search(position, alpha, beta, budget, nodes);
    }

    if depth < 2 && !in_check {
        let margin = depth as i32 * FUTILITY_MARGIN_PER_PLY;
        if static_eval - margin >= beta {
            return static_eval;
        }
    }

    if !in_check
        && depth >= NULL_MOVE_MIN_DEPTH
        && beta.abs() < MATE_SCORE - 100
        && has_non_pawn_material(position)
    {
        let reduction = 2 + depth / 6;
        let reduced_depth = depth.saturating_sub(1 + reduction);
        let null_position = position.apply_null_move();
        let null_score = -negamax(
            &null_position,
            reduced_depth,
            ply + 1,
            -beta,
            -beta + 1,
            tt,
            killers,
            history,
            counters,
            budget,
            stop,
            nodes,
        );
        if null_score >= beta {
            if depth >= NULL_MOVE_VERIFY_DEPTH {
                let verify = negamax(
                    position,
                    depth.saturating_sub(4),
                    ply,
                    alpha,
                    beta,
                    tt,
                    killers,
                    history,
                    counters,
                    budget,
                    stop,
                    nodes,
                );
                if verify >= beta {
                    return beta;
                }
            } else {
                return beta;
            }
        }
    }

    if hash_move.is_none() && depth >= IID_MIN_DEPTH {
        negamax(position, depth - 2, ply, alpha, beta, tt, killers, history, counters, budget, stop, nodes);
        hash_move = tt.probe(hash).and_then(|e| e.best_move);
    }

    let legal = position.legal_moves();
    if legal.is_empty() {
        return if in_check { -(MATE_SCORE - ply as i32) } else { 0 };
    }

    let last_move = position.parent_move();
    let mut ordered = order_interior_moves(position, legal, hash_move, killers, ply, counters, last_move, history);
    if let Some(hm) = hash_move {
        if let Some(idx) = ordered.iter().position(|&m| m == hm) {
            ordered.swap(0, idx);
        }
    }

    let mut best_score = crate::search::MIN_SCORE;
    let mut best_move = None;
    let mut node_type = NodeType::UpperBound;
    let mut moves_searched: u32 = 0;

    for mv in ordered {
        let Ok(transition) = position.apply(mv) else { continue };
        let child_in_check = matches!(transition.status, MoveStatus::Check | MoveStatus::Checkmate);

        if depth < LMR_MIN_DEPTH
            && moves_searched >= 2
            && mv.is_capture()
            && !child_in_check
            && crate::search::see::see(position, mv) < SEE_PRUNE_THRESHOLD
        {
            continue;
        }

        let mut child_depth = depth - 1;
        if child_in_check {
            child_depth += 1;
        }

        let score = if moves_searched == 0 {
            -negamax(
                &transition.position,
                child_depth,
                ply + 1,
                -beta,
                -alpha,
                tt,
                killers,
                history,
                counters,
                budget,
                stop,
                nodes,
            )
        } else {
            let mut reduction = 0;
            if depth >= LMR_MIN_DEPTH
                && moves_searched >= LMR_MIN_MOVE_INDEX
                && !mv.is_capture()
                && !in_check
                && !child_in_check
            {
                reduction = (1 + moves_searched / 6).min(3);
            }
            let reduced_depth = child_depth.saturating_sub(reduction as u8);

            let scout = -negamax(
                &transition.position,
                reduced_depth,
                ply + 1,
                -alpha - 1,
                -alpha,
                tt,
                killers,
                history,
                counters,
                budget,
                stop,
                nodes,
            );

            if scout > alpha && (reduction > 0 || scout < beta) {
                -negamax(
                    &transition.position,
                    child_depth,
                    ply + 1,
                    -beta,
                    -alpha,
                    tt,
                    killers,
                    history,
                    counters,
                    budget,
                    stop,
                    nodes,
                )
            } else {
                scout
            }
        };

        moves_searched += 1;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if score >= beta {
            if !mv.is_capture() {
                killers.store(ply, mv);
                if !last_move.is_null() {
                    counters.update(last_move, mv);
                }
                history.update(mv, depth);
            }
            tt.store(TranspositionTableEntry {
                hash,
                depth,
                score: beta,
                best_move: Some(mv),
                node_type: NodeType::LowerBound,
                age: tt.generation(),
            });
            return beta;
        }

        if score > alpha {
            alpha = score;
            node_type = NodeType::Exact;
        }
    }

    tt.store(TranspositionTableEntry {
        hash,
        depth,
        score: best_score,
        best_move,
        node_type,
        age: tt.generation(),
    });
    best_score
}

fn has_non_pawn_material(position: &Position) -> bool {
    use crate::game_repr::Type;
    position.squares().iter().any(|p| {
        p.is(position.side_to_move())
            && matches!(p.piece_type, Type::Knight | Type::Bishop | Type::Rook | Type::Queen)
    })
}

pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - 1000
}

pub fn mate_distance(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        return None;
    }
    Some(if score > 0 { MATE_SCORE - score } else { -MATE_SCORE - score })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MAX_SCORE, MIN_SCORE};

    fn fresh_tables() -> (TranspositionTable, HistoryTable) {
        (TranspositionTable::with_capacity(1 << 12), HistoryTable::new())
    }

    #[test]
    fn finds_mate_in_one() {
        // Fool's mate: 1.f3 e5 2.g4 Qh4#. Build it via four `apply` calls.
        let start = Position::starting_position();
        let after_f3 = start
            .apply(find_move(&start, 53, 45))
            .unwrap()
            .position;
        let after_e5 = after_f3
            .apply(find_move(&after_f3, 12, 28))
            .unwrap()
            .position;
        let after_g4 = after_e5
            .apply(find_move(&after_e5, 54, 38))
            .unwrap()
            .position;

        let (tt, history) = fresh_tables();
        let mut killers = KillerMoves::new();
        let mut counters = CounterMoveTable::new();
        let mut budget = 300_000;
        let stop = AtomicBool::new(false);
        let nodes = AtomicU64::new(0);

        let score = negamax(
            &after_g4,
            3,
            0,
            MIN_SCORE,
            MAX_SCORE,
            &tt,
            &mut killers,
            &history,
            &mut counters,
            &mut budget,
            &stop,
            &nodes,
        );
        assert!(is_mate_score(score));
        assert!(score > 0, "black to move should find the mating queen move");
    }

    #[test]
    fn stalemate_scores_as_draw() {
        // Classic king-in-the-corner stalemate (black to move, no legal moves, not in check).
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(position.legal_moves().is_empty());
        assert!(!position.is_in_check(position.side_to_move()));

        let (tt, history) = fresh_tables();
        let mut killers = KillerMoves::new();
        let mut counters = CounterMoveTable::new();
        let mut budget = 300_000;
        let stop = AtomicBool::new(false);
        let nodes = AtomicU64::new(0);

        let score = negamax(
            &position,
            3,
            0,
            MIN_SCORE,
            MAX_SCORE,
            &tt,
            &mut killers,
            &history,
            &mut counters,
            &mut budget,
            &stop,
            &nodes,
        );
        assert_eq!(score, 0);
    }

    fn find_move(position: &Position, from: u8, to: u8) -> crate::game_repr::Move {
        position
            .legal_moves()
            .iter()
            .copied()
            .find(|m| m.from_square() == Some(from) && m.to_square() == Some(to))
            .expect("expected move to be legal")
    }
}
