//! Search orchestration: iterative deepening, aspiration windows, and the
//! Lazy-SMP Young-Brothers-Wait parallel root search.
//!
//! Grounded on the donor's `agent/ai/search.rs`: the iterative-deepening
//! loop and `iterative_deepening_search_with_aspiration`'s re-search-on-fail
//! structure both carry over (narrowed to this crate's default ±25cp
//! half-width rather than the donor's ±500/±50). Two things do not carry
//! over:
//!
//! - The donor's root search is single-threaded. This one launches one
//!   `rayon::scope` per depth: worker 0 searches the first root move to
//!   completion alone (Young Brothers Wait — every other worker blocks on a
//!   `parking_lot::Condvar` latch until that finishes, since the first
//!   move's score anchors the alpha-beta window for everyone else), then all
//!   workers pull remaining moves off a shared atomic counter, some at
//!   `depth - 1` for a touch of search diversity the way a Lazy-SMP helper
//!   thread would. The pattern is styled after the donor's
//!   `agent/mcts_player.rs`, which is the only place in the donor that
//!   coordinates worker threads with `parking_lot` primitives.
//! - Progress is reported through `log::info!`, never `println!` — the donor's
//!   `print_search_info` writes straight to stdout, which has no place in a
//!   library crate meant to be embedded.

use std::panic;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use parking_lot::{Condvar, Mutex};

use crate::game_repr::{Move, Position};
use crate::search::config::SearchConfig;
use crate::search::eval_cache::EvalCache;
use crate::search::move_ordering::{order_root_moves, CounterMoveTable, HistoryTable, KillerMoves};
use crate::search::negamax::negamax;
use crate::search::transposition_table::TranspositionTable;
use crate::search::{MATE_SCORE, MAX_SCORE, MIN_SCORE};

/// The process-wide tables a search session reads and writes. Owning these
/// separately from [`SearchConfig`] is what lets `reset_tables` clear state
/// between games without rebuilding the whole engine.
pub struct SearchTables {
    pub tt: TranspositionTable,
    pub eval_cache: EvalCache,
    pub history: HistoryTable,
}

impl SearchTables {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            tt: TranspositionTable::with_capacity_mb(config.tt_size_mb),
            eval_cache: EvalCache::default(),
            history: HistoryTable::new(),
        }
    }

    /// `reset_tables()` from the external interface: clears every shared
    /// table so a fresh search owes nothing to a previous, unrelated game.
    pub fn reset(&self) {
        self.tt.clear();
        self.eval_cache.clear();
        self.history.clear();
    }
}

impl Default for SearchTables {
    fn default() -> Self {
        Self::new(&SearchConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct IterationStats {
    pub depth: u8,
    pub score: i32,
    pub boards_evaluated: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub iteration_stats: Vec<IterationStats>,
}

/// Receives one event per completed iterative-deepening iteration:
/// `(depth, best_move, score, boards_evaluated, elapsed_ms, nps)`.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, stats: &IterationStats);
}

pub fn execute(
    position: &Position,
    config: &SearchConfig,
    tables: &SearchTables,
    stop: &AtomicBool,
    observer: Option<&dyn ProgressObserver>,
) -> SearchResult {
    tables.tt.increment_age();
    tables.eval_cache.clear();

    let start = Instant::now();
    let mut stats = Vec::new();
    let mut best_move = None;
    let mut best_score = 0;
    let mut previous_score = 0;

    for depth in 1..=config.max_depth.max(1) {
        if stop.load(Ordering::Relaxed) {
            break;
        }

        let mut alpha = MIN_SCORE;
        let mut beta = MAX_SCORE;
        if config.aspiration && depth >= 3 {
            alpha = previous_score - 25;
            beta = previous_score + 25;
        }

        let result = loop {
            let attempt = search_root(position, depth, alpha, beta, config, tables, stop);
            let failed_low = attempt.score <= alpha && alpha > MIN_SCORE;
            let failed_high = attempt.score >= beta && beta < MAX_SCORE;
            if failed_low || failed_high {
                debug!("aspiration window missed at depth {depth} (score {}), widening", attempt.score);
                alpha = MIN_SCORE;
                beta = MAX_SCORE;
                continue;
            }
            break attempt;
        };

        if result.best_move.is_none() {
            break;
        }

        best_move = result.best_move;
        best_score = result.score;
        previous_score = best_score;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        let nps = if elapsed_ms > 0 { result.nodes * 1000 / elapsed_ms } else { result.nodes };
        let iteration = IterationStats { depth, score: best_score, boards_evaluated: result.nodes, elapsed_ms, nps };

        info!(
            "depth {} best {:?} score {} nodes {} time {}ms nps {}",
            iteration.depth, best_move, iteration.score, iteration.boards_evaluated, iteration.elapsed_ms, iteration.nps
        );
        if let Some(observer) = observer {
            observer.on_progress(&iteration);
        }
        stats.push(iteration);

        if best_score.abs() >= MATE_SCORE - 1000 {
            break;
        }
    }

    SearchResult { best_move, score: best_score, iteration_stats: stats }
}

struct RootSearchOutcome {
    best_move: Option<Move>,
    score: i32,
    nodes: u64,
}

struct RootShared {
    best_move: Mutex<Option<Move>>,
    best_score: Mutex<i32>,
    latch_open: Mutex<bool>,
    latch_cv: Condvar,
    next_index: AtomicUsize,
    nodes: AtomicU64,
}

fn publish_if_better(shared: &RootShared, mv: Move, score: i32) {
    let mut best_score = shared.best_score.lock();
    let mut best_move = shared.best_move.lock();
    if best_move.is_none() || score > *best_score {
        *best_score = score;
        *best_move = Some(mv);
    }
}

#[allow(clippy::too_many_arguments)]
fn search_one_root_move(
    position: &Position,
    mv: Move,
    depth: u8,
    alpha: i32,
    beta: i32,
    tables: &SearchTables,
    quiescence_budget: u32,
    stop: &AtomicBool,
    killers: &mut KillerMoves,
    counters: &mut CounterMoveTable,
    nodes: &AtomicU64,
) -> Option<i32> {
    let transition = position.apply(mv).ok()?;
    let mut budget = quiescence_budget;
    Some(-negamax(
        &transition.position,
        depth.saturating_sub(1),
        1,
        -beta,
        -alpha,
        &tables.tt,
        killers,
        &tables.history,
        counters,
        &mut budget,
        stop,
        nodes,
    ))
}

fn search_root(
    position: &Position,
    depth: u8,
    alpha: i32,
    beta: i32,
    config: &SearchConfig,
    tables: &SearchTables,
    stop: &AtomicBool,
) -> RootSearchOutcome {
    let root_moves = order_root_moves(position, position.legal_moves(), &tables.history);
    if root_moves.is_empty() {
        return RootSearchOutcome { best_move: None, score: 0, nodes: 0 };
    }

    let worker_count = config.threads.max(1).min(root_moves.len());
    let shared = Arc::new(RootShared {
        best_move: Mutex::new(None),
        best_score: Mutex::new(MIN_SCORE),
        latch_open: Mutex::new(false),
        latch_cv: Condvar::new(),
        next_index: AtomicUsize::new(1),
        nodes: AtomicU64::new(0),
    });

    rayon::scope(|scope| {
        for worker_id in 0..worker_count {
            let shared = Arc::clone(&shared);
            let root_moves = &root_moves;
            scope.spawn(move |_| {
                let mut killers = KillerMoves::new();
                let mut counters = CounterMoveTable::new();

                if worker_id == 0 {
                    // Young Brothers Wait: the first root move is searched to
                    // completion alone before anyone else starts, so its
                    // score can anchor the alpha-beta window the rest of the
                    // workers search with. Wrapped in catch_unwind like the
                    // other workers' moves below: a panic here must still
                    // open the latch, or every other worker hangs forever.
                    let mv = root_moves[0];
                    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                        search_one_root_move(
                            position, mv, depth, alpha, beta, tables, config.quiescence_budget, stop, &mut killers,
                            &mut counters, &shared.nodes,
                        )
                    }));
                    match outcome {
                        Ok(Some(score)) => publish_if_better(&shared, mv, score),
                        Ok(None) => {}
                        Err(_) => warn!("search worker panicked on the anchor root move, skipping it"),
                    }
                    *shared.latch_open.lock() = true;
                    shared.latch_cv.notify_all();
                } else {
                    let mut guard = shared.latch_open.lock();
                    while !*guard {
                        shared.latch_cv.wait(&mut guard);
                    }
                }

                loop {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    let index = shared.next_index.fetch_add(1, Ordering::Relaxed);
                    if index >= root_moves.len() {
                        break;
                    }
                    let mv = root_moves[index];
                    // Odd-numbered workers search one ply shallower: cheap
                    // search diversity across the Lazy-SMP worker pool.
                    let effective_depth = depth.saturating_sub((worker_id % 2) as u8).max(1);

                    let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                        search_one_root_move(
                            position,
                            mv,
                            effective_depth,
                            alpha,
                            beta,
                            tables,
                            config.quiescence_budget,
                            stop,
                            &mut killers,
                            &mut counters,
                            &shared.nodes,
                        )
                    }));

                    match outcome {
                        Ok(Some(score)) => publish_if_better(&shared, mv, score),
                        Ok(None) => {}
                        Err(_) => warn!("search worker panicked on a root move, skipping it"),
                    }
                }
            });
        }
    });

    let best_move = *shared.best_move.lock();
    let best_score = *shared.best_score.lock();
    RootSearchOutcome { best_move, score: best_score, nodes: shared.nodes.load(Ordering::Relaxed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_threaded_search_finds_a_legal_best_move() {
        let position = Position::starting_position();
        let config = SearchConfig { max_depth: 3, threads: 1, aspiration: false, ..SearchConfig::default() };
        let tables = SearchTables::new(&config);
        let stop = AtomicBool::new(false);

        let result = execute(&position, &config, &tables, &stop, None);
        let mv = result.best_move.expect("search should find a move from the opening position");
        assert!(position.legal_moves().contains(&mv));
        assert_eq!(result.iteration_stats.len(), 3);
    }

    #[test]
    fn reset_tables_clears_transposition_table() {
        let position = Position::starting_position();
        let config = SearchConfig { max_depth: 2, threads: 1, aspiration: false, ..SearchConfig::default() };
        let tables = SearchTables::new(&config);
        let stop = AtomicBool::new(false);

        execute(&position, &config, &tables, &stop, None);
        assert!(tables.tt.hit_rate() >= 0.0);
        tables.reset();
        assert_eq!(tables.tt.hit_rate(), 0.0);
    }

    #[test]
    fn no_legal_moves_returns_no_best_move() {
        let position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let config = SearchConfig { max_depth: 2, threads: 1, aspiration: false, ..SearchConfig::default() };
        let tables = SearchTables::new(&config);
        let stop = AtomicBool::new(false);

        let result = execute(&position, &config, &tables, &stop, None);
        assert!(result.best_move.is_none());
    }
}
