//! Bounded cache of `(zobrist, depth) -> score`, sitting in front of the
//! evaluator family so that repeated static evaluations of the same position
//! at the same depth (common once move ordering starts re-probing siblings)
//! skip straight to a cached centipawn score.
//!
//! New module — the donor has no equivalent, since its single-threaded search
//! never revisited the same leaf often enough to be worth caching. Styled
//! after [`crate::search::transposition_table::TranspositionTable`]'s
//! stats/probe/store surface for consistency, but a plain locked `HashMap`
//! is adequate here: eviction need not be precise, and we do not need the
//! transposition table's two-slot open addressing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

const DEFAULT_MAX_ENTRIES: usize = 1_000_000;

pub struct EvalCache {
    table: RwLock<HashMap<(u64, u8), i32>>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EvalCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn probe(&self, hash: u64, depth: u8) -> Option<i32> {
        let table = self.table.read();
        match table.get(&(hash, depth)) {
            Some(&score) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(score)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Inserts a score, evicting roughly half the cache (no LRU ordering kept)
    /// once it's full.
    pub fn store(&self, hash: u64, depth: u8, score: i32) {
        let mut table = self.table.write();
        if table.len() >= self.max_entries {
            let remove_count = table.len() / 2;
            let victims: Vec<(u64, u8)> = table.keys().take(remove_count).copied().collect();
            for key in victims {
                table.remove(&key);
            }
        }
        table.insert((hash, depth), score);
    }

    pub fn clear(&self) {
        self.table.write().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        if hits + misses == 0.0 {
            0.0
        } else {
            hits / (hits + misses)
        }
    }
}

impl Default for EvalCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_probes_by_hash_and_depth() {
        let cache = EvalCache::new(16);
        cache.store(42, 3, 100);
        assert_eq!(cache.probe(42, 3), Some(100));
        assert_eq!(cache.probe(42, 4), None);
    }

    #[test]
    fn evicts_roughly_half_when_full() {
        let cache = EvalCache::new(4);
        for i in 0..4u64 {
            cache.store(i, 0, i as i32);
        }
        assert_eq!(cache.len(), 4);
        cache.store(100, 0, 100);
        assert!(cache.len() <= 3);
    }
}
