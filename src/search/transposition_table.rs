//! Striped, open-addressed transposition table.
//!
//! Grounded on the donor's `TranspositionTable` (`agent/ai/transposition_table.rs`):
//! same `NodeType`/entry shape and `probe`/`store`/`clear`/`hit_rate` surface, but the
//! donor backed its table with a plain `HashMap` behind one lock. A single lock
//! serializes every probe from every worker thread, which defeats the point of
//! Lazy SMP. This table stripes the lock instead: `STRIPES` independent `RwLock`s
//! each guard a slice of the underlying slot array, so workers hashing into
//! different stripes never contend.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::game_repr::Move;

/// Fixed stripe-lock pool size, independent of table capacity.
const STRIPES: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Debug, Clone, Copy)]
pub struct TranspositionTableEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub best_move: Option<Move>,
    pub node_type: NodeType,
    pub age: u32,
}

struct Stripe {
    slots: RwLock<Vec<Option<TranspositionTableEntry>>>,
}

enum Victim {
    Primary,
    Secondary,
}

pub struct TranspositionTable {
    stripes: Vec<Stripe>,
    /// Total slot count, a power of two.
    capacity: usize,
    /// Slots per stripe, also a power of two (`capacity / stripes.len()`).
    stripe_slots: usize,
    generation: AtomicU32,
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

const ENTRY_BYTES: usize = std::mem::size_of::<Option<TranspositionTableEntry>>();

impl TranspositionTable {
    /// Default size matching the donor's "about 1M entries" default table.
    pub fn new() -> Self {
        Self::with_capacity(1 << 20)
    }

    pub fn with_capacity_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entries = (bytes / ENTRY_BYTES).max(STRIPES);
        Self::with_capacity(entries.next_power_of_two())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.next_power_of_two().max(STRIPES);
        let stripe_count = STRIPES.min(capacity);
        let stripe_slots = capacity / stripe_count;
        let stripes = (0..stripe_count)
            .map(|_| Stripe { slots: RwLock::new(vec![None; stripe_slots]) })
            .collect();
        Self {
            stripes,
            capacity,
            stripe_slots,
            generation: AtomicU32::new(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            stores: AtomicU64::new(0),
        }
    }

    fn mask(&self) -> u64 {
        (self.capacity - 1) as u64
    }

    /// Splits a global slot index into (stripe index, offset within that stripe),
    /// interleaving stripes across the index space rather than partitioning it
    /// into contiguous runs, so that primary/secondary probes for the same hash
    /// (which differ in high bits) tend to land on different stripes.
    fn locate(&self, global_index: usize) -> (usize, usize) {
        let stripe_count = self.stripes.len();
        (global_index % stripe_count, global_index / stripe_count)
    }

    fn primary_secondary(&self, hash: u64) -> (usize, usize) {
        let primary = (hash & self.mask()) as usize;
        let secondary = (primary ^ ((hash >> 32) as usize)) & (self.capacity - 1);
        (primary, secondary)
    }

    pub fn generation(&self) -> u32 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Bumps the generation counter. Called once per root search; age zero is
    /// reserved to mean "never touched", so generations start at 1.
    pub fn increment_age(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    /// Probing a hit refreshes the entry's age to the current generation, so
    /// a frequently-probed entry from an older search keeps the replacement
    /// protection `choose_victim`'s age tiebreak is meant to give it.
    pub fn probe(&self, hash: u64) -> Option<TranspositionTableEntry> {
        let (primary, secondary) = self.primary_secondary(hash);
        let generation = self.generation.load(Ordering::Relaxed);
        for slot in [primary, secondary] {
            let (stripe, offset) = self.locate(slot);
            let mut guard = self.stripes[stripe].slots.write();
            if let Some(entry) = guard[offset].as_mut() {
                if entry.hash == hash {
                    entry.age = generation;
                    let entry = *entry;
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry);
                }
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Chooses which of the two existing candidate slots an incoming entry
    /// should overwrite; the new entry is always stored somewhere, never
    /// dropped. A slot already holding `hash` is always reused in place
    /// (so a deepened re-search of the same position updates it instead of
    /// being treated as a generic collision); otherwise: prefer an empty
    /// slot, then the slot with the shallower search, then the slot NOT
    /// holding an Exact entry, then the slot with the older generation.
    fn choose_victim(
        hash: u64,
        primary: Option<TranspositionTableEntry>,
        secondary: Option<TranspositionTableEntry>,
    ) -> Victim {
        if primary.is_some_and(|e| e.hash == hash) {
            return Victim::Primary;
        }
        if secondary.is_some_and(|e| e.hash == hash) {
            return Victim::Secondary;
        }
        match (primary, secondary) {
            (None, _) => Victim::Primary,
            (Some(_), None) => Victim::Secondary,
            (Some(p), Some(s)) => {
                if p.depth != s.depth {
                    return if p.depth < s.depth { Victim::Primary } else { Victim::Secondary };
                }
                if p.node_type != s.node_type {
                    return if s.node_type == NodeType::Exact { Victim::Primary } else { Victim::Secondary };
                }
                if p.age != s.age {
                    return if p.age < s.age { Victim::Primary } else { Victim::Secondary };
                }
                Victim::Primary
            }
        }
    }

    pub fn store(&self, entry: TranspositionTableEntry) {
        self.stores.fetch_add(1, Ordering::Relaxed);
        let (primary, secondary) = self.primary_secondary(entry.hash);
        let (p_stripe, p_offset) = self.locate(primary);
        let (s_stripe, s_offset) = self.locate(secondary);

        if p_stripe == s_stripe {
            let mut guard = self.stripes[p_stripe].slots.write();
            match Self::choose_victim(entry.hash, guard[p_offset], guard[s_offset]) {
                Victim::Primary => guard[p_offset] = Some(entry),
                Victim::Secondary => guard[s_offset] = Some(entry),
            }
            return;
        }

        let existing_primary = self.stripes[p_stripe].slots.read()[p_offset];
        let existing_secondary = self.stripes[s_stripe].slots.read()[s_offset];
        match Self::choose_victim(entry.hash, existing_primary, existing_secondary) {
            Victim::Primary => self.stripes[p_stripe].slots.write()[p_offset] = Some(entry),
            Victim::Secondary => self.stripes[s_stripe].slots.write()[s_offset] = Some(entry),
        }
    }

    pub fn clear(&self) {
        for stripe in &self.stripes {
            let mut guard = stripe.slots.write();
            guard.iter_mut().for_each(|slot| *slot = None);
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.stores.store(0, Ordering::Relaxed);
        self.generation.store(1, Ordering::Relaxed);
    }

    pub fn size(&self) -> usize {
        self.capacity
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

    pub fn memory_usage(&self) -> usize {
        self.capacity * ENTRY_BYTES
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_after_store_round_trips() {
        let tt = TranspositionTable::with_capacity(1 << 12);
        let entry = TranspositionTableEntry {
            hash: 0xdead_beef,
            depth: 4,
            score: 123,
            best_move: None,
            node_type: NodeType::Exact,
            age: tt.generation(),
        };
        tt.store(entry);
        let probed = tt.probe(0xdead_beef).expect("entry should be present");
        assert_eq!(probed.score, 123);
        assert_eq!(probed.depth, 4);
    }

    #[test]
    fn clear_resets_hit_rate_and_empties_slots() {
        let tt = TranspositionTable::with_capacity(1 << 8);
        tt.store(TranspositionTableEntry {
            hash: 7,
            depth: 1,
            score: 0,
            best_move: None,
            node_type: NodeType::Exact,
            age: tt.generation(),
        });
        assert!(tt.probe(7).is_some());
        tt.clear();
        assert!(tt.probe(7).is_none());
        assert_eq!(tt.hit_rate(), 0.0);
    }

    #[test]
    fn deeper_entry_replaces_shallower_one_at_same_slot() {
        let tt = TranspositionTable::with_capacity(STRIPES);
        let shallow = TranspositionTableEntry {
            hash: 1,
            depth: 2,
            score: 10,
            best_move: None,
            node_type: NodeType::Exact,
            age: tt.generation(),
        };
        tt.store(shallow);
        let deep = TranspositionTableEntry { depth: 6, score: 20, ..shallow };
        tt.store(deep);
        let probed = tt.probe(1).unwrap();
        assert_eq!(probed.depth, 6);
        assert_eq!(probed.score, 20);
    }
}
