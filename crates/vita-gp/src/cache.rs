use vita_core::Score;

/// One resident entry: the genome signature that produced it, its
/// fitness, a small diagnostic sketch (caller-defined, e.g. active
/// genome length), and how many times a lookup has hit this slot.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub signature: u128,
    pub fitness: Score,
    pub sketch: u32,
    pub hit_count: u64,
}

/// Fixed-capacity, power-of-two, open-addressed transposition table
/// keyed by a genome's 128-bit signature. The low `k` bits of the
/// signature select a slot directly — no probing chain, no resizing —
/// and the full signature disambiguates a collision. On collision the
/// newest write simply overwrites the slot; a cache is a performance
/// aid, never a correctness requirement, so losing an older entry to a
/// newer one is an acceptable, bounded cost.
pub struct TranspositionCache {
    slots: Vec<Option<CacheEntry>>,
    mask: u128,
}

impl TranspositionCache {
    /// `k` is the table's size exponent: `2^k` slots.
    pub fn new(k: u32) -> Self {
        let capacity = 1usize << k;
        TranspositionCache { slots: vec![None; capacity], mask: (capacity as u128) - 1 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn index_of(&self, signature: u128) -> usize {
        (signature & self.mask) as usize
    }

    /// Newest-write-wins: unconditionally overwrites whatever currently
    /// occupies the signature's slot.
    pub fn insert(&mut self, signature: u128, fitness: Score, sketch: u32) {
        let index = self.index_of(signature);
        self.slots[index] = Some(CacheEntry { signature, fitness, sketch, hit_count: 0 });
    }

    /// Returns the cached fitness only if the slot's full signature
    /// matches exactly (a colliding different genome is a miss, not a
    /// wrong answer). Bumps `hit_count` on a real hit.
    pub fn find(&mut self, signature: u128) -> Option<&Score> {
        let index = self.index_of(signature);
        match &mut self.slots[index] {
            Some(entry) if entry.signature == signature => {
                entry.hit_count += 1;
                Some(&entry.fitness)
            }
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Flat dump of occupied slots plus the table's size exponent, for
    /// round-trip persistence: `load` reconstructs an identical table
    /// from exactly this sequence.
    pub fn occupied(&self) -> impl Iterator<Item = &CacheEntry> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn size_exponent(&self) -> u32 {
        self.slots.len().trailing_zeros()
    }

    pub fn load(k: u32, entries: impl IntoIterator<Item = CacheEntry>) -> Self {
        let mut cache = Self::new(k);
        for entry in entries {
            let index = cache.index_of(entry.signature);
            cache.slots[index] = Some(entry);
        }
        cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_find_round_trips() {
        let mut cache = TranspositionCache::new(4);
        cache.insert(42, Score::from_vec(vec![1.0]), 3);
        assert_eq!(cache.find(42), Some(&Score::from_vec(vec![1.0])));
    }

    #[test]
    fn find_misses_a_colliding_different_signature() {
        let mut cache = TranspositionCache::new(2);
        let capacity = cache.capacity() as u128;
        cache.insert(1, Score::from_vec(vec![1.0]), 0);
        // shares the same low bits as 1 modulo a 4-slot table
        let colliding = 1 + capacity;
        assert_eq!(cache.find(colliding), None);
    }

    #[test]
    fn newest_write_wins_on_collision() {
        let mut cache = TranspositionCache::new(2);
        let capacity = cache.capacity() as u128;
        cache.insert(1, Score::from_vec(vec![1.0]), 0);
        cache.insert(1 + capacity, Score::from_vec(vec![2.0]), 0);
        assert_eq!(cache.find(1 + capacity), Some(&Score::from_vec(vec![2.0])));
        assert_eq!(cache.find(1), None);
    }

    #[test]
    fn clear_empties_every_slot() {
        let mut cache = TranspositionCache::new(3);
        cache.insert(7, Score::from_vec(vec![0.5]), 1);
        cache.clear();
        assert_eq!(cache.find(7), None);
    }

    #[test]
    fn load_reconstructs_from_a_flat_dump() {
        let mut cache = TranspositionCache::new(3);
        cache.insert(7, Score::from_vec(vec![0.5]), 1);
        let dumped: Vec<CacheEntry> = cache.occupied().cloned().collect();
        let mut reloaded = TranspositionCache::load(3, dumped);
        assert_eq!(reloaded.find(7), Some(&Score::from_vec(vec![0.5])));
    }
}
