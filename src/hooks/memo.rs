use std::rc::Rc;

/// Hit/miss counters for a memo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Single-slot memo: recomputes only when the key changes and otherwise
/// hands back the same `Rc`, so consumers can compare by pointer.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, Rc<V>)>,
    stats: MemoStats,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            stats: MemoStats::default(),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> Rc<V> {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                self.stats.hits += 1;
                return Rc::clone(value);
            }
        }
        self.stats.misses += 1;
        let value = Rc::new(compute());
        self.slot = Some((key, Rc::clone(&value)));
        value
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
