//! Lookup timing for the tree vs hash comparison.

use std::hint::black_box;
use std::time::Instant;

use wordindex_core::WordIndex;
use wordindex_search::{DualIndex, IndexKind, Query};

/// Average lookup cost of one query on both indexes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub tree_ns: f64,
    pub hash_ns: f64,
    pub repetitions: u32,
}

impl Timing {
    /// Tree time divided by hash time; `None` when the hash time rounds to zero.
    pub fn speedup(&self) -> Option<f64> {
        (self.hash_ns > 0.0).then(|| self.tree_ns / self.hash_ns)
    }
}

/// Time `repetitions` rounds of looking up every query word on each index.
pub fn time_query(index: &DualIndex, query: &Query, repetitions: u32) -> Timing {
    let repetitions = repetitions.max(1);
    Timing {
        tree_ns: average_ns(index.index(IndexKind::Tree), query, repetitions),
        hash_ns: average_ns(index.index(IndexKind::Hash), query, repetitions),
        repetitions,
    }
}

fn average_ns(index: &dyn WordIndex, query: &Query, repetitions: u32) -> f64 {
    let start = Instant::now();
    for _ in 0..repetitions {
        for word in query.words() {
            black_box(index.lookup(black_box(word)));
        }
    }
    start.elapsed().as_nanos() as f64 / f64::from(repetitions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordindex_core::DocumentId;

    #[test]
    fn test_speedup() {
        let timing = Timing {
            tree_ns: 300.0,
            hash_ns: 100.0,
            repetitions: 20,
        };
        assert_eq!(timing.speedup(), Some(3.0));

        let zero = Timing {
            hash_ns: 0.0,
            ..timing
        };
        assert_eq!(zero.speedup(), None);
    }

    #[test]
    fn test_time_query_reports_repetitions() {
        let mut index = DualIndex::new();
        index.ingest_text(&DocumentId::from("d1"), "the cat sat");
        let timing = time_query(&index, &Query::parse("cat sat"), 0);
        assert_eq!(timing.repetitions, 1);
        assert!(timing.tree_ns >= 0.0);
        assert!(timing.hash_ns >= 0.0);
    }
}
