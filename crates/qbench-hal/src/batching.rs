//! Splitting circuit workloads into backend-sized batches.
//!
//! Batches carry their circuit keys alongside the circuits, in the same
//! order. Together with the order-preserving `retrieve()` contract this is
//! the only mechanism pairing histograms back to the circuits that produced
//! them.

use qbench_ir::Circuit;

/// A batch of circuits ready for one `submit()` call, with the keys
/// identifying each circuit.
///
/// `keys[i]` describes `circuits[i]`.
#[derive(Debug, Clone)]
pub struct Batch<K> {
    /// Keys identifying the circuits, in circuit order.
    pub keys: Vec<K>,
    /// Circuits, in submission order.
    pub circuits: Vec<Circuit>,
}

impl<K> Batch<K> {
    /// Number of circuits in the batch.
    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    /// Check whether the batch holds no circuits.
    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }
}

/// Split keyed circuits into batches of at most `max_batch_size` circuits.
///
/// `None` produces a single batch holding everything. A limit of zero is
/// treated as one.
pub fn batch_circuits_with_keys<K>(
    items: impl IntoIterator<Item = (K, Circuit)>,
    max_batch_size: Option<usize>,
) -> Vec<Batch<K>> {
    let items: Vec<(K, Circuit)> = items.into_iter().collect();
    match max_batch_size {
        None => {
            let (keys, circuits) = items.into_iter().unzip();
            vec![Batch { keys, circuits }]
        }
        Some(size) => {
            let size = size.max(1);
            let mut batches = Vec::new();
            let mut iter = items.into_iter().peekable();
            while iter.peek().is_some() {
                let (keys, circuits) = iter.by_ref().take(size).unzip();
                batches.push(Batch { keys, circuits });
            }
            batches
        }
    }
}
