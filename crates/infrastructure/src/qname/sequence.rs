use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the monotonically increasing numbers behind `$uniq`.
///
/// Injected into the counter component instead of living in a global, so
/// the caller decides who shares a sequence. Implementations that are not
/// atomic must only be driven by a single writer.
pub trait SequenceSource: Send + Sync {
    /// Returns the next value; the first call returns 1.
    fn next_value(&self) -> u64;
}

#[derive(Debug, Default)]
pub struct AtomicSequence {
    current: AtomicU64,
}

impl AtomicSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next call to `next_value` returns `start + 1`.
    pub fn starting_after(start: u64) -> Self {
        Self {
            current: AtomicU64::new(start),
        }
    }
}

impl SequenceSource for AtomicSequence {
    fn next_value(&self) -> u64 {
        self.current.fetch_add(1, Ordering::Relaxed) + 1
    }
}
