//! Construction-time configuration.

/// Configuration for a [`TreeMap`](crate::TreeMap).
#[derive(Debug, Clone, Default)]
pub struct TreeConfig {
    /// Number of entries to reserve arena space for up front.
    pub initial_capacity: usize,
}

impl TreeConfig {
    /// Configuration reserving room for `initial_capacity` entries.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Arena slots needed to hold `initial_capacity` entries.
    ///
    /// A tree of `n` live nodes always has `n + 1` sentinel leaves.
    pub(crate) fn arena_slots(&self) -> usize {
        self.initial_capacity
            .saturating_mul(2)
            .saturating_add(1)
    }
}
