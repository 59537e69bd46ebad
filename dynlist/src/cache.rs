#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type SizeMap = HashMap<usize, u32>;
#[cfg(not(feature = "std"))]
type SizeMap = BTreeMap<usize, u32>;

/// Sparse store of measured item sizes, keyed by index.
///
/// Indices that have never been measured fall back to the uniform estimate.
/// Last measurement wins; entries are never invalidated proactively. A stale
/// size is expected to be corrected by the next measurement of that item.
///
/// The running total and count of measured entries are tracked so the
/// estimated total extent stays O(1).
#[derive(Clone, Debug)]
pub(crate) struct SizeCache {
    sizes: SizeMap,
    estimate: u32,
    measured_total: u64,
}

impl SizeCache {
    pub(crate) fn new(estimate: u32) -> Self {
        Self {
            sizes: SizeMap::new(),
            estimate,
            measured_total: 0,
        }
    }

    pub(crate) fn estimate(&self) -> u32 {
        self.estimate
    }

    pub(crate) fn set_estimate(&mut self, estimate: u32) {
        self.estimate = estimate;
    }

    /// Measured size of `index`, or the estimate when unmeasured.
    pub(crate) fn size_of(&self, index: usize) -> u32 {
        self.sizes.get(&index).copied().unwrap_or(self.estimate)
    }

    pub(crate) fn measured_size(&self, index: usize) -> Option<u32> {
        self.sizes.get(&index).copied()
    }

    pub(crate) fn is_measured(&self, index: usize) -> bool {
        self.sizes.contains_key(&index)
    }

    pub(crate) fn insert(&mut self, index: usize, size: u32) {
        match self.sizes.insert(index, size) {
            Some(prev) => {
                self.measured_total = self
                    .measured_total
                    .saturating_sub(prev as u64)
                    .saturating_add(size as u64);
            }
            None => {
                self.measured_total = self.measured_total.saturating_add(size as u64);
            }
        }
    }

    /// Number of measured entries.
    pub(crate) fn measured_len(&self) -> usize {
        self.sizes.len()
    }

    /// Sum of all measured sizes.
    pub(crate) fn measured_total(&self) -> u64 {
        self.measured_total
    }

    /// Drops entries at or past `count` (the items no longer exist).
    pub(crate) fn prune_from(&mut self, count: usize) {
        let mut removed = 0u64;
        self.sizes.retain(|&index, &mut size| {
            if index < count {
                true
            } else {
                removed = removed.saturating_add(size as u64);
                false
            }
        });
        self.measured_total = self.measured_total.saturating_sub(removed);
    }

    pub(crate) fn clear(&mut self) {
        self.sizes.clear();
        self.measured_total = 0;
    }

    pub(crate) fn for_each(&self, mut f: impl FnMut(usize, u32)) {
        for (&index, &size) in self.sizes.iter() {
            f(index, size);
        }
    }
}
