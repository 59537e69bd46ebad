use crate::ScrollDirection;
use crate::cache::SizeCache;

/// The single reference point used to convert between scroll offsets and item
/// indices without rescanning from index 0.
///
/// `pending_size_delta` is the signed, not-yet-applied net scroll correction
/// accumulated while the walk crosses items whose measured size differs from
/// the estimate. It is consumed exactly once, at render commit; consuming it
/// twice or dropping it would visibly shift the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AnchorState {
    pub(crate) index: usize,
    pub(crate) pending_size_delta: i64,
}

impl AnchorState {
    /// Estimate-based offset of the anchor item.
    ///
    /// The anchor is deliberately positioned on the uniform grid: real sizes
    /// only enter offset math for items between the anchor and the walked stop
    /// index, and the grid error is what `pending_size_delta` compensates for.
    pub(crate) fn offset(&self, estimate: u32) -> u64 {
        self.index as u64 * estimate as u64
    }

    /// Consumes the pending correction, leaving a net of zero behind.
    pub(crate) fn take_pending_delta(&mut self) -> i64 {
        core::mem::take(&mut self.pending_size_delta)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Moves the anchor to the item containing `target_offset`, walking in the
    /// given direction and accumulating size corrections along the way.
    ///
    /// Cost is proportional to the distance scrolled since the last
    /// resolution, not to the collection size. The walk never steps past index
    /// 0 or `count - 1`, so an over-scrolled target lands on the boundary item
    /// without accumulating a runaway correction.
    ///
    /// Returns the new anchor index.
    pub(crate) fn resolve_index_for_offset(
        &mut self,
        cache: &SizeCache,
        count: usize,
        target_offset: u64,
        direction: ScrollDirection,
    ) -> usize {
        if count == 0 {
            self.index = 0;
            return 0;
        }
        // The anchor may be stale after a count shrink.
        self.index = self.index.min(count - 1);

        let estimate = cache.estimate() as i64;
        let mut delta = target_offset as i64 - self.offset(cache.estimate()) as i64;

        match direction {
            ScrollDirection::Backward => {
                while delta < 0 && self.index > 0 {
                    self.index -= 1;
                    let size = cache.size_of(self.index) as i64;
                    self.pending_size_delta -= estimate - size;
                    delta += size;
                }
            }
            ScrollDirection::Forward => {
                // `>=` so an offset landing exactly on an item's leading edge
                // resolves to that item, not the one ending there.
                while delta >= cache.size_of(self.index) as i64 && self.index + 1 < count {
                    let size = cache.size_of(self.index) as i64;
                    self.pending_size_delta += estimate - size;
                    delta -= size;
                    self.index += 1;
                }
            }
        }

        self.index
    }
}
