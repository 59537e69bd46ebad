/// Alignment for explicit scroll-to-index requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// The scroll axis of the list.
///
/// The engine itself only works with main-axis offsets and sizes; the axis is
/// carried in the options so adapters can map offsets onto x/y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Last known scroll direction, provided by the host per layout pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The index range currently selected for rendering.
///
/// `stop_index` is inclusive: `start_index <= stop_index < count`. The range is
/// recomputed per layout pass via [`crate::DynamicList::resolve_window`] and is
/// not meant to be persisted across passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub stop_index: usize, // inclusive
}

impl WindowRange {
    /// Number of items in the range.
    pub fn count(&self) -> usize {
        self.stop_index.saturating_sub(self.start_index) + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index <= self.stop_index
    }
}

/// Offset and size of a single item, derived on demand.
///
/// Offsets inside the most recently resolved window are reconciled against
/// measured sizes; offsets outside it are estimate-based approximations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetadata {
    /// Start offset in the scroll axis.
    pub offset: u64,
    /// Size in the scroll axis (measured, or the estimate).
    pub size: u32,
}

impl ItemMetadata {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// What the host must do after a render commit.
///
/// Returned by [`crate::DynamicList::commit`], once per render-commit cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommitAction {
    /// Nothing to do: no pending correction and no new measurements.
    None,
    /// Move the live scroll position by `by`.
    ///
    /// Prefer a relative scroll primitive (it composes with a smooth scroll
    /// already in flight); hosts without one should assign `offset` absolutely.
    AdjustScroll { by: i64, offset: u64 },
    /// Sizes changed this cycle but the corrections cancelled out; repaint
    /// without moving the scroll position.
    Rerender,
}
