use alloc::sync::Arc;

use crate::Axis;
use crate::dynlist::DynamicList;

/// Fallback uniform size used until an item has been measured.
pub const DEFAULT_ESTIMATED_ITEM_SIZE: u32 = 50;

/// A callback fired when an engine state update occurs.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&DynamicList, bool) + Send + Sync>;

/// Initial scroll offset configuration.
#[derive(Clone)]
pub enum InitialOffset {
    /// A fixed initial offset.
    Value(u64),
    /// A lazily evaluated initial offset provider (called by `DynamicList::new`).
    Provider(Arc<dyn Fn() -> u64 + Send + Sync>),
}

impl InitialOffset {
    pub(crate) fn resolve(&self) -> u64 {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialOffset {
    fn default() -> Self {
        Self::Value(0)
    }
}

impl core::fmt::Debug for InitialOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::DynamicList`].
///
/// Cheap to clone: the only heavy field (`on_change`) is stored in an `Arc`.
#[derive(Clone)]
pub struct DynamicListOptions {
    pub count: usize,

    /// Uniform size assumed for every item until it is measured.
    ///
    /// Must be positive; the whole approximate layout is built on this value.
    pub estimated_item_size: u32,

    /// Fixed uniform item size, as accepted by fixed-size list engines.
    ///
    /// This engine exists precisely because sizes are not fixed, so supplying
    /// one is a contract violation: debug builds reject it, release builds
    /// degrade by treating it as the estimate.
    pub item_size: Option<u32>,

    /// The scroll axis. The engine's math is axis-neutral; adapters use this
    /// to map offsets and scroll adjustments onto x/y.
    pub axis: Axis,

    /// The initial main-axis viewport size, when known at construction.
    pub initial_viewport_size: u32,

    /// Initial scroll offset.
    pub initial_offset: InitialOffset,

    /// Optional callback fired when the engine's state changes.
    ///
    /// The `is_scrolling` argument indicates whether a scroll is in progress.
    pub on_change: Option<OnChangeCallback>,

    /// Debounce window for re-renders triggered by non-first measurements.
    ///
    /// A burst of measurement reports (e.g. many images loading) re-arms a
    /// single deadline and collapses into one re-render.
    pub rerender_debounce_ms: u64,

    /// Debounced fallback duration for resetting `is_scrolling`.
    pub is_scrolling_reset_delay_ms: u64,
}

impl DynamicListOptions {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            estimated_item_size: DEFAULT_ESTIMATED_ITEM_SIZE,
            item_size: None,
            axis: Axis::Vertical,
            initial_viewport_size: 0,
            initial_offset: InitialOffset::default(),
            on_change: None,
            rerender_debounce_ms: 1,
            is_scrolling_reset_delay_ms: 150,
        }
    }

    pub fn with_estimated_item_size(mut self, estimated_item_size: u32) -> Self {
        self.estimated_item_size = estimated_item_size;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_initial_viewport_size(mut self, initial_viewport_size: u32) -> Self {
        self.initial_viewport_size = initial_viewport_size;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: InitialOffset) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn with_initial_offset_value(mut self, initial_offset: u64) -> Self {
        self.initial_offset = InitialOffset::Value(initial_offset);
        self
    }

    pub fn with_initial_offset_provider(
        mut self,
        initial_offset: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        self.initial_offset = InitialOffset::Provider(Arc::new(initial_offset));
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&DynamicList, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_rerender_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.rerender_debounce_ms = delay_ms;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }
}

impl core::fmt::Debug for DynamicListOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DynamicListOptions")
            .field("count", &self.count)
            .field("estimated_item_size", &self.estimated_item_size)
            .field("item_size", &self.item_size)
            .field("axis", &self.axis)
            .field("initial_viewport_size", &self.initial_viewport_size)
            .field("initial_offset", &self.initial_offset)
            .field("rerender_debounce_ms", &self.rerender_debounce_ms)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .finish_non_exhaustive()
    }
}
