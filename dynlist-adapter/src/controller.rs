use alloc::vec::Vec;

use dynlist::{Align, Axis, CommitAction, DynamicList, DynamicListOptions, ScrollDirection, WindowRange};

use crate::{ItemPlacement, for_each_placement};

/// What the host's scroll element must do after a commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostAction {
    None,
    /// Scroll relatively by `(x, y)`; hosts without a relative scroll
    /// primitive should assign `fallback_offset` on the scroll axis instead.
    ScrollBy {
        x: i64,
        y: i64,
        fallback_offset: u64,
    },
    /// Repaint the window without moving the scroll position.
    Rerender,
}

/// A framework-neutral controller that wraps a [`DynamicList`] and provides
/// the common adapter workflow.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_viewport_size` when UI events occur
/// - `render_window` once per layout pass, painting the returned range
/// - `on_item_measured` when the measurement mechanism reports a real size
/// - `commit` after each paint, applying the returned [`HostAction`]
/// - `tick(now_ms)` each frame/timer tick (debounced re-renders and
///   `is_scrolling` resets)
///
/// Dropping the controller drops the engine and with it the single debounce
/// slot, so no re-render can fire against a torn-down instance.
#[derive(Clone, Debug)]
pub struct Controller {
    list: DynamicList,
    overscan: usize,
}

impl Controller {
    pub fn new(options: DynamicListOptions) -> Self {
        Self {
            list: DynamicList::new(options),
            overscan: 1,
        }
    }

    pub fn from_list(list: DynamicList) -> Self {
        Self { list, overscan: 1 }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    pub fn list(&self) -> &DynamicList {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut DynamicList {
        &mut self.list
    }

    pub fn into_list(self) -> DynamicList {
        self.list
    }

    pub fn on_viewport_size(&mut self, viewport_main: u32) {
        self.list.set_viewport_size(viewport_main);
    }

    /// Call this when the UI reports a scroll offset change (e.g. wheel/drag).
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.list.apply_scroll_offset_event(scroll_offset, now_ms);
    }

    /// Resolves the window for the current scroll state and extends it by the
    /// configured overscan on both ends.
    ///
    /// The scroll direction comes from the host: the engine's anchor walk is
    /// directional and deliberately does not infer it.
    pub fn render_window(&mut self, direction: ScrollDirection) -> Option<WindowRange> {
        let offset = self.list.scroll_offset();
        let viewport = self.list.viewport_size();
        let window = self.list.resolve_window(offset, viewport, direction)?;
        Some(self.overscanned(window))
    }

    fn overscanned(&self, window: WindowRange) -> WindowRange {
        let last = self.list.count() - 1;
        WindowRange {
            start_index: window.start_index.saturating_sub(self.overscan),
            stop_index: window.stop_index.saturating_add(self.overscan).min(last),
        }
    }

    /// Forwards a measurement report to the engine.
    pub fn on_item_measured(
        &mut self,
        index: usize,
        size: u32,
        is_first_measurement: bool,
        now_ms: u64,
    ) {
        self.list
            .report_measurement(index, size, is_first_measurement, now_ms);
    }

    /// Runs the engine's render-commit step and maps the outcome onto the
    /// host's scroll axes.
    #[must_use]
    pub fn commit(&mut self) -> HostAction {
        match self.list.commit() {
            CommitAction::None => HostAction::None,
            CommitAction::AdjustScroll { by, offset } => {
                let (x, y) = match self.list.axis() {
                    Axis::Vertical => (0, by),
                    Axis::Horizontal => (by, 0),
                };
                HostAction::ScrollBy {
                    x,
                    y,
                    fallback_offset: offset,
                }
            }
            CommitAction::Rerender => HostAction::Rerender,
        }
    }

    /// Advances the controller's timers.
    ///
    /// Returns `true` when a debounced re-render fired and the host should
    /// repaint.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let rerender = self.list.update_rerender(now_ms);
        self.list.update_scrolling(now_ms);
        rerender
    }

    /// Computes and applies a scroll-to-item immediately.
    ///
    /// Returns the (estimate-based) target offset.
    pub fn scroll_to_item(&mut self, index: usize, align: Align, now_ms: u64) -> u64 {
        let target = self.list.scroll_to_index(index, align);
        self.list.notify_scroll_event(now_ms);
        target
    }

    /// Collects placements for `window` into `out` (clears `out` first).
    pub fn placements_into(&self, window: WindowRange, out: &mut Vec<ItemPlacement>) {
        out.clear();
        for_each_placement(&self.list, window, |placement| out.push(placement));
    }
}
