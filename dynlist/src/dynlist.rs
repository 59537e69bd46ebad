use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::anchor::AnchorState;
use crate::cache::SizeCache;
use crate::{
    Align, Axis, CommitAction, DynamicListOptions, InitialOffset, ItemMetadata, ScrollDirection,
    WindowRange,
};

/// A headless windowing engine for dynamically sized lists.
///
/// The engine reconciles three moving targets: an approximate layout built from
/// a uniform size estimate, a sparse cache of measured sizes that fills in out
/// of order as items are painted, and the live scroll position, which must not
/// visibly jump when an estimate turns out to be wrong.
///
/// It is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by providing scroll offsets, viewport geometry,
///   scroll direction, and measured sizes.
/// - Scroll compensation is surfaced as a [`CommitAction`] the host applies to
///   its real scroll element once per render-commit cycle.
///
/// All operations are synchronous; time enters only as explicit `now_ms`
/// arguments, so the debounce machinery is driven by the host's tick.
#[derive(Clone, Debug)]
pub struct DynamicList {
    options: DynamicListOptions,
    viewport_size: u32,
    scroll_offset: u64,
    scroll_direction: Option<ScrollDirection>,
    is_scrolling: bool,
    last_scroll_event_ms: Option<u64>,

    cache: SizeCache,
    anchor: AnchorState,
    /// Last index of the most recently resolved window; offsets for indices in
    /// `(anchor, stop]` are reconciled against measured sizes.
    stop_index: usize,

    /// A first-paint measurement arrived since the last commit.
    has_new_measurements: bool,
    /// Single-slot debounce deadline for re-renders caused by re-measurements.
    scheduled_rerender_deadline_ms: Option<u64>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

/// Resolves the estimate this engine actually uses.
///
/// A fixed `item_size` is a configuration error for this engine; debug builds
/// fail hard, release builds degrade to using it as the estimate.
fn effective_estimate(options: &DynamicListOptions) -> u32 {
    debug_assert!(
        options.item_size.is_none(),
        "DynamicList does not accept a fixed item_size; configure estimated_item_size instead"
    );
    debug_assert!(
        options.estimated_item_size > 0,
        "estimated_item_size must be positive"
    );
    options
        .item_size
        .unwrap_or(options.estimated_item_size)
        .max(1)
}

impl DynamicList {
    /// Creates a new engine from options.
    ///
    /// `options.initial_viewport_size` and `options.initial_offset` are applied
    /// immediately.
    pub fn new(options: DynamicListOptions) -> Self {
        let estimate = effective_estimate(&options);
        let scroll_offset = options.initial_offset.resolve();
        ddebug!(count = options.count, estimate, "DynamicList::new");
        Self {
            viewport_size: options.initial_viewport_size,
            scroll_offset,
            scroll_direction: None,
            is_scrolling: false,
            last_scroll_event_ms: None,
            cache: SizeCache::new(estimate),
            anchor: AnchorState::default(),
            stop_index: 0,
            has_new_measurements: false,
            scheduled_rerender_deadline_ms: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &DynamicListOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: DynamicListOptions) {
        let prev_count = self.options.count;
        self.options = options;
        dtrace!(count = self.options.count, "set_options");
        self.cache.set_estimate(effective_estimate(&self.options));
        if self.options.count < prev_count {
            self.apply_count_shrink();
        }
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut DynamicListOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&DynamicList, bool) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as _);
        self.notify();
    }

    pub fn set_initial_offset(&mut self, initial_offset: u64) {
        self.options.initial_offset = InitialOffset::Value(initial_offset);
        self.notify();
    }

    pub fn set_rerender_debounce_ms(&mut self, delay_ms: u64) {
        self.options.rerender_debounce_ms = delay_ms;
        self.notify();
    }

    pub fn set_is_scrolling_reset_delay_ms(&mut self, delay_ms: u64) {
        self.options.is_scrolling_reset_delay_ms = delay_ms;
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    ///
    /// On a typical frame an adapter updates the viewport, the scroll offset,
    /// and the scrolling state together; without batching each setter would
    /// fire `on_change` separately. Nested batches coalesce into the outermost
    /// one, which also keeps a measurement report arriving from inside commit
    /// handling from re-entering the notification path.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn count(&self) -> usize {
        self.options.count
    }

    pub fn set_count(&mut self, count: usize) {
        if self.options.count == count {
            return;
        }
        let shrunk = count < self.options.count;
        self.options.count = count;
        if shrunk {
            self.apply_count_shrink();
        }
        self.notify();
    }

    fn apply_count_shrink(&mut self) {
        let count = self.options.count;
        self.cache.prune_from(count);
        if count == 0 {
            self.anchor.index = 0;
            self.stop_index = 0;
        } else {
            self.anchor.index = self.anchor.index.min(count - 1);
            self.stop_index = self.stop_index.min(count - 1);
        }
    }

    /// The estimate in effect (normally `options.estimated_item_size`).
    pub fn estimated_item_size(&self) -> u32 {
        self.cache.estimate()
    }

    pub fn set_estimated_item_size(&mut self, estimated_item_size: u32) {
        self.options.estimated_item_size = estimated_item_size;
        self.cache.set_estimate(effective_estimate(&self.options));
        self.notify();
    }

    pub fn axis(&self) -> Axis {
        self.options.axis
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        if self.viewport_size == size {
            return;
        }
        self.viewport_size = size;
        self.notify();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.notify();
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = self.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies a scroll offset update from your UI layer (e.g. wheel/drag),
    /// and marks the engine as scrolling.
    pub fn apply_scroll_offset_event(&mut self, offset: u64, now_ms: u64) {
        dtrace!(offset, now_ms, "apply_scroll_offset_event");
        self.batch_update(|v| {
            v.set_scroll_offset(offset);
            v.notify_scroll_event(now_ms);
        });
    }

    /// Same as `apply_scroll_offset_event`, but clamps the offset.
    pub fn apply_scroll_offset_event_clamped(&mut self, offset: u64, now_ms: u64) {
        dtrace!(offset, now_ms, "apply_scroll_offset_event_clamped");
        self.batch_update(|v| {
            v.set_scroll_offset_clamped(offset);
            v.notify_scroll_event(now_ms);
        });
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// The direction most recently passed to [`Self::resolve_window`].
    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.last_scroll_event_ms = None;
        }
        self.notify();
    }

    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Resets `is_scrolling` once no scroll event has arrived for
    /// `is_scrolling_reset_delay_ms`. Call from the host's tick.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    /// The index currently used as the zero-reference for offset math.
    pub fn anchor_index(&self) -> usize {
        self.anchor.index
    }

    /// The signed scroll correction accumulated but not yet applied.
    ///
    /// Consumed by [`Self::commit`]; it must reach the live scroll position
    /// exactly once.
    pub fn pending_size_delta(&self) -> i64 {
        self.anchor.pending_size_delta
    }

    /// The sole write path into the size cache.
    ///
    /// Reports may arrive in any index order (items mount, unmount and
    /// remount as the window moves), so all state here is keyed by index.
    /// Repeated identical reports are no-ops. A first measurement (initial
    /// paint of an item) raises the synchronous re-render flag consumed by
    /// [`Self::commit`]; a re-measurement re-arms the debounce deadline so a
    /// burst of reports collapses into one re-render.
    pub fn report_measurement(
        &mut self,
        index: usize,
        size: u32,
        is_first_measurement: bool,
        now_ms: u64,
    ) {
        if index >= self.options.count {
            return;
        }
        if size == 0 {
            debug_assert!(size > 0, "measured size must be positive (index={index})");
            return;
        }
        if self.cache.measured_size(index) == Some(size) {
            return;
        }
        dtrace!(index, size, is_first_measurement, "report_measurement");
        self.cache.insert(index, size);
        if is_first_measurement {
            self.has_new_measurements = true;
        } else {
            self.schedule_rerender(now_ms);
        }
    }

    fn schedule_rerender(&mut self, now_ms: u64) {
        // Single slot, re-armed on every report.
        self.scheduled_rerender_deadline_ms =
            Some(now_ms.saturating_add(self.options.rerender_debounce_ms));
    }

    /// Fires the debounced re-render once its deadline has passed.
    ///
    /// Returns `true` (and triggers `on_change`) at most once per armed
    /// deadline. Call from the host's tick.
    pub fn update_rerender(&mut self, now_ms: u64) -> bool {
        let Some(deadline) = self.scheduled_rerender_deadline_ms else {
            return false;
        };
        if now_ms < deadline {
            return false;
        }
        self.scheduled_rerender_deadline_ms = None;
        self.notify();
        true
    }

    /// Cancels any scheduled debounced re-render.
    ///
    /// The deadline lives in a single slot owned by this instance and is
    /// dropped with it. Call this when tearing down early so a still-running
    /// host tick does not fire against a dead list.
    pub fn cancel_scheduled_rerender(&mut self) {
        self.scheduled_rerender_deadline_ms = None;
    }

    pub fn scheduled_rerender_deadline(&self) -> Option<u64> {
        self.scheduled_rerender_deadline_ms
    }

    /// Applies the outcome of a render commit, once per commit cycle.
    ///
    /// Consumes the pending size correction and folds it into the engine's
    /// scroll offset; the returned action tells the host how to mirror that on
    /// its real scroll element. When sizes changed but the corrections
    /// cancelled out, the host still needs to repaint.
    #[must_use]
    pub fn commit(&mut self) -> CommitAction {
        let delta = self.anchor.take_pending_delta();
        let had_new_measurements = core::mem::take(&mut self.has_new_measurements);

        if delta != 0 {
            if delta > 0 {
                self.scroll_offset = self.scroll_offset.saturating_add(delta as u64);
            } else {
                self.scroll_offset = self.scroll_offset.saturating_sub((-delta) as u64);
            }
            dtrace!(delta, offset = self.scroll_offset, "commit: adjust scroll");
            self.notify();
            return CommitAction::AdjustScroll {
                by: delta,
                offset: self.scroll_offset,
            };
        }

        if had_new_measurements {
            self.notify();
            return CommitAction::Rerender;
        }

        CommitAction::None
    }

    /// Resolves the window of items to render for one layout pass.
    ///
    /// Stores the scroll state, re-anchors on the item containing
    /// `scroll_offset` (walking from the previous anchor in `direction`), then
    /// advances the stop index until the accumulated leading edge leaves the
    /// viewport. Returns `None` when the list is empty.
    pub fn resolve_window(
        &mut self,
        scroll_offset: u64,
        viewport_size: u32,
        direction: ScrollDirection,
    ) -> Option<WindowRange> {
        self.viewport_size = viewport_size;
        self.scroll_offset = scroll_offset;
        self.scroll_direction = Some(direction);

        let count = self.options.count;
        if count == 0 {
            self.stop_index = 0;
            return None;
        }

        let start =
            self.anchor
                .resolve_index_for_offset(&self.cache, count, scroll_offset, direction);
        let stop = self.resolve_stop_index(start, scroll_offset, viewport_size);
        self.stop_index = stop;
        dtrace!(start, stop, scroll_offset, "resolve_window");
        Some(WindowRange {
            start_index: start,
            stop_index: stop,
        })
    }

    fn resolve_stop_index(&self, start_index: usize, scroll_offset: u64, viewport_size: u32) -> usize {
        let count = self.options.count;
        let max_offset = scroll_offset.saturating_add(viewport_size as u64);

        let mut offset = self.metadata_of(start_index).end();
        let mut stop = start_index;
        while stop + 1 < count && offset < max_offset {
            stop += 1;
            offset = offset.saturating_add(self.cache.size_of(stop) as u64);
        }
        stop
    }

    /// Offset and size of `index`, without side effects.
    ///
    /// Within the most recently resolved window the offset accumulates
    /// measured (or estimated) sizes from the anchor; outside it the offset is
    /// the estimate-based approximation `index * estimate`, which has not been
    /// reconciled yet. Returns `None` for an out-of-range index.
    pub fn item_metadata(&self, index: usize) -> Option<ItemMetadata> {
        if index >= self.options.count {
            return None;
        }
        Some(self.metadata_of(index))
    }

    fn metadata_of(&self, index: usize) -> ItemMetadata {
        let estimate = self.cache.estimate();
        let size = self.cache.size_of(index);
        let anchor = self.anchor.index;

        if index > anchor && index <= self.stop_index {
            let mut offset = self.anchor.offset(estimate);
            for i in anchor..index {
                offset = offset.saturating_add(self.cache.size_of(i) as u64);
            }
            ItemMetadata { offset, size }
        } else {
            ItemMetadata {
                offset: index as u64 * estimate as u64,
                size,
            }
        }
    }

    /// Measured size of `index`, or the estimate when unmeasured.
    pub fn item_size(&self, index: usize) -> Option<u32> {
        (index < self.options.count).then(|| self.cache.size_of(index))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.cache.is_measured(index)
    }

    /// Number of items with a measured size.
    pub fn measurement_count(&self) -> usize {
        self.cache.measured_len()
    }

    /// A continuously revised approximation of the total scrollable extent:
    /// the sum of measured sizes plus the estimate for everything unmeasured.
    ///
    /// Exact once every item has been measured.
    pub fn estimated_total_extent(&self) -> u64 {
        let count = self.options.count;
        let known = self.cache.measured_len().min(count);
        let rest = (count - known) as u64 * self.cache.estimate() as u64;
        self.cache.measured_total().saturating_add(rest)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.estimated_total_extent()
            .saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// Programmatically scrolls to an item and returns the target offset.
    ///
    /// Layout ahead of the measured frontier is unknown, so the target is the
    /// estimate-based offset `index * estimate` and the anchor is re-based to
    /// `index`; the jump self-corrects as the landed-on items are measured.
    /// The index is clamped into range. Alignment refines the target once the
    /// viewport size is known; `Align::Auto` keeps the current offset when the
    /// item already lies fully inside the viewport.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> u64 {
        let count = self.options.count;
        if count == 0 {
            return 0;
        }
        let index = index.min(count - 1);

        let estimate = self.cache.estimate();
        let start = index as u64 * estimate as u64;
        let size = self.cache.size_of(index) as u64;
        let end = start.saturating_add(size);
        let view = self.viewport_size as u64;

        let target = if view == 0 {
            start
        } else {
            match align {
                Align::Start => start,
                Align::End => end.saturating_sub(view),
                Align::Center => start.saturating_add(size / 2).saturating_sub(view / 2),
                Align::Auto => {
                    let cur = self.scroll_offset;
                    let cur_end = cur.saturating_add(view);
                    if start >= cur && end <= cur_end {
                        cur
                    } else if start < cur {
                        start
                    } else {
                        end.saturating_sub(view)
                    }
                }
            }
        };

        dtrace!(index, ?align, offset = target, "scroll_to_index");
        self.anchor.index = index;
        self.set_scroll_offset(target);
        target
    }

    /// Exports the measured sizes as sorted `(index, size)` pairs (useful for
    /// persistence).
    pub fn export_measurements(&self) -> Vec<(usize, u32)> {
        let mut out = Vec::with_capacity(self.cache.measured_len());
        self.cache.for_each(|index, size| out.push((index, size)));
        out.sort_unstable_by_key(|&(index, _)| index);
        out
    }

    /// Replaces the measured sizes from an iterator (useful when restoring
    /// state). Out-of-range indices and zero sizes are skipped.
    pub fn import_measurements(&mut self, entries: impl IntoIterator<Item = (usize, u32)>) {
        self.cache.clear();
        let mut n = 0usize;
        for (index, size) in entries {
            if index >= self.options.count || size == 0 {
                continue;
            }
            self.cache.insert(index, size);
            n = n.saturating_add(1);
        }
        ddebug!(entries = n, "import_measurements");
        self.notify();
    }

    /// Forgets every measured size, keeping scroll state.
    pub fn reset_measurements(&mut self) {
        self.cache.clear();
        self.notify();
    }

    /// Fully reinitializes the instance, as when the underlying collection's
    /// identity changes. Clears the cache, the anchor (including any pending
    /// correction), and the debounce slot, and restores the initial scroll
    /// state.
    pub fn reset(&mut self) {
        ddebug!("reset");
        self.cache.clear();
        self.anchor.reset();
        self.stop_index = 0;
        self.has_new_measurements = false;
        self.scheduled_rerender_deadline_ms = None;
        self.viewport_size = self.options.initial_viewport_size;
        self.scroll_offset = self.options.initial_offset.resolve();
        self.scroll_direction = None;
        self.is_scrolling = false;
        self.last_scroll_event_ms = None;
        self.notify();
    }
}
