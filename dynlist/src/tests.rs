use crate::*;

use crate::ScrollDirection::{Backward, Forward};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn list(count: usize) -> DynamicList {
    DynamicList::new(DynamicListOptions::new(count))
}

#[test]
fn unmeasured_list_uses_pure_estimates() {
    let mut v = list(1000);
    assert_eq!(v.estimated_total_extent(), 50_000);

    let w = v.resolve_window(0, 500, Forward).unwrap();
    assert_eq!(w.start_index, 0);
    // 10 items of 50 fill the 500px viewport exactly.
    assert_eq!(w.stop_index, 9);
    assert_eq!(v.anchor_index(), 0);
    assert_eq!(v.pending_size_delta(), 0);
}

#[test]
fn forward_resolution_walks_the_anchor() {
    let mut v = list(100);
    let w = v.resolve_window(120, 100, Forward).unwrap();
    // Offset 120 lands inside item 2 (100..150).
    assert_eq!(w.start_index, 2);
    assert_eq!(v.anchor_index(), 2);
    // Crossing unmeasured items accumulates no correction.
    assert_eq!(v.pending_size_delta(), 0);
}

#[test]
fn offset_on_a_leading_edge_resolves_to_that_item() {
    let mut v = list(100);
    let w = v.resolve_window(100, 100, Forward).unwrap();
    assert_eq!(w.start_index, 2);
}

#[test]
fn backward_crossing_a_larger_item_compensates_scroll() {
    let mut v = list(10);
    v.resolve_window(90, 100, Forward).unwrap();
    assert_eq!(v.anchor_index(), 1);

    // Item 0 turns out to be 80, not the estimated 50.
    v.report_measurement(0, 80, true, 0);
    assert_eq!(v.pending_size_delta(), 0);

    // Scrolling back across it re-bases the anchor and records the +30 shift.
    let w = v.resolve_window(30, 100, Backward).unwrap();
    assert_eq!(w.start_index, 0);
    assert_eq!(v.pending_size_delta(), 30);

    let action = v.commit();
    assert_eq!(
        action,
        CommitAction::AdjustScroll {
            by: 30,
            offset: 60
        }
    );
    assert_eq!(v.pending_size_delta(), 0);
    assert_eq!(v.scroll_offset(), 60);

    // The correction is applied exactly once.
    assert_eq!(v.commit(), CommitAction::None);
}

#[test]
fn forward_crossing_a_larger_item_compensates_scroll_down() {
    let mut v = list(10);
    v.report_measurement(0, 80, true, 0);
    assert_eq!(v.commit(), CommitAction::Rerender);

    v.resolve_window(100, 50, Forward).unwrap();
    assert_eq!(v.anchor_index(), 1);
    assert_eq!(v.pending_size_delta(), -30);

    let action = v.commit();
    assert_eq!(
        action,
        CommitAction::AdjustScroll {
            by: -30,
            offset: 70
        }
    );
}

#[test]
fn first_measurement_with_zero_net_delta_still_rerenders() {
    let mut v = list(10);
    v.report_measurement(3, 70, true, 0);
    assert_eq!(v.commit(), CommitAction::Rerender);
    assert_eq!(v.commit(), CommitAction::None);
}

#[test]
fn remeasurement_burst_collapses_into_one_rerender() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut v = DynamicList::new(
        DynamicListOptions::new(100)
            .with_rerender_debounce_ms(10)
            .with_on_change(Some(move |_: &DynamicList, _| {
                fired2.fetch_add(1, Ordering::SeqCst);
            })),
    );

    v.report_measurement(10, 60, false, 0);
    v.report_measurement(11, 60, false, 3);
    v.report_measurement(12, 60, false, 5);
    // The deadline is re-armed by each report.
    assert_eq!(v.scheduled_rerender_deadline(), Some(15));

    assert!(!v.update_rerender(9));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(v.update_rerender(15));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert!(!v.update_rerender(20));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn identical_report_is_a_no_op() {
    let mut v = list(100);
    v.report_measurement(5, 70, false, 0);
    assert!(v.scheduled_rerender_deadline().is_some());
    v.cancel_scheduled_rerender();

    v.report_measurement(5, 70, false, 100);
    assert_eq!(v.scheduled_rerender_deadline(), None);
    assert_eq!(v.pending_size_delta(), 0);
    assert_eq!(v.measurement_count(), 1);
}

#[test]
fn reports_commute_across_indices() {
    let mut a = list(100);
    a.report_measurement(5, 90, true, 0);
    a.report_measurement(2, 40, true, 1);

    let mut b = list(100);
    b.report_measurement(2, 40, true, 0);
    b.report_measurement(5, 90, true, 1);

    assert_eq!(a.export_measurements(), b.export_measurements());
    assert_eq!(a.estimated_total_extent(), b.estimated_total_extent());
}

#[test]
fn last_measurement_wins() {
    let mut v = list(10);
    v.report_measurement(0, 80, true, 0);
    v.report_measurement(0, 100, false, 1);
    assert_eq!(v.item_size(0), Some(100));
    assert_eq!(v.estimated_total_extent(), 100 + 9 * 50);
}

#[test]
fn start_resolution_round_trips_measured_offsets() {
    let mut rng = Lcg::new(7);
    for k in [1usize, 3, 7, 15, 19] {
        let mut v = list(20);
        let mut offset_of_k = 0u64;
        for i in 0..=k {
            let size = rng.gen_range_u32(20, 120);
            v.report_measurement(i, size, true, 0);
            if i < k {
                offset_of_k += size as u64;
            }
        }
        let w = v.resolve_window(offset_of_k, 100, Forward).unwrap();
        assert_eq!(w.start_index, k, "k={k}");
    }
}

#[test]
fn scroll_to_unmeasured_index_is_an_estimate_based_jump() {
    let mut v = list(1000);
    v.set_viewport_size(500);

    assert_eq!(v.scroll_to_index(999, Align::Start), 999 * 50);
    assert_eq!(v.anchor_index(), 999);
    assert_eq!(v.scroll_offset(), 999 * 50);

    // Reality catches up: the extent reflects measurements, not the estimate.
    for i in 0..999 {
        v.report_measurement(i, 60, true, 0);
    }
    assert_eq!(v.estimated_total_extent(), 999 * 60 + 50);
    assert_eq!(v.max_scroll_offset(), 999 * 60 + 50 - 500);
}

#[test]
fn scroll_to_index_alignment() {
    let mut v = list(100);
    v.set_viewport_size(100);
    v.set_scroll_offset(100);

    // Item 3 (150..200) is fully visible: Auto keeps the current offset.
    assert_eq!(v.scroll_to_index(3, Align::Auto), 100);
    // End aligns the trailing edge with the viewport bottom.
    assert_eq!(v.scroll_to_index(3, Align::End), 100);
    assert_eq!(v.scroll_to_index(3, Align::Center), 150 + 25 - 50);
    // Out-of-range indices clamp to the last item.
    assert_eq!(v.scroll_to_index(500, Align::Start), 99 * 50);
}

#[test]
fn scroll_to_index_with_unknown_viewport_falls_back_to_start() {
    let mut v = list(100);
    assert_eq!(v.scroll_to_index(4, Align::End), 200);
}

#[test]
fn walks_stop_at_collection_boundaries() {
    let mut v = list(5);
    let w = v.resolve_window(10_000, 100, Forward).unwrap();
    assert_eq!(w.start_index, 4);
    assert_eq!(w.stop_index, 4);
    assert_eq!(v.pending_size_delta(), 0);

    let w = v.resolve_window(0, 100, Backward).unwrap();
    assert_eq!(w.start_index, 0);
}

#[test]
fn empty_list_has_no_window() {
    let mut v = list(0);
    assert_eq!(v.resolve_window(0, 100, Forward), None);
    assert_eq!(v.estimated_total_extent(), 0);
    assert_eq!(v.item_metadata(0), None);
    assert_eq!(v.scroll_to_index(3, Align::Start), 0);
}

#[test]
fn zero_viewport_windows_a_single_item() {
    let mut v = list(10);
    let w = v.resolve_window(120, 0, Forward).unwrap();
    assert_eq!(w.start_index, w.stop_index);
}

#[test]
fn metadata_is_reconciled_inside_the_window_only() {
    let mut v = list(100);
    for i in 2..5 {
        v.report_measurement(i, 80, true, 0);
    }
    let w = v.resolve_window(100, 100, Forward).unwrap();
    assert_eq!(w.start_index, 2);
    assert_eq!(w.stop_index, 3);

    // Anchor item sits on the estimate grid; the next one accumulates its
    // measured size.
    assert_eq!(v.item_metadata(2).unwrap(), ItemMetadata { offset: 100, size: 80 });
    assert_eq!(v.item_metadata(3).unwrap(), ItemMetadata { offset: 180, size: 80 });
    // Beyond the walked window the offset degrades to the estimate grid.
    assert_eq!(v.item_metadata(50).unwrap().offset, 50 * 50);
    assert_eq!(v.item_metadata(4).unwrap().size, 80);
}

#[test]
fn metadata_lookup_has_no_side_effects() {
    let mut v = list(100);
    v.report_measurement(1, 90, true, 0);
    v.resolve_window(60, 100, Forward).unwrap();
    let before = (v.anchor_index(), v.pending_size_delta());
    for i in 0..100 {
        let _ = v.item_metadata(i);
    }
    assert_eq!((v.anchor_index(), v.pending_size_delta()), before);
}

#[test]
fn offsets_are_monotonic_within_a_resolved_window() {
    let mut rng = Lcg::new(0x5eed);
    let mut v = list(300);
    let mut offset = 0u64;

    for step in 0..200u64 {
        let direction = if rng.gen_bool() { Forward } else { Backward };
        offset = match direction {
            Forward => offset.saturating_add(rng.gen_range_u64(0, 400)),
            Backward => offset.saturating_sub(rng.gen_range_u64(0, 400)),
        };

        let w = v.resolve_window(offset, 240, direction).unwrap();
        for _ in 0..3 {
            let i = rng.gen_range_usize(w.start_index, w.stop_index + 1);
            v.report_measurement(i, rng.gen_range_u32(10, 120), rng.gen_bool(), step);
        }

        let w = v.resolve_window(offset, 240, direction).unwrap();
        let mut prev: Option<u64> = None;
        for i in w.start_index..=w.stop_index {
            let m = v.item_metadata(i).unwrap();
            if let Some(p) = prev {
                assert!(m.offset >= p, "offset regressed at index {i}");
            }
            prev = Some(m.offset);
        }

        let _ = v.commit();
        assert_eq!(v.pending_size_delta(), 0);
    }
}

#[test]
fn extent_converges_once_everything_is_measured() {
    let mut rng = Lcg::new(42);
    let count = 128usize;
    let mut v = list(count);

    let sizes: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(1, 200)).collect();
    let mut order: Vec<usize> = (0..count).collect();
    for i in (1..count).rev() {
        let j = rng.gen_range_usize(0, i + 1);
        order.swap(i, j);
    }

    let mut measured_sum = 0u64;
    for (n, &i) in order.iter().enumerate() {
        v.report_measurement(i, sizes[i], true, 0);
        measured_sum += sizes[i] as u64;
        let remaining = (count - n - 1) as u64;
        assert_eq!(v.estimated_total_extent(), measured_sum + remaining * 50);
    }
    let exact: u64 = sizes.iter().map(|&s| s as u64).sum();
    assert_eq!(v.estimated_total_extent(), exact);
}

#[test]
fn count_shrink_prunes_measurements_and_clamps_the_anchor() {
    let mut v = list(10);
    v.report_measurement(8, 90, true, 0);
    v.scroll_to_index(9, Align::Start);
    assert_eq!(v.anchor_index(), 9);

    v.set_count(5);
    assert_eq!(v.anchor_index(), 4);
    assert_eq!(v.measurement_count(), 0);
    assert_eq!(v.estimated_total_extent(), 5 * 50);

    // Growing back does not resurrect pruned entries.
    v.set_count(10);
    assert_eq!(v.item_size(8), Some(50));
}

#[test]
fn out_of_range_reports_are_ignored() {
    let mut v = list(5);
    v.report_measurement(5, 80, true, 0);
    v.report_measurement(1000, 80, true, 0);
    assert_eq!(v.measurement_count(), 0);
    assert_eq!(v.commit(), CommitAction::None);
}

#[test]
fn export_import_round_trips() {
    let mut v = list(20);
    v.report_measurement(3, 33, true, 0);
    v.report_measurement(17, 77, true, 0);
    let exported = v.export_measurements();
    assert_eq!(exported, alloc::vec![(3, 33), (17, 77)]);

    let mut w = list(20);
    w.import_measurements(exported);
    assert_eq!(w.item_size(3), Some(33));
    assert_eq!(w.item_size(17), Some(77));
    assert_eq!(w.estimated_total_extent(), v.estimated_total_extent());
}

#[test]
fn reset_measurements_restores_the_estimate_grid() {
    let mut v = list(10);
    v.report_measurement(0, 90, true, 0);
    v.reset_measurements();
    assert_eq!(v.item_size(0), Some(50));
    assert_eq!(v.estimated_total_extent(), 500);
}

#[test]
fn reset_reinitializes_the_instance() {
    let mut v = DynamicList::new(
        DynamicListOptions::new(50).with_initial_offset_value(120),
    );
    v.resolve_window(400, 100, Forward).unwrap();
    v.report_measurement(0, 90, true, 0);
    v.report_measurement(1, 90, false, 0);
    assert!(v.scheduled_rerender_deadline().is_some());

    v.reset();
    assert_eq!(v.scroll_offset(), 120);
    assert_eq!(v.anchor_index(), 0);
    assert_eq!(v.pending_size_delta(), 0);
    assert_eq!(v.measurement_count(), 0);
    assert_eq!(v.scheduled_rerender_deadline(), None);
    assert_eq!(v.commit(), CommitAction::None);
}

#[test]
fn batch_update_coalesces_notifications() {
    let fired = Arc::new(AtomicUsize::new(0));
    let fired2 = Arc::clone(&fired);
    let mut v = DynamicList::new(DynamicListOptions::new(100).with_on_change(Some(
        move |_: &DynamicList, _| {
            fired2.fetch_add(1, Ordering::SeqCst);
        },
    )));

    v.batch_update(|v| {
        v.set_viewport_size(100);
        v.set_scroll_offset(40);
        v.notify_scroll_event(0);
    });
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn is_scrolling_resets_after_the_delay() {
    let mut v = list(100);
    v.notify_scroll_event(0);
    assert!(v.is_scrolling());
    v.update_scrolling(100);
    assert!(v.is_scrolling());
    v.update_scrolling(150);
    assert!(!v.is_scrolling());
}

#[test]
fn clamped_scroll_events_respect_the_estimated_extent() {
    let mut v = list(10);
    v.set_viewport_size(100);
    v.apply_scroll_offset_event_clamped(10_000, 0);
    assert_eq!(v.scroll_offset(), 500 - 100);
    assert!(v.is_scrolling());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "does not accept a fixed item_size")]
fn fixed_item_size_is_rejected_in_debug_builds() {
    let mut options = DynamicListOptions::new(10);
    options.item_size = Some(40);
    let _ = DynamicList::new(options);
}
