// Example: the measure -> commit -> compensate loop.
//
// Simulates a host that paints a window, reports real sizes for what it
// painted, and applies the resulting scroll adjustment at commit time.
use dynlist::{Align, CommitAction, DynamicList, DynamicListOptions, ScrollDirection};

fn main() {
    let mut list = DynamicList::new(DynamicListOptions::new(500));
    let mut now_ms = 0u64;

    // First paint at the top: every item is still the 50px estimate.
    let window = list.resolve_window(0, 300, ScrollDirection::Forward).unwrap();
    println!("first window: {}..={}", window.start_index, window.stop_index);

    // The items turn out taller than estimated.
    for index in window.start_index..=window.stop_index {
        list.report_measurement(index, 72, true, now_ms);
    }
    println!("commit after first paint: {:?}", list.commit());

    // Scroll down, then back up across the now-measured region.
    let _ = list.resolve_window(400, 300, ScrollDirection::Forward);
    let _ = list.resolve_window(60, 300, ScrollDirection::Backward);
    match list.commit() {
        CommitAction::AdjustScroll { by, offset } => {
            println!("compensating: scroll by {by} (or set {offset})");
        }
        other => println!("commit: {other:?}"),
    }

    // A content change re-measures an already settled item; the re-render is
    // debounced rather than immediate.
    now_ms += 100;
    list.report_measurement(2, 90, false, now_ms);
    println!(
        "debounce armed for t={:?}",
        list.scheduled_rerender_deadline()
    );
    now_ms += 16;
    println!("tick fires rerender: {}", list.update_rerender(now_ms));

    let target = list.scroll_to_index(450, Align::Start);
    println!("jumped to item 450 at estimated offset {target}");
}
