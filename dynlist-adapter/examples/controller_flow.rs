// Example: driving a Controller the way a UI frame loop would.
use dynlist::ScrollDirection::{Backward, Forward};
use dynlist::{Align, DynamicListOptions};
use dynlist_adapter::{Controller, HostAction};

fn main() {
    let mut c = Controller::new(DynamicListOptions::new(5_000)).with_overscan(2);
    c.on_viewport_size(400);

    // Frame 1: initial paint at the top.
    let window = c.render_window(Forward).unwrap();
    let mut placements = Vec::new();
    c.placements_into(window, &mut placements);
    println!("painting {} items", placements.len());

    // The painted items report their real sizes.
    for p in &placements {
        c.on_item_measured(p.index, 64, true, 0);
    }
    println!("commit: {:?}", c.commit());

    // The user scrolls down, then back up over the measured region.
    c.on_scroll(900, 16);
    let _ = c.render_window(Forward);
    c.on_scroll(100, 32);
    let _ = c.render_window(Backward);

    match c.commit() {
        HostAction::ScrollBy {
            x,
            y,
            fallback_offset,
        } => println!("scroll by ({x}, {y}) or set offset {fallback_offset}"),
        other => println!("commit: {other:?}"),
    }

    // A settled item changes content and re-measures; the repaint is debounced.
    c.on_item_measured(3, 120, false, 48);
    for now_ms in [48, 64] {
        if c.tick(now_ms) {
            println!("debounced repaint at t={now_ms}");
        }
    }

    let target = c.scroll_to_item(4_999, Align::Start, 80);
    println!("jump to the end lands at estimated offset {target}");
}
