// Example: resolving windows over a list nobody has measured yet.
use dynlist::{DynamicList, DynamicListOptions, ScrollDirection};

fn main() {
    let mut list = DynamicList::new(DynamicListOptions::new(10_000).with_estimated_item_size(40));

    let window = list
        .resolve_window(1_200, 600, ScrollDirection::Forward)
        .unwrap();
    println!(
        "window={}..={} extent={}",
        window.start_index,
        window.stop_index,
        list.estimated_total_extent()
    );

    for index in window.start_index..=window.stop_index {
        let meta = list.item_metadata(index).unwrap();
        println!("item {index}: offset={} size={}", meta.offset, meta.size);
    }
}
