use dynlist::{Axis, DynamicList, WindowRange};

/// A per-item position/size description for the host's item renderer.
///
/// The engine's main-axis offset is mapped onto `x`/`y` according to the
/// configured [`Axis`]; the cross-axis position is always 0 and the cross-axis
/// size is the host's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPlacement {
    pub index: usize,
    pub x: u64,
    pub y: u64,
    /// Size along the scroll axis.
    pub main_size: u32,
}

/// Derives the placement for a single item.
///
/// Returns `None` for an out-of-range index.
pub fn placement_for(list: &DynamicList, index: usize) -> Option<ItemPlacement> {
    let meta = list.item_metadata(index)?;
    Some(match list.axis() {
        Axis::Vertical => ItemPlacement {
            index,
            x: 0,
            y: meta.offset,
            main_size: meta.size,
        },
        Axis::Horizontal => ItemPlacement {
            index,
            x: meta.offset,
            y: 0,
            main_size: meta.size,
        },
    })
}

/// Derives placements for every item in `window`, in index order.
pub fn for_each_placement(list: &DynamicList, window: WindowRange, mut f: impl FnMut(ItemPlacement)) {
    for index in window.start_index..=window.stop_index {
        if let Some(placement) = placement_for(list, index) {
            f(placement);
        }
    }
}
