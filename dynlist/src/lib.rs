//! A headless windowing engine for lists whose item sizes are not known up front.
//!
//! Inspired by react-window's experimental `DynamicSizeList`: the engine lays the
//! list out from a uniform size estimate, fills in real sizes as items are rendered
//! and measured, and keeps the viewport visually stable while the two disagree.
//!
//! The core pieces:
//! - a sparse cache of measured sizes (estimate fallback for everything else)
//! - an anchor index used as the zero-reference for offset math, so cost tracks
//!   the distance scrolled rather than the collection size
//! - a pending scroll correction accumulated whenever the anchor walk crosses an
//!   item whose real size differs from the estimate, consumed once per commit
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size and scroll offset (with scroll direction)
//! - measured item sizes, reported after items are painted
//! - a render-commit hook that applies [`CommitAction`]s
//!
//! For adapter-level utilities (controller loop, overscan, item placement), see
//! the `dynlist-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod cache;
mod dynlist;
mod options;
mod types;

#[cfg(test)]
mod tests;

pub use dynlist::DynamicList;
pub use options::{DynamicListOptions, InitialOffset, OnChangeCallback, DEFAULT_ESTIMATED_ITEM_SIZE};
pub use types::{Align, Axis, CommitAction, ItemMetadata, ScrollDirection, WindowRange};
