//! Adapter utilities for the `dynlist` crate.
//!
//! The `dynlist` crate is UI-agnostic and focuses on the core math and state.
//! This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - A [`Controller`] that wraps the engine with the event plumbing a host
//!   needs per frame: scroll events, overscanned render windows, the
//!   commit/tick loop, and axis-aware scroll adjustments
//! - [`ItemPlacement`] derivation, mapping main-axis offsets onto x/y for item
//!   renderers
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod placement;


pub use controller::{Controller, HostAction};
pub use placement::{ItemPlacement, for_each_placement, placement_for};
