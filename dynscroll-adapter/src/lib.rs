//! Adapter utilities for the `dynscroll` crate.
//!
//! The `dynscroll` crate is UI-agnostic and owns the windowing state. This crate provides small,
//! framework-neutral helpers commonly needed by adapters:
//!
//! - Debounced scroll-activity detection (with an optional native scroll-end event)
//! - Element → index bookkeeping for resize observers
//! - A per-frame controller that writes scroll corrections back to the host
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod activity;
mod controller;
mod key;
mod resize;

#[cfg(test)]
mod tests;

pub use activity::ScrollActivity;
pub use controller::{Controller, ScrollHost};
pub use key::ElementKey;
pub use resize::ResizeTracker;
