// SPDX-License-Identifier: MPL-2.0
//! Image viewer (lightbox) for the images of a page.
//!
//! The viewer collects every `img` carrying the configured target class,
//! wraps it in an anchor with a cue label, and opens a full-window overlay
//! with navigation, zoom and reveal controls when a thumbnail is pressed.

pub mod caption;
pub mod component;
pub mod controls;
pub mod entry;
pub mod state;
pub mod view;

pub use component::{Effect, Message, State};
pub use entry::ImageEntry;
pub use state::ViewerState;
