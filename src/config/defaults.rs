// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Viewer**: target class, caption selectors, control glyphs
//! - **Scroller**: button classes, breakpoint table, resize debounce
//! - **Toggler**: transition timing

use std::time::Duration;

// ==========================================================================
// Viewer Defaults
// ==========================================================================

/// Class that marks source images handled by the viewer.
pub const DEFAULT_TARGET_CLASS: &str = "viewer";

/// Caption selectors; `&` is replaced by the wrapper id of the current image.
pub const DEFAULT_CAPTION_SELECTORS: [&str; 2] = ["#& + figcaption", "#& + .caption"];

/// Class added to the generated image wrappers.
pub const WRAPPER_CLASS: &str = "viewer-wrap";

/// Gaussian blur sigma applied to images that require a reveal.
pub const REVEAL_BLUR_SIGMA: f32 = 24.0;

pub const TEXT_CUE: &str = "⨁";
pub const TEXT_HIDE: &str = "ⓧ";
pub const TEXT_DOWNLOAD: &str = "⮋";
pub const TEXT_PREV: &str = "⮈";
pub const TEXT_NEXT: &str = "⮊";
pub const TEXT_LINK: &str = "⛓";
pub const TEXT_ZOOM: &str = "🞕";
pub const TEXT_ZOOM_ACTIVE: &str = "🞔";
pub const TEXT_REVEAL: &str = "◐";
pub const TEXT_REVEAL_ACTIVE: &str = "◑";

// ==========================================================================
// Scroller Defaults
// ==========================================================================

/// Class of the page lists turned into scrollers.
pub const SCROLLER_CLASS: &str = "scroller";

pub const DEFAULT_LEFT_BUTTON_CLASS: &str = "scroller-left btn btn-scroller";
pub const DEFAULT_RIGHT_BUTTON_CLASS: &str = "scroller-right btn btn-scroller";

/// Minimum viewport width mapped to the number of items per row.
pub const DEFAULT_BREAKPOINTS: [(u32, u32); 4] = [(0, 4), (768, 4), (992, 6), (1200, 8)];

/// Horizontal padding around the scroller list, in pixels.
pub const DEFAULT_SCROLLER_PADDING: u32 = 16;

/// Quiet period before a resize triggers a layout recomputation.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);

// ==========================================================================
// Toggler Defaults
// ==========================================================================

/// Duration of the show/hide transition.
pub const TOGGLE_TRANSITION: Duration = Duration::from_millis(250);
