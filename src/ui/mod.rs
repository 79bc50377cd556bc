// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Every widget follows the Elm-style "state down, messages up" pattern: a
//! `State` updated by `handle_message`, which returns an `Effect` for the
//! host alongside any follow-up `Task`.
//!
//! # Widgets
//!
//! - [`viewer`] - Image lightbox with zoom, pan, reveal and navigation
//! - [`scroller`] - Horizontal carousel stepping through a list
//! - [`toggler`] - Shows and hides a target element
//!
//! # Shared Infrastructure
//!
//! - [`button`] - Declarative control buttons shared by the widgets
//! - [`swipe`] - Touch gesture classification
//! - [`pan`] - Pan controllers for the zoomed viewer
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Centralized styling (buttons, containers, overlays)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod button;
pub mod design_tokens;
pub mod pan;
pub mod scroller;
pub mod styles;
pub mod swipe;
pub mod toggler;
pub mod viewer;
pub mod widgets;
