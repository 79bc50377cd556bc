// SPDX-License-Identifier: MPL-2.0
//! `ila_ui` provides page widgets built with the Iced GUI framework: an
//! image viewer (lightbox) with zoom, pan, blur reveal and swipe navigation,
//! a horizontal scroller for image lists and a show/hide toggler.
//!
//! Widgets are bound to elements of a page description loaded by
//! [`document`], configured through [`config`] and localized with Fluent.

pub mod app;
pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod media;
pub mod ui;
