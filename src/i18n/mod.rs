// SPDX-License-Identifier: MPL-2.0
//! Localization of control titles and application strings.
//!
//! Translations are embedded `.ftl` files (Fluent). The locale comes from the
//! CLI, then the config file, then the OS, falling back to `en-US`.

pub mod fluent;
