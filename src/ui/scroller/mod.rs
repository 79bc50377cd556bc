// SPDX-License-Identifier: MPL-2.0
//! Horizontally paging list (carousel) over the `li` children of a page
//! container.

pub mod component;
pub mod layout;
pub mod view;

pub use component::{Effect, Message, State};
pub use layout::ScrollerLayout;
