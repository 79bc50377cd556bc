// SPDX-License-Identifier: MPL-2.0
//! Measurement and paging arithmetic for the scroller.
//!
//! All values are whole pixels. The list is moved by a negative offset:
//! `0` shows the first item and `-max_scroll` the last page.

use crate::config::{Breakpoint, RowCount};
use crate::error::{Error, Result};

/// Items per row for a viewport width.
///
/// The applicable entry is the last one whose threshold is at most `width`.
///
/// # Errors
///
/// [`Error::InvalidRowCount`] when no entry applies or its count is zero or
/// not a number.
pub fn row_count(width: u32, breakpoints: &[Breakpoint]) -> Result<u32> {
    let count = breakpoints
        .iter()
        .filter(|(threshold, _)| *threshold <= width)
        .last()
        .map(|(_, count)| count);

    match count {
        Some(RowCount::Count(count)) if *count > 0 => Ok(*count),
        Some(count) => Err(Error::InvalidRowCount(count.to_string())),
        None => Err(Error::InvalidRowCount(format!("no breakpoint for width {width}"))),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollerLayout {
    pub per_row: u32,
    /// Visible width of the list, without padding.
    pub display_width: i32,
    pub item_width: i32,
    /// Items moved by one full step.
    pub per_step: i32,
    /// Pixels moved by one full step.
    pub step: i32,
    pub content_width: i32,
    pub max_scroll: i32,
}

impl ScrollerLayout {
    /// Measures a list of `item_count` items inside a container.
    ///
    /// `padding` is applied on both sides of the container.
    ///
    /// # Errors
    ///
    /// Propagates [`row_count`] failures.
    pub fn measure(
        window_width: f32,
        container_width: f32,
        padding: u32,
        item_count: usize,
        breakpoints: &[Breakpoint],
    ) -> Result<Self> {
        let per_row = row_count(window_width.max(0.0) as u32, breakpoints)?;

        let padding = i32::try_from(padding).unwrap_or(i32::MAX);
        let display_width = (container_width.max(0.0) as i32)
            .saturating_sub(padding.saturating_mul(2))
            .max(0);
        let columns = i32::try_from(per_row).unwrap_or(i32::MAX);
        let item_width = (display_width / columns).max(1);
        let per_step = (display_width / item_width).max(1);
        let step = item_width * per_step;
        let items = i32::try_from(item_count).unwrap_or(i32::MAX);
        let content_width = item_width.saturating_mul(items);
        let max_scroll = (content_width - display_width).max(0);

        Ok(Self {
            per_row,
            display_width,
            item_width,
            per_step,
            step,
            content_width,
            max_scroll,
        })
    }

    /// Whether the content is wider than the visible area.
    #[must_use]
    pub fn overflows(&self) -> bool {
        self.content_width > self.display_width
    }

    #[must_use]
    pub fn clamp(&self, offset: i32) -> i32 {
        offset.clamp(-self.max_scroll, 0)
    }

    /// Offset reached by one step from `offset`.
    ///
    /// Stepping back from the fully scrolled position only moves by
    /// `max_scroll % step` so the last partial page is not skipped. An exact
    /// multiple takes a full step.
    #[must_use]
    pub fn scroll(&self, offset: i32, forward: bool) -> i32 {
        let offset = self.clamp(offset);
        if forward {
            return self.clamp(offset - self.step);
        }

        let remainder = self.max_scroll % self.step;
        let back = if offset <= -self.max_scroll && remainder != 0 {
            remainder
        } else {
            self.step
        };
        self.clamp(offset + back)
    }

    #[must_use]
    pub fn can_scroll_back(&self, offset: i32) -> bool {
        offset < 0
    }

    #[must_use]
    pub fn can_scroll_forward(&self, offset: i32) -> bool {
        offset > -self.max_scroll
    }
}
