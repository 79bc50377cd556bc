// SPDX-License-Identifier: MPL-2.0
//! Pan controller abstraction used by the viewer while zoomed.
//!
//! The viewer never talks to a concrete panning implementation. It receives
//! a [`PanFactory`] at construction and drives the produced controller
//! through [`PanController`]. [`DragPan`] is the grab-and-drag default.

use iced::mouse;
use iced::widget::scrollable::AbsoluteOffset;
use iced::Point;
use std::fmt;

/// Cursor affordance requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanCursor {
    #[default]
    Auto,
    Move,
}

impl PanCursor {
    #[must_use]
    pub fn interaction(self, dragging: bool) -> mouse::Interaction {
        match (self, dragging) {
            (PanCursor::Auto, _) => mouse::Interaction::default(),
            (PanCursor::Move, false) => mouse::Interaction::Grab,
            (PanCursor::Move, true) => mouse::Interaction::Grabbing,
        }
    }
}

/// Capability injected into the viewer to pan a zoomed image.
pub trait PanController: fmt::Debug {
    /// Starts listening for drag gestures.
    fn bind(&mut self);
    /// Stops listening and drops any gesture in progress.
    fn destroy(&mut self);
    /// Moves the image back to its origin.
    fn reset(&mut self);
    fn set_cursor(&mut self, cursor: PanCursor);
    fn cursor(&self) -> PanCursor;
    fn is_bound(&self) -> bool;
    fn is_dragging(&self) -> bool;
    /// Pointer pressed at `position`.
    fn begin(&mut self, position: Point);
    /// Pointer moved; returns the new offset when it changed.
    fn drag_to(&mut self, position: Point) -> Option<AbsoluteOffset>;
    /// Pointer released.
    fn end(&mut self);
    fn offset(&self) -> AbsoluteOffset;
    /// Largest offset the content allows; the default ignores it.
    fn set_limits(&mut self, _max: AbsoluteOffset) {}
}

/// Produces a fresh pan controller for a viewer instance.
pub type PanFactory = Box<dyn Fn() -> Box<dyn PanController>>;

/// Factory for the built-in [`DragPan`].
#[must_use]
pub fn drag_pan_factory() -> PanFactory {
    Box::new(|| Box::new(DragPan::default()))
}

/// Grab-and-drag panning over a scrollable viewport.
#[derive(Debug, Clone)]
pub struct DragPan {
    bound: bool,
    cursor: PanCursor,
    offset: AbsoluteOffset,
    limits: Option<AbsoluteOffset>,
    start_position: Option<Point>,
    start_offset: Option<AbsoluteOffset>,
}

impl Default for DragPan {
    fn default() -> Self {
        Self {
            bound: false,
            cursor: PanCursor::Auto,
            offset: AbsoluteOffset { x: 0.0, y: 0.0 },
            limits: None,
            start_position: None,
            start_offset: None,
        }
    }
}

impl PanController for DragPan {
    fn bind(&mut self) {
        self.bound = true;
    }

    fn destroy(&mut self) {
        self.bound = false;
        self.end();
    }

    fn reset(&mut self) {
        self.offset = AbsoluteOffset { x: 0.0, y: 0.0 };
        self.end();
    }

    fn set_cursor(&mut self, cursor: PanCursor) {
        self.cursor = cursor;
    }

    fn cursor(&self) -> PanCursor {
        self.cursor
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    fn is_dragging(&self) -> bool {
        self.start_position.is_some()
    }

    fn begin(&mut self, position: Point) {
        if self.bound {
            self.start_position = Some(position);
            self.start_offset = Some(self.offset);
        }
    }

    fn drag_to(&mut self, position: Point) -> Option<AbsoluteOffset> {
        let start = self.start_position?;
        let origin = self.start_offset?;

        // Moving the cursor right scrolls the content left.
        let mut offset = AbsoluteOffset {
            x: (origin.x - (position.x - start.x)).max(0.0),
            y: (origin.y - (position.y - start.y)).max(0.0),
        };
        if let Some(max) = self.limits {
            offset.x = offset.x.min(max.x);
            offset.y = offset.y.min(max.y);
        }
        if offset == self.offset {
            return None;
        }
        self.offset = offset;
        Some(offset)
    }

    fn end(&mut self) {
        self.start_position = None;
        self.start_offset = None;
    }

    fn offset(&self) -> AbsoluteOffset {
        self.offset
    }

    fn set_limits(&mut self, max: AbsoluteOffset) {
        self.limits = Some(max);
        self.offset.x = self.offset.x.min(max.x.max(0.0));
        self.offset.y = self.offset.y.min(max.y.max(0.0));
    }
}
