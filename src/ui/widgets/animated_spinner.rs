// SPDX-License-Identifier: MPL-2.0
//! Loading indicator shown while the viewer waits for an image.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::PI;

const STROKE_WIDTH: f32 = 3.0;
const ARC_SEGMENTS: u16 = 24;

/// Half ring rotated by the viewer's spinner tick.
#[derive(Debug, Clone, Copy)]
pub struct AnimatedSpinner {
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    #[must_use]
    pub fn new(color: Color, rotation: f32) -> Self {
        Self {
            rotation,
            color,
            size: sizing::ICON_XL,
        }
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }

    /// Points of the visible arc, starting at the top when not rotated.
    fn arc_points(&self, center: Point, radius: f32) -> impl Iterator<Item = Point> + '_ {
        let start = self.rotation - PI / 2.0;
        (0..=ARC_SEGMENTS).map(move |i| {
            let angle = start + PI * f32::from(i) / f32::from(ARC_SEGMENTS);
            Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
        })
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH - 1.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default()
                .with_width(STROKE_WIDTH)
                .with_color(Color { a: 0.25, ..self.color }),
        );

        let arc = Path::new(|builder| {
            let mut points = self.arc_points(center, radius);
            if let Some(first) = points.next() {
                builder.move_to(first);
            }
            for point in points {
                builder.line_to(point);
            }
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(STROKE_WIDTH)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_starts_at_top_without_rotation() {
        let spinner = AnimatedSpinner::new(Color::WHITE, 0.0);
        let first = spinner
            .arc_points(Point::new(10.0, 10.0), 5.0)
            .next()
            .expect("arc has points");
        assert!((first.x - 10.0).abs() < 1e-4);
        assert!((first.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn arc_spans_half_a_turn() {
        let spinner = AnimatedSpinner::new(Color::WHITE, 0.0);
        let last = spinner
            .arc_points(Point::new(0.0, 0.0), 1.0)
            .last()
            .expect("arc has points");
        assert!((last.y - 1.0).abs() < 1e-4);
    }
}
