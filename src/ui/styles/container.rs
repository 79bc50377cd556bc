// SPDX-License-Identifier: MPL-2.0
//! Container styles for page content.

use crate::ui::design_tokens::{opacity, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Surface for toggled panels and scroller tracks.
///
/// Derived from the theme background so it works in light and dark modes.
pub fn panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let base = palette.background.weak.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Panel variant used during a toggle transition.
pub fn fading(progress: f32) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let mut style = panel(theme);
        if let Some(Background::Color(color)) = style.background {
            style.background = Some(Background::Color(Color {
                a: color.a * progress.clamp(0.0, 1.0),
                ..color
            }));
        }
        style
    }
}
