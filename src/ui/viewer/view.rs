// SPDX-License-Identifier: MPL-2.0
//! Rendering of the viewer overlay and of the page thumbnails that open it.
//!
//! Everything here is derived from [`State`]; no widget state is read back.

use super::component::{Message, State};
use crate::ui::design_tokens::{opacity, palette::WHITE, radius, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::{self, Image};
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, mouse_area, svg, tooltip, Column, Container, Row, Scrollable, Space, Stack, Svg, Text};
use iced::{ContentFit, Element, Length};

/// Full-window overlay; empty while the viewer is hidden.
pub fn overlay(state: &State) -> Element<'_, Message> {
    if !state.is_active() {
        return Space::new().width(Length::Shrink).height(Length::Shrink).into();
    }

    let mut body = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .spacing(spacing::SM)
        .padding(spacing::LG)
        .align_x(Horizontal::Center)
        .push(media_area(state));

    if let Some(caption) = state.caption().filter(|_| !state.is_loading()) {
        let masked = state.viewer_state().is_blurred();
        body = body.push(
            Container::new(Text::new(caption).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .style(styles::overlay::caption(masked)),
        );
    }

    let backdrop = Container::new(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::overlay::backdrop);

    let bar = Container::new(control_bar(state))
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(spacing::SM);

    Stack::new().push(backdrop).push(bar).into()
}

fn control_bar(state: &State) -> Element<'_, Message> {
    let bar = state
        .controls()
        .visible()
        .into_iter()
        .fold(Row::new().spacing(spacing::XS), |row, control| row.push(control.view()));

    Container::new(bar)
        .padding(spacing::XS)
        .style(styles::overlay::controls_container)
        .into()
}

fn media_area(state: &State) -> Element<'_, Message> {
    let content: Element<'_, Message> = match state.display() {
        Some(image) if !state.is_loading() => {
            let handle = if state.viewer_state().is_blurred() {
                image.blurred.clone().unwrap_or_else(|| image.handle.clone())
            } else {
                image.handle.clone()
            };

            if state.viewer_state().is_zoomed() {
                let natural = Image::new(handle)
                    .width(Length::Fixed(image.width as f32))
                    .height(Length::Fixed(image.height as f32));
                let scrollable = Scrollable::new(natural)
                    .id(state.pan_viewport_id().clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .direction(Direction::Both {
                        vertical: Scrollbar::hidden(),
                        horizontal: Scrollbar::hidden(),
                    });
                mouse_area(scrollable)
                    .interaction(state.pan_interaction())
                    .on_press(Message::PanPressed)
                    .into()
            } else {
                Image::new(handle)
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .into()
            }
        }
        _ => AnimatedSpinner::new(WHITE, state.spinner_rotation()).into_element(),
    };

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

/// Page thumbnail for image `index` with its cue label.
///
/// `handle` is the decoded thumbnail; the alt text stands in until it
/// arrives. Pressing the thumbnail opens the viewer on that image.
pub fn thumbnail<'a>(
    state: &'a State,
    index: usize,
    handle: Option<&image::Handle>,
) -> Element<'a, Message> {
    let Some(entry) = state.entries().get(index) else {
        return Space::new().width(Length::Shrink).height(Length::Shrink).into();
    };

    let picture: Element<'a, Message> = match handle {
        Some(handle) => Image::new(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fill)
            .opacity(thumbnail_opacity(state, index))
            .into(),
        None => Container::new(Text::new(entry.alt.as_str()).size(typography::CAPTION))
            .padding(spacing::MD)
            .into(),
    };

    let config = state.config();
    let mut cue = Row::new().spacing(spacing::XXS).align_y(Vertical::Center);
    if !config.texts.cue.is_empty() {
        cue = cue.push(Text::new(config.texts.cue.as_str()).size(typography::BODY));
    }
    if !config.icons.cue.is_empty() {
        cue = cue.push(
            Svg::new(svg::Handle::from_path(&config.icons.cue))
                .width(Length::Fixed(sizing::ICON_SM))
                .height(Length::Fixed(sizing::ICON_SM))
                .style(styles::overlay::icon(WHITE)),
        );
    }
    let cue = Container::new(
        Container::new(cue)
            .padding([spacing::XXS, spacing::XS])
            .style(styles::overlay::indicator(radius::SM)),
    )
    .width(Length::Fill)
    .align_x(Horizontal::Right)
    .padding(spacing::XXS);

    let wrapper = button(Stack::new().push(picture).push(cue))
        .padding(0)
        .style(styles::button::bare)
        .on_press(Message::Show(index));

    if config.titles.cue.is_empty() {
        wrapper.into()
    } else {
        styles::tooltip::styled(wrapper, config.titles.cue.as_str(), tooltip::Position::Bottom).into()
    }
}

/// The thumbnail of the image shown in the overlay is dimmed.
fn thumbnail_opacity(state: &State, index: usize) -> f32 {
    if state.is_active() && state.viewer_state().active_index == Some(index) {
        opacity::OVERLAY_MEDIUM
    } else {
        opacity::OPAQUE
    }
}
