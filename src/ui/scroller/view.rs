// SPDX-License-Identifier: MPL-2.0
//! Rendering of a scroller: the item track with its arrow controls.

use super::component::{Message, State};
use crate::ui::design_tokens::spacing;
use crate::ui::styles;
use iced::alignment::Vertical;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{Container, Row, Scrollable};
use iced::{Element, Length};

/// Lays out `items` at the measured item width.
///
/// Items are rendered by the caller in the caller's message type; `map`
/// lifts the scroller's own control messages into it.
pub fn view<'a, M: 'a>(
    state: &'a State,
    items: Vec<Element<'a, M>>,
    map: impl Fn(Message) -> M + Clone + 'a,
) -> Element<'a, M> {
    let item_width = Length::Fixed(state.layout().item_width as f32);
    let track = items.into_iter().fold(Row::new(), |row, item| {
        row.push(Container::new(item).width(item_width))
    });

    let list = Scrollable::new(track)
        .id(state.list_id().clone())
        .width(Length::Fill)
        .direction(Direction::Horizontal(Scrollbar::hidden()));

    let padded = Container::new(list)
        .padding([0.0, state.padding() as f32])
        .width(Length::Fill)
        .style(styles::container::panel);

    let (Some(left), Some(right)) = (state.left_button(), state.right_button()) else {
        return padded.into();
    };

    Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center)
        .push(left.view().map(map.clone()))
        .push(padded)
        .push(right.view().map(map))
        .into()
}

