// SPDX-License-Identifier: MPL-2.0
//! Routing of native events to the widgets.

use super::Message;
use crate::ui::viewer;
use iced::{event, keyboard, mouse, touch, window, Subscription};

/// Window resizes go to the application, which relays them to every widget.
/// Keyboard, pointer and touch events go to the viewer, which ignores them
/// while hidden.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match &event {
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized(*size)),
        event::Event::Keyboard(keyboard::Event::KeyPressed { .. }) => match status {
            event::Status::Ignored => Some(viewer_event(window_id, event.clone())),
            event::Status::Captured => None,
        },
        event::Event::Mouse(
            mouse::Event::CursorMoved { .. }
            | mouse::Event::CursorLeft
            | mouse::Event::ButtonReleased(mouse::Button::Left),
        )
        | event::Event::Touch(
            touch::Event::FingerPressed { .. }
            | touch::Event::FingerMoved { .. }
            | touch::Event::FingerLifted { .. }
            | touch::Event::FingerLost { .. },
        ) => Some(viewer_event(window_id, event.clone())),
        _ => None,
    })
}

fn viewer_event(window: window::Id, event: event::Event) -> Message {
    Message::Viewer(viewer::Message::RawEvent { window, event })
}
