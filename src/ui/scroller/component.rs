// SPDX-License-Identifier: MPL-2.0
//! Scroller component: a horizontally paging list with left/right controls.

use super::layout::ScrollerLayout;
use crate::config::{ScrollerConfig, RESIZE_DEBOUNCE};
use crate::document::{Document, NodeId};
use crate::error::Result;
use crate::ui::button::{make_button, ButtonSpec, Tag};
use iced::task;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{operation, Id};
use iced::Task;

#[derive(Debug, Clone)]
pub enum Message {
    ScrollLeft,
    ScrollRight,
    /// The window or container changed size; starts the debounce timer.
    Resized {
        window_width: f32,
        container_width: f32,
    },
    /// The debounce timer of resize `generation` elapsed.
    ResizeSettled { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The list moved to a new offset.
    Scrolled { offset: i32 },
    /// The layout was recomputed after a resize.
    Relayout { created: bool },
}

#[derive(Debug, Clone)]
struct Buttons {
    left: ButtonSpec<Message>,
    right: ButtonSpec<Message>,
}

#[derive(Debug)]
pub struct State {
    config: ScrollerConfig,
    container: NodeId,
    items: Vec<NodeId>,
    layout: ScrollerLayout,
    offset: i32,
    buttons: Option<Buttons>,
    listening: bool,
    window_width: f32,
    container_width: f32,
    resize_generation: u64,
    resize_timer: Option<task::Handle>,
    list_id: Id,
}

impl State {
    /// Measures the `li` children of `container` and builds the controls if
    /// the content overflows.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::InvalidRowCount`] when the breakpoint table
    /// yields no row count for `window_width`.
    pub fn new(
        document: &Document,
        container: NodeId,
        config: ScrollerConfig,
        window_width: f32,
        container_width: f32,
    ) -> Result<Self> {
        let items: Vec<NodeId> = document
            .node(container)
            .children
            .iter()
            .copied()
            .filter(|&child| document.node(child).tag == "li")
            .collect();

        let layout = ScrollerLayout::measure(
            window_width,
            container_width,
            config.padding,
            items.len(),
            &config.breakpoints,
        )?;

        let mut state = Self {
            config,
            container,
            items,
            layout,
            offset: 0,
            buttons: None,
            listening: false,
            window_width,
            container_width,
            resize_generation: 0,
            resize_timer: None,
            list_id: Id::unique(),
        };
        tracing::debug!(
            content = layout.content_width,
            display = layout.display_width,
            "scroller measured"
        );

        if layout.overflows() {
            state.create();
        }
        Ok(state)
    }

    /// Builds the controls and starts listening for resizes.
    ///
    /// Calling it on a scroller that already has controls does nothing.
    pub fn create(&mut self) {
        if self.buttons.is_some() {
            return;
        }

        let left = make_button(
            "scroller-left",
            &self.config.left_button_class,
            &self.config.left_button_content,
            "",
            None,
            Some(Message::ScrollLeft),
            Tag::Button,
        );
        let right = make_button(
            "scroller-right",
            &self.config.right_button_class,
            &self.config.right_button_content,
            "",
            None,
            Some(Message::ScrollRight),
            Tag::Button,
        );

        self.buttons = Some(Buttons { left, right });
        self.listening = true;
        self.offset = 0;
        self.sync_buttons();
    }

    /// Returns the list to its start, removes the controls and cancels any
    /// pending resize timer.
    pub fn destroy(&mut self) -> Task<Message> {
        self.offset = 0;
        self.buttons = None;
        self.listening = false;
        self.cancel_timer();
        self.scroll_task()
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::ScrollLeft => {
                let offset = self.scroll(false);
                (Effect::Scrolled { offset }, self.scroll_task())
            }
            Message::ScrollRight => {
                let offset = self.scroll(true);
                (Effect::Scrolled { offset }, self.scroll_task())
            }
            Message::Resized {
                window_width,
                container_width,
            } => (Effect::None, self.schedule_resize(window_width, container_width)),
            Message::ResizeSettled { generation } => self.resize_settled(generation),
        }
    }

    /// Moves one step and returns the resulting offset.
    pub fn scroll(&mut self, forward: bool) -> i32 {
        if self.buttons.is_none() {
            return self.offset;
        }
        let from = self.offset;
        self.offset = self.layout.scroll(self.offset, forward);
        self.sync_buttons();
        tracing::debug!(from, to = self.offset, "scroller moved");
        self.offset
    }

    fn schedule_resize(&mut self, window_width: f32, container_width: f32) -> Task<Message> {
        self.window_width = window_width;
        self.container_width = container_width;
        if !self.listening {
            return Task::none();
        }

        self.cancel_timer();
        self.resize_generation += 1;
        let generation = self.resize_generation;

        let (task, handle) = Task::perform(
            async move { tokio::time::sleep(RESIZE_DEBOUNCE).await },
            move |()| Message::ResizeSettled { generation },
        )
        .abortable();
        self.resize_timer = Some(handle);
        task
    }

    fn resize_settled(&mut self, generation: u64) -> (Effect, Task<Message>) {
        if generation != self.resize_generation || !self.listening {
            return (Effect::None, Task::none());
        }
        self.resize_timer = None;
        self.relayout()
    }

    /// Recomputes every size-derived value and re-evaluates the controls.
    fn relayout(&mut self) -> (Effect, Task<Message>) {
        match ScrollerLayout::measure(
            self.window_width,
            self.container_width,
            self.config.padding,
            self.items.len(),
            &self.config.breakpoints,
        ) {
            Ok(layout) => self.layout = layout,
            Err(err) => {
                tracing::warn!("scroller layout kept after resize: {err}");
                return (Effect::None, Task::none());
            }
        }

        if self.layout.overflows() {
            self.create();
            self.offset = self.layout.clamp(self.offset);
            self.sync_buttons();
        } else {
            self.offset = 0;
            self.buttons = None;
        }

        (
            Effect::Relayout {
                created: self.is_created(),
            },
            self.scroll_task(),
        )
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.resize_timer.take() {
            handle.abort();
        }
    }

    fn sync_buttons(&mut self) {
        let can_back = self.layout.can_scroll_back(self.offset);
        let can_forward = self.layout.can_scroll_forward(self.offset);
        if let Some(buttons) = self.buttons.as_mut() {
            buttons.left.set_class("disabled", !can_back);
            buttons.right.set_class("disabled", !can_forward);
        }
    }

    fn scroll_task(&self) -> Task<Message> {
        operation::scroll_to(
            self.list_id.clone(),
            AbsoluteOffset {
                x: -self.offset as f32,
                y: 0.0,
            },
        )
    }

    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[must_use]
    pub fn layout(&self) -> &ScrollerLayout {
        &self.layout
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        self.buttons.is_some()
    }

    #[must_use]
    pub fn has_pending_resize(&self) -> bool {
        self.resize_timer.is_some()
    }

    /// Horizontal padding on each side of the list.
    #[must_use]
    pub fn padding(&self) -> u32 {
        self.config.padding
    }

    #[must_use]
    pub fn container(&self) -> NodeId {
        self.container
    }

    #[must_use]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    #[must_use]
    pub fn list_id(&self) -> &Id {
        &self.list_id
    }

    #[must_use]
    pub fn left_button(&self) -> Option<&ButtonSpec<Message>> {
        self.buttons.as_ref().map(|b| &b.left)
    }

    #[must_use]
    pub fn right_button(&self) -> Option<&ButtonSpec<Message>> {
        self.buttons.as_ref().map(|b| &b.right)
    }
}
