// SPDX-License-Identifier: MPL-2.0
//! Rendering of the page with its widgets and the viewer overlay on top.

use super::{App, Message, PAGE_PADDING};
use crate::document::NodeId;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::{scroller, toggler, viewer};
use iced::alignment::Vertical;
use iced::widget::{button, Column, Container, Row, Scrollable, Space, Stack, Text};
use iced::{Element, Length};
use std::collections::HashMap;

/// Opacity of a toggled panel while it fades in or out.
const TRANSITION_OPACITY: f32 = 0.5;

/// Lookup of the widget bound to each page node.
struct Page<'a> {
    app: &'a App,
    images: HashMap<NodeId, usize>,
    scrollers: HashMap<NodeId, usize>,
    toggle_sources: HashMap<NodeId, usize>,
    toggle_targets: HashMap<NodeId, usize>,
}

impl<'a> Page<'a> {
    fn new(app: &'a App) -> Self {
        let images = app
            .viewer
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.node, index))
            .collect();
        let scrollers = app
            .scrollers
            .iter()
            .enumerate()
            .map(|(index, scroller)| (scroller.container(), index))
            .collect();
        let toggle_sources = app
            .togglers
            .iter()
            .enumerate()
            .map(|(index, toggler)| (toggler.source(), index))
            .collect();
        let toggle_targets = app
            .togglers
            .iter()
            .enumerate()
            .map(|(index, toggler)| (toggler.target(), index))
            .collect();

        Self {
            app,
            images,
            scrollers,
            toggle_sources,
            toggle_targets,
        }
    }

    fn node(&self, id: NodeId) -> Element<'a, Message> {
        let app = self.app;

        if let Some(&index) = self.images.get(&id) {
            let thumbnail = app.viewer.entries().get(index).map(|e| e.thumbnail.as_str());
            let handle = thumbnail.and_then(|url| app.thumbnails.get(url));
            return viewer::view::thumbnail(&app.viewer, index, handle).map(Message::Viewer);
        }

        if let Some(&index) = self.scrollers.get(&id) {
            let state = &app.scrollers[index];
            let items = state.items().iter().map(|&item| self.node(item)).collect();
            return scroller::view::view(state, items, move |message| Message::Scroller {
                index,
                message,
            });
        }

        if let Some(&index) = self.toggle_sources.get(&id) {
            return button(self.content(id))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary)
                .on_press(Message::Toggler {
                    index,
                    message: toggler::Message::Toggle,
                })
                .into();
        }

        if let Some(&index) = self.toggle_targets.get(&id) {
            let visibility = app.togglers[index].visibility();
            if !visibility.is_rendered() {
                return Space::new().width(Length::Shrink).height(Length::Shrink).into();
            }
            let progress = if visibility.is_transitioning() {
                TRANSITION_OPACITY
            } else {
                1.0
            };
            return Container::new(self.content(id))
                .width(Length::Fill)
                .padding(spacing::MD)
                .style(styles::container::fading(progress))
                .into();
        }

        self.content(id)
    }

    /// Node text followed by its children.
    fn content(&self, id: NodeId) -> Element<'a, Message> {
        let app = self.app;
        let node = app.document.node(id);
        let size = match node.tag.as_str() {
            "h1" => typography::TITLE_LG,
            "h2" => typography::TITLE_MD,
            "h3" => typography::TITLE_SM,
            "figcaption" | "small" => typography::CAPTION,
            _ => typography::BODY,
        };

        let label = app
            .togglers
            .iter()
            .find_map(|toggler| toggler.label_for(id));
        let text: &'a str = match label {
            Some(label) => label,
            None if node.tag == "img" => node.attr("alt").unwrap_or_default(),
            None => node.text.as_str(),
        };

        if node.children.is_empty() || label.is_some() {
            return Text::new(text).size(size).into();
        }

        let mut column = Column::new().spacing(spacing::XS);
        if !text.trim().is_empty() {
            column = column.push(Text::new(text).size(size));
        }
        node.children
            .iter()
            .fold(column, |column, &child| column.push(self.node(child)))
            .into()
    }
}

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let page = Page::new(self);

        let mut body = Column::new()
            .width(Length::Fill)
            .spacing(spacing::MD)
            .padding(PAGE_PADDING);
        if self.document.is_empty() {
            body = body.push(Text::new(self.i18n.tr("page-empty")).size(typography::BODY));
        }
        body = self
            .document
            .roots()
            .iter()
            .fold(body, |body, &root| body.push(page.node(root)));

        // The page stays still while the overlay holds the scroll lock.
        let content: Element<'_, Message> = if self.page_scroll_locked {
            Container::new(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .clip(true)
                .into()
        } else {
            Scrollable::new(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .into()
        };

        let mut layout = Column::new().width(Length::Fill).height(Length::Fill);
        if let Some(status) = &self.status {
            layout = layout.push(self.status_banner(status));
        }
        layout = layout.push(content);

        let mut stack = Stack::new().width(Length::Fill).height(Length::Fill).push(layout);
        if self.viewer.is_active() {
            stack = stack.push(viewer::view::overlay(&self.viewer).map(Message::Viewer));
        }
        stack.into()
    }

    fn status_banner<'a>(&'a self, status: &'a str) -> Element<'a, Message> {
        let row = Row::new()
            .spacing(spacing::SM)
            .align_y(Vertical::Center)
            .push(Text::new(status).size(typography::BODY).width(Length::Fill))
            .push(
                button(Text::new("×").size(typography::BODY))
                    .padding([spacing::XXS, spacing::XS])
                    .style(styles::button::primary)
                    .on_press(Message::DismissStatus),
            );

        Container::new(row)
            .width(Length::Fill)
            .padding([spacing::XS, PAGE_PADDING])
            .style(styles::container::panel)
            .into()
    }
}
