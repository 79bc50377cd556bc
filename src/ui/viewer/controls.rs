// SPDX-License-Identifier: MPL-2.0
//! Viewer control bar.
//!
//! Every viewer owns its own set of [`ButtonSpec`]s, created once from the
//! configuration and refreshed after each image load.

use super::component::Message;
use super::entry::ImageEntry;
use crate::config::ViewerConfig;
use crate::ui::button::{make_button, ButtonSpec, Tag};

const CONTROL_CLASS: &str = "viewer-control";

#[derive(Debug, Clone)]
pub struct Controls {
    pub hide: ButtonSpec<Message>,
    pub prev: ButtonSpec<Message>,
    pub next: ButtonSpec<Message>,
    /// Present only with a pan controller.
    pub zoom: Option<ButtonSpec<Message>>,
    pub reveal: ButtonSpec<Message>,
    /// Present when `show_download` is set.
    pub download: Option<ButtonSpec<Message>>,
    /// Present when `show_link` is set.
    pub link: Option<ButtonSpec<Message>>,
    navigation_visible: bool,
    reveal_visible: bool,
    link_visible: bool,
}

fn control(
    name: &str,
    text: &str,
    icon: &str,
    title: &str,
    handler: Message,
    tag: Tag,
) -> ButtonSpec<Message> {
    make_button(name, CONTROL_CLASS, text, title, Some(icon), Some(handler), tag)
}

/// Swaps a control between its normal and active labels.
///
/// Empty texts and icons leave the current value in place; the title is
/// always replaced.
fn swap_variant(button: &mut ButtonSpec<Message>, text: &str, icon: &str, title: &str) {
    if !text.is_empty() {
        button.text = text.to_string();
    }
    if !icon.is_empty() {
        button.icon = Some(icon.to_string());
    }
    button.title = title.to_string();
}

impl Controls {
    pub fn new(config: &ViewerConfig, has_pan: bool, image_count: usize) -> Self {
        let (texts, icons, titles) = (&config.texts, &config.icons, &config.titles);

        let zoom = has_pan.then(|| {
            control(
                "zoom",
                &texts.zoom,
                &icons.zoom,
                &titles.zoom,
                Message::Zoom,
                Tag::Button,
            )
        });
        let download = config.show_download.then(|| {
            control(
                "download",
                &texts.download,
                &icons.download,
                &titles.download,
                Message::Download,
                Tag::Anchor { href: None },
            )
        });
        let link = config.show_link.then(|| {
            control(
                "link",
                &texts.link,
                &icons.link,
                &titles.link,
                Message::OpenLink,
                Tag::Anchor { href: None },
            )
        });

        Self {
            hide: control(
                "hide",
                &texts.hide,
                &icons.hide,
                &titles.hide,
                Message::Hide,
                Tag::Button,
            ),
            prev: control(
                "prev",
                &texts.prev,
                &icons.prev,
                &titles.prev,
                Message::Prev,
                Tag::Button,
            ),
            next: control(
                "next",
                &texts.next,
                &icons.next,
                &titles.next,
                Message::Next,
                Tag::Button,
            ),
            zoom,
            reveal: control(
                "reveal",
                &texts.reveal,
                &icons.reveal,
                &titles.reveal,
                Message::Reveal,
                Tag::Button,
            ),
            download,
            link,
            navigation_visible: image_count > 1,
            reveal_visible: false,
            link_visible: false,
        }
    }

    /// Switches the zoom control between its normal and active variant.
    pub fn set_zoomed(&mut self, config: &ViewerConfig, zoomed: bool) {
        let Some(zoom) = self.zoom.as_mut() else {
            return;
        };
        let (texts, icons, titles) = (&config.texts, &config.icons, &config.titles);
        if zoomed {
            swap_variant(zoom, &texts.zoom_active, &icons.zoom_active, &titles.zoom_active);
        } else {
            swap_variant(zoom, &texts.zoom, &icons.zoom, &titles.zoom);
        }
        zoom.set_class("zoomed", zoomed);
    }

    /// Switches the reveal control; `revealed` selects the active variant.
    pub fn set_revealed(&mut self, config: &ViewerConfig, revealed: bool) {
        let (texts, icons, titles) = (&config.texts, &config.icons, &config.titles);
        if revealed {
            swap_variant(
                &mut self.reveal,
                &texts.reveal_active,
                &icons.reveal_active,
                &titles.reveal_active,
            );
        } else {
            swap_variant(&mut self.reveal, &texts.reveal, &icons.reveal, &titles.reveal);
        }
        self.reveal.set_class("active", revealed);
    }

    /// Updates the controls for a freshly displayed image.
    pub fn refresh(
        &mut self,
        config: &ViewerConfig,
        entry: &ImageEntry,
        zoom_enabled: bool,
        zoomed: bool,
    ) {
        if let Some(download) = self.download.as_mut() {
            download.tag = Tag::Anchor {
                href: Some(entry.url.clone()),
            };
        }

        if let Some(link) = self.link.as_mut() {
            link.tag = Tag::Anchor {
                href: entry.link.clone(),
            };
            self.link_visible = entry.link.is_some();
        }

        // A zoomed image can always be reset, even once it fits.
        if let Some(zoom) = self.zoom.as_mut() {
            zoom.set_class("disabled", !zoom_enabled && !zoomed);
            zoom.title = if zoomed {
                config.titles.zoom_active.clone()
            } else if !zoom_enabled {
                config.titles.zoom_disabled.clone()
            } else {
                config.titles.zoom.clone()
            };
        }

        self.reveal_visible = entry.requires_reveal;
    }

    /// Controls to render, in bar order.
    #[must_use]
    pub fn visible(&self) -> Vec<&ButtonSpec<Message>> {
        let mut buttons = vec![&self.hide];
        if self.navigation_visible {
            buttons.push(&self.prev);
            buttons.push(&self.next);
        }
        if let Some(zoom) = &self.zoom {
            buttons.push(zoom);
        }
        if self.reveal_visible {
            buttons.push(&self.reveal);
        }
        if let Some(download) = &self.download {
            buttons.push(download);
        }
        if let Some(link) = self.link.as_ref().filter(|_| self.link_visible) {
            buttons.push(link);
        }
        buttons
    }
}
