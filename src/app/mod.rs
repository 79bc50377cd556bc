// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the page widgets.
//!
//! The app owns the parsed page and one component per widget instance found
//! in it: a single image viewer for every `img.{target_class}`, a scroller
//! per `ul.scroller` and a toggler per element carrying
//! `data-toggle-target`. Widget effects that reach outside a component
//! (page scroll lock, downloads, external links) are carried out here.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, Config, SCROLLER_CLASS};
use crate::document::{Document, NodeId};
use crate::i18n::fluent::I18n;
use crate::media;
use crate::ui::design_tokens::spacing;
use crate::ui::{scroller, toggler, viewer};
use iced::widget::image;
use iced::{window, Size, Subscription, Task, Theme};
use std::collections::{BTreeSet, HashMap};

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
pub const MIN_WINDOW_WIDTH: f32 = 320.0;
pub const MIN_WINDOW_HEIGHT: f32 = 240.0;

/// Horizontal padding around the page content.
pub const PAGE_PADDING: f32 = spacing::LG;

pub struct App {
    i18n: I18n,
    config: Config,
    document: Document,
    viewer: viewer::State,
    scrollers: Vec<scroller::State>,
    togglers: Vec<toggler::State>,
    /// Decoded page thumbnails keyed by their URL.
    thumbnails: HashMap<String, image::Handle>,
    window_size: Size,
    page_scroll_locked: bool,
    /// Last user-facing notice (config warnings, failed loads, downloads).
    status: Option<String>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("scrollers", &self.scrollers.len())
            .field("togglers", &self.togglers.len())
            .field("window_size", &self.window_size)
            .field("page_scroll_locked", &self.page_scroll_locked)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an `Fn` boot closure; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Width available to page widgets inside a window of `window_width`.
fn content_width(window_width: f32) -> f32 {
    (window_width - 2.0 * PAGE_PADDING).max(0.0)
}

impl App {
    /// Loads the configuration and the page, then binds every widget.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (overrides, config_warning) = config::load(flags.config_path.clone());
        let i18n = I18n::new(flags.lang.clone(), config::language_override(&overrides));

        let mut status = config_warning.map(|key| i18n.tr(&key));
        let defaults = Config::localized(&i18n);
        let config = match Config::resolve(&defaults, &overrides) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("invalid configuration, using defaults: {err}");
                status = Some(i18n.tr(err.i18n_key()));
                defaults
            }
        };

        let document = match flags.page_path.as_deref().map(Document::load) {
            Some(Ok(document)) => document,
            Some(Err(err)) => {
                tracing::error!("failed to load page: {err}");
                status = Some(i18n.tr(err.i18n_key()));
                Document::default()
            }
            None => Document::default(),
        };

        let (mut app, task) = Self::with_document(i18n, config, document);
        if app.status.is_none() {
            app.status = status;
        }
        (app, task)
    }

    /// Binds the widgets of an already loaded page.
    ///
    /// Returns the thumbnail loads for every distinct viewer image.
    pub fn with_document(i18n: I18n, config: Config, mut document: Document) -> (Self, Task<Message>) {
        let window_size = Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT);
        let mut status = None;

        let viewer = viewer::State::new(&mut document, config.viewer.clone(), None);

        let mut scrollers = Vec::new();
        for container in document.elements_with_class("ul", SCROLLER_CLASS) {
            match scroller::State::new(
                &document,
                container,
                config.scroller.clone(),
                window_size.width,
                content_width(window_size.width),
            ) {
                Ok(scroller) => scrollers.push(scroller),
                Err(err) => {
                    tracing::error!(container, "scroller not created: {err}");
                    status = Some(i18n.tr(err.i18n_key()));
                }
            }
        }

        let sources: Vec<NodeId> = document
            .traverse()
            .into_iter()
            .filter(|id| document.node(*id).data("toggle-target").is_some())
            .collect();
        let mut togglers = Vec::new();
        for source in sources {
            match toggler::State::new(&mut document, source, None, None) {
                Ok(toggler) => togglers.push(toggler),
                Err(err) => {
                    tracing::error!(source, "toggler not created: {err}");
                    status = Some(i18n.tr(err.i18n_key()));
                }
            }
        }

        let urls: BTreeSet<String> = viewer
            .entries()
            .iter()
            .map(|entry| entry.thumbnail.clone())
            .collect();
        let loads = Task::batch(urls.into_iter().map(|url| {
            Task::perform(media::load(url, false), |(url, result)| {
                Message::ThumbnailLoaded { url, result }
            })
        }));

        tracing::info!(
            images = viewer.entries().len(),
            scrollers = scrollers.len(),
            togglers = togglers.len(),
            "page bound"
        );

        let app = Self {
            i18n,
            config,
            document,
            viewer,
            scrollers,
            togglers,
            thumbnails: HashMap::new(),
            window_size,
            page_scroll_locked: false,
            status,
        };
        (app, loads)
    }

    fn title(&self) -> String {
        let page = self.document.title();
        if page.is_empty() {
            self.i18n.tr("window-title")
        } else {
            format!("{page} - {}", self.i18n.tr("window-title"))
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            self.viewer.subscription().map(Message::Viewer),
        ])
    }

    #[must_use]
    pub fn viewer(&self) -> &viewer::State {
        &self.viewer
    }

    #[must_use]
    pub fn scrollers(&self) -> &[scroller::State] {
        &self.scrollers
    }

    #[must_use]
    pub fn togglers(&self) -> &[toggler::State] {
        &self.togglers
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn is_page_scroll_locked(&self) -> bool {
        self.page_scroll_locked
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    #[must_use]
    pub fn has_thumbnail(&self, url: &str) -> bool {
        self.thumbnails.contains_key(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ui::toggler::Visibility;

    const PAGE: &str = r#"
title = "Gallery"

[[body]]
tag = "h1"
text = "Holidays"

[[body]]
tag = "ul"
class = "scroller"

  [[body.children]]
  tag = "li"

    [[body.children.children]]
    tag = "img"
    class = "viewer"
    attrs = { src = "a.jpg", alt = "First" }

  [[body.children]]
  tag = "li"

    [[body.children.children]]
    tag = "img"
    class = "viewer"
    attrs = { src = "b.jpg", alt = "Second" }

[[body]]
tag = "button"
text = "More"
attrs = { "data-toggle-target" = "details" }

[[body]]
tag = "button"
text = "Broken"
attrs = { "data-toggle-target" = "nowhere" }

[[body]]
tag = "div"
id = "details"
text = "Details"
"#;

    fn app() -> App {
        let i18n = I18n::new(Some("en-US".into()), None);
        let config = Config::localized(&i18n);
        let document = Document::from_toml_str(PAGE, None).expect("valid page");
        App::with_document(i18n, config, document).0
    }

    #[test]
    fn binds_every_widget_of_the_page() {
        let app = app();
        assert_eq!(app.viewer().entries().len(), 2);
        assert_eq!(app.scrollers().len(), 1);
        assert_eq!(app.togglers().len(), 1);
        assert!(app.status().is_some(), "broken toggler is reported");
    }

    #[test]
    fn bad_row_count_only_disables_the_scroller() {
        let i18n = I18n::new(Some("en-US".into()), None);
        let overrides: toml::Table =
            toml::from_str("[viewer]\npanzoom = true\n[scroller]\nbreakpoints = [[0, \"four\"]]")
                .expect("valid toml");
        let config = Config::resolve(&Config::localized(&i18n), &toml::Value::Table(overrides))
            .expect("resolves");
        let document = Document::from_toml_str(PAGE, None).expect("valid page");

        let (app, _) = App::with_document(i18n, config, document);

        assert!(app.config().viewer.panzoom);
        assert!(app.viewer().has_pan());
        assert!(app.scrollers().is_empty());
        assert!(app.status().is_some());
    }

    #[test]
    fn title_includes_page_title() {
        let app = app();
        assert!(app.title().starts_with("Gallery - "));
    }

    #[test]
    fn viewer_show_and_hide_lock_page_scroll() {
        let mut app = app();

        let _ = app.update(Message::Viewer(viewer::Message::Show(0)));
        assert!(app.is_page_scroll_locked());
        assert!(app.viewer().is_active());

        let _ = app.update(Message::Viewer(viewer::Message::Hide));
        assert!(!app.is_page_scroll_locked());
    }

    #[test]
    fn toggler_messages_are_routed_by_index() {
        let mut app = app();

        let _ = app.update(Message::Toggler {
            index: 0,
            message: toggler::Message::Show,
        });
        assert_eq!(app.togglers()[0].visibility(), Visibility::Showing);

        let _ = app.update(Message::Toggler {
            index: 7,
            message: toggler::Message::Show,
        });
    }

    #[test]
    fn thumbnails_are_stored_and_failures_ignored() {
        let mut app = app();
        let image = media::image::decode(&png_bytes(), false).expect("decoded");

        let _ = app.update(Message::ThumbnailLoaded {
            url: "a.jpg".into(),
            result: Ok(image),
        });
        let _ = app.update(Message::ThumbnailLoaded {
            url: "b.jpg".into(),
            result: Err(Error::Network("offline".into())),
        });

        assert!(app.has_thumbnail("a.jpg"));
        assert!(!app.has_thumbnail("b.jpg"));
    }

    #[test]
    fn failed_viewer_load_sets_status() {
        let mut app = app();
        app.status = None;
        let _ = app.update(Message::Viewer(viewer::Message::Show(1)));
        let url = app.viewer().current_entry().expect("entry").url.clone();

        let _ = app.update(Message::Viewer(viewer::Message::ProbeLoaded {
            url,
            result: Err(Error::Network("offline".into())),
        }));

        assert!(app.status().is_some());
        let _ = app.update(Message::DismissStatus);
        assert!(app.status().is_none());
    }

    #[test]
    fn cancelled_download_dialog_does_nothing() {
        let mut app = app();
        app.status = None;
        let _ = app.update(Message::DownloadTargetChosen {
            url: "a.jpg".into(),
            path: None,
        });
        assert!(app.status().is_none());

        let _ = app.update(Message::DownloadFinished(Ok("/tmp/a.jpg".into())));
        assert!(app.status().is_some());
    }

    #[test]
    fn content_width_subtracts_page_padding() {
        assert_eq!(content_width(1000.0), 1000.0 - 2.0 * PAGE_PADDING);
        assert_eq!(content_width(10.0), 0.0);
    }

    fn png_bytes() -> Vec<u8> {
        use image_rs::{ImageFormat, Rgba, RgbaImage};
        let mut bytes = std::io::Cursor::new(Vec::new());
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]))
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("encoded");
        bytes.into_inner()
    }
}
