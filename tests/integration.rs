// SPDX-License-Identifier: MPL-2.0
use ila_ui::app::{App, Message};
use ila_ui::config::{self, Config};
use ila_ui::document::Document;
use ila_ui::error::Error;
use ila_ui::i18n::fluent::I18n;
use ila_ui::ui::toggler::{self, Visibility};
use ila_ui::ui::{scroller, viewer};
use std::fs;
use tempfile::tempdir;

const PAGE: &str = r#"
title = "Trip"

[[body]]
tag = "h2"
text = "Pictures"

[[body]]
tag = "ul"
class = "scroller"

  [[body.children]]
  tag = "li"
    [[body.children.children]]
    tag = "img"
    class = "gallery"
    attrs = { src = "one.png", alt = "One" }

  [[body.children]]
  tag = "li"
    [[body.children.children]]
    tag = "img"
    class = "gallery"
    attrs = { src = "two.png", alt = "Two", "data-reveal" = "" }

  [[body.children]]
  tag = "li"
    [[body.children.children]]
    tag = "img"
    class = "gallery"
    attrs = { src = "three.png", alt = "Three" }

[[body]]
tag = "button"
attrs = { "data-toggle-target" = "notes", "data-toggle-text" = "Hide notes" }

  [[body.children]]
  tag = "span"
  class = "toggle-text"
  text = "Show notes"

[[body]]
tag = "div"
id = "notes"
text = "Taken in spring."
"#;

const CONFIG: &str = r#"
[viewer]
target_class = "gallery"
show_download = "yes"

[scroller]
padding = 0
breakpoints = [[0, 2]]
"#;

fn load_app() -> App {
    let dir = tempdir().expect("temp dir");
    let page_path = dir.path().join("page.toml");
    let config_path = dir.path().join("config.toml");
    fs::write(&page_path, PAGE).expect("page written");
    fs::write(&config_path, CONFIG).expect("config written");

    let overrides = config::read_overrides(&config_path).expect("config parsed");
    let i18n = I18n::new(Some("en-US".into()), config::language_override(&overrides));
    let config = Config::resolve(&Config::localized(&i18n), &overrides).expect("config merged");
    let document = Document::load(&page_path).expect("page loaded");

    App::with_document(i18n, config, document).0
}

#[test]
fn partial_config_merges_over_defaults() {
    let app = load_app();
    let config = app.config();

    assert_eq!(config.viewer.target_class, "gallery");
    // Mistyped value keeps the default.
    assert!(!config.viewer.show_download);
    assert_eq!(config.scroller.breakpoints, config::breakpoint_table(&[(0, 2)]));
    assert_eq!(config.scroller.padding, 0);
}

#[test]
fn page_widgets_are_bound() {
    let app = load_app();

    assert_eq!(app.viewer().entries().len(), 3);
    assert!(app.viewer().entries()[1].requires_reveal);
    assert_eq!(app.scrollers().len(), 1);
    assert!(app.scrollers()[0].is_created());
    assert_eq!(app.togglers().len(), 1);
    assert!(app.status().is_none());
}

#[test]
fn viewer_navigation_wraps_and_releases_scroll_lock() {
    let mut app = load_app();

    let _ = app.update(Message::Viewer(viewer::Message::Show(2)));
    assert!(app.is_page_scroll_locked());

    let _ = app.update(Message::Viewer(viewer::Message::Next));
    assert_eq!(app.viewer().viewer_state().active_index, Some(0));

    let _ = app.update(Message::Viewer(viewer::Message::Prev));
    assert_eq!(app.viewer().viewer_state().active_index, Some(2));

    let _ = app.update(Message::Viewer(viewer::Message::Hide));
    assert!(!app.is_page_scroll_locked());
    assert!(!app.viewer().is_active());
}

#[test]
fn stale_viewer_load_is_ignored() {
    let mut app = load_app();

    let _ = app.update(Message::Viewer(viewer::Message::Show(0)));
    let stale = app.viewer().current_entry().expect("entry").url.clone();
    let _ = app.update(Message::Viewer(viewer::Message::Next));

    let _ = app.update(Message::Viewer(viewer::Message::ProbeLoaded {
        url: stale,
        result: Err(Error::Network("late".into())),
    }));

    assert!(app.viewer().is_loading());
    assert!(app.status().is_none());
}

#[test]
fn scroller_steps_through_the_list() {
    let mut app = load_app();
    let before = app.scrollers()[0].offset();

    let _ = app.update(Message::Scroller {
        index: 0,
        message: scroller::Message::ScrollRight,
    });
    let after = app.scrollers()[0].offset();
    assert!(after < before);

    let _ = app.update(Message::Scroller {
        index: 0,
        message: scroller::Message::ScrollLeft,
    });
    assert_eq!(app.scrollers()[0].offset(), before);
}

#[test]
fn window_resize_schedules_scroller_relayout() {
    let mut app = load_app();

    let _ = app.update(Message::WindowResized(iced::Size::new(800.0, 600.0)));

    assert!(app.scrollers()[0].has_pending_resize());
}

#[test]
fn toggler_label_follows_visibility() {
    let mut app = load_app();
    let source = app.togglers()[0].source();
    let span = app.document().descendants(source)[0];
    assert_eq!(app.togglers()[0].label_for(span), Some("Show notes"));

    let _ = app.update(Message::Toggler {
        index: 0,
        message: toggler::Message::Toggle,
    });

    assert_eq!(app.togglers()[0].visibility(), Visibility::Showing);
    assert_eq!(app.togglers()[0].label_for(span), Some("Hide notes"));
}
