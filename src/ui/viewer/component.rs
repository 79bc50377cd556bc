// SPDX-License-Identifier: MPL-2.0
//! Image viewer component encapsulating state and update logic.
//!
//! Loading an image takes two awaited steps (fetch, then decode). The URL of
//! the wanted image is kept in [`ViewerState::loading_token`]; each step
//! re-checks it so that a slow load finishing after a newer navigation never
//! replaces the newer image.

use super::controls::Controls;
use super::entry::{self, ImageEntry};
use super::state::{RevealMode, ViewerState, Visibility, ZoomMode};
use crate::config::ViewerConfig;
use crate::document::Document;
use crate::error::Error;
use crate::media::{self, Bytes, ImageData};
use crate::ui::pan::{drag_pan_factory, PanController, PanCursor, PanFactory};
use crate::ui::swipe::{self, Direction};
use iced::widget::scrollable::{AbsoluteOffset, RelativeOffset};
use iced::widget::{operation, Id};
use iced::{event, keyboard, mouse, time, touch, window, Point, Size, Subscription, Task};
use std::time::Duration;

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.1;

/// Interval between spinner animation frames.
const SPINNER_TICK: Duration = Duration::from_millis(16);

#[derive(Debug, Clone)]
pub enum Message {
    /// Open the overlay on the given image.
    Show(usize),
    /// Open the overlay on the last active image.
    Resume,
    Hide,
    Next,
    Prev,
    Zoom,
    Reveal,
    /// Left press on the zoomed image; starts a pan drag.
    PanPressed,
    /// First await: the image bytes were fetched.
    ProbeLoaded {
        url: String,
        result: Result<Bytes, Error>,
    },
    /// Second await: the bytes were decoded for display.
    DisplayLoaded {
        url: String,
        result: Result<ImageData, Error>,
    },
    Download,
    OpenLink,
    SpinnerTick,
    RawEvent {
        window: window::Id,
        event: event::Event,
    },
}

/// Side effects the host has to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The overlay opened; the page behind it must stop scrolling.
    LockPageScroll,
    /// The overlay closed; page scrolling is restored.
    UnlockPageScroll,
    Download { url: String },
    OpenLink { url: String },
    /// A fetch or decode failed; the viewer keeps showing its loader.
    LoadFailed { url: String, error: Error },
}

#[derive(Debug)]
pub struct State {
    config: ViewerConfig,
    entries: Vec<ImageEntry>,
    state: ViewerState,
    controls: Controls,
    swipe: swipe::State,
    pan: Option<Box<dyn PanController>>,
    pan_viewport: Id,
    display: Option<ImageData>,
    alt: String,
    caption: Option<String>,
    loading: bool,
    spinner_rotation: f32,
    viewport: Option<Size>,
    cursor_position: Option<Point>,
}

impl State {
    /// Creates a viewer over the `img.{target_class}` nodes of `document`.
    ///
    /// With `panzoom` enabled the injected factory provides the pan
    /// controller; without one the built-in drag controller is used.
    pub fn new(document: &mut Document, config: ViewerConfig, pan: Option<PanFactory>) -> Self {
        let entries = entry::collect(document, &config);

        let pan = config.panzoom.then(|| {
            let factory = pan.unwrap_or_else(drag_pan_factory);
            let mut controller = factory();
            // Freshly created controllers start in the fully switched-off state.
            controller.reset();
            controller.set_cursor(PanCursor::Auto);
            controller.destroy();
            controller
        });

        let controls = Controls::new(&config, pan.is_some(), entries.len());
        tracing::info!(
            images = entries.len(),
            panzoom = pan.is_some(),
            target = %config.target_class,
            "image viewer created"
        );

        Self {
            config,
            entries,
            state: ViewerState::default(),
            controls,
            swipe: swipe::State::attached(),
            pan,
            pan_viewport: Id::unique(),
            display: None,
            alt: String::new(),
            caption: None,
            loading: false,
            spinner_rotation: 0.0,
            viewport: None,
            cursor_position: None,
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Show(index) => self.show(index),
            Message::Resume => self.show(self.state.active_index.unwrap_or(0)),
            Message::Hide => (self.hide(), Task::none()),
            Message::Next => self.step(true),
            Message::Prev => self.step(false),
            Message::Zoom => (Effect::None, self.zoom()),
            Message::Reveal => {
                self.reveal();
                (Effect::None, Task::none())
            }
            Message::PanPressed => {
                self.begin_pan();
                (Effect::None, Task::none())
            }
            Message::ProbeLoaded { url, result } => self.probe_loaded(url, result),
            Message::DisplayLoaded { url, result } => (self.display_loaded(url, result), Task::none()),
            Message::Download => {
                let effect = match (self.config.show_download, self.current_entry()) {
                    (true, Some(entry)) => Effect::Download {
                        url: entry.url.clone(),
                    },
                    _ => Effect::None,
                };
                (effect, Task::none())
            }
            Message::OpenLink => {
                let effect = self
                    .current_entry()
                    .and_then(|entry| entry.link.clone())
                    .map_or(Effect::None, |url| Effect::OpenLink { url });
                (effect, Task::none())
            }
            Message::SpinnerTick => {
                if self.loading {
                    self.spinner_rotation += SPINNER_SPEED;
                    if self.spinner_rotation > std::f32::consts::TAU {
                        self.spinner_rotation -= std::f32::consts::TAU;
                    }
                }
                (Effect::None, Task::none())
            }
            Message::RawEvent { event, .. } => self.handle_raw_event(event),
        }
    }

    fn show(&mut self, index: usize) -> (Effect, Task<Message>) {
        if index >= self.entries.len() {
            tracing::debug!(index, count = self.entries.len(), "ignoring show for unknown image");
            return (Effect::None, Task::none());
        }

        let effect = if self.state.visibility == Visibility::Hidden {
            self.state.visibility = Visibility::Active;
            Effect::LockPageScroll
        } else {
            Effect::None
        };

        (effect, self.show_image(index))
    }

    fn hide(&mut self) -> Effect {
        if !self.state.is_active() {
            return Effect::None;
        }
        if self.state.is_zoomed() {
            self.leave_zoom();
        }
        self.state.visibility = Visibility::Hidden;
        Effect::UnlockPageScroll
    }

    fn step(&mut self, forward: bool) -> (Effect, Task<Message>) {
        match self.state.step(self.entries.len(), forward) {
            Some(index) => self.show(index),
            None => (Effect::None, Task::none()),
        }
    }

    fn show_image(&mut self, index: usize) -> Task<Message> {
        self.state.active_index = Some(index);

        if self.state.is_zoomed() {
            self.leave_zoom();
        }

        self.loading = true;
        self.display = None;
        self.alt.clear();
        self.caption = None;

        let url = self.entries[index].url.clone();
        self.state.loading_token = Some(url.clone());
        tracing::debug!(index, url = %url, "loading image");

        Task::perform(media::probe(url), |(url, result)| Message::ProbeLoaded {
            url,
            result,
        })
    }

    fn probe_loaded(&mut self, url: String, result: Result<Bytes, Error>) -> (Effect, Task<Message>) {
        if !self.state.wants(&url) {
            tracing::debug!(url = %url, "discarding stale image fetch");
            return (Effect::None, Task::none());
        }

        match result {
            Ok(bytes) => {
                let blur = self.current_entry().is_some_and(|e| e.requires_reveal);
                let task = Task::perform(media::decode_bytes(url, bytes, blur), |(url, result)| {
                    Message::DisplayLoaded { url, result }
                });
                (Effect::None, task)
            }
            Err(error) => (self.load_failed(url, error), Task::none()),
        }
    }

    fn display_loaded(&mut self, url: String, result: Result<ImageData, Error>) -> Effect {
        if !self.state.wants(&url) {
            tracing::debug!(url = %url, "discarding stale decoded image");
            return Effect::None;
        }

        let image = match result {
            Ok(image) => image,
            Err(error) => return self.load_failed(url, error),
        };
        let Some(entry) = self.current_entry().cloned() else {
            return Effect::None;
        };

        self.state.loading_token = None;
        self.display = Some(image);
        self.alt = entry.alt.clone();
        self.loading = false;
        self.spinner_rotation = 0.0;
        self.caption = entry.caption.clone();
        self.state.reveal = if entry.requires_reveal {
            RevealMode::Blurred
        } else {
            RevealMode::Revealed
        };
        self.controls
            .set_revealed(&self.config, self.state.reveal == RevealMode::Revealed);
        self.refresh_controls();
        tracing::debug!(url = %url, "image displayed");
        Effect::None
    }

    fn load_failed(&mut self, url: String, error: Error) -> Effect {
        tracing::warn!(url = %url, "image load failed: {error}");
        Effect::LoadFailed { url, error }
    }

    fn refresh_controls(&mut self) {
        let zoom_enabled = self.zoom_enabled();
        let zoomed = self.state.is_zoomed();
        if let Some(entry) = self.state.active_index.and_then(|i| self.entries.get(i)) {
            self.controls
                .refresh(&self.config, entry, zoom_enabled, zoomed);
        }
    }

    /// Zooming only makes sense when the natural size exceeds the viewport.
    fn zoom_enabled(&self) -> bool {
        match (&self.display, self.viewport) {
            (Some(image), Some(viewport)) => !image.fits_within((viewport.width, viewport.height)),
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Leaving zoom is always possible; entering needs an oversized image.
    fn zoom(&mut self) -> Task<Message> {
        if self.pan.is_none() {
            return Task::none();
        }
        match self.state.zoom {
            ZoomMode::Unzoomed if self.zoom_enabled() => self.enter_zoom(),
            ZoomMode::Unzoomed => Task::none(),
            ZoomMode::Zoomed => {
                self.leave_zoom();
                Task::none()
            }
        }
    }

    fn enter_zoom(&mut self) -> Task<Message> {
        let limits = self.pan_limits();
        let Some(pan) = self.pan.as_mut() else {
            return Task::none();
        };
        self.swipe.handle(swipe::Message::Detach);
        pan.bind();
        pan.set_cursor(PanCursor::Move);
        if let Some(limits) = limits {
            pan.set_limits(limits);
        }
        self.state.zoom = ZoomMode::Zoomed;
        self.controls.set_zoomed(&self.config, true);
        operation::snap_to(self.pan_viewport.clone(), RelativeOffset { x: 0.0, y: 0.0 })
    }

    fn leave_zoom(&mut self) {
        if let Some(pan) = self.pan.as_mut() {
            pan.reset();
            pan.set_cursor(PanCursor::Auto);
            pan.destroy();
        }
        self.swipe.handle(swipe::Message::Attach);
        self.state.zoom = ZoomMode::Unzoomed;
        self.controls.set_zoomed(&self.config, false);
        if self.display.is_some() {
            self.refresh_controls();
        }
    }

    fn begin_pan(&mut self) {
        if !self.state.is_zoomed() {
            return;
        }
        if let (Some(pan), Some(position)) = (self.pan.as_mut(), self.cursor_position) {
            pan.begin(position);
        }
    }

    fn reveal(&mut self) {
        let requires_reveal = self.current_entry().is_some_and(|e| e.requires_reveal);
        if !requires_reveal || self.display.is_none() {
            return;
        }
        self.state.reveal = self.state.reveal.toggled();
        self.controls
            .set_revealed(&self.config, self.state.reveal == RevealMode::Revealed);
    }

    /// Maximum scroll offset of the zoomed image inside the viewport.
    fn pan_limits(&self) -> Option<AbsoluteOffset> {
        let image = self.display.as_ref()?;
        let viewport = self.viewport?;
        Some(AbsoluteOffset {
            x: (image.width as f32 - viewport.width).max(0.0),
            y: (image.height as f32 - viewport.height).max(0.0),
        })
    }

    /// Mirrors the pan offset to the zoomed image scrollable.
    fn scroll_to_pan_offset(&self, offset: AbsoluteOffset) -> Task<Message> {
        let Some(max) = self.pan_limits() else {
            return Task::none();
        };
        let relative = |value: f32, max: f32| {
            if max > 0.0 {
                (value / max).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        operation::snap_to(
            self.pan_viewport.clone(),
            RelativeOffset {
                x: relative(offset.x, max.x),
                y: relative(offset.y, max.y),
            },
        )
    }

    fn handle_raw_event(&mut self, event: event::Event) -> (Effect, Task<Message>) {
        if let event::Event::Window(window::Event::Resized(size)) = event {
            self.set_viewport(size);
            return (Effect::None, Task::none());
        }

        if !self.state.is_active() {
            return (Effect::None, Task::none());
        }

        match event {
            event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                ..
            }) => match named {
                keyboard::key::Named::Escape => (self.hide(), Task::none()),
                keyboard::key::Named::ArrowLeft => self.step(false),
                keyboard::key::Named::ArrowRight => self.step(true),
                _ => (Effect::None, Task::none()),
            },
            event::Event::Touch(touch_event) => self.handle_touch(touch_event),
            event::Event::Mouse(mouse_event) => (Effect::None, self.handle_mouse(mouse_event)),
            _ => (Effect::None, Task::none()),
        }
    }

    fn handle_touch(&mut self, event: touch::Event) -> (Effect, Task<Message>) {
        if self.state.is_zoomed() {
            let Some(pan) = self.pan.as_mut() else {
                return (Effect::None, Task::none());
            };
            let task = match event {
                touch::Event::FingerPressed { position, .. } => {
                    pan.begin(position);
                    None
                }
                touch::Event::FingerMoved { position, .. } => pan.drag_to(position),
                touch::Event::FingerLifted { .. } | touch::Event::FingerLost { .. } => {
                    pan.end();
                    None
                }
            };
            return (
                Effect::None,
                task.map_or_else(Task::none, |offset| self.scroll_to_pan_offset(offset)),
            );
        }

        let Some(message) = swipe::Message::from_touch(&event) else {
            return (Effect::None, Task::none());
        };
        match self.swipe.handle(message) {
            swipe::Effect::Swiped { direction } => {
                for notification in (swipe::Effect::Swiped { direction }).notifications() {
                    tracing::debug!(event = notification.name(), %direction, "swipe");
                }
                match direction {
                    Direction::Left => self.step(true),
                    Direction::Right => self.step(false),
                    Direction::Up => (self.hide(), Task::none()),
                    Direction::Down => (Effect::None, Task::none()),
                }
            }
            swipe::Effect::None => (Effect::None, Task::none()),
        }
    }

    fn handle_mouse(&mut self, event: mouse::Event) -> Task<Message> {
        match event {
            mouse::Event::CursorMoved { position } => {
                self.cursor_position = Some(position);
                let offset = self
                    .pan
                    .as_mut()
                    .filter(|pan| pan.is_bound())
                    .and_then(|pan| pan.drag_to(position));
                offset.map_or_else(Task::none, |offset| self.scroll_to_pan_offset(offset))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) | mouse::Event::CursorLeft => {
                if let Some(pan) = self.pan.as_mut() {
                    pan.end();
                }
                Task::none()
            }
            _ => Task::none(),
        }
    }

    /// Records the overlay size used to decide whether zoom is possible.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = Some(size);
        if let (Some(limits), Some(pan)) = (self.pan_limits(), self.pan.as_mut()) {
            pan.set_limits(limits);
        }
        if self.display.is_some() {
            self.refresh_controls();
        }
    }

    /// Spinner animation while an image is loading.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.state.is_active() && self.loading {
            time::every(SPINNER_TICK).map(|_| Message::SpinnerTick)
        } else {
            Subscription::none()
        }
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&ImageEntry> {
        self.state.active_index.and_then(|i| self.entries.get(i))
    }

    #[must_use]
    pub fn viewer_state(&self) -> &ViewerState {
        &self.state
    }

    #[must_use]
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[must_use]
    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    #[must_use]
    pub fn display(&self) -> Option<&ImageData> {
        self.display.as_ref()
    }

    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }

    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    #[must_use]
    pub fn has_pan(&self) -> bool {
        self.pan.is_some()
    }

    #[must_use]
    pub fn is_swipe_attached(&self) -> bool {
        self.swipe.is_attached()
    }

    /// Cursor requested by the pan controller over the image.
    #[must_use]
    pub fn pan_interaction(&self) -> mouse::Interaction {
        self.pan.as_ref().map_or(mouse::Interaction::default(), |pan| {
            pan.cursor().interaction(pan.is_dragging())
        })
    }

    #[must_use]
    pub fn pan_cursor(&self) -> PanCursor {
        self.pan.as_ref().map_or(PanCursor::Auto, |pan| pan.cursor())
    }

    #[must_use]
    pub fn is_pan_bound(&self) -> bool {
        self.pan.as_ref().is_some_and(|pan| pan.is_bound())
    }

    #[must_use]
    pub fn pan_viewport_id(&self) -> &Id {
        &self.pan_viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Arc;

    const PAGE: &str = r#"
[[body]]
tag = "img"
class = "viewer"
attrs = { src = "a.png", alt = "A" }

[[body]]
tag = "figcaption"
text = "Caption A"

[[body]]
tag = "img"
class = "viewer"
attrs = { src = "b.png", alt = "B", "data-reveal" = "", "data-link" = "https://example.org/b" }

[[body]]
tag = "img"
class = "viewer"
attrs = { src = "c.png", alt = "C" }
"#;

    const SINGLE: &str = r#"
[[body]]
tag = "img"
class = "viewer"
attrs = { src = "only.png" }
"#;

    fn viewer_with(page: &str, config: ViewerConfig) -> State {
        let mut document = Document::from_toml_str(page, None).expect("valid page");
        State::new(&mut document, config, None)
    }

    fn viewer() -> State {
        viewer_with(PAGE, ViewerConfig::default())
    }

    fn png(width: u32, height: u32) -> Bytes {
        let mut bytes = Vec::new();
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encoded");
        Arc::from(bytes)
    }

    fn decoded(width: u32, height: u32, blur: bool) -> ImageData {
        media::decode(&png(width, height), blur).expect("decoded")
    }

    /// Completes both awaits of the current load with an in-memory image.
    fn complete(viewer: &mut State, url: &str, width: u32, height: u32) {
        let blur = viewer.current_entry().is_some_and(|e| e.requires_reveal);
        viewer.handle_message(Message::ProbeLoaded {
            url: url.to_string(),
            result: Ok(png(width, height)),
        });
        viewer.handle_message(Message::DisplayLoaded {
            url: url.to_string(),
            result: Ok(decoded(width, height, blur)),
        });
    }

    fn key(named: keyboard::key::Named) -> Message {
        Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(named),
                modified_key: keyboard::Key::Named(named),
                physical_key: keyboard::key::Physical::Code(keyboard::key::Code::Escape),
                location: keyboard::Location::Standard,
                modifiers: keyboard::Modifiers::default(),
                text: None,
                repeat: false,
            }),
        }
    }

    fn touch(event: touch::Event) -> Message {
        Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Touch(event),
        }
    }

    fn swipe_gesture(viewer: &mut State, dx: f32, dy: f32) -> Effect {
        viewer.handle_message(touch(touch::Event::FingerPressed {
            id: touch::Finger(1),
            position: Point::new(200.0, 200.0),
        }));
        viewer
            .handle_message(touch(touch::Event::FingerLifted {
                id: touch::Finger(1),
                position: Point::new(200.0 + dx, 200.0 + dy),
            }))
            .0
    }

    #[test]
    fn show_activates_and_locks_page_scroll() {
        let mut viewer = viewer();

        let (effect, _) = viewer.handle_message(Message::Show(1));

        assert_eq!(effect, Effect::LockPageScroll);
        assert!(viewer.is_active());
        assert_eq!(viewer.viewer_state().active_index, Some(1));
        assert_eq!(viewer.viewer_state().loading_token.as_deref(), Some("b.png"));
        assert!(viewer.is_loading());
    }

    #[test]
    fn showing_while_active_does_not_lock_again() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        let (effect, _) = viewer.handle_message(Message::Show(2));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn hide_keeps_active_index_for_resume() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(2));

        let (effect, _) = viewer.handle_message(Message::Hide);
        assert_eq!(effect, Effect::UnlockPageScroll);
        assert!(!viewer.is_active());
        assert_eq!(viewer.viewer_state().active_index, Some(2));

        let (again, _) = viewer.handle_message(Message::Hide);
        assert_eq!(again, Effect::None);

        viewer.handle_message(Message::Resume);
        assert!(viewer.is_active());
        assert_eq!(viewer.viewer_state().active_index, Some(2));
    }

    #[test]
    fn navigation_wraps_around() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(2));
        viewer.handle_message(Message::Next);
        assert_eq!(viewer.viewer_state().active_index, Some(0));

        viewer.handle_message(Message::Prev);
        assert_eq!(viewer.viewer_state().active_index, Some(2));
    }

    #[test]
    fn single_image_navigation_is_a_no_op() {
        let mut viewer = viewer_with(SINGLE, ViewerConfig::default());
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "only.png", 10, 10);
        let before = viewer.viewer_state().clone();

        viewer.handle_message(Message::Next);
        viewer.handle_message(Message::Prev);

        assert_eq!(viewer.viewer_state(), &before);
        assert!(viewer.display().is_some());
    }

    #[test]
    fn stale_load_is_discarded() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        viewer.handle_message(Message::Next);

        // B finishes first and is displayed.
        complete(&mut viewer, "b.png", 8, 4);
        assert_eq!(viewer.display().map(|d| (d.width, d.height)), Some((8, 4)));

        // A's slow responses arrive afterwards and must not replace B.
        viewer.handle_message(Message::ProbeLoaded {
            url: "a.png".into(),
            result: Ok(png(2, 2)),
        });
        viewer.handle_message(Message::DisplayLoaded {
            url: "a.png".into(),
            result: Ok(decoded(2, 2, false)),
        });

        assert_eq!(viewer.display().map(|d| (d.width, d.height)), Some((8, 4)));
        assert_eq!(viewer.alt(), "B");
        assert_eq!(viewer.viewer_state().active_index, Some(1));
    }

    #[test]
    fn stale_fetch_never_reaches_decode() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        viewer.handle_message(Message::Show(2));

        viewer.handle_message(Message::ProbeLoaded {
            url: "a.png".into(),
            result: Ok(png(2, 2)),
        });

        assert!(viewer.display().is_none());
        assert!(viewer.is_loading());
        assert_eq!(viewer.viewer_state().loading_token.as_deref(), Some("c.png"));
    }

    #[test]
    fn applied_load_sets_alt_caption_and_clears_token() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 4, 4);

        assert!(!viewer.is_loading());
        assert_eq!(viewer.alt(), "A");
        assert_eq!(viewer.caption(), Some("Caption A"));
        assert_eq!(viewer.viewer_state().loading_token, None);
    }

    #[test]
    fn navigation_clears_stale_content_immediately() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 4, 4);

        viewer.handle_message(Message::Next);

        assert!(viewer.display().is_none());
        assert!(viewer.alt().is_empty());
        assert!(viewer.caption().is_none());
        assert!(viewer.is_loading());
    }

    #[test]
    fn failed_load_keeps_loader_and_reports() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));

        let (effect, _) = viewer.handle_message(Message::ProbeLoaded {
            url: "a.png".into(),
            result: Err(Error::Io("not found".into())),
        });

        assert_eq!(
            effect,
            Effect::LoadFailed {
                url: "a.png".into(),
                error: Error::Io("not found".into()),
            }
        );
        assert!(viewer.is_loading());
        assert!(viewer.display().is_none());
    }

    #[test]
    fn reveal_flagged_image_starts_blurred_and_toggles() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(1));
        complete(&mut viewer, "b.png", 4, 4);

        assert!(viewer.viewer_state().is_blurred());
        assert!(viewer.display().is_some_and(|d| d.blurred.is_some()));

        viewer.handle_message(Message::Reveal);
        assert!(!viewer.viewer_state().is_blurred());
        assert!(viewer.controls().reveal.has_class("active"));

        viewer.handle_message(Message::Reveal);
        assert!(viewer.viewer_state().is_blurred());
    }

    #[test]
    fn reveal_is_ignored_for_plain_images() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 4, 4);

        viewer.handle_message(Message::Reveal);

        assert!(!viewer.viewer_state().is_blurred());
    }

    #[test]
    fn keyboard_shortcuts_only_while_active() {
        let mut viewer = viewer();
        viewer.handle_message(key(keyboard::key::Named::ArrowRight));
        assert_eq!(viewer.viewer_state().active_index, None);

        viewer.handle_message(Message::Show(0));
        viewer.handle_message(key(keyboard::key::Named::ArrowRight));
        assert_eq!(viewer.viewer_state().active_index, Some(1));
        viewer.handle_message(key(keyboard::key::Named::ArrowLeft));
        viewer.handle_message(key(keyboard::key::Named::ArrowLeft));
        assert_eq!(viewer.viewer_state().active_index, Some(2));

        viewer.handle_message(key(keyboard::key::Named::Tab));
        assert!(viewer.is_active());

        let (effect, _) = viewer.handle_message(key(keyboard::key::Named::Escape));
        assert_eq!(effect, Effect::UnlockPageScroll);
        assert!(!viewer.is_active());
    }

    #[test]
    fn swipes_navigate_and_close() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));

        swipe_gesture(&mut viewer, -120.0, 10.0);
        assert_eq!(viewer.viewer_state().active_index, Some(1));

        swipe_gesture(&mut viewer, 120.0, -10.0);
        assert_eq!(viewer.viewer_state().active_index, Some(0));

        swipe_gesture(&mut viewer, 60.0, 60.0);
        assert_eq!(viewer.viewer_state().active_index, Some(0));

        let effect = swipe_gesture(&mut viewer, 5.0, -90.0);
        assert_eq!(effect, Effect::UnlockPageScroll);
        assert!(!viewer.is_active());
    }

    #[test]
    fn zoom_requires_pan_capability() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 40, 30);

        viewer.handle_message(Message::Zoom);

        assert!(!viewer.viewer_state().is_zoomed());
        assert!(viewer.controls().zoom.is_none());
    }

    fn panzoom_viewer() -> State {
        let config = ViewerConfig {
            panzoom: true,
            ..ViewerConfig::default()
        };
        let mut viewer = viewer_with(PAGE, config);
        viewer.set_viewport(Size::new(800.0, 600.0));
        viewer
    }

    #[test]
    fn zoom_binds_pan_and_detaches_swipe() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        assert!(!viewer.is_pan_bound());

        viewer.handle_message(Message::Zoom);

        assert!(viewer.viewer_state().is_zoomed());
        assert!(viewer.is_pan_bound());
        assert_eq!(viewer.pan_cursor(), PanCursor::Move);
        assert!(!viewer.is_swipe_attached());
        assert!(viewer
            .controls()
            .zoom
            .as_ref()
            .is_some_and(|z| z.has_class("zoomed")));

        viewer.handle_message(Message::Zoom);

        assert!(!viewer.viewer_state().is_zoomed());
        assert!(!viewer.is_pan_bound());
        assert_eq!(viewer.pan_cursor(), PanCursor::Auto);
        assert!(viewer.is_swipe_attached());
    }

    #[test]
    fn swipe_is_ignored_while_zoomed() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(Message::Zoom);

        swipe_gesture(&mut viewer, -200.0, 0.0);

        assert_eq!(viewer.viewer_state().active_index, Some(0));
    }

    #[test]
    fn zoom_disabled_when_image_fits_viewport() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 400, 300);

        viewer.handle_message(Message::Zoom);

        assert!(!viewer.viewer_state().is_zoomed());
        let zoom = viewer.controls().zoom.as_ref().expect("zoom control");
        assert!(zoom.is_disabled());
        assert_eq!(zoom.title, viewer.config().titles.zoom_disabled);
    }

    #[test]
    fn zoom_is_ignored_while_loading() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));

        viewer.handle_message(Message::Zoom);

        assert!(!viewer.viewer_state().is_zoomed());
    }

    #[test]
    fn navigating_while_zoomed_unzooms_first() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(Message::Zoom);

        viewer.handle_message(Message::Next);

        assert!(!viewer.viewer_state().is_zoomed());
        assert!(!viewer.is_pan_bound());
        assert!(viewer.is_swipe_attached());
    }

    #[test]
    fn zoom_can_be_left_after_viewport_grows() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(Message::Zoom);

        viewer.set_viewport(Size::new(2000.0, 1500.0));
        assert!(viewer.viewer_state().is_zoomed());
        let zoom = viewer.controls().zoom.as_ref().expect("zoom control");
        assert!(!zoom.is_disabled());
        assert_eq!(zoom.title, viewer.config().titles.zoom_active);

        viewer.handle_message(Message::Zoom);

        assert!(!viewer.viewer_state().is_zoomed());
        assert!(!viewer.is_pan_bound());
        assert!(viewer.is_swipe_attached());
        let zoom = viewer.controls().zoom.as_ref().expect("zoom control");
        assert!(zoom.is_disabled());

        viewer.handle_message(Message::Zoom);
        assert!(!viewer.viewer_state().is_zoomed());
    }

    #[test]
    fn viewport_shrink_while_zoomed_keeps_pan_bound() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(Message::Zoom);

        viewer.set_viewport(Size::new(400.0, 300.0));

        assert!(viewer.viewer_state().is_zoomed());
        assert!(viewer.is_pan_bound());
        assert!(!viewer.is_swipe_attached());
    }

    #[test]
    fn hiding_while_zoomed_resumes_unzoomed() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(Message::Zoom);

        let (effect, _) = viewer.handle_message(Message::Hide);
        assert_eq!(effect, Effect::UnlockPageScroll);
        assert!(!viewer.viewer_state().is_zoomed());
        assert!(!viewer.is_pan_bound());

        let (effect, _) = viewer.handle_message(Message::Resume);

        assert_eq!(effect, Effect::LockPageScroll);
        assert_eq!(viewer.viewer_state().active_index, Some(0));
        assert!(!viewer.viewer_state().is_zoomed());
        assert!(!viewer.is_pan_bound());
        assert_eq!(viewer.pan_cursor(), PanCursor::Auto);
        assert!(viewer.is_swipe_attached());
    }

    fn cursor_at(x: f32, y: f32) -> Message {
        Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(x, y),
            }),
        }
    }

    fn is_dragging(viewer: &State) -> bool {
        viewer.pan.as_ref().is_some_and(|pan| pan.is_dragging())
    }

    #[test]
    fn only_presses_on_the_image_start_a_drag() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(Message::Zoom);
        viewer.handle_message(cursor_at(400.0, 580.0));

        viewer.handle_message(Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
        });
        assert!(!is_dragging(&viewer));

        viewer.handle_message(cursor_at(300.0, 300.0));
        viewer.handle_message(Message::PanPressed);
        assert!(is_dragging(&viewer));

        viewer.handle_message(Message::RawEvent {
            window: window::Id::unique(),
            event: event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
        });
        assert!(!is_dragging(&viewer));
    }

    #[test]
    fn image_press_is_ignored_unzoomed() {
        let mut viewer = panzoom_viewer();
        viewer.handle_message(Message::Show(0));
        complete(&mut viewer, "a.png", 1600, 1200);
        viewer.handle_message(cursor_at(300.0, 300.0));

        viewer.handle_message(Message::PanPressed);

        assert!(!is_dragging(&viewer));
    }

    #[test]
    fn download_and_link_effects_carry_current_urls() {
        let config = ViewerConfig {
            show_download: true,
            ..ViewerConfig::default()
        };
        let mut viewer = viewer_with(PAGE, config);
        viewer.handle_message(Message::Show(1));
        complete(&mut viewer, "b.png", 4, 4);

        let (download, _) = viewer.handle_message(Message::Download);
        assert_eq!(
            download,
            Effect::Download {
                url: "b.png".into()
            }
        );

        let (link, _) = viewer.handle_message(Message::OpenLink);
        assert_eq!(
            link,
            Effect::OpenLink {
                url: "https://example.org/b".into()
            }
        );
    }

    #[test]
    fn download_requires_configuration() {
        let mut viewer = viewer();
        viewer.handle_message(Message::Show(0));
        let (effect, _) = viewer.handle_message(Message::Download);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn show_out_of_range_is_ignored() {
        let mut viewer = viewer();
        let (effect, _) = viewer.handle_message(Message::Show(99));
        assert_eq!(effect, Effect::None);
        assert!(!viewer.is_active());
    }
}
