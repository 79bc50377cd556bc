// SPDX-License-Identifier: MPL-2.0
//! Factory for labelled control buttons.
//!
//! [`make_button`] produces a plain [`ButtonSpec`] description: deterministic
//! id, class list, label, tooltip, optional SVG icon and the message sent on
//! press. Rendering is a pure function of that description; classes select
//! the visual style.

use crate::ui::design_tokens::{palette::WHITE, opacity, sizing, spacing};
use crate::ui::styles;
use iced::widget::{button, svg, tooltip, Row, Svg, Text};
use iced::{alignment::Vertical, Element, Length};

/// Element kind of a generated control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tag {
    #[default]
    Button,
    /// A link-like control; `href` is the target it opens or downloads.
    Anchor { href: Option<String> },
}

/// Description of a single control.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec<M> {
    pub id: String,
    pub classes: Vec<String>,
    pub text: String,
    pub title: String,
    /// Path to an SVG rendered after the text.
    pub icon: Option<String>,
    pub on_press: Option<M>,
    pub tag: Tag,
}

/// Builds a control description. The id is `btn-{name}`.
///
/// Empty `icon` strings are treated as no icon.
pub fn make_button<M>(
    name: &str,
    css: &str,
    text: &str,
    title: &str,
    icon: Option<&str>,
    handler: Option<M>,
    tag: Tag,
) -> ButtonSpec<M> {
    ButtonSpec {
        id: format!("btn-{name}"),
        classes: css.split_whitespace().map(str::to_string).collect(),
        text: text.to_string(),
        title: title.to_string(),
        icon: icon.filter(|i| !i.is_empty()).map(str::to_string),
        on_press: handler,
        tag,
    }
}

impl<M> ButtonSpec<M> {
    /// The `type` attribute: `"button"` for button elements, none for anchors.
    #[must_use]
    pub fn type_attr(&self) -> Option<&'static str> {
        match self.tag {
            Tag::Button => Some("button"),
            Tag::Anchor { .. } => None,
        }
    }

    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match &self.tag {
            Tag::Anchor { href } => href.as_deref(),
            Tag::Button => None,
        }
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds or removes `class`.
    pub fn set_class(&mut self, class: &str, present: bool) {
        let has = self.has_class(class);
        if present && !has {
            self.classes.push(class.to_string());
        } else if !present && has {
            self.classes.retain(|c| c != class);
        }
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.has_class("disabled")
    }
}

impl<M: Clone> ButtonSpec<M> {
    pub fn view(&self) -> Element<'_, M> {
        let mut content = Row::new().spacing(spacing::XXS).align_y(Vertical::Center);
        if !self.text.is_empty() {
            content = content.push(Text::new(self.text.as_str()));
        }
        if let Some(icon) = &self.icon {
            content = content.push(
                Svg::new(svg::Handle::from_path(icon))
                    .width(Length::Fixed(sizing::ICON_SM))
                    .height(Length::Fixed(sizing::ICON_SM))
                    .style(styles::overlay::icon(WHITE)),
            );
        }

        let mut control = button(content).padding([spacing::XXS, spacing::XS]);
        control = if self.is_disabled() {
            control.style(styles::button::disabled())
        } else if self.has_class("zoomed") || self.has_class("active") {
            control.style(styles::button::selected)
        } else {
            control.style(styles::button::overlay(
                WHITE,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_HOVER,
            ))
        };
        if !self.is_disabled() {
            if let Some(message) = &self.on_press {
                control = control.on_press(message.clone());
            }
        }

        if self.title.is_empty() {
            control.into()
        } else {
            styles::tooltip::styled(control, self.title.as_str(), tooltip::Position::Top).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Hide,
    }

    #[test]
    fn id_classes_and_labels_are_deterministic() {
        let first = make_button::<Msg>("hide", "btn  overlay", "x", "Close", None, None, Tag::Button);
        let second = make_button::<Msg>("hide", "btn  overlay", "x", "Close", None, None, Tag::Button);

        assert_eq!(first, second);
        assert_eq!(first.id, "btn-hide");
        assert_eq!(first.classes, vec!["btn", "overlay"]);
        assert_eq!(first.text, "x");
        assert_eq!(first.title, "Close");
    }

    #[test]
    fn button_tag_sets_type_attribute() {
        let control = make_button("next", "", ">", "", None, Some(Msg::Hide), Tag::default());
        assert_eq!(control.type_attr(), Some("button"));
        assert_eq!(control.on_press, Some(Msg::Hide));

        let link = make_button::<Msg>(
            "link",
            "",
            "",
            "",
            None,
            None,
            Tag::Anchor {
                href: Some("https://example.org".into()),
            },
        );
        assert_eq!(link.type_attr(), None);
        assert_eq!(link.href(), Some("https://example.org"));
    }

    #[test]
    fn icon_is_optional() {
        let plain = make_button::<Msg>("a", "", "", "", Some(""), None, Tag::Button);
        assert!(plain.icon.is_none());

        let iconed = make_button::<Msg>("a", "", "", "", Some("icons/zoom.svg"), None, Tag::Button);
        assert_eq!(iconed.icon.as_deref(), Some("icons/zoom.svg"));
    }

    #[test]
    fn set_class_toggles_without_duplicates() {
        let mut control = make_button::<Msg>("zoom", "btn", "", "", None, None, Tag::Button);

        control.set_class("zoomed", true);
        control.set_class("zoomed", true);
        assert_eq!(control.classes, vec!["btn", "zoomed"]);

        control.set_class("zoomed", false);
        control.set_class("zoomed", false);
        assert_eq!(control.classes, vec!["btn"]);
    }

    #[test]
    fn disabled_class_is_reported() {
        let mut control = make_button::<Msg>("zoom", "", "", "", None, None, Tag::Button);
        assert!(!control.is_disabled());
        control.set_class("disabled", true);
        assert!(control.is_disabled());
    }
}
