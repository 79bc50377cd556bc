// SPDX-License-Identifier: MPL-2.0
//! Visibility toggler.
//!
//! A source element (usually a button) shows and hides a target element.
//! The target is given directly or through the source's
//! `data-toggle-target` attribute; the optional replacement label comes from
//! `data-toggle-text`. Both directions pass through a short transition state
//! completed by a timer message.

use crate::config::TOGGLE_TRANSITION;
use crate::document::{Document, NodeId};
use crate::error::{Error, Result};
use iced::Task;

/// Class added to every toggled target.
pub const TARGET_CLASS: &str = "toggle-view";

/// Class of the source descendant whose text is swapped.
pub const LABEL_CLASS: &str = "toggle-text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
}

impl Visibility {
    /// Whether the target takes part in the layout.
    #[must_use]
    pub fn is_rendered(self) -> bool {
        self != Visibility::Hidden
    }

    #[must_use]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Visibility::Showing | Visibility::Hiding)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Toggle,
    Show,
    Hide,
    /// Transition timer of `generation` elapsed.
    TransitionFinished { generation: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Shown,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct State {
    source: NodeId,
    target: NodeId,
    label_node: NodeId,
    original_text: String,
    toggle_text: Option<String>,
    visibility: Visibility,
    generation: u64,
}

impl State {
    /// Binds `source` to its target.
    ///
    /// `target` is an element id; without it the source's
    /// `data-toggle-target` is used. `toggle_text` falls back to
    /// `data-toggle-text`; without either the label never changes.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTarget`] when no target id is given or it names no
    /// element.
    pub fn new(
        document: &mut Document,
        source: NodeId,
        target: Option<&str>,
        toggle_text: Option<&str>,
    ) -> Result<Self> {
        let node = document.node(source);
        let target_id = target
            .or_else(|| node.data("toggle-target"))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::MissingTarget(String::from("no target id")))?;

        let toggle_text = toggle_text
            .or_else(|| node.data("toggle-text"))
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        let target = document
            .find_by_id(&target_id)
            .ok_or_else(|| Error::MissingTarget(format!("#{target_id}")))?;

        let label_node = document
            .descendants(source)
            .into_iter()
            .find(|n| document.node(*n).has_class(LABEL_CLASS))
            .unwrap_or(source);
        let original_text = document.text_content(label_node);

        let target_node = document.node_mut(target);
        if !target_node.has_class(TARGET_CLASS) {
            target_node.classes.push(TARGET_CLASS.to_string());
        }
        tracing::debug!(target = %target_id, "toggler bound");

        Ok(Self {
            source,
            target,
            label_node,
            original_text,
            toggle_text,
            visibility: Visibility::Hidden,
            generation: 0,
        })
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle_message(&mut self, message: Message) -> (Effect, Task<Message>) {
        match message {
            Message::Toggle => {
                if matches!(self.visibility, Visibility::Visible | Visibility::Showing) {
                    (Effect::None, self.hide())
                } else {
                    (Effect::None, self.show())
                }
            }
            Message::Show => (Effect::None, self.show()),
            Message::Hide => (Effect::None, self.hide()),
            Message::TransitionFinished { generation } => {
                (self.finish_transition(generation), Task::none())
            }
        }
    }

    /// Starts showing the target.
    pub fn show(&mut self) -> Task<Message> {
        if self.visibility == Visibility::Visible {
            return Task::none();
        }
        self.visibility = Visibility::Showing;
        self.start_transition()
    }

    /// Starts hiding the target.
    pub fn hide(&mut self) -> Task<Message> {
        if self.visibility == Visibility::Hidden {
            return Task::none();
        }
        self.visibility = Visibility::Hiding;
        self.start_transition()
    }

    fn start_transition(&mut self) -> Task<Message> {
        self.generation += 1;
        let generation = self.generation;
        Task::perform(
            async move { tokio::time::sleep(TOGGLE_TRANSITION).await },
            move |()| Message::TransitionFinished { generation },
        )
    }

    fn finish_transition(&mut self, generation: u64) -> Effect {
        if generation != self.generation {
            return Effect::None;
        }
        match self.visibility {
            Visibility::Showing => {
                self.visibility = Visibility::Visible;
                Effect::Shown
            }
            Visibility::Hiding => {
                self.visibility = Visibility::Hidden;
                Effect::Hidden
            }
            Visibility::Visible | Visibility::Hidden => Effect::None,
        }
    }

    #[must_use]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[must_use]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Current label of the source.
    ///
    /// The toggle text is shown from the moment showing starts until hiding
    /// starts.
    #[must_use]
    pub fn label(&self) -> &str {
        match (&self.toggle_text, self.visibility) {
            (Some(text), Visibility::Showing | Visibility::Visible) => text,
            _ => &self.original_text,
        }
    }

    /// Replacement text for `node` when it is the label carrier.
    #[must_use]
    pub fn label_for(&self, node: NodeId) -> Option<&str> {
        (node == self.label_node).then(|| self.label())
    }
}
