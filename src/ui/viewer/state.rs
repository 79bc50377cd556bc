// SPDX-License-Identifier: MPL-2.0
//! Explicit viewer state machine.
//!
//! The overlay is either hidden or active. While active, zoom and reveal are
//! two independent sub-states. Rendering derives classes, cursors and
//! labels from these values; nothing is read back from the widgets.

/// Overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Active,
}

/// Zoom sub-state; `Zoomed` is only reachable with a pan controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomMode {
    #[default]
    Unzoomed,
    Zoomed,
}

/// Reveal sub-state of the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealMode {
    #[default]
    Revealed,
    Blurred,
}

impl RevealMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            RevealMode::Revealed => RevealMode::Blurred,
            RevealMode::Blurred => RevealMode::Revealed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub visibility: Visibility,
    /// Kept across hide/show so the viewer resumes on the same image.
    pub active_index: Option<usize>,
    pub zoom: ZoomMode,
    pub reveal: RevealMode,
    /// URL of the only load still wanted. Completed loads for any other URL
    /// are discarded.
    pub loading_token: Option<String>,
}

impl ViewerState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.visibility == Visibility::Active
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.zoom == ZoomMode::Zoomed
    }

    #[must_use]
    pub fn is_blurred(&self) -> bool {
        self.reveal == RevealMode::Blurred
    }

    /// Whether a completed load of `url` may still be applied.
    #[must_use]
    pub fn wants(&self, url: &str) -> bool {
        self.loading_token.as_deref() == Some(url)
    }

    /// Index reached by stepping `forward` or back from the active image.
    ///
    /// Returns `None` when fewer than two images exist.
    #[must_use]
    pub fn step(&self, count: usize, forward: bool) -> Option<usize> {
        if count < 2 {
            return None;
        }
        let current = self.active_index.unwrap_or(0).min(count - 1);
        Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_hidden_and_unzoomed() {
        let state = ViewerState::default();
        assert!(!state.is_active());
        assert!(!state.is_zoomed());
        assert!(!state.is_blurred());
        assert_eq!(state.active_index, None);
    }

    #[test]
    fn step_wraps_in_both_directions() {
        let state = ViewerState {
            active_index: Some(2),
            ..ViewerState::default()
        };
        assert_eq!(state.step(3, true), Some(0));

        let state = ViewerState {
            active_index: Some(0),
            ..ViewerState::default()
        };
        assert_eq!(state.step(3, false), Some(2));
    }

    #[test]
    fn step_is_none_for_single_image() {
        let state = ViewerState {
            active_index: Some(0),
            ..ViewerState::default()
        };
        assert_eq!(state.step(1, true), None);
        assert_eq!(state.step(0, false), None);
    }

    #[test]
    fn token_matches_only_its_url() {
        let state = ViewerState {
            loading_token: Some("b.jpg".into()),
            ..ViewerState::default()
        };
        assert!(state.wants("b.jpg"));
        assert!(!state.wants("a.jpg"));
        assert!(!ViewerState::default().wants("b.jpg"));
    }

    #[test]
    fn reveal_toggles() {
        assert_eq!(RevealMode::Blurred.toggled(), RevealMode::Revealed);
        assert_eq!(RevealMode::Revealed.toggled(), RevealMode::Blurred);
    }
}
