// SPDX-License-Identifier: MPL-2.0
//! Widget configuration, loaded from a `config.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[viewer]` - Image viewer behavior and control labels
//! - `[scroller]` - Scroller buttons and breakpoint table
//!
//! User files are partial: they are merged over the (localized) defaults with
//! [`merge::apply_config`], so a missing or mistyped option never prevents the
//! widgets from starting.
//!
//! # Path Resolution
//!
//! 1. Explicit path (`--config`)
//! 2. `ILA_UI_CONFIG_DIR` environment variable
//! 3. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use ila_ui::config::{self, Config};
//!
//! let (overrides, _warning) = config::load(None);
//! let config = Config::resolve(&Config::default(), &overrides).unwrap_or_default();
//! assert!(!config.viewer.target_class.is_empty());
//! ```

pub mod defaults;
pub mod merge;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "ila_ui";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ILA_UI_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr"). Empty means the system locale.
    #[serde(default)]
    pub language: String,
}

/// Text or icon per viewer control.
///
/// Icons are paths to SVG files; an empty string means no icon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlLabels {
    pub cue: String,
    pub hide: String,
    pub download: String,
    pub prev: String,
    pub next: String,
    pub link: String,
    pub zoom: String,
    pub zoom_active: String,
    pub reveal: String,
    pub reveal_active: String,
}

impl ControlLabels {
    fn texts() -> Self {
        Self {
            cue: TEXT_CUE.into(),
            hide: TEXT_HIDE.into(),
            download: TEXT_DOWNLOAD.into(),
            prev: TEXT_PREV.into(),
            next: TEXT_NEXT.into(),
            link: TEXT_LINK.into(),
            zoom: TEXT_ZOOM.into(),
            zoom_active: TEXT_ZOOM_ACTIVE.into(),
            reveal: TEXT_REVEAL.into(),
            reveal_active: TEXT_REVEAL_ACTIVE.into(),
        }
    }

    fn empty() -> Self {
        Self {
            cue: String::new(),
            hide: String::new(),
            download: String::new(),
            prev: String::new(),
            next: String::new(),
            link: String::new(),
            zoom: String::new(),
            zoom_active: String::new(),
            reveal: String::new(),
            reveal_active: String::new(),
        }
    }
}

/// Tooltip per viewer control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlTitles {
    pub cue: String,
    pub hide: String,
    pub download: String,
    pub prev: String,
    pub next: String,
    pub link: String,
    pub zoom: String,
    pub zoom_active: String,
    pub zoom_disabled: String,
    pub reveal: String,
    pub reveal_active: String,
}

impl ControlTitles {
    /// Titles translated through the given localization bundle.
    pub fn localized(i18n: &I18n) -> Self {
        Self {
            cue: String::new(),
            hide: i18n.tr("viewer-title-hide"),
            download: i18n.tr("viewer-title-download"),
            prev: i18n.tr("viewer-title-prev"),
            next: i18n.tr("viewer-title-next"),
            link: i18n.tr("viewer-title-link"),
            zoom: i18n.tr("viewer-title-zoom"),
            zoom_active: i18n.tr("viewer-title-zoom-active"),
            zoom_disabled: i18n.tr("viewer-title-zoom-disabled"),
            reveal: i18n.tr("viewer-title-reveal"),
            reveal_active: i18n.tr("viewer-title-reveal-active"),
        }
    }
}

impl Default for ControlTitles {
    fn default() -> Self {
        Self {
            cue: String::new(),
            hide: "Close".into(),
            download: "Download this image".into(),
            prev: "Previous image".into(),
            next: "Next image".into(),
            link: "More information".into(),
            zoom: "Enlarge image (drag to move the image around)".into(),
            zoom_active: "Reset image to fit screen".into(),
            zoom_disabled: "Zoom disabled (the image is already full size)".into(),
            reveal: "Reveal image".into(),
            reveal_active: "Blur image".into(),
        }
    }
}

/// Image viewer settings. Immutable once a viewer has been created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Class of the `img` nodes handled by the viewer.
    pub target_class: String,
    /// Enables the zoom control and pan controller.
    pub panzoom: bool,
    pub show_download: bool,
    pub show_link: bool,
    /// Caption selectors; `&` stands for the wrapper id of the current image.
    pub captions: Vec<String>,
    pub texts: ControlLabels,
    pub icons: ControlLabels,
    pub titles: ControlTitles,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            target_class: DEFAULT_TARGET_CLASS.into(),
            panzoom: false,
            show_download: false,
            show_link: true,
            captions: DEFAULT_CAPTION_SELECTORS.iter().map(|s| (*s).to_string()).collect(),
            texts: ControlLabels::texts(),
            icons: ControlLabels::empty(),
            titles: ControlTitles::default(),
        }
    }
}

/// Items per row of a breakpoint, kept as written in the config.
///
/// Anything that is not an unsigned integer is carried through untouched and
/// rejected when a scroller measures itself against the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RowCount {
    Count(u32),
    Invalid(toml::Value),
}

impl From<u32> for RowCount {
    fn from(count: u32) -> Self {
        RowCount::Count(count)
    }
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowCount::Count(count) => write!(f, "{count}"),
            RowCount::Invalid(value) => write!(f, "{value}"),
        }
    }
}

/// `[min_viewport_width, items_per_row]`.
pub type Breakpoint = (u32, RowCount);

/// Builds a breakpoint table from plain pairs.
#[must_use]
pub fn breakpoint_table(pairs: &[(u32, u32)]) -> Vec<Breakpoint> {
    pairs
        .iter()
        .map(|&(width, count)| (width, RowCount::from(count)))
        .collect()
}

/// Scroller settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrollerConfig {
    pub left_button_class: String,
    pub right_button_class: String,
    pub left_button_content: String,
    pub right_button_content: String,
    /// Breakpoints in ascending width order.
    pub breakpoints: Vec<Breakpoint>,
    /// Horizontal padding around the list, in pixels.
    pub padding: u32,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            left_button_class: DEFAULT_LEFT_BUTTON_CLASS.into(),
            right_button_class: DEFAULT_RIGHT_BUTTON_CLASS.into(),
            left_button_content: TEXT_PREV.into(),
            right_button_content: TEXT_NEXT.into(),
            breakpoints: breakpoint_table(&DEFAULT_BREAKPOINTS),
            padding: DEFAULT_SCROLLER_PADDING,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub scroller: ScrollerConfig,
}

impl Config {
    /// Defaults with tooltips translated for the active locale.
    pub fn localized(i18n: &I18n) -> Self {
        let mut config = Self::default();
        config.viewer.titles = ControlTitles::localized(i18n);
        config
    }

    /// Applies a partial user tree on top of `defaults`.
    ///
    /// Mistyped and unknown options are dropped with a warning. An option of
    /// the right TOML type that still does not fit its field (a negative
    /// `padding`, say) falls back to its default on its own; the rest of the
    /// user tree is kept.
    ///
    /// # Errors
    ///
    /// Only when `defaults` itself cannot be converted.
    pub fn resolve(defaults: &Config, overrides: &toml::Value) -> Result<Config> {
        let base = toml::Value::try_from(defaults)?;
        let mut merged = merge::apply_config(&base, overrides);
        if let Ok(config) = merged.clone().try_into() {
            return Ok(config);
        }
        restore_unusable_options(&base, &mut merged);
        merged.try_into().map_err(Error::from)
    }
}

/// Puts the default back for every `section.option` of `merged` that fails
/// typed deserialization when applied alone over `base`.
fn restore_unusable_options(base: &toml::Value, merged: &mut toml::Value) {
    let Some(sections) = base.as_table() else {
        return;
    };
    for (section, defaults) in sections {
        let Some(defaults) = defaults.as_table() else {
            continue;
        };
        for (option, default) in defaults {
            let Some(value) = merged.get(section).and_then(|s| s.get(option)).cloned() else {
                continue;
            };
            if &value == default {
                continue;
            }

            let mut candidate = base.clone();
            if let Some(slot) = candidate
                .get_mut(section)
                .and_then(|s| s.get_mut(option))
            {
                *slot = value;
            }
            let parsed: std::result::Result<Config, _> = candidate.try_into();
            if let Err(err) = parsed {
                tracing::warn!(%section, %option, "unusable option, using default: {err}");
                if let Some(slot) = merged.get_mut(section).and_then(|s| s.get_mut(option)) {
                    *slot = default.clone();
                }
            }
        }
    }
}

/// Reads the `[general] language` option straight from an override tree.
///
/// The language is needed before the localized defaults can be built.
pub fn language_override(overrides: &toml::Value) -> Option<String> {
    overrides
        .get("general")
        .and_then(|general| general.get("language"))
        .and_then(toml::Value::as_str)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path, honouring an explicit override first.
pub fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    if explicit.is_some() {
        return explicit;
    }
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the user override tree.
///
/// Returns an empty tree when no file exists. If the file cannot be read or
/// parsed, the empty tree is returned with a warning i18n key.
pub fn load(explicit: Option<PathBuf>) -> (toml::Value, Option<String>) {
    let empty = toml::Value::Table(toml::Table::new());
    let Some(path) = config_path(explicit) else {
        return (empty, None);
    };
    if !path.exists() {
        return (empty, None);
    }
    match read_overrides(&path) {
        Ok(value) => (value, None),
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to load config: {err}");
            (empty, Some("notification-config-load-error".to_string()))
        }
    }
}

/// Parses a config file into a raw override tree.
pub fn read_overrides(path: &Path) -> Result<toml::Value> {
    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)?;
    Ok(toml::Value::Table(table))
}

/// Writes a complete configuration, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
