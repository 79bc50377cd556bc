// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::media::ImageData;
use crate::ui::{scroller, toggler, viewer};
use iced::Size;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. Widget messages are
/// forwarded with the index of the widget instance they belong to.
#[derive(Debug, Clone)]
pub enum Message {
    Viewer(viewer::Message),
    Scroller {
        index: usize,
        message: scroller::Message,
    },
    Toggler {
        index: usize,
        message: toggler::Message,
    },
    /// A page thumbnail finished loading.
    ThumbnailLoaded {
        url: String,
        result: Result<ImageData, Error>,
    },
    WindowResized(Size),
    /// Result of the save dialog opened for a viewer download.
    DownloadTargetChosen {
        url: String,
        path: Option<PathBuf>,
    },
    DownloadFinished(Result<PathBuf, Error>),
    DismissStatus,
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Explicit config file; takes precedence over `ILA_UI_CONFIG_DIR`.
    pub config_path: Option<PathBuf>,
    /// Page description to render.
    pub page_path: Option<PathBuf>,
}
