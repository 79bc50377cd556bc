// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// Remote image could not be fetched.
    Network(String),
    /// Image bytes could not be decoded.
    Decode(String),
    /// The scroller breakpoint table produced no usable row count.
    InvalidRowCount(String),
    /// A toggler was created without a resolvable target element.
    MissingTarget(String),
    /// The page description is malformed.
    Page(String),
}

impl Error {
    /// Returns the i18n message key used when this error is surfaced to the user.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Network(_) => "error-network",
            Error::Decode(_) => "error-decode",
            Error::InvalidRowCount(_) => "error-row-count",
            Error::MissingTarget(_) => "error-missing-target",
            Error::Page(_) => "error-page",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Network(e) => write!(f, "Network Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::InvalidRowCount(e) => write!(f, "Invalid number provided for row count: {}", e),
            Error::MissingTarget(e) => write!(
                f,
                "Invalid target set ({}). The target element must be provided either directly or with a data attribute",
                e
            ),
            Error::Page(e) => write!(f, "Page Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn row_count_error_names_the_value() {
        let err = Error::InvalidRowCount("0".to_string());
        assert!(err.to_string().contains("row count: 0"));
        assert_eq!(err.i18n_key(), "error-row-count");
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let err: Error = toml::from_str::<toml::Table>("= broken")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Config(_)));
    }
}
