// SPDX-License-Identifier: MPL-2.0
//! Structured logging setup.
//!
//! Widgets log through the `tracing` macros; the binary installs a fmt
//! subscriber filtered by `RUST_LOG` (falling back to [`DEFAULT_FILTER`]).

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "ila_ui=info";

/// Installs the global subscriber. Calling it twice is harmless: the second
/// attempt is reported and ignored.
pub fn init(verbose: bool) {
    let fallback = if verbose { "ila_ui=debug" } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
    {
        tracing::debug!("logging already initialised: {err}");
    }
}
