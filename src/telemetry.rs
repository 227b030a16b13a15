//! Logging setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// `json` switches to one JSON object per line for log shippers.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Standardized span constructors for stash events.
pub mod spans {
    use tracing::{Span, info_span};

    use crate::state::PlayerId;

    /// Span covering one uncover event.
    pub fn uncover(suspect: PlayerId, owner: PlayerId) -> Span {
        info_span!("stash_uncovered", suspect = %suspect, owner = %owner)
    }

    /// Span covering one placement event.
    pub fn placed(creator: PlayerId) -> Span {
        info_span!("stash_placed", creator = %creator)
    }

    /// Span covering one stash command.
    pub fn command(player: PlayerId, argc: usize) -> Span {
        info_span!("stash_command", player = %player, argc)
    }
}
