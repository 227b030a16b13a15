//! The `/stash` chat command.
//!
//! - `/stash` toggles decoy placement for the caller.
//! - `/stash <amount>` hands the caller that many stashes. Anything that is
//!   not a positive integer counts as 1.

use tracing::{debug, warn};

use crate::config::format_reply;
use crate::dispatcher::StashWarn;
use crate::host::PERM_USE;
use crate::state::PlayerInfo;
use crate::telemetry::spans;

/// Result of one command invocation. The caller has already been replied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    NoPermission,
    Usage,
    Toggled { enabled: bool },
    ToggleFailed,
    ItemGranted { amount: u32 },
    GrantFailed { amount: u32 },
}

impl CommandOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPermission => "no_permission",
            Self::Usage => "usage",
            Self::Toggled { .. } => "toggled",
            Self::ToggleFailed => "toggle_failed",
            Self::ItemGranted { .. } => "item_granted",
            Self::GrantFailed { .. } => "grant_failed",
        }
    }
}

/// Parse a requested amount, falling back to 1.
pub fn parse_amount(arg: &str) -> u32 {
    arg.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

impl StashWarn {
    /// Run `/stash` for `player` with the given arguments.
    pub fn handle_command(&self, player: &PlayerInfo, args: &[&str]) -> CommandOutcome {
        let span = spans::command(player.id, args.len());
        let _enter = span.enter();

        let outcome = self.run_command(player, args);
        crate::metrics::record_command(outcome.as_str());
        outcome
    }

    fn run_command(&self, player: &PlayerInfo, args: &[&str]) -> CommandOutcome {
        let host = self.host();

        if !host.has_permission(player.id, PERM_USE) {
            host.send_message(player.id, &self.messages.no_permission);
            return CommandOutcome::NoPermission;
        }

        match args {
            [] => match self.toggles().toggle(player.id) {
                Ok(enabled) => {
                    debug!(enabled, "Stash toggle changed");
                    let reply = if enabled {
                        &self.messages.toggled_on
                    } else {
                        &self.messages.toggled_off
                    };
                    host.send_message(player.id, reply);
                    CommandOutcome::Toggled { enabled }
                }
                Err(e) => {
                    warn!(error = %e, "Stash toggle could not be saved");
                    host.send_message(player.id, &self.messages.toggle_failed);
                    CommandOutcome::ToggleFailed
                }
            },
            [arg] => {
                let amount = parse_amount(arg);
                if host.give_item(player.id, &self.stash_item, amount) {
                    debug!(amount, item = %self.stash_item, "Stash items granted");
                    host.send_message(player.id, &format_reply(&self.messages.item_granted, amount));
                    CommandOutcome::ItemGranted { amount }
                } else {
                    host.send_message(player.id, &self.messages.grant_failed);
                    CommandOutcome::GrantFailed { amount }
                }
            }
            _ => {
                host.send_message(player.id, &self.messages.usage);
                CommandOutcome::Usage
            }
        }
    }
}
