//! Event log replay against the in-memory host.
//!
//! One JSON object per line:
//!
//! ```text
//! {"event":"placed","stash":1,"creator":100}
//! {"event":"uncovered","stash":1,"suspect":200}
//! {"event":"command","player":100,"args":["3"]}
//! {"event":"disconnect","player":100}
//! {"event":"connect","player":100}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. A bad line is logged
//! and skipped; it never stops the replay.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::dispatcher::{PlacementOutcome, StashWarn, UncoverOutcome};
use crate::host::{Host, World};
use crate::state::{PlayerId, PlayerInfo, Position, Stash};

/// A single host event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// `creator` placed stash `stash` (at their own position unless given).
    Placed {
        stash: u64,
        creator: PlayerId,
        #[serde(default)]
        position: Option<Position>,
    },
    /// `suspect` uncovered stash `stash`.
    Uncovered { stash: u64, suspect: PlayerId },
    /// `player` ran `/stash` with `args`.
    Command {
        player: PlayerId,
        #[serde(default)]
        args: Vec<String>,
    },
    Connect { player: PlayerId },
    Disconnect { player: PlayerId },
}

/// Why a single event could not be applied.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: invalid event: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("player {0} is not online")]
    PlayerOffline(PlayerId),
    #[error("player {0} is unknown")]
    UnknownPlayer(PlayerId),
    #[error("stash {0} does not exist")]
    UnknownStash(u64),
    #[error("stash {0} already exists")]
    DuplicateStash(u64),
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub skipped: usize,
    pub violations: usize,
    pub decoys: usize,
    pub commands: usize,
}

/// Feeds host events to the watchdog, playing the host's part.
pub struct Replayer {
    world: Arc<World>,
    app: Arc<StashWarn>,
    summary: ReplaySummary,
}

impl Replayer {
    pub fn new(world: Arc<World>, app: Arc<StashWarn>) -> Self {
        Self {
            world,
            app,
            summary: ReplaySummary::default(),
        }
    }

    pub fn summary(&self) -> &ReplaySummary {
        &self.summary
    }

    /// Replay every line from a file.
    pub fn run_file<P: AsRef<Path>>(self, path: P) -> std::io::Result<ReplaySummary> {
        let file = File::open(path)?;
        self.run(BufReader::new(file))
    }

    /// Replay every line from `reader`.
    pub fn run<R: BufRead>(mut self, reader: R) -> std::io::Result<ReplaySummary> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let Err(e) = self.apply_line(index + 1, &line) {
                warn!(error = %e, "Skipping event");
                self.summary.skipped += 1;
            }
        }
        Ok(self.summary)
    }

    /// Parse and apply one line. Blank and comment lines are accepted and ignored.
    pub fn apply_line(&mut self, line_no: usize, line: &str) -> Result<(), ReplayError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }
        let event: HostEvent = serde_json::from_str(line).map_err(|source| ReplayError::Parse {
            line: line_no,
            source,
        })?;
        self.apply(event)
    }

    /// Apply one event.
    pub fn apply(&mut self, event: HostEvent) -> Result<(), ReplayError> {
        self.summary.events += 1;

        match event {
            HostEvent::Placed {
                stash,
                creator,
                position,
            } => {
                let creator = self.online(creator)?;
                if self.world.stash(stash).is_some() {
                    return Err(ReplayError::DuplicateStash(stash));
                }
                let mut placed = Stash::new(creator.id, position.unwrap_or(creator.position));
                let outcome = self.app.on_stash_placed(&creator, &mut placed);
                self.world.insert_stash(stash, placed);

                if matches!(outcome, PlacementOutcome::Decoy { .. }) {
                    self.summary.decoys += 1;
                }
                info!(stash, creator = %creator.id, outcome = outcome.as_str(), "Stash placed");
            }
            HostEvent::Uncovered { stash, suspect } => {
                let suspect = self.online(suspect)?;
                let snapshot = self.world.stash(stash).ok_or(ReplayError::UnknownStash(stash))?;
                let outcome = self.app.on_stash_uncovered(&suspect, &snapshot);

                // The host reveals the stash once it has been uncovered.
                self.world.update_stash(stash, |s| s.is_open = true);

                if let UncoverOutcome::Violation { .. } = outcome {
                    self.summary.violations += 1;
                }
                info!(stash, suspect = %suspect.id, outcome = outcome.as_str(), "Stash uncovered");
            }
            HostEvent::Command { player, args } => {
                let player = self.online(player)?;
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                let outcome = self.app.handle_command(&player, &args);
                self.summary.commands += 1;
                info!(player = %player.id, outcome = outcome.as_str(), "Stash command");
            }
            HostEvent::Connect { player } => self.set_online(player, true)?,
            HostEvent::Disconnect { player } => self.set_online(player, false)?,
        }

        Ok(())
    }

    fn online(&self, id: PlayerId) -> Result<PlayerInfo, ReplayError> {
        self.world
            .find_player(id)
            .ok_or(ReplayError::PlayerOffline(id))
    }

    fn set_online(&self, id: PlayerId, online: bool) -> Result<(), ReplayError> {
        if self.world.set_online(id, online) {
            Ok(())
        } else {
            Err(ReplayError::UnknownPlayer(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shapes() {
        let event: HostEvent =
            serde_json::from_str(r#"{"event":"uncovered","stash":4,"suspect":200}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Uncovered {
                stash: 4,
                suspect: PlayerId(200)
            }
        );

        let event: HostEvent = serde_json::from_str(
            r#"{"event":"placed","stash":1,"creator":100,"position":{"x":1.0,"y":2.0,"z":3.0}}"#,
        )
        .unwrap();
        assert!(matches!(
            event,
            HostEvent::Placed { position: Some(_), .. }
        ));

        let event: HostEvent = serde_json::from_str(r#"{"event":"command","player":1}"#).unwrap();
        assert_eq!(
            event,
            HostEvent::Command {
                player: PlayerId(1),
                args: vec![]
            }
        );
    }

    #[test]
    fn test_unknown_event_is_parse_error() {
        assert!(serde_json::from_str::<HostEvent>(r#"{"event":"exploded"}"#).is_err());
    }
}
