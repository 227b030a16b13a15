//! In-memory host.
//!
//! Holds players, permissions, group memberships, and placed stashes for the
//! event replayer and the test suites. Implements [`Host`] and all three
//! group providers.
//!
//! # File format
//!
//! ```toml
//! [[players]]
//! id = 100
//! name = "alice"
//! permissions = ["stashwarn.use"]
//!
//! [[players]]
//! id = 200
//! name = "bob"
//! online = false
//!
//! [[teams]]
//! members = [100, 300]
//!
//! [clans]
//! RAID = [100, 400]
//!
//! [[friends]]
//! a = 100
//! b = 500
//! ```

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::Host;
use crate::auth::{ClanProvider, FriendProvider, TeamProvider};
use crate::state::{ItemStack, PlayerId, PlayerInfo, Position, Stash};

/// World fixture loading errors.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to read world file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse world file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("player {0} is listed more than once")]
    DuplicatePlayer(PlayerId),
}

/// A player entry in the world file.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default = "crate::config::default_true")]
    pub online: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TeamEntry {
    #[serde(default)]
    members: Vec<PlayerId>,
}

#[derive(Debug, Clone, Deserialize)]
struct FriendEntry {
    a: PlayerId,
    b: PlayerId,
}

/// Deserialized world file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorldFile {
    #[serde(default)]
    players: Vec<WorldPlayer>,
    #[serde(default)]
    teams: Vec<TeamEntry>,
    #[serde(default)]
    clans: HashMap<String, Vec<PlayerId>>,
    #[serde(default)]
    friends: Vec<FriendEntry>,
}

/// In-memory game server state.
#[derive(Default)]
pub struct World {
    players: DashMap<PlayerId, WorldPlayer>,
    teams: HashMap<PlayerId, usize>,
    clans: HashMap<PlayerId, String>,
    friends: HashSet<(PlayerId, PlayerId)>,
    stashes: DashMap<u64, Stash>,
    chat: Mutex<Vec<(PlayerId, String)>>,
    granted: Mutex<Vec<(PlayerId, ItemStack)>>,
}

fn friend_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a world from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WorldError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a world from TOML text.
    pub fn parse(content: &str) -> Result<Self, WorldError> {
        let file: WorldFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    pub fn from_file(file: WorldFile) -> Result<Self, WorldError> {
        let mut world = World::new();

        for player in file.players {
            if world.players.contains_key(&player.id) {
                return Err(WorldError::DuplicatePlayer(player.id));
            }
            world.players.insert(player.id, player);
        }
        for team in file.teams {
            world = world.with_team(team.members.as_slice());
        }
        for (tag, members) in file.clans {
            world = world.with_clan(&tag, members.as_slice());
        }
        for pair in file.friends {
            world = world.with_friends(pair.a, pair.b);
        }

        debug!(
            players = world.players.len(),
            teams = world.teams.values().collect::<HashSet<_>>().len(),
            "World loaded"
        );
        Ok(world)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Add an online player holding `permissions`.
    pub fn with_player(self, info: PlayerInfo, permissions: &[&str]) -> Self {
        self.players.insert(
            info.id,
            WorldPlayer {
                id: info.id,
                name: info.display_name,
                position: info.position,
                permissions: permissions.iter().map(|p| p.to_string()).collect(),
                online: true,
            },
        );
        self
    }

    /// Put `members` on a new team. A player is on at most one team; joining
    /// a new one leaves the old.
    pub fn with_team(mut self, members: &[impl Into<PlayerId> + Copy]) -> Self {
        let team = self.teams.values().copied().max().map_or(0, |t| t + 1);
        for member in members {
            self.teams.insert((*member).into(), team);
        }
        self
    }

    pub fn with_clan(mut self, tag: &str, members: &[impl Into<PlayerId> + Copy]) -> Self {
        for member in members {
            self.clans.insert((*member).into(), tag.to_string());
        }
        self
    }

    /// Make `a` and `b` friends. Friendship is mutual.
    pub fn with_friends(mut self, a: impl Into<PlayerId>, b: impl Into<PlayerId>) -> Self {
        self.friends.insert(friend_key(a.into(), b.into()));
        self
    }

    // ========================================================================
    // Runtime mutation
    // ========================================================================

    /// Connect or disconnect a known player. Returns `false` for unknown ids.
    pub fn set_online(&self, id: PlayerId, online: bool) -> bool {
        match self.players.get_mut(&id) {
            Some(mut player) => {
                player.online = online;
                true
            }
            None => false,
        }
    }

    pub fn set_position(&self, id: PlayerId, position: Position) {
        if let Some(mut player) = self.players.get_mut(&id) {
            player.position = position;
        }
    }

    pub fn grant_permission(&self, id: PlayerId, permission: &str) {
        if let Some(mut player) = self.players.get_mut(&id)
            && !player.permissions.iter().any(|p| p == permission)
        {
            player.permissions.push(permission.to_string());
        }
    }

    pub fn revoke_permission(&self, id: PlayerId, permission: &str) {
        if let Some(mut player) = self.players.get_mut(&id) {
            player.permissions.retain(|p| p != permission);
        }
    }

    /// Store a placed stash under a host-assigned id.
    pub fn insert_stash(&self, stash_id: u64, stash: Stash) {
        self.stashes.insert(stash_id, stash);
    }

    /// Snapshot of a stash.
    pub fn stash(&self, stash_id: u64) -> Option<Stash> {
        self.stashes.get(&stash_id).map(|s| s.value().clone())
    }

    /// Mutate a stash in place. Returns `None` if it does not exist.
    pub fn update_stash<T>(&self, stash_id: u64, f: impl FnOnce(&mut Stash) -> T) -> Option<T> {
        self.stashes.get_mut(&stash_id).map(|mut s| f(s.value_mut()))
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Chat lines sent to `id`, oldest first.
    pub fn messages_for(&self, id: PlayerId) -> Vec<String> {
        self.chat
            .lock()
            .iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    /// Items handed to `id`, oldest first.
    pub fn items_given_to(&self, id: PlayerId) -> Vec<ItemStack> {
        self.granted
            .lock()
            .iter()
            .filter(|(to, _)| *to == id)
            .map(|(_, stack)| stack.clone())
            .collect()
    }
}

impl Host for World {
    fn find_player(&self, id: PlayerId) -> Option<PlayerInfo> {
        let player = self.players.get(&id)?;
        player.online.then(|| PlayerInfo {
            id: player.id,
            display_name: player.name.clone(),
            position: player.position,
        })
    }

    fn has_permission(&self, id: PlayerId, permission: &str) -> bool {
        self.players
            .get(&id)
            .is_some_and(|p| p.permissions.iter().any(|granted| granted == permission))
    }

    fn send_message(&self, id: PlayerId, text: &str) {
        self.chat.lock().push((id, text.to_string()));
    }

    fn give_item(&self, id: PlayerId, item: &str, amount: u32) -> bool {
        if self.find_player(id).is_none() {
            return false;
        }
        self.granted.lock().push((id, ItemStack::new(item, amount)));
        true
    }
}

impl TeamProvider for World {
    fn are_teammates(&self, a: PlayerId, b: PlayerId) -> bool {
        match (self.teams.get(&a), self.teams.get(&b)) {
            (Some(ta), Some(tb)) => ta == tb,
            _ => false,
        }
    }
}

impl ClanProvider for World {
    fn clan_of(&self, player: PlayerId) -> Option<String> {
        self.clans.get(&player).cloned()
    }
}

impl FriendProvider for World {
    fn are_friends(&self, a: PlayerId, b: PlayerId) -> bool {
        self.friends.contains(&friend_key(a, b))
    }
}
