//! Player identity and position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque numeric player identifier.
///
/// Zero is reserved as the "unowned" sentinel carried by server-placed
/// (decoy) stashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Owner id of a stash that belongs to nobody.
    pub const UNOWNED: PlayerId = PlayerId(0);

    /// Whether this is the unowned sentinel.
    #[inline]
    pub fn is_unowned(self) -> bool {
        self == Self::UNOWNED
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// World-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// A player currently loaded by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub display_name: String,
    #[serde(default)]
    pub position: Position,
}

impl PlayerInfo {
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            position: Position::default(),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}
