//! Group membership oracles.
//!
//! Each oracle is optional: a server may run without a team, clan, or friend
//! system. Absence is modelled by [`Provider::Absent`] and always answers
//! "not affiliated".

use std::sync::Arc;

use crate::state::PlayerId;

/// Team rosters.
pub trait TeamProvider: Send + Sync {
    /// Whether `b` is on `a`'s team. A player without a team has no teammates.
    fn are_teammates(&self, a: PlayerId, b: PlayerId) -> bool;
}

/// Clan membership.
pub trait ClanProvider: Send + Sync {
    /// Clan tag of `player`, if any.
    fn clan_of(&self, player: PlayerId) -> Option<String>;
}

/// Friend lists. The provider decides whether friendship is mutual.
pub trait FriendProvider: Send + Sync {
    fn are_friends(&self, a: PlayerId, b: PlayerId) -> bool;
}

/// An oracle that may or may not be installed.
pub enum Provider<T: ?Sized> {
    Present(Arc<T>),
    Absent,
}

impl<T: ?Sized> Provider<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Ask the oracle, answering `false` when it is not installed.
    #[inline]
    pub fn query(&self, f: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::Present(inner) => f(inner),
            Self::Absent => false,
        }
    }
}

impl<T: ?Sized> Default for Provider<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: ?Sized> Clone for Provider<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Present(inner) => Self::Present(Arc::clone(inner)),
            Self::Absent => Self::Absent,
        }
    }
}

impl<T: ?Sized> From<Option<Arc<T>>> for Provider<T> {
    fn from(value: Option<Arc<T>>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<T: ?Sized> std::fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present(_) => f.write_str("Present"),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

impl Provider<dyn TeamProvider> {
    pub fn are_teammates(&self, a: PlayerId, b: PlayerId) -> bool {
        self.query(|p| p.are_teammates(a, b))
    }
}

impl Provider<dyn ClanProvider> {
    /// Both players resolve to the same non-empty clan tag.
    pub fn same_clan(&self, a: PlayerId, b: PlayerId) -> bool {
        self.query(|p| match (p.clan_of(a), p.clan_of(b)) {
            (Some(ca), Some(cb)) => !ca.is_empty() && ca == cb,
            _ => false,
        })
    }
}

impl Provider<dyn FriendProvider> {
    pub fn are_friends(&self, a: PlayerId, b: PlayerId) -> bool {
        self.query(|p| p.are_friends(a, b))
    }
}
