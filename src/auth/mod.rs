//! Stash ownership authorization.
//!
//! Decides whether a player who uncovered a stash is allowed to know about
//! it. The owner always is; otherwise each enabled group check is asked in
//! turn (team, clan, friend) and the first affiliation found wins.
//!
//! # Robustness
//!
//! A disabled check and a missing provider both contribute "not
//! affiliated". Neither authorizes by default and neither is an error.

mod providers;

pub use providers::{ClanProvider, FriendProvider, Provider, TeamProvider};

use serde::Deserialize;
use std::fmt;
use tracing::trace;

use crate::state::PlayerId;

/// Which group checks are consulted. Loaded once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EnabledChecks {
    #[serde(default = "crate::config::default_true")]
    pub team: bool,
    #[serde(default = "crate::config::default_true")]
    pub clan: bool,
    #[serde(default = "crate::config::default_true")]
    pub friend: bool,
}

impl Default for EnabledChecks {
    fn default() -> Self {
        Self::all()
    }
}

impl EnabledChecks {
    pub const fn all() -> Self {
        Self {
            team: true,
            clan: true,
            friend: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            team: false,
            clan: false,
            friend: false,
        }
    }
}

/// Why a player is allowed to see a stash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affiliation {
    Owner,
    Teammate,
    Clanmate,
    Friend,
}

impl Affiliation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Teammate => "teammate",
            Self::Clanmate => "clanmate",
            Self::Friend => "friend",
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composes the optional group providers into a single authorization answer.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationResolver {
    checks: EnabledChecks,
    teams: Provider<dyn TeamProvider>,
    clans: Provider<dyn ClanProvider>,
    friends: Provider<dyn FriendProvider>,
}

impl AuthorizationResolver {
    /// A resolver with no providers installed.
    pub fn new(checks: EnabledChecks) -> Self {
        Self {
            checks,
            ..Self::default()
        }
    }

    pub fn with_teams(mut self, teams: Provider<dyn TeamProvider>) -> Self {
        self.teams = teams;
        self
    }

    pub fn with_clans(mut self, clans: Provider<dyn ClanProvider>) -> Self {
        self.clans = clans;
        self
    }

    pub fn with_friends(mut self, friends: Provider<dyn FriendProvider>) -> Self {
        self.friends = friends;
        self
    }

    pub fn checks(&self) -> EnabledChecks {
        self.checks
    }

    /// Find the first affiliation between `owner` and `suspect`.
    ///
    /// Returns `None` when the suspect is not authorized. Providers are not
    /// consulted at all for self-discovery.
    pub fn resolve(&self, owner: PlayerId, suspect: PlayerId) -> Option<Affiliation> {
        if owner == suspect {
            return Some(Affiliation::Owner);
        }

        let affiliation = if self.checks.team && self.teams.are_teammates(owner, suspect) {
            Some(Affiliation::Teammate)
        } else if self.checks.clan && self.clans.same_clan(owner, suspect) {
            Some(Affiliation::Clanmate)
        } else if self.checks.friend && self.friends.are_friends(owner, suspect) {
            Some(Affiliation::Friend)
        } else {
            None
        };

        trace!(owner = %owner, suspect = %suspect, ?affiliation, "authorization resolved");
        affiliation
    }

    /// Whether `suspect` may access `owner`'s stash.
    #[inline]
    pub fn is_authorized(&self, owner: PlayerId, suspect: PlayerId) -> bool {
        self.resolve(owner, suspect).is_some()
    }
}
