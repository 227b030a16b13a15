//! Stash event handling.
//!
//! # Uncover flow
//!
//! ```text
//! uncovered ─► open? ─yes─► AlreadyOpen
//!               │no
//!               ▼
//!           exempt? ─yes─► Exempt
//!               │no
//!               ▼
//!          unowned? ─yes─────────────────────────┐
//!               │no                              │
//!               ▼                                ▼
//!     owner loaded? ─no─► OwnerUnresolved     record ─► notify ─► Violation
//!               │yes                             ▲
//!               ▼                                │
//!        authorized? ─yes─► Authorized    ─no────┘
//! ```
//!
//! Each event runs the flow once, independently of every other event. No
//! failure escapes; the worst case is a missing notification.

use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::{Affiliation, AuthorizationResolver};
use crate::config::{Config, MessagesConfig, NotificationConfig, format_reply};
use crate::delivery::DeliveryGateway;
use crate::host::{Host, PERM_IGNORE, PERM_USE};
use crate::loot::LootTable;
use crate::notify::build_notification;
use crate::state::{PlayerId, PlayerInfo, Stash, ToggleRegistry, ViolationTracker};
use crate::telemetry::spans;

/// How an uncover event ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UncoverOutcome {
    /// The stash had already been revealed.
    AlreadyOpen,
    /// The discoverer holds the ignore permission.
    Exempt,
    /// The owner is not currently loaded, so nothing was decided.
    OwnerUnresolved,
    /// The discoverer is allowed to see the stash.
    Authorized(Affiliation),
    /// A violation was recorded and an alert submitted.
    Violation { count: u32 },
}

impl UncoverOutcome {
    /// Static label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyOpen => "already_open",
            Self::Exempt => "exempt",
            Self::OwnerUnresolved => "owner_unresolved",
            Self::Authorized(_) => "authorized",
            Self::Violation { .. } => "violation",
        }
    }

    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }
}

/// How a placement event ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// The creator has not opted in; the stash is left alone.
    NotOptedIn,
    /// The creator opted in but lacks the use permission.
    NoPermission,
    /// The stash became a decoy stocked with `stacks` item stacks.
    Decoy { stacks: usize },
}

impl PlacementOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotOptedIn => "not_opted_in",
            Self::NoPermission => "no_permission",
            Self::Decoy { .. } => "decoy",
        }
    }
}

/// The watchdog: owns every per-process component and handles host events.
pub struct StashWarn {
    host: Arc<dyn Host>,
    resolver: AuthorizationResolver,
    tracker: ViolationTracker,
    toggles: ToggleRegistry,
    gateway: Arc<dyn DeliveryGateway>,
    notification: NotificationConfig,
    pub(crate) messages: MessagesConfig,
    loot: LootTable,
    pub(crate) stash_item: String,
}

impl StashWarn {
    pub fn new(
        config: &Config,
        host: Arc<dyn Host>,
        resolver: AuthorizationResolver,
        toggles: ToggleRegistry,
        gateway: Arc<dyn DeliveryGateway>,
    ) -> Self {
        Self {
            host,
            resolver,
            tracker: ViolationTracker::new(),
            toggles,
            gateway,
            notification: config.notification.clone(),
            messages: config.messages.clone(),
            loot: LootTable::from_config(&config.loot),
            stash_item: config.stash_item.clone(),
        }
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn resolver(&self) -> &AuthorizationResolver {
        &self.resolver
    }

    pub fn tracker(&self) -> &ViolationTracker {
        &self.tracker
    }

    pub fn toggles(&self) -> &ToggleRegistry {
        &self.toggles
    }

    /// Confirmed violations for `player` so far.
    pub fn violations(&self, player: PlayerId) -> u32 {
        self.tracker.count(player)
    }

    // ========================================================================
    // Uncover
    // ========================================================================

    /// Handle `suspect` uncovering `stash`.
    pub fn on_stash_uncovered(&self, suspect: &PlayerInfo, stash: &Stash) -> UncoverOutcome {
        let span = spans::uncover(suspect.id, stash.owner);
        let _enter = span.enter();

        let outcome = self.evaluate_uncover(suspect, stash);
        crate::metrics::record_uncover(outcome.as_str());
        outcome
    }

    fn evaluate_uncover(&self, suspect: &PlayerInfo, stash: &Stash) -> UncoverOutcome {
        if stash.is_open {
            debug!("Stash already open, ignoring");
            return UncoverOutcome::AlreadyOpen;
        }

        if self.host.has_permission(suspect.id, PERM_IGNORE) {
            debug!("Suspect is exempt from detection");
            return UncoverOutcome::Exempt;
        }

        // Decoys have no legitimate owner to exempt anyone.
        let owner = if stash.is_unowned() {
            None
        } else {
            let Some(owner) = self.host.find_player(stash.owner) else {
                debug!("Stash owner is not loaded, skipping");
                return UncoverOutcome::OwnerUnresolved;
            };
            if let Some(affiliation) = self.resolver.resolve(owner.id, suspect.id) {
                debug!(%affiliation, "Suspect is authorized");
                return UncoverOutcome::Authorized(affiliation);
            }
            Some(owner)
        };

        let count = self.tracker.record(suspect.id);
        crate::metrics::record_violation();
        info!(
            suspect_name = %suspect.display_name,
            count,
            decoy = owner.is_none(),
            position = %stash.position,
            "Stash violation"
        );

        let message = build_notification(
            &self.notification,
            owner.as_ref(),
            suspect,
            count,
            &stash.position.to_string(),
        );
        self.gateway.submit(message);

        UncoverOutcome::Violation { count }
    }

    // ========================================================================
    // Placement
    // ========================================================================

    /// Handle `creator` placing `stash`, turning it into a decoy if they opted in.
    pub fn on_stash_placed(&self, creator: &PlayerInfo, stash: &mut Stash) -> PlacementOutcome {
        self.on_stash_placed_with(creator, stash, &mut rand::thread_rng())
    }

    /// [`Self::on_stash_placed`] with a caller-supplied random source.
    pub fn on_stash_placed_with<R: Rng>(
        &self,
        creator: &PlayerInfo,
        stash: &mut Stash,
        rng: &mut R,
    ) -> PlacementOutcome {
        let span = spans::placed(creator.id);
        let _enter = span.enter();

        if !self.toggles.is_enabled(creator.id) {
            return PlacementOutcome::NotOptedIn;
        }
        if !self.host.has_permission(creator.id, PERM_USE) {
            debug!("Creator opted in but lacks permission");
            return PlacementOutcome::NoPermission;
        }

        let items = self.loot.sample(rng);
        let stacks = items.len();
        stash.set_decoy(items);

        crate::metrics::record_decoy();
        info!(stacks, position = %stash.position, "Decoy stash placed");
        self.host.send_message(
            creator.id,
            &format_reply(&self.messages.decoy_placed, stacks),
        );

        PlacementOutcome::Decoy { stacks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{EnabledChecks, Provider};
    use crate::host::World;
    use crate::state::{JsonFileStore, Position};
    use parking_lot::Mutex;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use stashwarn_webhook::WebhookMessage;

    #[derive(Default)]
    struct Outbox(Mutex<Vec<WebhookMessage>>);

    impl DeliveryGateway for Outbox {
        fn submit(&self, message: WebhookMessage) {
            self.0.lock().push(message);
        }
    }

    struct Fixture {
        app: StashWarn,
        world: Arc<World>,
        outbox: Arc<Outbox>,
        _dir: tempfile::TempDir,
    }

    fn fixture(world: World, checks: EnabledChecks) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let world = Arc::new(world);
        let outbox = Arc::new(Outbox::default());
        let resolver = AuthorizationResolver::new(checks)
            .with_teams(Provider::Present(world.clone()))
            .with_clans(Provider::Present(world.clone()))
            .with_friends(Provider::Present(world.clone()));
        let toggles = ToggleRegistry::open(JsonFileStore::new(dir.path().join("t.json"))).unwrap();

        let app = StashWarn::new(
            &Config::default(),
            world.clone(),
            resolver,
            toggles,
            outbox.clone(),
        );
        Fixture {
            app,
            world,
            outbox,
            _dir: dir,
        }
    }

    fn players() -> World {
        World::new()
            .with_player(PlayerInfo::new(100, "owner"), &[PERM_USE])
            .with_player(PlayerInfo::new(200, "suspect"), &[])
            .with_player(PlayerInfo::new(300, "admin"), &[PERM_IGNORE])
    }

    fn info(world: &World, id: u64) -> PlayerInfo {
        world.find_player(PlayerId(id)).unwrap()
    }

    #[test]
    fn test_open_stash_is_ignored() {
        let f = fixture(players(), EnabledChecks::all());
        let mut stash = Stash::new(100, Position::default());
        stash.is_open = true;

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 200), &stash);

        assert_eq!(outcome, UncoverOutcome::AlreadyOpen);
        assert_eq!(f.app.violations(PlayerId(200)), 0);
        assert!(f.outbox.0.lock().is_empty());
    }

    #[test]
    fn test_exempt_suspect_never_flagged() {
        let f = fixture(players(), EnabledChecks::all());
        let decoy = Stash::new(PlayerId::UNOWNED, Position::default());

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 300), &decoy);

        assert_eq!(outcome, UncoverOutcome::Exempt);
        assert!(f.app.tracker().is_empty());
    }

    #[test]
    fn test_self_discovery() {
        let f = fixture(players(), EnabledChecks::all());
        let stash = Stash::new(100, Position::default());

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 100), &stash);

        assert_eq!(outcome, UncoverOutcome::Authorized(Affiliation::Owner));
        assert!(f.outbox.0.lock().is_empty());
    }

    #[test]
    fn test_teammate_is_authorized() {
        let f = fixture(players().with_team(&[100u64, 200]), EnabledChecks::all());
        let stash = Stash::new(100, Position::default());

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 200), &stash);

        assert_eq!(outcome, UncoverOutcome::Authorized(Affiliation::Teammate));
        assert_eq!(f.app.violations(PlayerId(200)), 0);
        assert!(f.outbox.0.lock().is_empty());
    }

    #[test]
    fn test_unaffiliated_discovery_is_a_violation() {
        let f = fixture(players(), EnabledChecks::all());
        let stash = Stash::new(100, Position::new(10.0, 5.0, -3.0));

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 200), &stash);

        assert_eq!(outcome, UncoverOutcome::Violation { count: 1 });
        assert_eq!(f.app.violations(PlayerId(200)), 1);

        let outbox = f.outbox.0.lock();
        assert_eq!(outbox.len(), 1);
        let embed = outbox[0].embed().unwrap();
        assert_eq!(embed.field("Owner"), Some("owner - 100"));
        assert_eq!(embed.field("Suspect"), Some("suspect - 200"));
        assert_eq!(embed.field("Violations"), Some("1"));
        assert_eq!(embed.field("Location"), Some("(10.0, 5.0, -3.0)"));
    }

    #[test]
    fn test_decoy_always_alarms() {
        let world = players().with_team(&[100u64, 200]).with_friends(100u64, 200u64);
        let f = fixture(world, EnabledChecks::all());
        let decoy = Stash::new(PlayerId::UNOWNED, Position::default());

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 200), &decoy);

        assert_eq!(outcome, UncoverOutcome::Violation { count: 1 });
        let outbox = f.outbox.0.lock();
        assert_eq!(outbox[0].embed().unwrap().field("Owner"), Some("Server Placed"));
    }

    #[test]
    fn test_offline_owner_is_skipped() {
        let f = fixture(players(), EnabledChecks::all());
        f.world.set_online(PlayerId(100), false);
        let stash = Stash::new(100, Position::default());

        let outcome = f.app.on_stash_uncovered(&info(&f.world, 200), &stash);

        assert_eq!(outcome, UncoverOutcome::OwnerUnresolved);
        assert!(f.app.tracker().is_empty());
        assert!(f.outbox.0.lock().is_empty());
    }

    #[test]
    fn test_counts_accumulate_per_suspect() {
        let f = fixture(players(), EnabledChecks::all());
        let stash = Stash::new(100, Position::default());
        let suspect = info(&f.world, 200);

        for expected in 1..=3 {
            assert_eq!(
                f.app.on_stash_uncovered(&suspect, &stash),
                UncoverOutcome::Violation { count: expected }
            );
        }
        let outbox = f.outbox.0.lock();
        assert_eq!(outbox[2].embed().unwrap().field("Violations"), Some("3"));
    }

    #[test]
    fn test_placement_requires_opt_in_and_permission() {
        let f = fixture(players(), EnabledChecks::all());
        let mut rng = StdRng::seed_from_u64(11);
        let owner = info(&f.world, 100);
        let suspect = info(&f.world, 200);

        let mut stash = Stash::new(100, Position::default());
        assert_eq!(
            f.app.on_stash_placed_with(&owner, &mut stash, &mut rng),
            PlacementOutcome::NotOptedIn
        );
        assert_eq!(stash.owner, PlayerId(100));

        f.app.toggles().toggle(PlayerId(200)).unwrap();
        let mut stash = Stash::new(200, Position::default());
        assert_eq!(
            f.app.on_stash_placed_with(&suspect, &mut stash, &mut rng),
            PlacementOutcome::NoPermission
        );
        assert_eq!(stash.owner, PlayerId(200));
    }

    #[test]
    fn test_placement_creates_decoy() {
        let f = fixture(players(), EnabledChecks::all());
        let owner = info(&f.world, 100);
        f.app.toggles().toggle(owner.id).unwrap();

        let mut stash = Stash::new(100, Position::default());
        let outcome = f
            .app
            .on_stash_placed_with(&owner, &mut stash, &mut StdRng::seed_from_u64(5));

        assert_eq!(outcome, PlacementOutcome::Decoy { stacks: 3 });
        assert!(stash.is_unowned());
        assert!(stash.hidden);
        assert_eq!(stash.inventory.len(), 3);
        assert_eq!(
            f.world.messages_for(owner.id),
            vec!["Decoy stash placed with 3 item stacks.".to_string()]
        );

        // The owner now trips their own trap like anyone else.
        let outcome = f.app.on_stash_uncovered(&owner, &stash);
        assert!(outcome.is_violation());
    }
}
