//! Watchdog test harness.

#![allow(dead_code)]

use parking_lot::Mutex;
use stashwarn::auth::{AuthorizationResolver, EnabledChecks, Provider};
use stashwarn::config::Config;
use stashwarn::delivery::DeliveryGateway;
use stashwarn::dispatcher::StashWarn;
use stashwarn::host::{Host, PERM_IGNORE, PERM_USE, World};
use stashwarn::state::{JsonFileStore, PlayerId, PlayerInfo, ToggleRegistry};
use stashwarn_webhook::WebhookMessage;
use std::path::PathBuf;
use std::sync::Arc;

/// Gateway that keeps every submitted alert.
#[derive(Default)]
pub struct Recorded(Mutex<Vec<WebhookMessage>>);

impl Recorded {
    pub fn messages(&self) -> Vec<WebhookMessage> {
        self.0.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().len()
    }
}

impl DeliveryGateway for Recorded {
    fn submit(&self, message: WebhookMessage) {
        self.0.lock().push(message);
    }
}

/// Owner 100 (may use the command), suspect 200, exempt admin 300.
pub fn players() -> World {
    World::new()
        .with_player(PlayerInfo::new(100, "Alice"), &[PERM_USE])
        .with_player(PlayerInfo::new(200, "Bob"), &[])
        .with_player(PlayerInfo::new(300, "Admin"), &[PERM_IGNORE])
}

pub struct Harness {
    pub app: Arc<StashWarn>,
    pub world: Arc<World>,
    pub alerts: Arc<Recorded>,
    dir: tempfile::TempDir,
}

impl Harness {
    /// Watchdog over `world` with every group provider present.
    pub fn new(world: World, config: Config) -> Self {
        let world = Arc::new(world);
        let resolver = AuthorizationResolver::new(config.checks)
            .with_teams(Provider::Present(world.clone()))
            .with_clans(Provider::Present(world.clone()))
            .with_friends(Provider::Present(world.clone()));
        Self::with_resolver(world, config, resolver)
    }

    /// Watchdog over `world` with no group providers installed.
    pub fn without_providers(world: World, checks: EnabledChecks) -> Self {
        let config = Config {
            checks,
            ..Config::default()
        };
        Self::with_resolver(Arc::new(world), config, AuthorizationResolver::new(checks))
    }

    fn with_resolver(world: Arc<World>, config: Config, resolver: AuthorizationResolver) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let toggles = ToggleRegistry::open(JsonFileStore::new(dir.path().join("toggles.json")))
            .expect("open toggles");
        let alerts = Arc::new(Recorded::default());
        let app = Arc::new(StashWarn::new(
            &config,
            world.clone(),
            resolver,
            toggles,
            alerts.clone(),
        ));

        Self {
            app,
            world,
            alerts,
            dir,
        }
    }

    pub fn toggles_path(&self) -> PathBuf {
        self.dir.path().join("toggles.json")
    }

    pub fn player(&self, id: u64) -> PlayerInfo {
        self.world
            .find_player(PlayerId(id))
            .expect("player is online")
    }
}
