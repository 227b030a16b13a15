//! stashwarnd - replays host events through the stash watchdog.
//!
//! Usage: `stashwarnd [config.toml] [world.toml] [events.jsonl]`
//!
//! Events are read from stdin when no event file is given.

use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use stashwarn::auth::{
    AuthorizationResolver, ClanProvider, FriendProvider, Provider, TeamProvider,
};
use stashwarn::config::{Config, validation};
use stashwarn::delivery::{DeliveryGateway, HttpTransport, NullGateway, WebhookGateway};
use stashwarn::dispatcher::StashWarn;
use stashwarn::host::World;
use stashwarn::replay::Replayer;
use stashwarn::state::{JsonFileStore, ToggleRegistry};
use stashwarn::{http, metrics, telemetry};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let json_logs = std::env::var("STASHWARN_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    telemetry::init_tracing(json_logs);

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let world_path = args.next().unwrap_or_else(|| "world.toml".to_string());
    let events_path = args.next();

    // Load configuration
    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validation::validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See messages above.",
            errors.len()
        ));
    }

    info!(
        delivery = config.notification.delivery_enabled(),
        team = config.checks.team,
        clan = config.checks.clan,
        friend = config.checks.friend,
        "Starting stashwarn"
    );

    // Prometheus metrics are optional.
    if let Some(port) = config.metrics_port {
        metrics::init();
        tokio::spawn(async move {
            http::run_http_server(port).await;
        });
        info!(port, "Prometheus HTTP server started");
    }

    let world = Arc::new(World::load(&world_path).map_err(|e| {
        error!(path = %world_path, error = %e, "Failed to load world");
        e
    })?);

    let toggles = ToggleRegistry::open(JsonFileStore::new(&config.toggles.path)).map_err(|e| {
        error!(path = %config.toggles.path.display(), error = %e, "Failed to load toggles");
        e
    })?;
    info!(count = toggles.len(), "Loaded stash toggles");

    // The fixture world answers every group query itself.
    let teams: Arc<dyn TeamProvider> = world.clone();
    let clans: Arc<dyn ClanProvider> = world.clone();
    let friends: Arc<dyn FriendProvider> = world.clone();
    let resolver = AuthorizationResolver::new(config.checks)
        .with_teams(Provider::Present(teams))
        .with_clans(Provider::Present(clans))
        .with_friends(Provider::Present(friends));

    let webhook = config.notification.delivery_enabled().then(|| {
        let timeout = Duration::from_secs(config.notification.request_timeout_secs);
        let transport = Arc::new(HttpTransport::new(timeout));
        Arc::new(WebhookGateway::spawn(
            config.notification.webhook_url.clone(),
            transport,
        ))
    });
    let gateway: Arc<dyn DeliveryGateway> = match &webhook {
        Some(webhook) => webhook.clone(),
        None => {
            info!("No webhook configured, alerts will only be logged");
            Arc::new(NullGateway)
        }
    };

    let app = Arc::new(StashWarn::new(
        &config,
        world.clone(),
        resolver,
        toggles,
        gateway,
    ));

    // Replay is synchronous; keep it off the runtime threads.
    let replayer = Replayer::new(world, app);
    let summary = tokio::task::spawn_blocking(move || match events_path {
        Some(path) => replayer.run_file(path),
        None => replayer.run(BufReader::new(std::io::stdin())),
    })
    .await??;

    info!(
        events = summary.events,
        skipped = summary.skipped,
        violations = summary.violations,
        decoys = summary.decoys,
        commands = summary.commands,
        "Replay finished"
    );

    if let Some(webhook) = webhook {
        webhook.shutdown().await;
    }

    Ok(())
}
