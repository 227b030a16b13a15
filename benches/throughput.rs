use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use stashwarn::auth::{AuthorizationResolver, EnabledChecks, Provider};
use stashwarn::config::NotificationConfig;
use stashwarn::host::World;
use stashwarn::notify::build_notification;
use stashwarn::state::{PlayerId, PlayerInfo, ViolationTracker};
use std::hint::black_box;
use std::sync::Arc;

// Hot paths of a single uncover event: authorization, counting, and alert
// construction. Delivery is asynchronous and not measured here.

fn world() -> Arc<World> {
    let mut world = World::new();
    for id in 1..=1000u64 {
        world = world.with_player(PlayerInfo::new(id, format!("player{id}")), &[]);
    }
    for team in 0..100u64 {
        let members: Vec<u64> = (1..=10).map(|i| team * 10 + i).collect();
        world = world.with_team(members.as_slice());
    }
    Arc::new(world.with_clan("RAID", &[1u64, 500]).with_friends(2u64, 900u64))
}

fn resolve_benchmark(c: &mut Criterion) {
    let world = world();
    let resolver = AuthorizationResolver::new(EnabledChecks::all())
        .with_teams(Provider::Present(world.clone()))
        .with_clans(Provider::Present(world.clone()))
        .with_friends(Provider::Present(world));

    let mut group = c.benchmark_group("resolve");
    group.throughput(Throughput::Elements(1));

    group.bench_function("teammate", |b| {
        b.iter(|| resolver.resolve(black_box(PlayerId(11)), black_box(PlayerId(12))))
    });
    group.bench_function("stranger_all_checks", |b| {
        b.iter(|| resolver.resolve(black_box(PlayerId(11)), black_box(PlayerId(999))))
    });

    group.finish();
}

fn tracker_benchmark(c: &mut Criterion) {
    let tracker = ViolationTracker::new();

    let mut group = c.benchmark_group("tracker");
    group.throughput(Throughput::Elements(1));

    group.bench_function("record_same_player", |b| {
        b.iter(|| tracker.record(black_box(PlayerId(200))))
    });
    let mut next = 0u64;
    group.bench_function("record_new_player", |b| {
        b.iter(|| {
            next += 1;
            tracker.record(black_box(PlayerId(next)))
        })
    });

    group.finish();
}

fn notification_benchmark(c: &mut Criterion) {
    let config = NotificationConfig::default();
    let owner = PlayerInfo::new(100, "<color=red>Alice</color>");
    let suspect = PlayerInfo::new(200, "Bob");

    c.bench_function("build_notification", |b| {
        b.iter(|| {
            build_notification(
                black_box(&config),
                Some(&owner),
                &suspect,
                black_box(3),
                "(1.0, 2.0, 3.0)",
            )
        })
    });
}

criterion_group!(benches, resolve_benchmark, tracker_benchmark, notification_benchmark);
criterion_main!(benches);
