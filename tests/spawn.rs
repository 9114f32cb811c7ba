use bevy_ecs::{entity::Entity, query::With, system::RunSystemOnce, world::World};
use math_castle::{
    constants::{
        boss,
        timing::{FIRST_SPAWN_DELAY_MS, SPAWN_JITTER_MS},
    },
    difficulty::DifficultyConfig,
    events::FeedbackEvent,
    systems::{
        spawn_system, BossHits, BossTimer, Enemy, EnemyKind, EnemyStatus, GameSession, LastSpawned, Progress, Speed, SpawnTimer,
    },
};
use speculoos::prelude::*;

mod common;

fn run_spawner(world: &mut World, now: f64) {
    common::set_clock(world, now, 16.0);
    world.run_system_once(spawn_system).expect("System should run successfully");
}

#[test]
fn test_first_spawn_waits_for_the_initial_delay() {
    let mut world = common::create_test_world(1);

    run_spawner(&mut world, 0.0);
    assert_that(&*world.resource::<SpawnTimer>()).is_equal_to(SpawnTimer::At(FIRST_SPAWN_DELAY_MS));
    assert_that(&common::enemy_count(&mut world)).is_equal_to(0);

    run_spawner(&mut world, FIRST_SPAWN_DELAY_MS);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(0);

    run_spawner(&mut world, FIRST_SPAWN_DELAY_MS + 16.0);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(1);
}

#[test]
fn test_spawned_enemy_follows_the_level() {
    let mut world = common::create_test_world(2);
    *world.resource_mut::<SpawnTimer>() = SpawnTimer::At(0.0);

    run_spawner(&mut world, 100.0);

    let config = DifficultyConfig::for_level(2);
    let (enemy, progress, speed, status) = world
        .query::<(&Enemy, &Progress, &Speed, &EnemyStatus)>()
        .single(&world)
        .map(|(enemy, progress, speed, status)| (*enemy, *progress, *speed, *status))
        .expect("one enemy should spawn");
    assert_that(&config.number_range.contains(&enemy.value)).is_true();
    assert_that(&progress.0).is_equal_to(100.0);
    assert_that(&speed.0).is_equal_to(enemy.kind.base_speed() * config.enemy_speed_base);
    assert_that(&status).is_equal_to(EnemyStatus::Walking);
    assert_that(&enemy.kind.is_boss()).is_false();

    let SpawnTimer::At(next) = *world.resource::<SpawnTimer>() else {
        panic!("the spawner should be rescheduled");
    };
    assert_that(&(next >= 100.0 + config.spawn_rate - SPAWN_JITTER_MS)).is_true();
    assert_that(&(next <= 100.0 + config.spawn_rate + SPAWN_JITTER_MS)).is_true();

    let events = common::drain_feedback(&mut world);
    assert_that(&events).is_equal_to(vec![FeedbackEvent::EnemySpawned {
        id: enemy.id,
        kind: enemy.kind,
        value: enemy.value,
    }]);
}

#[test]
fn test_spawn_waits_for_the_entrance_to_clear() {
    let mut world = common::create_test_world(1);
    let previous = common::spawn_enemy(&mut world, 1, EnemyKind::Goblin, 3, 75.0, 0.04);
    world.resource_mut::<LastSpawned>().0 = Some(previous);
    *world.resource_mut::<SpawnTimer>() = SpawnTimer::At(0.0);

    run_spawner(&mut world, 100.0);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(1);

    world.get_mut::<Progress>(previous).unwrap().0 = 59.0;
    run_spawner(&mut world, 200.0);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(2);
}

#[test]
fn test_spawn_stops_once_the_quota_is_in_play() {
    let mut world = common::create_test_world(1);
    // Level 1 needs 7 kills: 5 already done and 2 walking leaves no room.
    world.resource_mut::<GameSession>().enemies_defeated = 5;
    common::spawn_enemy(&mut world, 1, EnemyKind::Goblin, 3, 30.0, 0.04);
    common::spawn_enemy(&mut world, 2, EnemyKind::Goblin, 4, 20.0, 0.04);
    let dying = common::spawn_enemy(&mut world, 3, EnemyKind::Goblin, 5, 10.0, 0.04);
    world.entity_mut(dying).insert(EnemyStatus::Dying { since: 0.0 });
    *world.resource_mut::<SpawnTimer>() = SpawnTimer::At(0.0);

    run_spawner(&mut world, 100.0);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(3);

    // Dying enemies don't count, so one more fits once a walker is gone.
    world.resource_mut::<GameSession>().enemies_defeated = 4;
    run_spawner(&mut world, 200.0);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(4);
}

#[test]
fn test_boss_level_spawns_a_single_boss() {
    let mut world = common::create_test_world(5);
    *world.resource_mut::<SpawnTimer>() = SpawnTimer::At(0.0);

    run_spawner(&mut world, 100.0);

    let (enemy, hits) = world
        .query::<(&Enemy, &BossHits)>()
        .single(&world)
        .expect("the boss should spawn");
    assert_that(&enemy.kind).is_equal_to(EnemyKind::Boss);
    assert_that(&hits.0).is_equal_to(boss::HITS);
    assert_that(&*world.resource::<SpawnTimer>()).is_equal_to(SpawnTimer::Suspended);
    assert_that(&world.resource::<BossTimer>().last_strike()).is_equal_to(Some(100.0));

    run_spawner(&mut world, 100_000.0);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(1);
}

#[test]
fn test_enemy_ids_are_unique() {
    let mut world = common::create_test_world(1);
    let mut now = 0.0;
    for _ in 0..5 {
        *world.resource_mut::<SpawnTimer>() = SpawnTimer::At(now);
        world.resource_mut::<LastSpawned>().0 = None;
        now += 100.0;
        run_spawner(&mut world, now);
    }

    let mut ids: Vec<u64> = world.query::<&Enemy>().iter(&world).map(|enemy| enemy.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_that(&ids.len()).is_equal_to(5);
}

#[test]
fn test_boss_returns_after_leaving_the_road_undefeated() {
    let mut world = common::create_test_world(5);
    *world.resource_mut::<SpawnTimer>() = SpawnTimer::At(0.0);
    run_spawner(&mut world, 100.0);
    let first = world
        .query_filtered::<Entity, With<BossHits>>()
        .single(&world)
        .expect("the boss should spawn");

    // The boss struck the gate and its attack animation has finished.
    world.despawn(first);
    run_spawner(&mut world, 10_000.0);
    assert_that(&*world.resource::<SpawnTimer>()).is_equal_to(SpawnTimer::At(10_000.0 + boss::RETURN_DELAY_MS));
    assert_that(&common::enemy_count(&mut world)).is_equal_to(0);

    run_spawner(&mut world, 10_016.0 + boss::RETURN_DELAY_MS);
    let (enemy, hits) = world
        .query::<(&Enemy, &BossHits)>()
        .single(&world)
        .map(|(enemy, hits)| (*enemy, *hits))
        .expect("another boss should walk out");
    assert_that(&enemy.kind).is_equal_to(EnemyKind::Boss);
    assert_that(&hits.0).is_equal_to(boss::HITS);
    assert_that(&world.resource::<GameSession>().enemies_defeated).is_equal_to(0);
}

#[test]
fn test_spawner_stays_held_while_the_boss_is_dying() {
    let mut world = common::create_test_world(5);
    let boss = common::spawn_boss(&mut world, 1, 20, 40.0);
    world.entity_mut(boss).insert(EnemyStatus::Dying { since: 0.0 });
    *world.resource_mut::<SpawnTimer>() = SpawnTimer::Suspended;

    run_spawner(&mut world, 100_000.0);

    assert_that(&*world.resource::<SpawnTimer>()).is_equal_to(SpawnTimer::Suspended);
    assert_that(&common::enemy_count(&mut world)).is_equal_to(1);
}
