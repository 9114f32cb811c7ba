use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::Has,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    boss,
    path::SPAWN_EDGE,
    timing::{FIRST_SPAWN_DELAY_MS, SPAWN_CLEARANCE, SPAWN_JITTER_MS},
};
use crate::difficulty::enemy_kind_for_value;
use crate::events::FeedbackEvent;
use crate::systems::{
    BossBundle, BossHits, BossTimer, Enemy, EnemyBundle, EnemyIds, EnemyKind, EnemyStatus, FrameClock, GameRng, GameSession,
    Progress, Speed,
};

/// When the next enemy may appear.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum SpawnTimer {
    /// Armed relative to the first tick that sees it, since commands have no clock of their own.
    After(f64),
    /// Due at an absolute timestamp.
    At(f64),
    /// Held while the boss is on the road. Once it is gone without being defeated, the
    /// next boss is scheduled after `boss::RETURN_DELAY_MS`.
    Suspended,
}

impl Default for SpawnTimer {
    fn default() -> Self {
        SpawnTimer::After(FIRST_SPAWN_DELAY_MS)
    }
}

/// The most recently spawned enemy, used to keep new arrivals from overlapping it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LastSpawned(pub Option<Entity>);

/// Brings in the next enemy once the timer is due, the entrance is clear, and the level's
/// quota still has room.
#[allow(clippy::too_many_arguments)]
pub fn spawn_system(
    mut commands: Commands,
    clock: Res<FrameClock>,
    session: Res<GameSession>,
    mut timer: ResMut<SpawnTimer>,
    mut last: ResMut<LastSpawned>,
    mut rng: ResMut<GameRng>,
    mut ids: ResMut<EnemyIds>,
    mut boss_timer: ResMut<BossTimer>,
    enemies: Query<(&Progress, &EnemyStatus, Has<BossHits>)>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    if *timer == SpawnTimer::Suspended && !enemies.iter().any(|(_, _, boss)| boss) {
        debug!(delay = boss::RETURN_DELAY_MS, "Boss left the road, spawner rearmed");
        *timer = SpawnTimer::After(boss::RETURN_DELAY_MS);
    }
    if let SpawnTimer::After(delay) = *timer {
        *timer = SpawnTimer::At(clock.now + delay);
    }
    let SpawnTimer::At(due) = *timer else {
        return;
    };
    if clock.now <= due {
        return;
    }

    let entrance_clear = last
        .0
        .and_then(|entity| enemies.get(entity).ok())
        .is_none_or(|(progress, _, _)| progress.0 < SPAWN_CLEARANCE);
    if !entrance_clear {
        return;
    }

    let in_play = enemies.iter().filter(|(_, status, _)| !status.is_dying()).count() as u32;
    if session.enemies_defeated + in_play >= session.quota() {
        return;
    }

    let difficulty = session.difficulty();
    let value = difficulty.roll_value(&mut rng.0);
    let id = ids.next_id();
    let kind = if session.is_boss_level() {
        EnemyKind::Boss
    } else {
        enemy_kind_for_value(value, session.level, &mut rng.0)
    };

    let bundle = EnemyBundle {
        enemy: Enemy { id, kind, value },
        progress: Progress(SPAWN_EDGE),
        speed: Speed(kind.base_speed() * difficulty.enemy_speed_base),
        status: EnemyStatus::Walking,
    };

    let entity = if kind.is_boss() {
        *timer = SpawnTimer::Suspended;
        boss_timer.arm(clock.now);
        info!(id, value, level = session.level, "Boss approaches");
        commands
            .spawn(BossBundle {
                enemy: bundle,
                hits: BossHits(boss::HITS),
            })
            .id()
    } else {
        let jitter = rng.0.random_range(-SPAWN_JITTER_MS..=SPAWN_JITTER_MS);
        *timer = SpawnTimer::At(clock.now + difficulty.spawn_rate + jitter);
        debug!(id, %kind, value, "Enemy spawned");
        commands.spawn(bundle).id()
    };

    last.0 = Some(entity);
    feedback.write(FeedbackEvent::EnemySpawned { id, kind, value });
}
