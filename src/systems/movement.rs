use bevy_ecs::system::{Query, Res, ResMut};
use tracing::debug;

use crate::constants::{path::CASTLE_GATE, timing::REFERENCE_FRAME_MS};
use crate::events::DamageSource;
use crate::systems::{Enemy, EnemyStatus, FrameClock, PendingDamage, Progress, Speed};

/// Walks every enemy towards the gate.
///
/// Speeds are expressed per 16 ms reference frame and scaled by the real elapsed time, so
/// the pace is the same at any frame rate. An enemy that reaches the gate stops there,
/// starts its attack, and queues its gate damage.
pub fn movement_system(
    clock: Res<FrameClock>,
    mut damage: ResMut<PendingDamage>,
    mut enemies: Query<(&Enemy, &Speed, &mut Progress, &mut EnemyStatus)>,
) {
    let frames = (clock.elapsed / REFERENCE_FRAME_MS) as f32;
    if frames <= 0.0 {
        return;
    }

    for (enemy, speed, mut progress, mut status) in enemies.iter_mut() {
        if !status.is_walking() {
            continue;
        }

        let next = progress.0 - speed.0 * frames;
        if next <= CASTLE_GATE {
            progress.0 = CASTLE_GATE;
            *status = EnemyStatus::Attacking { since: clock.now };
            damage.push(enemy.kind.gate_damage(), DamageSource::Gate(enemy.kind));
            debug!(id = enemy.id, kind = %enemy.kind, "Enemy reached the gate");
        } else {
            progress.0 = next;
        }
    }
}
