use bevy_ecs::{
    entity::Entity,
    system::{Commands, Query, Res},
};
use tracing::trace;

use crate::systems::{Enemy, EnemyStatus, FrameClock};

/// Despawns enemies whose dying or attacking animation has played out.
pub fn animation_expiry_system(mut commands: Commands, clock: Res<FrameClock>, query: Query<(Entity, &Enemy, &EnemyStatus)>) {
    for (entity, enemy, status) in query.iter() {
        if status.expired(clock.now) {
            trace!(id = enemy.id, kind = %enemy.kind, ?status, "Enemy removed");
            commands.entity(entity).despawn();
        }
    }
}
