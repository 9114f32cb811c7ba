use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{Res, ResMut},
};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::events::{DamageSource, FeedbackEvent};
use crate::systems::{FrameClock, GameSession, VisualCues};

/// Castle damage queued by this tick's systems, applied together once they have run.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PendingDamage(SmallVec<[(u32, DamageSource); 4]>);

impl PendingDamage {
    pub fn push(&mut self, amount: u32, source: DamageSource) {
        self.0.push((amount, source));
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|(amount, _)| amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Applies queued damage to the castle and shakes it.
pub fn damage_system(
    clock: Res<FrameClock>,
    mut pending: ResMut<PendingDamage>,
    mut session: ResMut<GameSession>,
    mut cues: ResMut<VisualCues>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    if pending.is_empty() {
        return;
    }

    for (amount, source) in pending.0.drain(..) {
        let health = session.take_damage(amount);
        debug!(amount, ?source, health, "Castle damaged");
        feedback.write(FeedbackEvent::CastleDamaged { amount, source, health });
    }
    cues.shake(clock.now);

    if session.health == 0 {
        warn!(score = session.score, level = session.level, "Castle has fallen");
    }
}
