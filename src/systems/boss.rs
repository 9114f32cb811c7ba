use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use rand::Rng;
use tracing::{debug, info};

use crate::constants::boss;
use crate::events::{DamageSource, FeedbackEvent};
use crate::systems::{BossHits, EnemyStatus, FrameClock, GameRng, PendingDamage, VisualCues};

/// When the boss last struck the castle, or was last wounded.
///
/// An unarmed timer is armed by the first tick that sees a walking boss.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct BossTimer(Option<f64>);

impl BossTimer {
    pub fn arm(&mut self, now: f64) {
        self.0 = Some(now);
    }

    pub fn disarm(&mut self) {
        self.0 = None;
    }

    pub fn last_strike(&self) -> Option<f64> {
        self.0
    }
}

/// The boss' ranged abilities: an occasional ink splash over the keypad, and a heavy strike
/// on the castle every few seconds it survives.
pub fn boss_system(
    clock: Res<FrameClock>,
    mut timer: ResMut<BossTimer>,
    mut rng: ResMut<GameRng>,
    mut cues: ResMut<VisualCues>,
    mut damage: ResMut<PendingDamage>,
    bosses: Query<&EnemyStatus, With<BossHits>>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    if !bosses.iter().any(EnemyStatus::is_walking) {
        return;
    }

    if !cues.ink.is_active(clock.now) && rng.0.random_bool(boss::INK_CHANCE) {
        cues.ink.raise(clock.now, boss::INK_MS);
        debug!("Boss splashed ink");
        feedback.write(FeedbackEvent::InkSplashed);
    }

    let last_strike = *timer.0.get_or_insert(clock.now);
    if clock.now - last_strike >= boss::STRIKE_INTERVAL_MS {
        timer.arm(clock.now);
        damage.push(boss::STRIKE_DAMAGE, DamageSource::BossStrike);
        info!(damage = boss::STRIKE_DAMAGE, "Boss strikes the castle");
    }
}
