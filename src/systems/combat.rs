//! Resolving the player's shot against the enemies on the road.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    observer::Trigger,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::constants::{combat::MISS_KNOCKBACK, path::SPAWN_EDGE};
use crate::equation::Equation;
use crate::events::{FeedbackEvent, GameCommand, GameEvent};
use crate::systems::{BossHits, BossTimer, Enemy, EnemyStatus, FrameClock, GamePhase, GameRng, GameSession, Progress, VisualCues};

/// What an attack did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    /// Nothing happened: the equation has no value, or the game is not running.
    Ignored,
    /// No walking enemy carries the result; every walking enemy is pushed back.
    Miss,
    /// The boss absorbed the hit and took on a new number.
    Wounded { entity: Entity, hits_remaining: u8, new_value: u32 },
    Killed { entity: Entity, level_complete: bool },
}

/// The outcome of the most recent attack command.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LastAttack(pub Option<AttackOutcome>);

/// Picks the enemy an attack lands on: among candidates whose value equals `result`, the one
/// closest to the gate. Ties go to the earliest candidate.
///
/// Candidates are `(entity, progress, value)` and should only include walking enemies.
pub fn select_target<I>(candidates: I, result: f64) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, f32, u32)>,
{
    candidates
        .into_iter()
        .filter(|&(_, _, value)| f64::from(value) == result)
        .min_by(|(_, a, _), (_, b, _)| a.total_cmp(b))
        .map(|(entity, _, _)| entity)
}

type Targets<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Enemy,
        &'static mut Progress,
        &'static mut EnemyStatus,
        Option<&'static mut BossHits>,
    ),
>;

/// Carries out `GameCommand::Attack`.
#[allow(clippy::too_many_arguments)]
pub fn combat_observer(
    trigger: Trigger<GameEvent>,
    clock: Res<FrameClock>,
    mut session: ResMut<GameSession>,
    mut equation: ResMut<Equation>,
    mut rng: ResMut<GameRng>,
    mut boss_timer: ResMut<BossTimer>,
    mut cues: ResMut<VisualCues>,
    mut last_attack: ResMut<LastAttack>,
    mut enemies: Targets,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    let GameEvent::Command(GameCommand::Attack) = *trigger.event() else {
        return;
    };

    let outcome = match equation.result() {
        Some(result) if session.is_playing() => {
            let candidates = enemies
                .iter()
                .filter(|(_, _, _, status, _)| status.is_walking())
                .map(|(entity, enemy, progress, _, _)| (entity, progress.0, enemy.value));

            match select_target(candidates, result) {
                Some(target) => strike(
                    target,
                    clock.now,
                    &mut session,
                    &mut rng,
                    &mut boss_timer,
                    &mut enemies,
                    &mut feedback,
                ),
                None => {
                    knock_back(&mut enemies);
                    cues.shake(clock.now);
                    debug!(result, "Attack missed");
                    feedback.write(FeedbackEvent::AttackMissed);
                    AttackOutcome::Miss
                }
            }
        }
        _ => AttackOutcome::Ignored,
    };

    if matches!(outcome, AttackOutcome::Wounded { .. } | AttackOutcome::Killed { .. }) {
        equation.clear();
        cues.fire(clock.now);
    }
    last_attack.0 = Some(outcome);
}

fn strike(
    target: Entity,
    now: f64,
    session: &mut GameSession,
    rng: &mut GameRng,
    boss_timer: &mut BossTimer,
    enemies: &mut Targets,
    feedback: &mut EventWriter<FeedbackEvent>,
) -> AttackOutcome {
    let Ok((entity, mut enemy, progress, mut status, hits)) = enemies.get_mut(target) else {
        return AttackOutcome::Ignored;
    };

    if let Some(mut hits) = hits.filter(|hits| hits.0 > 1) {
        hits.0 -= 1;
        enemy.value = session.difficulty().reroll_value(enemy.value, &mut rng.0);
        boss_timer.arm(now);
        info!(id = enemy.id, hits_remaining = hits.0, new_value = enemy.value, "Boss wounded");
        feedback.write(FeedbackEvent::BossWounded {
            id: enemy.id,
            hits_remaining: hits.0,
            new_value: enemy.value,
        });
        return AttackOutcome::Wounded {
            entity,
            hits_remaining: hits.0,
            new_value: enemy.value,
        };
    }

    *status = EnemyStatus::Dying { since: now };
    let reward = session.record_kill(enemy.kind.is_boss());
    debug!(id = enemy.id, kind = %enemy.kind, value = enemy.value, score = reward.score, "Enemy killed");
    feedback.write(FeedbackEvent::EnemyKilled {
        id: enemy.id,
        kind: enemy.kind,
        progress: progress.0,
    });
    if reward.level_complete {
        feedback.write(FeedbackEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::LevelComplete,
        });
    }

    AttackOutcome::Killed {
        entity,
        level_complete: reward.level_complete,
    }
}

fn knock_back(enemies: &mut Targets) {
    for (_, _, mut progress, status, _) in enemies.iter_mut() {
        if status.is_walking() {
            progress.0 = (progress.0 + MISS_KNOCKBACK).min(SPAWN_EDGE);
        }
    }
}
