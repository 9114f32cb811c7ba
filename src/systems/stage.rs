//! Phase changes: starting a run, the shop, moving between levels, and game over.

use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    observer::Trigger,
    query::With,
    system::{Commands, Query, ResMut, SystemParam},
};
use tracing::{info, warn};

use crate::equation::Equation;
use crate::error::GameError;
use crate::events::{FeedbackEvent, GameCommand, GameEvent};
use crate::systems::{
    BossTimer, Enemy, FrameClock, GamePhase, GameSession, LastSpawned, PendingDamage, SpawnTimer, VisualCues,
};

/// Everything on the battlefield that is swept away when a level begins.
#[derive(SystemParam)]
pub struct Battlefield<'w, 's> {
    commands: Commands<'w, 's>,
    enemies: Query<'w, 's, Entity, With<Enemy>>,
    equation: ResMut<'w, Equation>,
    clock: ResMut<'w, FrameClock>,
    spawn_timer: ResMut<'w, SpawnTimer>,
    last_spawned: ResMut<'w, LastSpawned>,
    boss_timer: ResMut<'w, BossTimer>,
    cues: ResMut<'w, VisualCues>,
    damage: ResMut<'w, PendingDamage>,
}

impl Battlefield<'_, '_> {
    /// Removes every enemy and readies the spawner for a fresh level.
    fn reset(&mut self) {
        for entity in self.enemies.iter() {
            self.commands.entity(entity).despawn();
        }
        self.equation.clear();
        self.clock.resync();
        *self.spawn_timer = SpawnTimer::default();
        self.last_spawned.0 = None;
        self.boss_timer.disarm();
        self.cues.clear();
        self.damage.clear();
    }
}

/// Carries out the commands that move the game between phases.
pub fn stage_observer(
    trigger: Trigger<GameEvent>,
    mut session: ResMut<GameSession>,
    mut battlefield: Battlefield,
    mut errors: EventWriter<GameError>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    let GameEvent::Command(command) = *trigger.event();
    let from = session.phase;

    match (command, from) {
        (GameCommand::Start, GamePhase::Tutorial) | (GameCommand::Restart, GamePhase::GameOver) => {
            session.begin_run();
            battlefield.reset();
            info!(currency = session.currency, "Run started");
        }
        (GameCommand::EnterShop, GamePhase::Playing | GamePhase::LevelComplete) => {
            session.phase = GamePhase::Shop;
        }
        (GameCommand::LeaveShop, GamePhase::Shop) => {
            session.phase = if session.quota_met() {
                GamePhase::LevelComplete
            } else {
                GamePhase::Playing
            };
            battlefield.clock.resync();
            battlefield.boss_timer.disarm();
        }
        (GameCommand::NextLevel, GamePhase::LevelComplete) => {
            session.advance_level();
            battlefield.reset();
            info!(level = session.level, health = session.health, "Level started");
        }
        (GameCommand::Start | GameCommand::Restart | GameCommand::EnterShop | GameCommand::LeaveShop | GameCommand::NextLevel, _) => {
            warn!(?command, phase = ?from, "Command not valid in this phase");
            errors.write(GameError::InvalidTransition { phase: from, command });
            return;
        }
        _ => return,
    }

    info!(?from, to = ?session.phase, "Phase changed");
    feedback.write(FeedbackEvent::PhaseChanged { from, to: session.phase });
}

/// Ends the run once the castle has no health left.
///
/// Runs first in the tick, so nothing else moves once the castle has fallen.
pub fn terminal_check_system(mut session: ResMut<GameSession>, mut feedback: EventWriter<FeedbackEvent>) {
    if session.health > 0 || session.phase != GamePhase::Playing {
        return;
    }

    let from = session.phase;
    session.phase = GamePhase::GameOver;
    let score = session.final_score();
    warn!(score = score.score, level = score.level, "Game over");
    feedback.write(FeedbackEvent::PhaseChanged {
        from,
        to: GamePhase::GameOver,
    });
    feedback.write(FeedbackEvent::GameOver(score));
}
