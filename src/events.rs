use bevy_ecs::prelude::*;

use crate::equation::Operator;
use crate::systems::{EnemyKind, GamePhase};

/// Intents coming from the controller (keypad, menus, or a scripted player).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    AddNumber(u32),
    AddOperator(Operator),
    Backspace,
    Clear,
    Attack,
    /// Leave the tutorial and start the first level.
    Start,
    EnterShop,
    LeaveShop,
    NextLevel,
    /// Start over after the castle has fallen.
    Restart,
}

/// Triggered on the world for every command; observers carry out the intent immediately.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// What hurt the castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    /// An enemy walked into the gate.
    Gate(EnemyKind),
    /// The boss' periodic strike.
    BossStrike,
}

/// The tuple handed to the leaderboard when a run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalScore {
    pub score: u32,
    pub level: u32,
}

/// Notifications for the renderer, audio, and leaderboard collaborators.
///
/// Buffered; the host drains them once per frame.
#[derive(Event, Clone, Debug, PartialEq)]
pub enum FeedbackEvent {
    EnemySpawned { id: u64, kind: EnemyKind, value: u32 },
    EnemyKilled { id: u64, kind: EnemyKind, progress: f32 },
    BossWounded { id: u64, hits_remaining: u8, new_value: u32 },
    AttackMissed,
    CastleDamaged { amount: u32, source: DamageSource, health: u32 },
    InkSplashed,
    PhaseChanged { from: GamePhase, to: GamePhase },
    GameOver(FinalScore),
}
