//! Centralized error types for the game core.
//!
//! Gameplay outcomes (an incomplete equation, a missed attack, the castle falling) are
//! modelled as states, not errors. The errors here cover intents that the current state
//! refuses to carry out.

use bevy_ecs::event::Event;

use crate::equation::Operator;
use crate::events::GameCommand;
use crate::systems::GamePhase;

/// Main error type for the game core.
///
/// Observers write these as events while handling a command; `Game::command` drains them
/// into its return value.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Event)]
pub enum GameError {
    #[error("Input rejected: {0}")]
    Input(#[from] InputError),

    #[error("Cannot {command:?} while {phase:?}")]
    InvalidTransition { phase: GamePhase, command: GameCommand },
}

/// Reasons the equation buffer refuses a key press.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("An equation cannot start with an operator")]
    EmptyEquation,

    #[error("Two operators cannot follow each other")]
    ConsecutiveOperator,

    #[error("Button {0} is not available on this level")]
    ButtonUnavailable(u32),

    #[error("Operator {0} is not available on this level")]
    OperatorUnavailable(Operator),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
