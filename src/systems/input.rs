use bevy_ecs::{
    event::EventWriter,
    observer::Trigger,
    system::{Res, ResMut},
};
use tracing::{debug, trace};

use crate::equation::Equation;
use crate::error::GameError;
use crate::events::{GameCommand, GameEvent};
use crate::systems::GameSession;

/// Applies keypad commands to the equation buffer.
///
/// Keys are checked against the current level's keypad. Editing is allowed in every phase;
/// only attacking needs a running game.
pub fn input_observer(
    trigger: Trigger<GameEvent>,
    session: Res<GameSession>,
    mut equation: ResMut<Equation>,
    mut errors: EventWriter<GameError>,
) {
    let GameEvent::Command(command) = *trigger.event();

    let result = match command {
        GameCommand::AddNumber(number) => equation.push_number(number, &session.difficulty()),
        GameCommand::AddOperator(operator) => equation.push_operator(operator, &session.difficulty()),
        GameCommand::Backspace => {
            equation.backspace();
            Ok(())
        }
        GameCommand::Clear => {
            equation.clear();
            Ok(())
        }
        _ => return,
    };

    match result {
        Ok(()) => trace!(equation = %*equation, result = ?equation.result(), "Equation updated"),
        Err(error) => {
            debug!(%error, ?command, "Key press rejected");
            errors.write(error.into());
        }
    }
}
