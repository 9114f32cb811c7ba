//! A scripted player for the headless demo.
//!
//! It types at a human pace, answers the enemy nearest the gate with a sum of the offered
//! buttons, and now and then fumbles the answer so misses happen too.

use std::collections::VecDeque;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, warn};

use math_castle::equation::Operator;
use math_castle::events::GameCommand;
use math_castle::game::Game;
use math_castle::systems::{AttackOutcome, GamePhase};

/// Milliseconds between two key presses.
const KEY_DELAY_MS: f64 = 250.0;
/// Chance of aiming one above the right answer.
const FUMBLE_CHANCE: f64 = 0.1;

pub struct Autopilot {
    queue: VecDeque<GameCommand>,
    next_key_at: f64,
    rng: SmallRng,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            queue: VecDeque::new(),
            next_key_at: 0.0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Presses at most one key. Returns `false` once there is nothing left to play.
    pub fn step(&mut self, game: &mut Game, now: f64) -> bool {
        if now < self.next_key_at {
            return true;
        }

        let phase = game.session().phase;
        let command = match phase {
            GamePhase::GameOver => return false,
            GamePhase::Tutorial => GameCommand::Start,
            GamePhase::Shop => GameCommand::LeaveShop,
            GamePhase::LevelComplete => {
                self.queue.clear();
                GameCommand::NextLevel
            }
            GamePhase::Playing => match self.queue.pop_front().or_else(|| self.plan(game)) {
                Some(command) => command,
                None => return true,
            },
        };
        self.next_key_at = now + KEY_DELAY_MS;

        if command == GameCommand::Attack {
            match game.attack() {
                AttackOutcome::Miss => debug!("Autopilot missed"),
                outcome => debug!(?outcome, "Autopilot fired"),
            }
            return true;
        }

        if let Err(error) = game.command(command) {
            warn!(%error, ?command, "Autopilot command rejected");
            self.queue.clear();
        }
        true
    }

    /// Queues the key presses that answer the walking enemy closest to the gate.
    fn plan(&mut self, game: &mut Game) -> Option<GameCommand> {
        let target = game
            .enemies()
            .into_iter()
            .filter(|enemy| enemy.status.is_walking())
            .min_by(|a, b| a.progress.total_cmp(&b.progress))?;

        let mut answer = target.value;
        if self.rng.random_bool(FUMBLE_CHANCE) {
            answer += 1;
        }

        if !game.equation().is_empty() {
            self.queue.push_back(GameCommand::Clear);
        }
        self.queue.extend(compose_sum(answer, &game.difficulty().available_buttons));
        self.queue.push_back(GameCommand::Attack);
        self.queue.pop_front()
    }
}

/// Spells `value` as a sum of `buttons`, largest first.
///
/// Stops short of `value` only if no button is small enough to close the gap.
pub fn compose_sum(value: u32, buttons: &[u32]) -> Vec<GameCommand> {
    let mut buttons = buttons.to_vec();
    buttons.sort_unstable_by(|a, b| b.cmp(a));

    let mut keys = Vec::new();
    let mut remaining = value;
    while let Some(&button) = buttons.iter().find(|&&button| button > 0 && button <= remaining) {
        if !keys.is_empty() {
            keys.push(GameCommand::AddOperator(Operator::Add));
        }
        keys.push(GameCommand::AddNumber(button));
        remaining -= button;
    }
    keys
}
