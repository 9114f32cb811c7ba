use std::time::{Duration, Instant};

use thousands::Separable;
use tracing::{debug, info, trace};

use math_castle::constants::LOOP_TIME;
use math_castle::events::FeedbackEvent;
use math_castle::game::Game;
use math_castle::{formatter, platform};

use crate::autopilot::Autopilot;

/// Host loop around the game: supplies the clock, runs the autopilot, and paces frames.
pub struct App {
    pub game: Game,
    autopilot: Autopilot,
    started: Instant,
    frame: u64,
    frame_limit: Option<u64>,
    /// Advance the clock by one frame per iteration instead of following the wall clock.
    turbo: bool,
}

impl App {
    pub fn new(seed: Option<u64>, frame_limit: Option<u64>, turbo: bool) -> Self {
        let game = match seed {
            Some(seed) => Game::with_seed(seed),
            None => Game::new(),
        };
        info!(?seed, ?frame_limit, turbo, "Game created");

        App {
            game,
            autopilot: Autopilot::new(seed.unwrap_or_default()),
            started: Instant::now(),
            frame: 0,
            frame_limit,
            turbo,
        }
    }

    /// Runs a single frame and sleeps out the rest of the frame budget.
    ///
    /// # Returns
    ///
    /// `true` while the loop should keep running.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        let now = if self.turbo {
            self.frame as f64 * LOOP_TIME.as_secs_f64() * 1000.0
        } else {
            self.started.elapsed().as_secs_f64() * 1000.0
        };

        formatter::increment_frame();
        self.frame += 1;

        let playing = self.autopilot.step(&mut self.game, now);
        self.game.tick(now);
        self.report_feedback();

        if !playing || self.frame_limit.is_some_and(|limit| self.frame >= limit) {
            return false;
        }

        if !self.turbo {
            let remaining = LOOP_TIME.saturating_sub(start.elapsed());
            if remaining != Duration::ZERO {
                platform::sleep(remaining, true);
            }
        }
        true
    }

    fn report_feedback(&mut self) {
        for event in self.game.drain_feedback() {
            match event {
                FeedbackEvent::GameOver(result) => {
                    info!(score = %result.score.separate_with_commas(), level = result.level, "Final score")
                }
                FeedbackEvent::PhaseChanged { .. } | FeedbackEvent::CastleDamaged { .. } => debug!(?event, "Feedback"),
                _ => trace!(?event, "Feedback"),
            }
        }
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }
}
