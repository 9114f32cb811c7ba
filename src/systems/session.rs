use bevy_ecs::resource::Resource;
use tracing::{debug, info};

use crate::constants::{boss, combat, INITIAL_HEALTH};
use crate::difficulty::{enemies_per_level, is_boss_level, DifficultyConfig};
use crate::events::FinalScore;

/// The top-level phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Instructions are showing; nothing moves.
    #[default]
    Tutorial,
    Playing,
    /// The upgrade screen. The simulation is frozen until the player leaves.
    Shop,
    LevelComplete,
    GameOver,
}

/// Rewards granted for a single kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillReward {
    pub score: u32,
    pub coins: u32,
    /// Whether this kill met the level's quota.
    pub level_complete: bool,
}

/// Scalar state of the run: phase, score, purse and castle health.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub phase: GamePhase,
    pub score: u32,
    /// Coins, kept across restarts.
    pub currency: u32,
    pub level: u32,
    pub enemies_defeated: u32,
    pub health: u32,
    pub max_health: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            phase: GamePhase::Tutorial,
            score: 0,
            currency: 0,
            level: 1,
            enemies_defeated: 0,
            health: INITIAL_HEALTH,
            max_health: INITIAL_HEALTH,
        }
    }
}

impl GameSession {
    pub fn difficulty(&self) -> DifficultyConfig {
        DifficultyConfig::for_level(self.level)
    }

    pub fn quota(&self) -> u32 {
        enemies_per_level(self.level)
    }

    pub fn quota_met(&self) -> bool {
        self.enemies_defeated >= self.quota()
    }

    /// Fraction of the level's quota already defeated, in `[0, 1]`.
    pub fn quota_progress(&self) -> f32 {
        (self.enemies_defeated as f32 / self.quota() as f32).min(1.0)
    }

    pub fn is_boss_level(&self) -> bool {
        is_boss_level(self.level)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Credits a kill and completes the level once the quota is met.
    pub fn record_kill(&mut self, boss_kill: bool) -> KillReward {
        let mut reward = KillReward {
            score: if boss_kill {
                boss::KILL_SCORE
            } else {
                self.level * combat::KILL_SCORE_PER_LEVEL
            },
            coins: 1 + self.level / combat::COIN_LEVEL_DIVISOR,
            level_complete: false,
        };
        if boss_kill {
            reward.coins += boss::KILL_COINS;
        }

        self.enemies_defeated += 1;
        if self.quota_met() && self.phase == GamePhase::Playing {
            reward.level_complete = true;
            reward.coins += if self.is_boss_level() {
                combat::BOSS_LEVEL_COMPLETE_BONUS
            } else {
                combat::LEVEL_COMPLETE_BONUS
            };
            self.phase = GamePhase::LevelComplete;
            info!(level = self.level, score = self.score + reward.score, "Level complete");
        }

        self.score += reward.score;
        self.currency += reward.coins;
        debug!(
            score = self.score,
            currency = self.currency,
            defeated = self.enemies_defeated,
            quota = self.quota(),
            "Kill credited"
        );
        reward
    }

    /// Subtracts castle health, saturating at zero, and returns what is left.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    /// Resets everything except the purse for a fresh run at level 1.
    pub fn begin_run(&mut self) {
        *self = Self {
            phase: GamePhase::Playing,
            currency: self.currency,
            ..Self::default()
        };
    }

    /// Moves to the next level and patches up the castle a little.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.enemies_defeated = 0;
        self.health = (self.health + combat::LEVEL_HEAL).min(self.max_health);
        self.phase = GamePhase::Playing;
    }

    pub fn final_score(&self) -> FinalScore {
        FinalScore {
            score: self.score,
            level: self.level,
        }
    }
}
