//! This module contains all the constants used in the game.

use std::time::Duration;

/// Frame pacing for the native runner.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The castle's starting (and maximum) health.
pub const INITIAL_HEALTH: u32 = 100;

/// Path progress values. 100 is the spawn edge, 0 is the castle gate.
pub mod path {
    use glam::Vec2;

    pub const SPAWN_EDGE: f32 = 100.0;
    pub const CASTLE_GATE: f32 = 0.0;

    /// Control points of the cubic Bezier the renderer walks enemies along,
    /// in percent of the play area (x from the left, y from the bottom).
    pub const CONTROL_POINTS: [Vec2; 4] = [
        Vec2::new(100.0, 25.0),
        Vec2::new(70.0, 25.0),
        Vec2::new(60.0, 50.0),
        Vec2::new(50.0, 35.0),
    ];
}

/// Timing of the frame loop and of the enemy spawner, in milliseconds.
pub mod timing {
    /// Enemy speeds are expressed as progress per reference frame.
    pub const REFERENCE_FRAME_MS: f64 = 16.0;
    /// Delay before the first spawn after (re)starting or entering a level.
    pub const FIRST_SPAWN_DELAY_MS: f64 = 2000.0;
    /// The scheduled spawn time is jittered by up to this much in either direction.
    pub const SPAWN_JITTER_MS: f64 = 500.0;
    /// A new enemy only appears once the previous one has walked below this progress.
    pub const SPAWN_CLEARANCE: f32 = 60.0;
}

/// How long transient states and cues stay visible, in milliseconds.
pub mod animation {
    pub const DYING_MS: f64 = 500.0;
    pub const ATTACKING_MS: f64 = 300.0;
    pub const CASTLE_SHAKE_MS: f64 = 500.0;
    pub const HIT_FLASH_MS: f64 = 500.0;
    pub const CANNON_RECOIL_MS: f64 = 200.0;
}

/// Damage, rewards, and punishment.
pub mod combat {
    /// Damage dealt by a regular enemy reaching the gate.
    pub const GATE_DAMAGE: u32 = 20;
    /// Progress added to every walking enemy after a missed attack.
    pub const MISS_KNOCKBACK: f32 = 5.0;
    /// Score per kill is `level * KILL_SCORE_PER_LEVEL`.
    pub const KILL_SCORE_PER_LEVEL: u32 = 10;
    /// Coins per kill are `1 + level / COIN_LEVEL_DIVISOR`.
    pub const COIN_LEVEL_DIVISOR: u32 = 3;
    pub const LEVEL_COMPLETE_BONUS: u32 = 5;
    pub const BOSS_LEVEL_COMPLETE_BONUS: u32 = 15;
    /// Health restored when moving on to the next level.
    pub const LEVEL_HEAL: u32 = 20;
}

/// The boss ("El Segador") that guards every fifth level.
pub mod boss {
    pub const HITS: u8 = 5;
    pub const GATE_DAMAGE: u32 = 90;
    pub const STRIKE_DAMAGE: u32 = 25;
    pub const STRIKE_INTERVAL_MS: f64 = 5000.0;
    pub const KILL_SCORE: u32 = 500;
    pub const KILL_COINS: u32 = 10;
    /// Per-tick chance of the ink cloud that obscures the numbers.
    pub const INK_CHANCE: f64 = 0.005;
    pub const INK_MS: f64 = 3000.0;
    /// Wait before another boss walks out after one leaves the road undefeated.
    pub const RETURN_DELAY_MS: f64 = 10_000.0;
}

/// Probabilities used when a value does not pin down an enemy kind.
pub mod spawn {
    /// From level 5 onward.
    pub const DRAGON_CHANCE: f64 = 0.2;
    /// From level 3 onward, rolled after the dragon check fails.
    pub const ORC_CHANCE: f64 = 0.4;
}
