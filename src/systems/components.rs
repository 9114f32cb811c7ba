use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use rand::rngs::SmallRng;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

use crate::constants::{animation, boss, combat};

/// The kind of monster carrying a number towards the castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
    Skeleton,
    Golem,
    Slime,
    Boss,
}

impl EnemyKind {
    /// Progress per reference frame before the level's speed multiplier is applied.
    pub fn base_speed(&self) -> f32 {
        match self {
            EnemyKind::Goblin => 0.04,
            EnemyKind::Orc => 0.025,
            EnemyKind::Dragon => 0.015,
            EnemyKind::Skeleton => 0.035,
            EnemyKind::Golem => 0.02,
            EnemyKind::Slime => 0.03,
            EnemyKind::Boss => 0.01,
        }
    }

    /// Damage dealt when this enemy reaches the gate.
    pub fn gate_damage(&self) -> u32 {
        match self {
            EnemyKind::Boss => boss::GATE_DAMAGE,
            _ => combat::GATE_DAMAGE,
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyKind::Boss)
    }
}

impl std::fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

/// Identity of an enemy and the number that defeats it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enemy {
    /// Unique for every spawn within a game.
    pub id: u64,
    pub kind: EnemyKind,
    pub value: u32,
}

/// Distance-to-castle proxy: 100 at the spawn edge, 0 at the gate.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Progress(pub f32);

/// Progress lost per reference frame while walking.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Speed(pub f32);

/// Lifecycle of an enemy.
///
/// `Walking` leads to either `Attacking` (it reached the gate) or `Dying` (it was struck).
/// Both terminal states carry the timestamp they began at and end in removal once their
/// animation has played.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum EnemyStatus {
    Walking,
    Attacking { since: f64 },
    Dying { since: f64 },
}

impl EnemyStatus {
    pub fn is_walking(&self) -> bool {
        matches!(self, EnemyStatus::Walking)
    }

    pub fn is_dying(&self) -> bool {
        matches!(self, EnemyStatus::Dying { .. })
    }

    /// Whether the enemy's exit animation has finished at `now`.
    pub fn expired(&self, now: f64) -> bool {
        match *self {
            EnemyStatus::Walking => false,
            EnemyStatus::Attacking { since } => now - since >= animation::ATTACKING_MS,
            EnemyStatus::Dying { since } => now - since >= animation::DYING_MS,
        }
    }
}

/// Hits a boss can still absorb before the next correct answer kills it.
///
/// Only bosses carry this component.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHits(pub u8);

#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub progress: Progress,
    pub speed: Speed,
    pub status: EnemyStatus,
}

#[derive(Bundle)]
pub struct BossBundle {
    pub enemy: EnemyBundle,
    pub hits: BossHits,
}

/// Frame timing, in milliseconds of the host's monotonic clock.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    /// Timestamp of the current tick.
    pub now: f64,
    /// Time since the previous tick.
    pub elapsed: f64,
    last_update: f64,
    resync: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            now: 0.0,
            elapsed: 0.0,
            last_update: 0.0,
            resync: true,
        }
    }
}

impl FrameClock {
    /// Moves the clock to `now`. The first tick after a resync reports no elapsed time.
    pub fn advance(&mut self, now: f64) {
        if self.resync {
            self.last_update = now;
            self.resync = false;
        }
        self.elapsed = (now - self.last_update).max(0.0);
        self.last_update = now;
        self.now = now;
    }

    /// Forgets the previous timestamp so a long pause is not simulated as one huge step.
    pub fn resync(&mut self) {
        self.resync = true;
    }
}

/// Source of every random draw in the game.
#[derive(Resource, Debug)]
pub struct GameRng(pub SmallRng);

/// Hands out enemy ids.
#[derive(Resource, Debug, Default)]
pub struct EnemyIds(u64);

impl EnemyIds {
    pub fn next_id(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}
