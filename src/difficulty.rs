//! Level progression: how fast enemies arrive, what numbers they carry, and which keys the
//! player gets to answer them with.

use std::ops::RangeInclusive;

use bitflags::bitflags;
use rand::Rng;
use smallvec::{smallvec, SmallVec};

use crate::constants::spawn::{DRAGON_CHANCE, ORC_CHANCE};
use crate::equation::Operator;
use crate::systems::EnemyKind;

bitflags! {
    /// The operators offered on the keypad for a level.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OperatorSet: u8 {
        const ADD = 1 << 0;
        const SUBTRACT = 1 << 1;
        const MULTIPLY = 1 << 2;
        const DIVIDE = 1 << 3;
    }
}

impl OperatorSet {
    pub fn allows(&self, operator: Operator) -> bool {
        self.contains(Self::from(operator))
    }
}

impl From<Operator> for OperatorSet {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::Add => OperatorSet::ADD,
            Operator::Subtract => OperatorSet::SUBTRACT,
            Operator::Multiply => OperatorSet::MULTIPLY,
            Operator::Divide => OperatorSet::DIVIDE,
        }
    }
}

/// Everything about a level that depends only on its number.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyConfig {
    /// Milliseconds between spawns, before jitter.
    pub spawn_rate: f64,
    /// Multiplier applied to every enemy kind's base speed.
    pub enemy_speed_base: f32,
    pub allowed_operators: OperatorSet,
    /// Range enemy values are drawn from.
    pub number_range: RangeInclusive<u32>,
    /// Number keys offered to the player.
    pub available_buttons: SmallVec<[u32; 8]>,
}

impl DifficultyConfig {
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => Self {
                spawn_rate: 5500.0,
                enemy_speed_base: 0.8,
                allowed_operators: OperatorSet::ADD | OperatorSet::SUBTRACT,
                number_range: 2..=9,
                available_buttons: smallvec![1, 2, 3, 4, 5],
            },
            2 => Self {
                spawn_rate: 5000.0,
                enemy_speed_base: 1.0,
                allowed_operators: OperatorSet::ADD | OperatorSet::SUBTRACT,
                number_range: 2..=15,
                available_buttons: smallvec![1, 2, 3, 4, 5, 10],
            },
            3 | 4 => Self {
                spawn_rate: 4500.0,
                enemy_speed_base: 1.1,
                allowed_operators: OperatorSet::ADD | OperatorSet::SUBTRACT | OperatorSet::MULTIPLY,
                number_range: 5..=25,
                available_buttons: smallvec![1, 2, 3, 4, 5, 10],
            },
            _ => Self {
                spawn_rate: 4000.0,
                enemy_speed_base: 1.3 + level as f32 * 0.05,
                allowed_operators: OperatorSet::all(),
                number_range: 8..=30 + level * 2,
                available_buttons: smallvec![1, 2, 3, 4, 5, 10, 20],
            },
        }
    }

    /// Draws a fresh enemy value from this level's range.
    pub fn roll_value(&self, rng: &mut impl Rng) -> u32 {
        rng.random_range(self.number_range.clone())
    }

    /// Draws a value from this level's range that differs from `current`.
    ///
    /// Used when a wounded boss changes its number, so the same answer never works twice.
    pub fn reroll_value(&self, current: u32, rng: &mut impl Rng) -> u32 {
        let (min, max) = (*self.number_range.start(), *self.number_range.end());
        if min == max || !self.number_range.contains(&current) {
            return self.roll_value(rng);
        }
        let value = rng.random_range(min..max);
        if value >= current {
            value + 1
        } else {
            value
        }
    }
}

/// Every fifth level is a boss fight.
pub fn is_boss_level(level: u32) -> bool {
    level % 5 == 0
}

/// How many enemies must be defeated to clear a level.
pub fn enemies_per_level(level: u32) -> u32 {
    if is_boss_level(level) {
        1
    } else {
        5 + level * 2
    }
}

/// Picks the kind of a regular (non-boss) enemy carrying `value`.
///
/// Some values always map to the same kind so players learn to recognise them; the rest
/// escalate randomly with the level.
pub fn enemy_kind_for_value(value: u32, level: u32, rng: &mut impl Rng) -> EnemyKind {
    if value == 5 || (value > 10 && value % 5 == 0 && value % 10 != 0) {
        return EnemyKind::Skeleton;
    }
    if value == 7 || (value > 10 && value % 10 == 7) {
        return EnemyKind::Golem;
    }
    if value % 10 == 0 {
        return EnemyKind::Slime;
    }

    if level >= 5 && rng.random_bool(DRAGON_CHANCE) {
        return EnemyKind::Dragon;
    }
    if level >= 3 && rng.random_bool(ORC_CHANCE) {
        return EnemyKind::Orc;
    }
    EnemyKind::Goblin
}
