//! Short-lived presentation flags.
//!
//! Each cue is a deadline on the game clock rather than a timer callback, so cues stop
//! with the simulation when the game is paused and are cleared on every restart.

use bevy_ecs::{
    resource::Resource,
    system::{Res, ResMut},
};

use crate::constants::animation;
use crate::systems::FrameClock;

/// A flag that stays raised until a point on the game clock.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Deadline(Option<f64>);

impl Deadline {
    /// Raises the flag for `duration` milliseconds from `now`, extending any earlier deadline.
    pub fn raise(&mut self, now: f64, duration: f64) {
        let until = now + duration;
        self.0 = Some(self.0.map_or(until, |current| current.max(until)));
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.0.is_some_and(|until| now < until)
    }

    pub fn until(&self) -> Option<f64> {
        self.0
    }

    fn expire(&mut self, now: f64) {
        if self.0.is_some_and(|until| now >= until) {
            self.0 = None;
        }
    }
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct VisualCues {
    pub castle_shake: Deadline,
    pub hit_flash: Deadline,
    pub cannon_recoil: Deadline,
    /// The boss' ink splash obscuring the keypad.
    pub ink: Deadline,
}

impl VisualCues {
    pub fn shake(&mut self, now: f64) {
        self.castle_shake.raise(now, animation::CASTLE_SHAKE_MS);
    }

    /// Flash and recoil that accompany every successful shot.
    pub fn fire(&mut self, now: f64) {
        self.hit_flash.raise(now, animation::HIT_FLASH_MS);
        self.cannon_recoil.raise(now, animation::CANNON_RECOIL_MS);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Lowers every cue whose deadline has passed.
pub fn cue_expiry_system(clock: Res<FrameClock>, mut cues: ResMut<VisualCues>) {
    let now = clock.now;
    cues.castle_shake.expire(now);
    cues.hit_flash.expire(now);
    cues.cannon_recoil.expire(now);
    cues.ink.expire(now);
}
