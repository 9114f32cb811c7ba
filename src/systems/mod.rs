//! The Entity-Component-System (ECS) module.
//!
//! Enemies are entities; the session, clock, timers and cues are resources. Per-tick work
//! runs as scheduled systems, while player commands are handled by observers the moment
//! they are triggered.

pub mod boss;
pub mod combat;
pub mod components;
pub mod cues;
pub mod damage;
pub mod input;
pub mod lifetime;
pub mod movement;
pub mod session;
pub mod spawn;
pub mod stage;

pub use self::boss::*;
pub use self::combat::*;
pub use self::components::*;
pub use self::cues::*;
pub use self::damage::*;
pub use self::input::*;
pub use self::lifetime::*;
pub use self::movement::*;
pub use self::session::*;
pub use self::spawn::*;
pub use self::stage::*;
