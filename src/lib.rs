//! Math Castle game library crate.
//!
//! Enemies walk a road towards the castle, each carrying a number; the player defends it by
//! composing an equation that evaluates to that number and firing.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[cfg_attr(coverage_nightly, coverage(off))]
pub mod formatter;
#[cfg_attr(coverage_nightly, coverage(off))]
pub mod platform;

pub mod constants;
pub mod difficulty;
pub mod equation;
pub mod error;
pub mod events;
pub mod game;
pub mod path;
pub mod systems;
