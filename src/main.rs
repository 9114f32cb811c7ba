#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use anyhow::{bail, Context};
use thousands::Separable;
use tracing::info;

use math_castle::constants::LOOP_TIME;
use math_castle::platform;

use crate::app::App;

mod app;
mod autopilot;

/// Command line options of the headless demo.
#[derive(Debug, Default)]
struct Options {
    /// Seed for every random draw; the operating system picks one when absent.
    seed: Option<u64>,
    /// Stop after this many frames.
    frames: Option<u64>,
    /// Simulate frames back to back instead of in real time.
    turbo: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    options.seed = Some(value.parse().with_context(|| format!("invalid seed: {value}"))?);
                }
                "--frames" => {
                    let value = args.next().context("--frames needs a value")?;
                    options.frames = Some(value.parse().with_context(|| format!("invalid frame count: {value}"))?);
                }
                "--turbo" => options.turbo = true,
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(options)
    }
}

/// Plays a game with the autopilot until the castle falls or the frame limit is reached.
pub fn main() -> anyhow::Result<()> {
    platform::init_logging().context("could not initialize logging")?;

    let options = Options::parse(env::args().skip(1))?;
    let mut app = App::new(options.seed, options.frames, options.turbo);

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    let session = app.game.session();
    println!(
        "Reached level {} with {} points and {} coins after {} frames",
        session.level,
        session.score.separate_with_commas(),
        session.currency.separate_with_commas(),
        app.frames().separate_with_commas(),
    );
    Ok(())
}
