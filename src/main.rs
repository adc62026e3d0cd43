//! Superformula shape animations in a native window.

use std::io::{self, Write};

use superformula::{
    animation::{AnimationDriver, CANVAS_HEIGHT, CANVAS_WIDTH},
    config::{HarmonicCounts, RunConfig},
    surface::window::WindowSurface,
    SuperformulaError,
};

const WINDOW_TITLE: &str = "Superformula";

fn run() -> Result<(), SuperformulaError> {
    // Usage is always shown once, before any parsing.
    let mut out = io::stdout().lock();
    writeln!(out, "{}", RunConfig::usage())?;

    let config = RunConfig::from_args(std::env::args_os())?;
    log::debug!("{config:?}");

    let mut surface =
        WindowSurface::new(WINDOW_TITLE, CANVAS_WIDTH, CANVAS_HEIGHT)?;

    let harmonics = HarmonicCounts::for_config(&config);
    let mut driver = AnimationDriver::new(config, harmonics);
    writeln!(out, "Number of points: {}", driver.point_count())?;
    drop(out);

    let summary = driver.run(&mut surface)?;
    log::info!("{} frames rendered ({})", summary.frames, summary.reason);
    Ok(())
}

fn main() {
    env_logger::init();

    match run() {
        Ok(()) => {}
        // clap prints help to stdout and usage errors to stderr itself
        Err(SuperformulaError::InvalidArgument(e)) => e.exit(),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(e.exit_code());
        }
    }
}
