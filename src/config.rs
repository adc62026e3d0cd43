//! Run configuration parsed from the command line.
//!
//! The flags mirror the classic single-letter interface:
//!
//! ```text
//! -t <frames>   animation interval (default 1000)
//! -d <ms>       delay between frames in milliseconds (default 50)
//! -s <step>     angular smooth step (default 0.005)
//! -r <0|1>      random shapes (default 0)
//! -h            print help
//! ```

use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use rand::Rng;

use crate::{
    curve::{min_smooth_step, MAX_POINTS},
    error::SuperformulaError,
};

/// Frames rendered before the animation stops on its own.
pub const DEFAULT_INTERVAL: u32 = 1000;
/// Milliseconds slept after each frame.
pub const DEFAULT_DELAY_MS: u64 = 50;
/// Angular step between curve samples, in radians.
pub const DEFAULT_SMOOTH_STEP: f64 = 0.005;
/// Harmonic counts used when random shapes are off.
pub const DEFAULT_HARMONICS: [u32; 4] = [2, 4, 10, 30];
/// Exclusive upper bound of a randomized harmonic count.
pub const RANDOM_HARMONIC_LIMIT: u32 = 50;

#[derive(Debug, Parser)]
#[command(
    name = "superformula",
    about = "Superformula shape animations",
    disable_version_flag = true,
    args_override_self = true
)]
struct Cli {
    /// Animation interval
    #[arg(
        short = 't',
        value_name = "integer",
        default_value_t = DEFAULT_INTERVAL
    )]
    interval: u32,

    /// Delay between frames in milliseconds
    #[arg(
        short = 'd',
        value_name = "integer",
        default_value_t = DEFAULT_DELAY_MS
    )]
    delay: u64,

    /// Smooth step
    #[arg(
        short = 's',
        value_name = "double",
        default_value_t = DEFAULT_SMOOTH_STEP,
        allow_negative_numbers = true
    )]
    smooth_step: f64,

    /// Random shapes
    #[arg(
        short = 'r',
        value_name = "0 or 1",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    random: u8,
}

/// Immutable settings for one animation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Total frames before auto-stop.
    pub interval: u32,
    /// Milliseconds slept after each frame.
    pub delay_ms: u64,
    /// Angular step between curve samples, in radians.
    pub smooth_step: f64,
    /// Draw random harmonic counts instead of the defaults.
    pub random_shapes: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            delay_ms: DEFAULT_DELAY_MS,
            smooth_step: DEFAULT_SMOOTH_STEP,
            random_shapes: false,
        }
    }
}

impl RunConfig {
    /// Parse a full argument list (program name first).
    ///
    /// `-h` comes back as [`SuperformulaError::InvalidArgument`] carrying
    /// clap's `DisplayHelp` kind; its exit code is 0.
    pub fn from_args<I, T>(args: I) -> Result<Self, SuperformulaError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args)?.into_config()
    }

    /// Rendered usage text.
    #[must_use]
    pub fn usage() -> String {
        Cli::command().render_help().to_string()
    }
}

impl Cli {
    fn into_config(self) -> Result<RunConfig, SuperformulaError> {
        if !(self.smooth_step.is_finite() && self.smooth_step > 0.0) {
            return Err(SuperformulaError::InvalidValue {
                flag: "-s",
                reason: format!(
                    "smooth step must be a positive number, got {}",
                    self.smooth_step
                ),
            });
        }
        if self.smooth_step < min_smooth_step() {
            return Err(SuperformulaError::InvalidValue {
                flag: "-s",
                reason: format!(
                    "smooth step {} needs more than {MAX_POINTS} points per \
                     shape; use at least {:e}",
                    self.smooth_step,
                    min_smooth_step()
                ),
            });
        }
        Ok(RunConfig {
            interval: self.interval,
            delay_ms: self.delay,
            smooth_step: self.smooth_step,
            random_shapes: self.random == 1,
        })
    }
}

/// Harmonic count (`m`) for each of the four shapes, fixed for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmonicCounts(pub [u32; 4]);

impl Default for HarmonicCounts {
    fn default() -> Self {
        Self(DEFAULT_HARMONICS)
    }
}

impl HarmonicCounts {
    /// Defaults, or fresh random counts when the config asks for them.
    #[must_use]
    pub fn for_config(config: &RunConfig) -> Self {
        if config.random_shapes {
            Self::random_with(&mut rand::rng())
        } else {
            Self::default()
        }
    }

    /// Four independent counts in `[0, 50)`.
    pub fn random_with<R: Rng>(rng: &mut R) -> Self {
        Self(std::array::from_fn(|_| {
            rng.random_range(0..RANDOM_HARMONIC_LIMIT)
        }))
    }

    /// The counts in shape order.
    #[must_use]
    pub fn as_array(&self) -> [u32; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn parse(args: &[&str]) -> Result<RunConfig, SuperformulaError> {
        RunConfig::from_args(
            std::iter::once("superformula").chain(args.iter().copied()),
        )
    }

    #[test]
    fn no_flags_yield_defaults() {
        assert_eq!(parse(&[]).unwrap(), RunConfig::default());
    }

    #[test]
    fn all_flags_round_trip() {
        let config =
            parse(&["-t", "200", "-d", "10", "-s", "0.01", "-r", "0"]).unwrap();
        assert_eq!(
            config,
            RunConfig {
                interval: 200,
                delay_ms: 10,
                smooth_step: 0.01,
                random_shapes: false,
            }
        );
    }

    #[test]
    fn random_flag_enables_random_shapes() {
        assert!(parse(&["-r", "1"]).unwrap().random_shapes);
    }

    #[test]
    fn later_flag_wins() {
        let config = parse(&["-t", "5", "-d", "1", "-t", "7"]).unwrap();
        assert_eq!(config.interval, 7);
        assert_eq!(config.delay_ms, 1);
    }

    #[test]
    fn help_flag_exits_successfully() {
        let err = parse(&["-h"]).unwrap_err();
        match &err {
            SuperformulaError::InvalidArgument(e) => {
                assert_eq!(e.kind(), ErrorKind::DisplayHelp);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn unknown_flag_names_the_argument() {
        let err = parse(&["-x"]).unwrap_err();
        assert!(matches!(err, SuperformulaError::InvalidArgument(_)));
        assert_ne!(err.exit_code(), 0);
        assert!(err.to_string().contains("-x"), "message: {err}");
    }

    #[test]
    fn missing_value_is_an_error_not_a_crash() {
        let err = parse(&["-t"]).unwrap_err();
        assert!(matches!(err, SuperformulaError::InvalidArgument(_)));
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn random_flag_only_accepts_zero_or_one() {
        assert!(parse(&["-r", "2"]).is_err());
    }

    #[test]
    fn non_positive_step_is_rejected() {
        for step in ["0", "-0.5", "NaN", "inf"] {
            let err = parse(&["-s", step]).unwrap_err();
            assert!(
                matches!(err, SuperformulaError::InvalidValue { flag: "-s", .. }),
                "step {step}: {err:?}"
            );
        }
    }

    #[test]
    fn tiny_step_is_rejected_instead_of_overflowing() {
        for step in ["1e-300", "1e-12", "5e-324"] {
            let err = parse(&["-s", step]).unwrap_err();
            assert!(
                matches!(err, SuperformulaError::InvalidValue { flag: "-s", .. }),
                "step {step}: {err:?}"
            );
            assert_eq!(err.exit_code(), 2);
        }
        let smallest = min_smooth_step().to_string();
        assert_eq!(
            parse(&["-s", smallest.as_str()]).unwrap().smooth_step,
            min_smooth_step()
        );
        assert!(parse(&["-s", "1e-5"]).is_ok());
    }

    #[test]
    fn usage_lists_every_flag() {
        let usage = RunConfig::usage();
        for flag in ["-t", "-d", "-s", "-r", "-h"] {
            assert!(usage.contains(flag), "missing {flag} in:\n{usage}");
        }
    }

    #[test]
    fn default_harmonics_are_fixed() {
        let config = RunConfig::default();
        for _ in 0..3 {
            assert_eq!(
                HarmonicCounts::for_config(&config).as_array(),
                [2, 4, 10, 30]
            );
        }
    }

    #[test]
    fn random_harmonics_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let counts = HarmonicCounts::random_with(&mut rng);
            assert!(counts
                .as_array()
                .iter()
                .all(|&m| m < RANDOM_HARMONIC_LIMIT));
        }
    }

    #[test]
    fn seeded_harmonics_are_reproducible() {
        let a = HarmonicCounts::random_with(&mut StdRng::seed_from_u64(42));
        let b = HarmonicCounts::random_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
