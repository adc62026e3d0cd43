// -- Lint policy ---------------------------------------------------------
// Crate-wide groups live in Cargo.toml [lints]; these are the extras.

// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]

//! Animated superformula curves.
//!
//! Four curves from the superformula family are drawn side by side while
//! two of their exponents drift with the frame counter.
//!
//! # Key entry points
//!
//! - [`curve`] - the superformula radius and shape sampling
//! - [`animation::AnimationDriver`] - the bounded frame loop
//! - [`config::RunConfig`] - command-line settings
//! - [`surface::DisplaySurface`] - the drawing target the driver consumes
//!
//! # Architecture
//!
//! The driver is single-threaded: each frame it polls the surface for
//! quit / escape, samples the four shapes into reusable buffers, submits a
//! clear, four polylines and a present, then sleeps. The `viewer` feature
//! adds [`surface::window::WindowSurface`], a winit window whose polylines
//! are drawn as wgpu line strips.

pub mod animation;
pub mod config;
pub mod curve;
pub mod error;
pub mod gpu;
pub mod surface;
pub mod util;

pub use error::{Result, SuperformulaError};
