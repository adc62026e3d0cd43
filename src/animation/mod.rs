//! Frame-by-frame animation of four superformula shapes.
//!
//! Each frame the [`AnimationDriver`]:
//!
//! 1. polls the surface for quit / escape signals,
//! 2. derives the shared exponents `n2 = sin(t·speed)`, `n3 = cos(t·speed)`,
//! 3. samples every [`ShapeSlot`] into its own point buffer,
//! 4. clears, draws the four polylines and presents,
//! 5. sleeps for the configured delay and advances the frame counter.
//!
//! The run stops when the counter reaches the configured interval or a
//! signal arrives. A signal stops the driver before that frame is drawn.

mod state;

use std::time::Duration;

use glam::{DVec2, IVec2};
pub use state::{RunState, RunSummary, StopReason};

use crate::{
    config::{HarmonicCounts, RunConfig},
    curve::{point_count, sample_shape_into, ShapeParams},
    error::Result,
    surface::{DisplaySurface, Rgba},
    util::frame_timing::FrameTiming,
};

/// Logical canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 500;
/// Logical canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 500;
/// Angular speed of the exponent drift, in radians per frame.
pub const SPEED: f64 = 0.1;
/// Pixels per unit radius.
pub const SCALE: f64 = 100.0;
/// Canvas background.
pub const BACKGROUND: Rgba = Rgba::WHITE;

/// Frames between FPS log lines.
const FPS_LOG_INTERVAL: u64 = 100;

/// The animated exponents `(n2, n3)` for frame `t`.
#[must_use]
pub fn exponents_at(t: u32) -> (f64, f64) {
    (f64::from(t) * SPEED).sin_cos()
}

/// One shape's fixed placement: harmonic count, center and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSlot {
    /// Harmonic count `m`.
    pub harmonic: u32,
    /// Center in canvas pixels.
    pub center: DVec2,
    /// Stroke color.
    pub color: Rgba,
}

impl ShapeSlot {
    /// Curve parameters for this slot at the given exponents.
    #[must_use]
    pub fn params(&self, n2: f64, n3: f64) -> ShapeParams {
        ShapeParams::with_harmonic(f64::from(self.harmonic), n2, n3)
    }
}

/// The four slots, one per canvas quadrant, in drawing order.
#[must_use]
pub fn shape_slots(harmonics: HarmonicCounts) -> [ShapeSlot; 4] {
    let (w, h) = (f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT));
    let centers = [
        DVec2::new(0.25 * w, 0.25 * h),
        DVec2::new(0.75 * w, 0.25 * h),
        DVec2::new(0.25 * w, 0.75 * h),
        DVec2::new(0.75 * w, 0.75 * h),
    ];
    let colors = [Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::ORANGE];
    let m = harmonics.as_array();
    std::array::from_fn(|i| ShapeSlot {
        harmonic: m[i],
        center: centers[i],
        color: colors[i],
    })
}

/// Owns the frame counter, the shape slots and their point buffers.
pub struct AnimationDriver {
    config: RunConfig,
    slots: [ShapeSlot; 4],
    buffers: [Vec<IVec2>; 4],
    point_count: usize,
    frame: u32,
    state: RunState,
    timing: FrameTiming,
}

impl AnimationDriver {
    /// Driver at frame 0. With a zero interval it starts out stopped.
    #[must_use]
    pub fn new(config: RunConfig, harmonics: HarmonicCounts) -> Self {
        let point_count = point_count(config.smooth_step);
        let state = if config.interval == 0 {
            RunState::Stopped(StopReason::Completed)
        } else {
            RunState::Running
        };
        log::debug!(
            "animation: {} frames, {} points per shape, harmonics {:?}",
            config.interval,
            point_count,
            harmonics.as_array()
        );
        Self {
            config,
            slots: shape_slots(harmonics),
            buffers: std::array::from_fn(|_| Vec::with_capacity(point_count)),
            point_count,
            frame: 0,
            state,
            timing: FrameTiming::new(),
        }
    }

    /// Points sampled per shape, fixed for the run.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Frames completed so far.
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// The four shape slots in drawing order.
    #[must_use]
    pub fn slots(&self) -> &[ShapeSlot; 4] {
        &self.slots
    }

    /// Render one frame. A stopped driver does nothing.
    ///
    /// # Errors
    ///
    /// Propagates an unrecoverable [`DisplaySurface::present`] failure.
    pub fn step<S: DisplaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<RunState> {
        if !self.state.is_running() {
            return Ok(self.state);
        }

        let signals = surface.poll_signals();
        if signals.should_stop() {
            // Quit wins when both arrive in the same poll.
            let reason = if signals.quit {
                StopReason::QuitRequested
            } else {
                StopReason::EscapePressed
            };
            return Ok(self.stop(reason));
        }

        let (n2, n3) = exponents_at(self.frame);
        for (slot, buffer) in self.slots.iter().zip(&mut self.buffers) {
            sample_shape_into(
                &slot.params(n2, n3),
                slot.center,
                SCALE,
                self.config.smooth_step,
                buffer,
            );
        }

        surface.clear(BACKGROUND);
        for (slot, buffer) in self.slots.iter().zip(&self.buffers) {
            surface.draw_polyline(buffer, slot.color);
        }
        surface.present()?;
        surface.sleep(Duration::from_millis(self.config.delay_ms));

        self.timing.end_frame();
        self.frame += 1;
        if self.timing.frames() % FPS_LOG_INTERVAL == 0 {
            log::debug!(
                "frame {}/{}: {:.1} fps",
                self.frame,
                self.config.interval,
                self.timing.fps()
            );
        }
        if self.frame >= self.config.interval {
            return Ok(self.stop(StopReason::Completed));
        }
        Ok(self.state)
    }

    /// Step until stopped.
    ///
    /// # Errors
    ///
    /// Propagates an unrecoverable [`DisplaySurface::present`] failure.
    pub fn run<S: DisplaySurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<RunSummary> {
        if let Some(fps) = FrameTiming::nominal_fps(Duration::from_millis(
            self.config.delay_ms,
        )) {
            log::debug!("nominal frame rate: {fps:.1} fps");
        }
        loop {
            if let RunState::Stopped(reason) = self.step(surface)? {
                return Ok(RunSummary {
                    frames: self.frame,
                    reason,
                });
            }
        }
    }

    fn stop(&mut self, reason: StopReason) -> RunState {
        log::info!("animation stopped after {} frames: {reason}", self.frame);
        self.state = RunState::Stopped(reason);
        self.state
    }
}
