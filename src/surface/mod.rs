//! The drawing target consumed by the animation driver.
//!
//! A [`DisplaySurface`] owns whatever window, event queue and renderer sit
//! behind it. Acquisition happens in the implementor's constructor and
//! release in its `Drop`, so every exit path (including early failure)
//! tears the surface down.

pub mod recording;
#[cfg(feature = "viewer")]
pub mod window;

use std::{fmt, time::Duration};

use glam::IVec2;

use crate::error::Result;
use crate::gpu::render_context::RenderContextError;

/// Termination signals gathered by one non-blocking poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    /// The window was asked to close.
    pub quit: bool,
    /// The escape key went down.
    pub escape_pressed: bool,
}

impl Signals {
    /// Whether either signal asks the run to stop.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.quit || self.escape_pressed
    }

    /// Combine two polls; a signal seen by either one is kept.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            quit: self.quit || other.quit,
            escape_pressed: self.escape_pressed || other.escape_pressed,
        }
    }
}

/// An 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Background color.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// First shape.
    pub const RED: Self = Self::opaque(255, 0, 0);
    /// Second shape.
    pub const GREEN: Self = Self::opaque(0, 255, 0);
    /// Third shape.
    pub const BLUE: Self = Self::opaque(0, 0, 255);
    /// Fourth shape.
    pub const ORANGE: Self = Self::opaque(255, 200, 0);

    /// Fully opaque color from 8-bit channels.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channels normalized to `0.0..=1.0`, still sRGB-encoded.
    #[must_use]
    pub fn to_srgb_f32(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }

    /// Channels decoded to linear light (alpha stays linear).
    ///
    /// Render targets with an sRGB format re-encode on write, so colors fed
    /// to them must be linear.
    #[must_use]
    pub fn to_linear_f32(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_srgb_f32();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Window, event queue and line renderer, as seen by the driver.
pub trait DisplaySurface {
    /// Drain pending window events without blocking.
    fn poll_signals(&mut self) -> Signals;

    /// Start a new frame filled with `color`.
    fn clear(&mut self, color: Rgba);

    /// Queue `points` as connected line segments.
    fn draw_polyline(&mut self, points: &[IVec2], color: Rgba);

    /// Flush queued commands to the screen.
    ///
    /// # Errors
    ///
    /// Returns an error only when the surface cannot keep rendering.
    fn present(&mut self) -> Result<()>;

    /// Block the calling thread between frames.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Failures while acquiring a display surface.
#[derive(Debug)]
pub enum SurfaceError {
    /// The platform event loop could not be created.
    EventLoop(String),
    /// The window could not be created.
    WindowCreation(String),
    /// The event loop never offered a chance to create the window.
    WindowUnavailable,
    /// GPU device or swapchain setup failed.
    Gpu(RenderContextError),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoop(msg) => write!(f, "event loop error: {msg}"),
            Self::WindowCreation(msg) => {
                write!(f, "window creation failed: {msg}")
            }
            Self::WindowUnavailable => {
                write!(f, "event loop did not resume; no window created")
            }
            Self::Gpu(e) => write!(f, "renderer creation failed: {e}"),
        }
    }
}

impl std::error::Error for SurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for SurfaceError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_stop_on_either_flag() {
        assert!(!Signals::default().should_stop());
        assert!(Signals {
            quit: true,
            ..Signals::default()
        }
        .should_stop());
        assert!(Signals {
            escape_pressed: true,
            ..Signals::default()
        }
        .should_stop());
    }

    #[test]
    fn merge_keeps_every_signal() {
        let quit = Signals {
            quit: true,
            escape_pressed: false,
        };
        let esc = Signals {
            quit: false,
            escape_pressed: true,
        };
        assert_eq!(
            quit.merge(esc),
            Signals {
                quit: true,
                escape_pressed: true
            }
        );
    }

    #[test]
    fn primaries_survive_linearization() {
        assert_eq!(Rgba::RED.to_linear_f32(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Rgba::WHITE.to_linear_f32(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn orange_green_channel_darkens_in_linear_space() {
        let [_, g_srgb, _, _] = Rgba::ORANGE.to_srgb_f32();
        let [_, g_lin, _, _] = Rgba::ORANGE.to_linear_f32();
        assert!((g_srgb - 200.0 / 255.0).abs() < 1e-6);
        assert!(g_lin < g_srgb);
        assert!((g_lin - 0.578).abs() < 0.01);
    }
}
