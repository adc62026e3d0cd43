//! Shared utilities for the render loop.

/// Exponentially smoothed FPS, logged periodically by the driver.
pub mod frame_timing;
