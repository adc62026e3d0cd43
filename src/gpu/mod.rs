//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, growable vertex buffers and
//! the polyline pipeline used by the window surface.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Batched line-strip rendering in canvas pixel space.
pub mod line_renderer;
/// Shared wgpu boilerplate helpers for the line pipeline.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
