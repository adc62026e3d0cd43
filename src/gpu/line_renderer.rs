//! Batched 2D polyline rendering.
//!
//! Polylines submitted during a frame are packed into one vertex buffer;
//! each gets its own `draw` call over its vertex range so separate
//! polylines are never joined by a stray segment.

use std::ops::Range;

use glam::IVec2;
use wgpu::util::DeviceExt;

use super::{
    dynamic_buffer::TypedBuffer,
    pipeline_helpers::{create_line_strip_pipeline, vertex_uniform_buffer},
    render_context::RenderContext,
};
use crate::surface::Rgba;

/// One line-strip vertex in canvas pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// Canvas position (origin top-left, y down).
    pub position: [f32; 2],
    /// Straight RGBA color as written to the target.
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct CanvasUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// CPU-side frame contents: the clear color and every queued polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineBatch {
    clear: [f32; 4],
    vertices: Vec<LineVertex>,
    ranges: Vec<Range<u32>>,
    linear: bool,
}

impl PolylineBatch {
    /// Empty batch. With `linear` set, colors are decoded from sRGB for a
    /// target that re-encodes on write.
    #[must_use]
    pub fn new(linear: bool) -> Self {
        Self {
            clear: [0.0, 0.0, 0.0, 1.0],
            vertices: Vec::new(),
            ranges: Vec::new(),
            linear,
        }
    }

    /// Drop queued polylines and set the background.
    pub fn begin(&mut self, clear: Rgba) {
        self.clear = self.encode(clear);
        self.vertices.clear();
        self.ranges.clear();
    }

    /// Queue a strip through `points`. Fewer than two points draw nothing.
    pub fn push(&mut self, points: &[IVec2], color: Rgba) {
        if points.len() < 2 {
            return;
        }
        let color = self.encode(color);
        let start = self.vertices.len() as u32;
        self.vertices.extend(points.iter().map(|p| LineVertex {
            position: p.as_vec2().to_array(),
            color,
        }));
        self.ranges.push(start..self.vertices.len() as u32);
    }

    /// Queued vertices, all polylines back to back.
    #[must_use]
    pub fn vertices(&self) -> &[LineVertex] {
        &self.vertices
    }

    /// Vertex range of each polyline in submission order.
    #[must_use]
    pub fn ranges(&self) -> &[Range<u32>] {
        &self.ranges
    }

    /// Background as a wgpu clear color.
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear.map(f64::from);
        wgpu::Color { r, g, b, a }
    }

    fn encode(&self, color: Rgba) -> [f32; 4] {
        if self.linear {
            color.to_linear_f32()
        } else {
            color.to_srgb_f32()
        }
    }
}

/// Draws a [`PolylineBatch`] into a color target.
pub struct LineRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    vertices: TypedBuffer<LineVertex>,
    batch: PolylineBatch,
}

impl LineRenderer {
    /// Build the pipeline for `context`'s surface format. Positions are
    /// mapped from a `canvas`-sized pixel space onto the whole target.
    pub fn new(
        context: &RenderContext,
        canvas: (u32, u32),
        initial_vertices: usize,
    ) -> Self {
        let device = &context.device;
        let shader = device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/polyline.wgsl"
        ));

        let uniform = CanvasUniform {
            size: [canvas.0 as f32, canvas.1 as f32],
            _pad: [0.0; 2],
        };
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Canvas Uniform"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Canvas Bind Group Layout"),
                entries: &[vertex_uniform_buffer(0)],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Canvas Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline = create_line_strip_pipeline(
            device,
            "Polyline",
            &shader,
            context.format(),
            LineVertex::layout(),
            &[&bind_group_layout],
        );

        Self {
            pipeline,
            bind_group,
            vertices: TypedBuffer::with_capacity(
                device,
                "Polyline Vertices",
                initial_vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            batch: PolylineBatch::new(context.format().is_srgb()),
        }
    }

    /// The batch being filled for the next [`render`](Self::render).
    pub fn batch_mut(&mut self) -> &mut PolylineBatch {
        &mut self.batch
    }

    /// Upload the batch and draw it into `view`, clearing first.
    pub fn render(&mut self, context: &RenderContext, view: &wgpu::TextureView) {
        self.vertices.write(
            &context.device,
            &context.queue,
            self.batch.vertices(),
        );

        let mut encoder = context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Polyline Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    self.batch.clear_color(),
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            if !self.vertices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertices.buffer().slice(..));
                for range in self.batch.ranges() {
                    pass.draw(range.clone(), 0..1);
                }
            }
        }
        context.submit(encoder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<IVec2> {
        vec![
            IVec2::new(0, 0),
            IVec2::new(10, 0),
            IVec2::new(10, 10),
            IVec2::new(0, 10),
        ]
    }

    #[test]
    fn polylines_get_disjoint_ranges() {
        let mut batch = PolylineBatch::new(false);
        batch.begin(Rgba::WHITE);
        batch.push(&square(), Rgba::RED);
        batch.push(&square()[..2], Rgba::BLUE);

        assert_eq!(batch.ranges(), &[0..4, 4..6]);
        assert_eq!(batch.vertices().len(), 6);
        assert_eq!(batch.vertices()[1].position, [10.0, 0.0]);
        assert_eq!(batch.vertices()[4].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn degenerate_polylines_are_skipped() {
        let mut batch = PolylineBatch::new(false);
        batch.begin(Rgba::WHITE);
        batch.push(&[], Rgba::RED);
        batch.push(&[IVec2::ONE], Rgba::RED);
        assert!(batch.ranges().is_empty());
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn begin_resets_previous_frame() {
        let mut batch = PolylineBatch::new(false);
        batch.begin(Rgba::WHITE);
        batch.push(&square(), Rgba::GREEN);
        batch.begin(Rgba::opaque(0, 0, 0));

        assert!(batch.vertices().is_empty());
        let clear = batch.clear_color();
        assert_eq!((clear.r, clear.g, clear.b, clear.a), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn srgb_targets_receive_linear_colors() {
        let mut batch = PolylineBatch::new(true);
        batch.begin(Rgba::WHITE);
        batch.push(&square(), Rgba::ORANGE);
        let [r, g, b, a] = batch.vertices()[0].color;
        assert_eq!((r, b, a), (1.0, 0.0, 1.0));
        assert!(g < 200.0 / 255.0);
    }

    #[test]
    fn vertex_layout_matches_struct() {
        let layout = LineVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes[1].offset, 8);
    }
}
