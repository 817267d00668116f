use glam::Mat4;

use crate::coords::Rect;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::error::SceneError;
use crate::logging::SceneSink;
use crate::paint::ColorRgb;
use crate::scene::{MeshDescriptor, NodeRegistry, SyncReport};

use super::camera::{Camera, Projection};
use super::config::RendererConfig;
use super::ctx::{RenderCtx, RenderTarget};
use super::gate::FrameGate;
use super::node::{NodeResources, NodeSources, RenderNode};
use super::uniforms::FrameParams;

/// Result of one draw tick.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawOutcome {
    Presented,
    /// No frame was produced; the surface error was handled as described.
    Skipped(SurfaceErrorAction),
}

/// Owns the node registry and drives one compute and one render pass per frame.
pub struct FrameOrchestrator {
    config: RendererConfig,
    resources: NodeResources,
    registry: NodeRegistry<RenderNode>,
    gate: FrameGate,
    sink: Box<dyn SceneSink>,
    view: Mat4,
    view_projection: Mat4,
}

impl FrameOrchestrator {
    pub fn new(ctx: &RenderCtx<'_>, config: RendererConfig, sink: Box<dyn SceneSink>) -> Self {
        let resources = NodeResources::new(ctx.device, &config);
        let gate = FrameGate::new(config.frames_in_flight);

        log::info!(
            "renderer ready: {} frames in flight, tessellation level {}{}",
            gate.capacity(),
            resources.tessellator().level(),
            if config.wireframe { ", wireframe" } else { "" }
        );

        Self {
            config,
            resources,
            registry: NodeRegistry::new(),
            gate,
            sink,
            view: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
        }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn nodes(&self) -> &NodeRegistry<RenderNode> {
        &self.registry
    }

    /// Applies one update tick: camera, projection and the current mesh list.
    ///
    /// Per-node failures are reported to the sink and skipped. Duplicate ids and
    /// link failures are returned; the latter should end the host.
    pub fn update_scene(
        &mut self,
        ctx: &RenderCtx<'_>,
        sources: NodeSources<'_>,
        camera: &Camera,
        projection: &Projection,
        descriptors: &[MeshDescriptor],
    ) -> Result<SyncReport, SceneError> {
        self.view = camera.view_matrix();
        self.view_projection = projection.matrix() * self.view;

        let viewport = Rect::new(0.0, 0.0, projection.width, projection.height);
        let resources = &self.resources;

        self.registry.sync(
            descriptors,
            |d| d.id.as_str(),
            |d| RenderNode::setup(ctx, resources, sources, d),
            |node, d| node.update(ctx.queue, d, viewport),
            self.sink.as_mut(),
        )
    }

    /// Forwards a surface resize to the sink.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.sink.resized(width, height);
    }

    /// Records the frame's passes into `target` using uniform slot `slot`.
    pub fn encode(&self, ctx: &RenderCtx<'_>, target: RenderTarget<'_>, slot: usize, time: f32) {
        let frame = FrameParams {
            view_projection: self.view_projection,
            view: self.view,
            time,
        };
        let tessellator = self.resources.tessellator();

        for node in self.registry.nodes() {
            node.prepare(ctx.queue, slot, &frame, tessellator.level());
        }

        {
            let mut pass = target.encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("glaze tessellation pass"),
                timestamp_writes: None,
            });
            tessellator.begin(&mut pass);
            for node in self.registry.nodes() {
                node.dispatch(&mut pass, tessellator);
            }
        }

        let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glaze mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_value(
                        self.config.clear_color,
                        self.config.clear_alpha,
                    )),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for node in self.registry.nodes() {
            node.render(&mut pass, slot, tessellator);
        }
    }

    /// Waits for a free frame slot, then acquires, encodes and presents a frame.
    ///
    /// The slot returns to the gate when the GPU reports the submission done.
    pub fn draw(&mut self, gpu: &mut Gpu<'_>, time: f32) -> DrawOutcome {
        let slot = self.gate.acquire_with(|| gpu.poll());

        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                self.gate.release(slot);
                return DrawOutcome::Skipped(gpu.handle_surface_error(err));
            }
        };

        {
            let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), gpu.depth_format());
            let target = RenderTarget::new(&mut frame.encoder, &frame.view, &frame.depth_view);
            self.encode(&ctx, target, slot, time);
        }

        gpu.submit(frame, self.gate.releaser(slot));
        gpu.poll();
        DrawOutcome::Presented
    }
}

/// Premultiplied linear clear value.
fn clear_value(color: ColorRgb, alpha: f64) -> wgpu::Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let color = color.srgb_to_linear();
    wgpu::Color {
        r: color.r * alpha,
        g: color.g * alpha,
        b: color.b * alpha,
        a: alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_clear_is_linear() {
        let c = clear_value(ColorRgb::new(0.0, 1.0, 1.0), 1.0);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn default_clear_is_transparent() {
        let config = RendererConfig::default();
        let c = clear_value(config.clear_color, config.clear_alpha);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn clear_is_premultiplied() {
        let c = clear_value(ColorRgb::white(), 0.5);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.5, 0.5, 0.5));
    }
}
