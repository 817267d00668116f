use anyhow::Result;
use glam::Vec3;

use glaze_engine::coords::{EdgeInsets, Rect};
use glaze_engine::core::{App, AppControl, FrameCtx};
use glaze_engine::device::GpuInit;
use glaze_engine::geometry::{GeometryLibrary, GeometrySource, plane};
use glaze_engine::logging::{LogSink, LoggingConfig, init_logging};
use glaze_engine::material::{BlendMode, Material};
use glaze_engine::paint::ColorRgb;
use glaze_engine::path::Outline;
use glaze_engine::render::{Camera, DrawOutcome, FrameOrchestrator, NodeSources, Projection, RendererConfig};
use glaze_engine::resources::{TextureImage, TextureLibrary};
use glaze_engine::scene::{ContentMode, MeshDescriptor};
use glaze_engine::window::{Runtime, RuntimeConfig};

const CAMERA_DISTANCE: f32 = 1000.0;

struct Viewer {
    config: RendererConfig,
    textures: TextureLibrary,
    geometry: GeometryLibrary,
    renderer: Option<FrameOrchestrator>,
}

impl Viewer {
    fn new(config: RendererConfig) -> Self {
        let mut textures = TextureLibrary::with_root("assets");
        textures.insert(
            "checker",
            TextureImage::checker(256, 8, [235, 235, 235, 255], [40, 40, 48, 255]),
        );
        textures.insert("clay", TextureImage::solid([200, 170, 150, 255]));

        let mut geometry = GeometryLibrary::new();
        geometry.insert("tile", plane(24));

        Self {
            config,
            textures,
            geometry,
            renderer: None,
        }
    }

    fn scene(width: f32, height: f32, time: f32) -> Vec<MeshDescriptor> {
        let card = Rect::new(0.0, 0.0, width * 0.5, height);
        let tile = Rect::new(width * 0.5, 0.0, width * 0.5, height);

        vec![
            MeshDescriptor::new("card", GeometrySource::plane(32))
                .materials([
                    Material::color(ColorRgb::from_srgb_u8(38, 92, 200)),
                    Material::fresnel(ColorRgb::white(), 2.5).blend(BlendMode::Screen, 0.8),
                    Material::matcap("clay").blend(BlendMode::Multiply, 0.5),
                ])
                .resizable()
                .aspect_ratio(Some(1.6), ContentMode::Fit)
                .padding(EdgeInsets::all(32.0))
                .depth(24.0)
                .outline(Outline::rounded_rect(Rect::new(0.0, 0.0, 160.0, 100.0), 18.0), 0.35)
                .rotation(time.sin() * 0.4, Vec3::Y)
                .bounds(card),
            MeshDescriptor::new("tile", GeometrySource::asset("tile"))
                .materials([
                    Material::texture("checker"),
                    Material::normal().blend(BlendMode::Overlay, 0.35),
                ])
                .resizable()
                .scaled_to_fill()
                .frame(Some(tile.size.x * 0.6), Some(tile.size.x * 0.6))
                .rotation(time * 0.5, Vec3::new(1.0, 1.0, 0.0))
                .bounds(tile),
        ]
    }
}

impl App for Viewer {
    fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let renderer = self.renderer.get_or_insert_with(|| {
            FrameOrchestrator::new(&ctx.render_ctx(), self.config.clone(), Box::new(LogSink))
        });

        let (width, height) = ctx.logical_size();
        let camera = Camera::for_layout(width, height, CAMERA_DISTANCE);
        let projection = Projection::new(width, height, 0.1, CAMERA_DISTANCE * 2.0);
        let descriptors = Self::scene(width, height, ctx.time.elapsed);
        let sources = NodeSources {
            images: &self.textures,
            geometry: &self.geometry,
        };

        if let Err(err) =
            renderer.update_scene(&ctx.render_ctx(), sources, &camera, &projection, &descriptors)
        {
            log::error!("scene update failed: {err}");
            return AppControl::Exit;
        }

        match renderer.draw(ctx.gpu, ctx.time.elapsed) {
            DrawOutcome::Skipped(action) if action.is_fatal() => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RendererConfig {
        clear_color: ColorRgb::white(),
        clear_alpha: 1.0,
        ..Default::default()
    };
    let gpu_init = GpuInit::default()
        .with_features(config.required_features())
        .with_depth_format(config.depth_format);

    Runtime::run(RuntimeConfig::default(), gpu_init, Viewer::new(config))
}
