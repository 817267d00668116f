use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::error::SetupError;
use crate::material::Material;
use crate::render::RenderCtx;
use crate::resources::{ImageProvider, TextureTable};

use super::plan::CompositionPlan;
use super::shader::{self, FIRST_TEXTURE_BINDING};

/// Size of a GPU buffer holding `len` bytes of storage data.
///
/// Storage bindings must be non-empty and copies must be 4-byte aligned, so
/// sizes are rounded up to 16 bytes.
pub fn storage_size(len: usize) -> u64 {
    let len = len.max(1) as u64;
    len.div_ceil(16) * 16
}

/// Copies `bytes` into a buffer of `storage_size(bytes.len())` bytes, zero padded.
pub fn padded(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.resize(storage_size(bytes.len()) as usize, 0);
    out
}

/// Pipeline state shared by every composition of a renderer.
pub struct CompositionTargets<'a> {
    /// Group 0 layout (per-node uniforms, geometry, paths).
    pub node_layout: &'a wgpu::BindGroupLayout,
    pub polygon_mode: wgpu::PolygonMode,
}

/// A mesh's material set linked into one draw pipeline.
///
/// Argument and descriptor buffers are rewritten in place on `update`; the
/// pipeline and textures are built once.
pub struct Composition {
    plan: CompositionPlan,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    argument_buffer: wgpu::Buffer,
    descriptor_buffer: wgpu::Buffer,
    _textures: Vec<wgpu::Texture>,
}

impl Composition {
    /// Loads resources, links the functions and creates the pipeline.
    pub fn compose(
        ctx: &RenderCtx<'_>,
        targets: &CompositionTargets<'_>,
        images: &dyn ImageProvider,
        materials: &[Material],
    ) -> Result<Self, SetupError> {
        let mut table = TextureTable::new(ctx.device, ctx.queue, images);
        let plan = CompositionPlan::compose(materials, &mut table)?;
        let composed = shader::link(&plan, table.len())?;
        let textures = table.into_textures();

        let argument_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glaze material arguments"),
            contents: &padded(plan.argument_bytes()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });
        let descriptor_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("glaze material descriptors"),
            contents: &padded(plan.descriptor_bytes()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        });

        let layout = composition_layout(ctx.device, composed.texture_count);

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glaze material sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let views: Vec<wgpu::TextureView> = textures
            .iter()
            .map(|t| t.create_view(&wgpu::TextureViewDescriptor::default()))
            .collect();

        let mut entries = vec![
            wgpu::BindGroupEntry {
                binding: 0,
                resource: argument_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: descriptor_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ];
        for (slot, view) in views.iter().enumerate() {
            entries.push(wgpu::BindGroupEntry {
                binding: FIRST_TEXTURE_BINDING + slot as u32,
                resource: wgpu::BindingResource::TextureView(view),
            });
        }

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glaze composition bind group"),
            layout: &layout,
            entries: &entries,
        });

        let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glaze composition shader"),
            source: wgpu::ShaderSource::Wgsl(composed.source.into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glaze composition pipeline layout"),
            bind_group_layouts: &[targets.node_layout, &layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glaze composition pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(color_target(ctx.surface_format))],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: targets.polygon_mode,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: ctx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            plan,
            pipeline,
            bind_group,
            argument_buffer,
            descriptor_buffer,
            _textures: textures,
        })
    }

    /// Rewrites argument and descriptor bytes for a new value of the same material list.
    pub fn update(&mut self, queue: &wgpu::Queue, materials: &[Material]) -> Result<(), SetupError> {
        self.plan.update(materials)?;
        queue.write_buffer(&self.argument_buffer, 0, &padded(self.plan.argument_bytes()));
        queue.write_buffer(&self.descriptor_buffer, 0, &padded(self.plan.descriptor_bytes()));
        Ok(())
    }

    /// Binds the pipeline and the material group (textures included).
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
    }

    #[inline]
    pub fn plan(&self) -> &CompositionPlan {
        &self.plan
    }
}

/// Fragments leave `fs_main` premultiplied, so they composite over the
/// transparent clear with `src + dst * (1 - src.a)`.
fn color_target(format: wgpu::TextureFormat) -> wgpu::ColorTargetState {
    wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    }
}

fn composition_layout(device: &wgpu::Device, texture_count: u32) -> wgpu::BindGroupLayout {
    let storage = |binding: u32| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only: true },
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(4),
        },
        count: None,
    };

    let mut entries = vec![
        storage(0),
        storage(1),
        wgpu::BindGroupLayoutEntry {
            binding: 2,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        },
    ];

    for slot in 0..texture_count {
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: FIRST_TEXTURE_BINDING + slot,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
    }

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("glaze composition bgl"),
        entries: &entries,
    })
}
