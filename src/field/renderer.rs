//! GPU renderer for the particle field
//!
//! The cloud is uploaded once as a per-instance vertex buffer; each frame only
//! the uniform block (MVP, colour, point size, aspect) changes. Points are
//! drawn as instanced quads because `PointList` sizes are capped at one pixel
//! on many GPUs.

use bytemuck::{Pod, Zeroable};
use tracing::{info, warn};
use wgpu::util::DeviceExt;

use super::cloud::{CloudPoint, PointCloud};
use super::projection::SurfaceSize;
use super::scene::Scene;
use crate::config::FieldConfig;
use crate::error::FieldError;

static EMPTY_CLOUD: [CloudPoint; 1] = [CloudPoint { position: [0.0; 3] }];

/// Uniform block for the field shader (96 bytes, matches `Uniforms` in shader.wgsl)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FieldUniforms {
    pub mvp: [f32; 16],
    pub color: [f32; 4],
    pub point_size: f32,
    pub aspect: f32,
    pub _pad: [f32; 2],
}

impl FieldUniforms {
    pub fn new(scene: &Scene, color: [f32; 4], point_size: f32) -> Self {
        Self {
            mvp: scene.model_view_projection.to_cols_array(),
            color,
            point_size,
            aspect: scene.surface.aspect(),
            _pad: [0.0; 2],
        }
    }
}

/// Point appearance taken from the field config
#[derive(Clone, Copy, Debug)]
pub struct PointStyle {
    pub color: [f32; 4],
    pub size: f32,
}

impl From<&FieldConfig> for PointStyle {
    fn from(config: &FieldConfig) -> Self {
        Self {
            color: config.rgba(),
            size: config.point_size,
        }
    }
}

/// Device, queue and configured surface for one canvas
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Acquire a WebGL2-backed device for `canvas`.
    ///
    /// Fails with [`FieldError::NoGraphics`] when the browser offers no adapter.
    pub async fn acquire(
        canvas: web_sys::HtmlCanvasElement,
        size: &SurfaceSize,
    ) -> Result<Self, FieldError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or(FieldError::NoGraphics)?;

        let adapter_info = adapter.get_info();
        info!(
            adapter = %adapter_info.name,
            backend = ?adapter_info.backend,
            "GPU adapter acquired"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("field_device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let caps = surface.get_capabilities(&adapter);
        // Non-sRGB target so CSS hex colours come out unchanged
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| FieldError::Surface("surface reports no formats".to_string()))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            warn!(modes = ?caps.alpha_modes, "Premultiplied alpha unavailable");
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.physical_width(),
            height: size.physical_height(),
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
        })
    }

    /// Reconfigure for a new drawing-buffer size.
    pub fn resize(&mut self, size: &SurfaceSize) {
        self.surface_config.width = size.physical_width();
        self.surface_config.height = size.physical_height();
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }
}

/// Pipeline and buffers drawing the cloud
pub struct FieldRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    style: PointStyle,
}

impl FieldRenderer {
    pub fn new(
        device: &wgpu::Device,
        target_format: wgpu::TextureFormat,
        cloud: &PointCloud,
        style: PointStyle,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("field_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("field_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("field_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<CloudPoint>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x3, // position
                    }],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("field_uniforms"),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
            mapped_at_creation: false,
        });

        // wgpu rejects zero-sized buffers, keep one slot for an empty cloud
        let points = cloud.points();
        let contents: &[u8] = if points.is_empty() {
            bytemuck::cast_slice(&EMPTY_CLOUD)
        } else {
            bytemuck::cast_slice(points)
        };
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("field_instances"),
            contents,
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("field_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            instance_buffer,
            instance_count: points.len() as u32,
            style,
        }
    }

    /// Record one frame into `target`, clearing it to transparent first.
    pub fn render(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        scene: &Scene,
    ) {
        let uniforms = FieldUniforms::new(scene, self.style.color, self.style.size);
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("field_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.instance_count > 0 {
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
            render_pass.draw(0..6, 0..self.instance_count);
        }
    }
}
