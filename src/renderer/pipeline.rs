//! WebGPU render pipeline
//!
//! Vertices stay in canvas pixels; the vertex shader maps them to clip space
//! using the canvas size from a uniform. The vertex buffer is reused across
//! frames and only reallocated when a frame outgrows it.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::vertex::{Vertex, colors};

/// Vertices allocated up front (player, a few dozen enemies and bullets)
const INITIAL_VERTICES: usize = 4096;

/// Renderer could not be brought up
#[derive(Debug)]
pub enum RendererError {
    Device(wgpu::RequestDeviceError),
    /// Adapter cannot present to this canvas
    UnsupportedSurface,
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "no WebGPU device: {e}"),
            Self::UnsupportedSurface => write!(f, "adapter cannot render to the canvas"),
        }
    }
}

impl std::error::Error for RendererError {}

impl From<wgpu::RequestDeviceError> for RendererError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        Self::Device(e)
    }
}

/// Canvas size in game pixels, padded to 16 bytes for WebGL2
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct CanvasUniform {
    size: [f32; 2],
    _pad: [f32; 2],
}

/// Capacity (in vertices) needed to hold `needed`, growing by doubling
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two()
    }
}

/// Per-frame vertex storage, rewritten in place with `write_buffer`
struct FrameVertices {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

impl FrameVertices {
    fn new(device: &wgpu::Device, capacity: usize) -> Self {
        Self {
            buffer: Self::allocate(device, capacity),
            capacity,
            count: 0,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_vertices"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        let capacity = grown_capacity(self.capacity, vertices.len());
        if capacity != self.capacity {
            log::debug!("Vertex buffer grown to {} vertices", capacity);
            self.buffer = Self::allocate(device, capacity);
            self.capacity = capacity;
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
        self.count = vertices.len() as u32;
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    canvas_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_layout"),
        bind_group_layouts: &[canvas_layout],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Triangle list, no culling
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn sky_color() -> wgpu::Color {
    let [r, g, b, a] = colors::SKY.map(f64::from);
    wgpu::Color { r, g, b, a }
}

/// GPU side of the game: surface, pipeline and the frame's vertices
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    canvas_bind_group: wgpu::BindGroup,
    vertices: FrameVertices,
}

impl RenderState {
    /// `width`/`height` are the backing store in physical pixels,
    /// `canvas_size` the game's coordinate space
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        canvas_size: (f32, f32),
    ) -> Result<Self, RendererError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sky-shooter-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(adapter, width, height)
            .ok_or(RendererError::UnsupportedSurface)?;
        let caps = surface.get_capabilities(adapter);
        if let Some(srgb) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
            config.format = srgb;
        }
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);

        let uniform = CanvasUniform {
            size: [canvas_size.0, canvas_size.1],
            _pad: [0.0; 2],
        };
        let canvas_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("canvas_uniform"),
            contents: bytemuck::bytes_of(&uniform),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let canvas_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("canvas_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let canvas_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("canvas_bind_group"),
            layout: &canvas_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: canvas_buffer.as_entire_binding(),
            }],
        });

        let pipeline = build_pipeline(&device, config.format, &canvas_layout);
        let vertices = FrameVertices::new(&device, INITIAL_VERTICES);

        log::info!(
            "Renderer ready: {:?}, {}x{} surface for a {}x{} canvas",
            config.format,
            width,
            height,
            canvas_size.0,
            canvas_size.1
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            canvas_bind_group,
            vertices,
        })
    }

    /// Configure the surface again after it was lost or went stale
    pub fn reconfigure(&mut self) {
        log::warn!("Reconfiguring surface");
        self.surface.configure(&self.device, &self.config);
    }

    /// Draw one frame of canvas-pixel triangles over the sky
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.vertices.upload(&self.device, &self.queue, vertices);

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.device.create_command_encoder(&Default::default());

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(sky_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if self.vertices.count > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.canvas_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
                pass.draw(0..self.vertices.count, 0..1);
            }
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}
