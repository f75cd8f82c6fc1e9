use crate::device::Gpu;

use super::common::{alpha_blend, view_ubo_min_binding_size, ViewUniform};
use super::tessellate::ShapeVertex;

/// Which view-projection a draw uses.
///
/// `World` is the pannable/zoomable scene transform; `Overlay` is the fixed
/// screen-space (pixel) transform used by the console. Each slot owns its
/// uniform buffer so both can be drawn within one submitted frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ViewSlot {
    World,
    Overlay,
}

#[derive(Default)]
struct SlotBindings {
    ubo: Option<wgpu::Buffer>,
    bind_group: Option<wgpu::BindGroup>,
}

/// Renderer for flat-colored triangle lists.
///
/// One pipeline; vertices are re-uploaded every frame into a grow-only
/// buffer. GPU resources initialize lazily on first use so construction
/// needs no device access.
#[derive(Default)]
pub struct ShapeRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    slots: [SlotBindings; 2],

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one render pass drawing `vertices` with the given projection.
    ///
    /// `clear` paints the background first (the frame's first pass); `None`
    /// loads the existing contents (overlay passes). An empty vertex list
    /// with `clear` set still clears; without it the call is a no-op.
    pub fn render(
        &mut self,
        gpu: &Gpu,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        vertices: &[ShapeVertex],
        view_proj: [[f32; 4]; 4],
        slot: ViewSlot,
        clear: Option<wgpu::Color>,
    ) {
        if vertices.is_empty() && clear.is_none() {
            return;
        }

        self.ensure_pipeline(gpu);
        self.ensure_slot_bindings(gpu, slot);

        let slot_idx = slot as usize;
        if let Some(ubo) = self.slots[slot_idx].ubo.as_ref() {
            gpu.queue()
                .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewUniform { view_proj }));
        }

        if !vertices.is_empty() {
            self.ensure_vertex_capacity(gpu, vertices.len());
            if let Some(vbo) = self.vbo.as_ref() {
                gpu.queue().write_buffer(vbo, 0, bytemuck::cast_slice(vertices));
            }
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.slots[slot_idx].bind_group.as_ref() else { return };

        let load = match clear {
            Some(c) => wgpu::LoadOp::Clear(c),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("glint shape pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if !vertices.is_empty() {
            if let Some(vbo) = self.vbo.as_ref() {
                rpass.set_pipeline(pipeline);
                rpass.set_bind_group(0, bind_group, &[]);
                rpass.set_vertex_buffer(0, vbo.slice(..));
                rpass.draw(0..vertices.len() as u32, 0..1);
            }
        }
    }

    fn ensure_pipeline(&mut self, gpu: &Gpu) {
        if self.pipeline_format == Some(gpu.surface_format()) && self.pipeline.is_some() {
            return;
        }

        let device = gpu.device();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glint shape shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glint shape bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(view_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glint shape pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glint shape pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[ShapeVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_format(),
                    blend: Some(alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(gpu.surface_format());
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);

        // Bindings reference the old layout; rebuild on demand.
        self.slots = Default::default();
    }

    fn ensure_slot_bindings(&mut self, gpu: &Gpu, slot: ViewSlot) {
        let slot = &mut self.slots[slot as usize];
        if slot.ubo.is_some() && slot.bind_group.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let ubo = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint shape view ubo"),
            size: std::mem::size_of::<ViewUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        slot.bind_group = Some(gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("glint shape bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        }));
        slot.ubo = Some(ubo);
    }

    fn ensure_vertex_capacity(&mut self, gpu: &Gpu, required: usize) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        self.vbo = Some(gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("glint shape vbo"),
            size: (new_cap * std::mem::size_of::<ShapeVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = new_cap;
    }
}
