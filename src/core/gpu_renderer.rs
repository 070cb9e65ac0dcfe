use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use std::sync::Arc;

use log::{debug, info, warn};
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, RenderPipeline, Surface, SurfaceConfiguration, Texture,
    TextureView,
};
use winit::window::Window;

use crate::camera::Camera;
use crate::scene::{geometry, Mesh, Scene};
use crate::types::{CameraUniform, InstanceData, MeshVertex, QuadVertex};

use super::gpu_context::GpuContext;
use super::render_target::{Filter, RenderTarget, TargetId};
use super::renderer::{Result, SceneRenderer};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const INITIAL_INSTANCE_CAPACITY: usize = 64;

/// Index-buffered mesh resident on the GPU
struct GpuMesh {
    vertex_buffer: Buffer,
    index_buffer: Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload<V: bytemuck::Pod>(device: &wgpu::Device, label: &str, geometry: &geometry::Geometry<V>) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", label)),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", label)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

/// Offscreen target backing: color + depth, and the bind group sampling it
struct GpuTarget {
    width: u32,
    height: u32,
    min_filter: Filter,
    mag_filter: Filter,
    _color: Texture,
    color_view: TextureView,
    depth_view: TextureView,
    bind_group: BindGroup,
}

impl GpuTarget {
    fn matches(&self, target: &RenderTarget) -> bool {
        (self.width, self.height) == target.dimensions()
            && self.min_filter == target.min_filter
            && self.mag_filter == target.mag_filter
    }
}

/// Draw calls gathered from one scene traversal
#[derive(Default)]
struct DrawList {
    /// Sphere instances grouped by (width, height) segments
    spheres: BTreeMap<(u32, u32), Vec<InstanceData>>,
    quads: Vec<TargetId>,
}

impl DrawList {
    fn collect(scene: &Scene) -> Self {
        let mut draws = DrawList::default();
        scene.visit_meshes(|world, mesh| match mesh {
            Mesh::Sphere(sphere) => {
                // Geometry is cached at unit radius
                let model = *world * glam::Mat4::from_scale(glam::Vec3::splat(sphere.radius));
                draws
                    .spheres
                    .entry((sphere.width_segments, sphere.height_segments))
                    .or_default()
                    .push(InstanceData::new(model, sphere.color));
            }
            Mesh::ScreenQuad { source } => draws.quads.push(*source),
        });
        draws
    }

    fn instance_count(&self) -> usize {
        self.spheres.values().map(Vec::len).sum()
    }

    /// Flatten instances into one buffer-ready list plus per-mesh ranges
    fn flatten(&self) -> (Vec<InstanceData>, Vec<((u32, u32), Range<u32>)>) {
        let mut instances = Vec::with_capacity(self.instance_count());
        let mut ranges = Vec::with_capacity(self.spheres.len());
        for (key, group) in &self.spheres {
            let start = instances.len() as u32;
            instances.extend_from_slice(group);
            ranges.push((*key, start..instances.len() as u32));
        }
        (instances, ranges)
    }
}

/// wgpu implementation of `SceneRenderer` presenting to a winit window
pub struct GpuRenderer {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    screen_depth: TextureView,
    auto_clear: bool,
    clear_color: wgpu::Color,

    camera_buffer: Buffer,
    camera_bind_group: BindGroup,
    sphere_pipeline: RenderPipeline,
    quad_pipeline: RenderPipeline,
    quad_bind_group_layout: BindGroupLayout,

    quad_mesh: GpuMesh,
    sphere_meshes: HashMap<(u32, u32), GpuMesh>,
    instance_buffer: Buffer,
    instance_capacity: usize,
    targets: HashMap<TargetId, GpuTarget>,
}

impl GpuRenderer {
    /// Create surface, device and pipelines for a window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size.width, size.height)?;
        surface.configure(gpu.device(), &surface_config);
        let screen_depth = Self::create_depth_view(gpu.device(), surface_config.width, surface_config.height);

        let device = gpu.device();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(glam::Mat4::IDENTITY)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let (sphere_pipeline, camera_bind_group) =
            Self::create_sphere_pipeline(device, &camera_buffer, surface_config.format);
        let (quad_pipeline, quad_bind_group_layout) =
            Self::create_quad_pipeline(device, surface_config.format);

        let quad_mesh = GpuMesh::upload(device, "Screen Quad", &geometry::screen_quad());
        let instance_buffer = Self::create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        info!(
            "Renderer initialized: {}x{} surface, format {:?}",
            surface_config.width, surface_config.height, surface_config.format
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            screen_depth,
            auto_clear: true,
            clear_color: wgpu::Color::TRANSPARENT,
            camera_buffer,
            camera_bind_group,
            sphere_pipeline,
            quad_pipeline,
            quad_bind_group_layout,
            quad_mesh,
            sphere_meshes: HashMap::new(),
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            targets: HashMap::new(),
        })
    }

    fn create_surface_config(
        surface: &Surface,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let (format, alpha_mode) = pick_surface_modes(&surface_caps.formats, &surface_caps.alpha_modes)?;

        Ok(SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (capacity * std::mem::size_of::<InstanceData>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn depth_state(write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }

    fn create_sphere_pipeline(
        device: &wgpu::Device,
        camera_buffer: &Buffer,
        format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/particle.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
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

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Particle Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Particle Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout(), InstanceData::layout()],
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
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(Self::depth_state(true, wgpu::CompareFunction::Less)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group)
    }

    fn create_quad_pipeline(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroupLayout) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Passthrough Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/passthrough.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("target_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Passthrough Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Passthrough Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[QuadVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            // Passes always carry a depth attachment; the quad ignores it
            depth_stencil: Some(Self::depth_state(false, wgpu::CompareFunction::Always)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group_layout)
    }

    /// Allocate (or reallocate after a change) the GPU side of a target
    fn ensure_target(&mut self, target: &RenderTarget) {
        if self
            .targets
            .get(&target.id())
            .is_some_and(|existing| existing.matches(target))
        {
            return;
        }

        let device = self.gpu.device();
        let (width, height) = (target.width().max(1), target.height().max(1));
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Offscreen Color Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.surface_config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = Self::create_depth_view(device, width, height);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Offscreen Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: target.mag_filter.into(),
            min_filter: target.min_filter.into(),
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("target_bind_group"),
            layout: &self.quad_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        // Fresh textures start from a defined state; later passes may Load
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Target Init Encoder"),
        });
        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Target Init Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        self.gpu.queue().submit(Some(encoder.finish()));

        debug!("Allocated offscreen target {:?}: {}x{}", target.id(), width, height);

        self.targets.insert(
            target.id(),
            GpuTarget {
                width: target.width(),
                height: target.height(),
                min_filter: target.min_filter,
                mag_filter: target.mag_filter,
                _color: color,
                color_view,
                depth_view,
                bind_group,
            },
        );
    }

    fn ensure_sphere_meshes(&mut self, draws: &DrawList) {
        for &(width_segments, height_segments) in draws.spheres.keys() {
            let device = self.gpu.device();
            self.sphere_meshes
                .entry((width_segments, height_segments))
                .or_insert_with(|| {
                    GpuMesh::upload(
                        device,
                        "Sphere",
                        &geometry::sphere(1.0, width_segments, height_segments),
                    )
                });
        }
    }

    fn upload_instances(&mut self, instances: &[InstanceData]) {
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(self.gpu.device(), self.instance_capacity);
            debug!("Grew instance buffer to {} instances", self.instance_capacity);
        }
        if !instances.is_empty() {
            self.gpu
                .queue()
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
    }

    fn load_ops(&self) -> (wgpu::LoadOp<wgpu::Color>, wgpu::LoadOp<f32>) {
        if self.auto_clear {
            (wgpu::LoadOp::Clear(self.clear_color), wgpu::LoadOp::Clear(1.0))
        } else {
            (wgpu::LoadOp::Load, wgpu::LoadOp::Load)
        }
    }
}

impl SceneRenderer for GpuRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(self.gpu.device(), &self.surface_config);
        self.screen_depth = Self::create_depth_view(self.gpu.device(), width, height);
    }

    fn auto_clear(&self) -> bool {
        self.auto_clear
    }

    fn set_auto_clear(&mut self, enabled: bool) {
        self.auto_clear = enabled;
    }

    fn render(
        &mut self,
        scene: &Scene,
        camera: &dyn Camera,
        target: Option<&RenderTarget>,
    ) -> Result<()> {
        if let Some(target) = target {
            self.ensure_target(target);
        }

        let draws = DrawList::collect(scene);
        self.ensure_sphere_meshes(&draws);
        let (instances, ranges) = draws.flatten();
        self.upload_instances(&instances);

        self.gpu.queue().write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniform::new(camera.view_projection())]),
        );

        let surface_texture = match target {
            Some(_) => None,
            None => Some(self.surface.get_current_texture()?),
        };
        let surface_view = surface_texture
            .as_ref()
            .map(|frame| frame.texture.create_view(&wgpu::TextureViewDescriptor::default()));

        let (color_view, depth_view) = match (target, surface_view.as_ref()) {
            (Some(target), _) => {
                let backing = self
                    .targets
                    .get(&target.id())
                    .ok_or("Render target was not allocated")?;
                (&backing.color_view, &backing.depth_view)
            }
            (None, Some(view)) => (view, &self.screen_depth),
            (None, None) => return Err("No surface texture to render into".into()),
        };

        let (color_load, depth_load) = self.load_ops();
        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: color_load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: depth_load,
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !ranges.is_empty() {
                render_pass.set_pipeline(&self.sphere_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                for (key, range) in ranges {
                    let Some(mesh) = self.sphere_meshes.get(&key) else {
                        continue;
                    };
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.index_count, 0, range);
                }
            }

            for source in &draws.quads {
                if target.is_some_and(|t| t.id() == *source) {
                    warn!("Skipping quad sampling its own render target {:?}", source);
                    continue;
                }
                let Some(backing) = self.targets.get(source) else {
                    debug!("Quad source {:?} has not been rendered yet", source);
                    continue;
                };
                render_pass.set_pipeline(&self.quad_pipeline);
                render_pass.set_bind_group(0, &backing.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.quad_mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(self.quad_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..self.quad_mesh.index_count, 0, 0..1);
            }
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        if let Some(frame) = surface_texture {
            frame.present();
        }

        Ok(())
    }
}

/// Prefer an sRGB format, else the first one offered; adapters that cannot
/// present to the surface report empty capability lists
fn pick_surface_modes(
    formats: &[wgpu::TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
) -> Result<(wgpu::TextureFormat, wgpu::CompositeAlphaMode)> {
    let format = formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .ok_or("Surface has no supported formats")?;
    let alpha_mode = alpha_modes
        .first()
        .copied()
        .ok_or("Surface has no supported alpha modes")?;
    Ok((format, alpha_mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Particle};
    use glam::Vec3;

    #[test]
    fn draw_list_groups_spheres_and_quads() {
        let mut scene = Scene::new();
        scene.add(Particle::at_rest(Vec3::X).into_node(1.0, 10));
        scene.add(Particle::at_rest(Vec3::Y).into_node(2.0, 10));
        scene.add(Particle::at_rest(Vec3::Z).into_node(1.0, 16));
        let target = RenderTarget::new(4, 4);
        scene.add(Node::new().with_mesh(Mesh::screen_quad(target.id())));

        let draws = DrawList::collect(&scene);
        assert_eq!(draws.instance_count(), 3);
        assert_eq!(draws.spheres[&(10, 10)].len(), 2);
        assert_eq!(draws.quads, vec![target.id()]);

        let (instances, ranges) = draws.flatten();
        assert_eq!(instances.len(), 3);
        assert_eq!(ranges, vec![((10, 10), 0..2), ((16, 16), 2..3)]);
    }

    #[test]
    fn instance_model_applies_radius() {
        let mut scene = Scene::new();
        scene.add(Particle::at_rest(Vec3::new(3.0, 0.0, 0.0)).into_node(2.0, 10));

        let draws = DrawList::collect(&scene);
        let model = glam::Mat4::from_cols_array_2d(&draws.spheres[&(10, 10)][0].model);
        let surface_point = model.transform_point3(Vec3::X);
        assert!((surface_point - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn surface_modes_prefer_srgb() {
        let formats = [wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Bgra8UnormSrgb];
        let (format, alpha) = pick_surface_modes(&formats, &[wgpu::CompositeAlphaMode::Opaque]).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(alpha, wgpu::CompositeAlphaMode::Opaque);

        let (format, _) =
            pick_surface_modes(&[wgpu::TextureFormat::Rgba16Float], &[wgpu::CompositeAlphaMode::Auto]).unwrap();
        assert_eq!(format, wgpu::TextureFormat::Rgba16Float);
    }

    #[test]
    fn unsupported_surface_is_an_error() {
        let err = pick_surface_modes(&[], &[wgpu::CompositeAlphaMode::Opaque]).unwrap_err();
        assert_eq!(err.to_string(), "Surface has no supported formats");

        let err = pick_surface_modes(&[wgpu::TextureFormat::Bgra8UnormSrgb], &[]).unwrap_err();
        assert_eq!(err.to_string(), "Surface has no supported alpha modes");
    }
}
