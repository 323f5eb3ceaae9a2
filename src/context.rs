use std::sync::Arc;

use anyhow::Context as _;
use instant::Instant;
use winit::window::Window;

use crate::{
    app::Backdrop,
    camera::{self, CameraResources, Projection},
    data_structures::{batch::LatticeBatch, mesh::Mesh, texture},
    geometry::{self, hull::FacetedMesh, hull::Hull, lattice},
    pipelines::{
        lattice::mk_lattice_pipeline,
        shading::{LightUniform, MaterialUniform, ShadingResources},
    },
    spin::SpinResources,
};

/// Central GPU and window context.
///
/// Owns the surface, device, queue and every scene resource. Constructed
/// once at startup and passed by reference to the frame and resize handlers;
/// there are no module-level singletons.
#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub shading: ShadingResources,
    pub spin: SpinResources,
    pub lattice: LatticeBatch,
    pub pipeline: wgpu::RenderPipeline,
    pub clear_colour: wgpu::Color,
}

impl Context {
    pub async fn new(window: Arc<Window>, backdrop: &Backdrop) -> anyhow::Result<Self> {
        let started = Instant::now();
        // `inner_size` is already in physical pixels, so the device pixel
        // ratio only matters for diagnostics.
        let size = window.inner_size();
        log::debug!(
            "surface {}x{} at scale factor {}",
            size.width,
            size.height,
            window.scale_factor()
        );

        // The instance is a handle to our GPU
        // BackendBit::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to acquire GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The shader assumes an Srgb surface texture. Using a different one
        // will result in all the colors coming out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        // Prefer an alpha mode that lets the page or compositor show
        // through; the backdrop clears to a fully transparent colour.
        let alpha_mode = surface_caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| {
                matches!(
                    m,
                    wgpu::CompositeAlphaMode::PreMultiplied
                        | wgpu::CompositeAlphaMode::PostMultiplied
                )
            })
            .unwrap_or(surface_caps.alpha_modes[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = camera::Camera::new((12.0, 12.0, 12.0), (0.0, 0.0, 0.0));
        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(backdrop.fovy_deg),
            backdrop.znear,
            backdrop.zfar,
        );
        let camera = CameraResources::new(&device, camera, &projection);

        let shading = ShadingResources::new(
            &device,
            LightUniform::directional([10.0, 20.0, 10.0], 0.8, 0.4),
            MaterialUniform::new(backdrop.colour, backdrop.roughness, backdrop.metalness),
        );
        let spin = SpinResources::new(&device);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let hull = Hull::from_points(&geometry::truncated_octahedron_points())?;
        let mesh = Mesh::from_faceted(
            &device,
            "truncated_octahedron",
            &FacetedMesh::from_hull(&hull),
        );
        let offsets = lattice::bcc_offsets(backdrop.grid);
        let lattice = LatticeBatch::new(&device, mesh, &offsets);

        let pipeline = mk_lattice_pipeline(
            &device,
            config.format,
            &camera.bind_group_layout,
            &shading.bind_group_layout,
            &spin.bind_group_layout,
        );

        log::info!(
            "GPU context ready in {:?} ({} instances)",
            started.elapsed(),
            lattice.amount()
        );

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            shading,
            spin,
            lattice,
            pipeline,
            clear_colour: wgpu::Color::TRANSPARENT,
        })
    }
}
