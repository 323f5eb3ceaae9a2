//! Application shell: window lifecycle, frame driver and viewport adapter.
//!
//! The event loop follows this pattern each frame:
//! 1. Advance the batch rotation by the fixed per-frame angles
//! 2. Upload the spin uniform
//! 3. Encode and submit one render pass over the instanced lattice
//! 4. Present and request the next redraw
//!
//! Resize events reconfigure the surface, projection and depth texture.
//! winit serializes all callbacks on one thread, so no handler ever
//! overlaps another.

use std::{iter, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::Context,
    data_structures::{mesh::DrawLattice, texture::Texture},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Scene configuration. The defaults reproduce the stock backdrop; embedders
/// mostly tweak `colour` and `grid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Backdrop {
    /// Half-extent of the BCC lattice; instance count is `2*(2*grid+1)^3`.
    pub grid: u32,
    /// Vertical field of view in degrees.
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Rotation around the vertical axis, radians per frame.
    pub yaw_rate: f32,
    /// Rotation around the horizontal axis, radians per frame.
    pub pitch_rate: f32,
    /// Base surface colour, linear RGB.
    pub colour: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
    /// Exit the event loop after this many rendered frames. `None` runs for
    /// the window's lifetime; embedders with their own page lifecycle can
    /// use this for deterministic teardown.
    pub frame_budget: Option<u64>,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            grid: 2,
            fovy_deg: 60.0,
            znear: 0.1,
            zfar: 1000.0,
            yaw_rate: 0.002,
            pitch_rate: 0.001,
            // 0x6fa8dc
            colour: [0x6f as f32 / 255.0, 0xa8 as f32 / 255.0, 0xdc as f32 / 255.0],
            roughness: 0.6,
            metalness: 0.1,
            frame_budget: None,
        }
    }
}

/// Application state bundle: GPU context, scene config, and surface status.
#[derive(Debug)]
pub struct AppState {
    pub(crate) ctx: Context,
    pub backdrop: Backdrop,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, backdrop: Backdrop) -> Self {
        let ctx = Context::new(window, &backdrop).await;
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        Self {
            ctx,
            backdrop,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .camera
                .uniform
                .update_view_proj(&self.ctx.camera.camera, &self.ctx.projection);
            self.ctx.queue.write_buffer(
                &self.ctx.camera.buffer,
                0,
                bytemuck::cast_slice(&[self.ctx.camera.uniform]),
            );
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    /// Advance the batch rotation and upload the spin uniform. Always runs
    /// before the render pass of the same cycle.
    fn advance_spin(&mut self) {
        let spin = &mut self.ctx.spin;
        spin.spin
            .advance(self.backdrop.yaw_rate, self.backdrop.pitch_rate);
        spin.uniform.update(&spin.spin);
        self.ctx
            .queue
            .write_buffer(&spin.buffer, 0, bytemuck::cast_slice(&[spin.uniform]));
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                    multiview_mask: None,
                });

            render_pass.set_pipeline(&self.ctx.pipeline);
            render_pass.set_vertex_buffer(1, self.ctx.lattice.instance_buffer.slice(..));
            render_pass.draw_mesh_instanced(
                &self.ctx.lattice.mesh,
                0..self.ctx.lattice.amount(),
                &self.ctx.camera.bind_group,
                &self.ctx.shading.bind_group,
                &self.ctx.spin.bind_group,
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub(crate) enum BackdropEvent {
    #[allow(dead_code)]
    Initialized { state: AppState },
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    // Only the wasm init path sends through the proxy; native blocks on the
    // context future directly.
    #[allow(dead_code)]
    proxy: winit::event_loop::EventLoopProxy<BackdropEvent>,
    backdrop: Backdrop,
    state: Option<AppState>,
    frames: u64,
}

impl App {
    fn new(event_loop: &EventLoop<BackdropEvent>, backdrop: Backdrop) -> Self {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new().unwrap();
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            backdrop,
            state: None,
            frames: 0,
        }
    }
}

impl ApplicationHandler<BackdropEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes();

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            // The backdrop is purely decorative: keep it out of the
            // accessibility tree and let the page style it as a background.
            canvas.set_attribute("class", "bg-canvas").unwrap_throw();
            canvas.set_attribute("aria-hidden", "true").unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let init_future = AppState::new(window, self.backdrop.clone());

        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut state = self.async_runtime.block_on(init_future);
            let size = state.ctx.window.inner_size();
            state.resize(size.width, size.height);
            state.ctx.window.request_redraw();
            self.state = Some(state);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let state = init_future.await;
                assert!(proxy.send_event(BackdropEvent::Initialized { state }).is_ok());
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: BackdropEvent) {
        match event {
            BackdropEvent::Initialized { mut state } => {
                // This is the message from our wasm `spawn_local`.
                // Important: Trigger a resize and redraw now that we are initialized
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                state.advance_spin();
                match state.render() {
                    Ok(_) => {
                        self.frames += 1;
                        if let Some(budget) = state.backdrop.frame_budget {
                            if self.frames >= budget {
                                event_loop.exit();
                            }
                        }
                    }
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run the backdrop until the window closes or the frame budget is spent.
pub fn run(backdrop: Backdrop) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<BackdropEvent> = EventLoop::with_user_event().build()?;
    let mut app = App::new(&event_loop, backdrop);
    event_loop.run_app(&mut app)?;

    Ok(())
}
