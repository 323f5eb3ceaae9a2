//! lattice-backdrop
//!
//! A decorative animated 3D lattice for page and window backgrounds, built
//! on wgpu with native and WASM compatibility. One truncated-octahedron
//! hull is derived from a fixed point set, replicated across a
//! body-centered-cubic grid with GPU instancing, lit by a single
//! directional light and rotated continuously as one rigid body.
//!
//! High-level modules
//! - `app`: window lifecycle, frame driver and resize handling
//! - `camera`: camera, projection and view/projection uniforms
//! - `context`: central GPU and window context that owns device/queue/scene
//! - `data_structures`: meshes, instances, the lattice batch, depth texture
//! - `geometry`: convex hull construction and BCC offset generation
//! - `pipelines`: the instanced render pipeline and shading uniforms
//! - `spin`: whole-batch rotation state
//!

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod geometry;
pub mod pipelines;
pub mod spin;

// Re-exports commonly used types for convenience in downstream code.
pub use app::{run, Backdrop};
pub use cgmath::*;
pub use winit::event::WindowEvent;
pub use wgpu::*;
