//! Whole-batch rotation state and its uniform.
//!
//! The lattice spins as one rigid body: per-instance transforms stay pure
//! translations written once at startup, and the accumulated yaw/pitch is
//! applied to the entire instanced draw through a single uniform matrix.

use std::f32::consts::TAU;

use cgmath::{Matrix4, Rad, SquareMatrix};
use wgpu::util::DeviceExt;

/// Accumulated rotation angles in radians, wrapped into `[0, 2π)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spin {
    pub yaw: f32,
    pub pitch: f32,
}

impl Spin {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Advance one frame. Rates are per-frame angles, not per-second; the
    /// frame driver never scales them by elapsed time.
    pub fn advance(&mut self, yaw_rate: f32, pitch_rate: f32) {
        self.yaw = (self.yaw + yaw_rate) % TAU;
        self.pitch = (self.pitch + pitch_rate) % TAU;
    }

    /// Rotation matrix: yaw around the vertical axis first, then pitch
    /// around the horizontal axis.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(Rad(self.pitch)) * Matrix4::from_angle_y(Rad(self.yaw))
    }
}

/// The spin matrix as laid out in the uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpinUniform {
    model: [[f32; 4]; 4],
}

impl SpinUniform {
    pub fn new() -> Self {
        Self {
            model: Matrix4::identity().into(),
        }
    }

    pub fn update(&mut self, spin: &Spin) {
        self.model = spin.to_matrix().into();
    }
}

impl Default for SpinUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Spin state bundled with its GPU resources.
#[derive(Debug)]
pub struct SpinResources {
    pub spin: Spin,
    pub uniform: SpinUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl SpinResources {
    pub fn new(device: &wgpu::Device) -> Self {
        let spin = Spin::new();
        let uniform = SpinUniform::new();

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Spin Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
                label: Some("spin_bind_group_layout"),
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("spin_bind_group"),
        });

        Self {
            spin,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}
