//! The instanced lattice batch: one shared mesh drawn at every offset.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::data_structures::{instance::Instance, mesh::Mesh};

/// One mesh plus the per-instance transforms placing it across the lattice.
///
/// The instance buffer holds exactly one transform slot per offset and is
/// written once here; animation never touches it (the batch rotates through
/// the spin uniform instead).
#[derive(Debug)]
pub struct LatticeBatch {
    pub mesh: Mesh,
    pub instances: Vec<Instance>,
    pub instance_buffer: wgpu::Buffer,
}

impl LatticeBatch {
    pub fn new(device: &wgpu::Device, mesh: Mesh, offsets: &[Vector3<f32>]) -> Self {
        let instances: Vec<Instance> = offsets.iter().copied().map(Instance::from).collect();

        let instance_data = instances.iter().map(Instance::to_raw).collect::<Vec<_>>();
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&instance_data),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            mesh,
            instances,
            instance_buffer,
        }
    }

    pub fn amount(&self) -> u32 {
        self.instances.len() as u32
    }
}
