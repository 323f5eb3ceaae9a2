//! Light and material uniforms shared by the lattice pipeline.

use cgmath::{InnerSpace, Vector3};
use wgpu::util::DeviceExt;

/// Directional light plus ambient term.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    // Unit vector pointing toward the light. Uniforms require 16 byte
    // (4 float) spacing; intensity and ambient fill the pad slots.
    direction: [f32; 3],
    intensity: f32,
    colour: [f32; 3],
    ambient: f32,
}

impl LightUniform {
    /// A white light shining from `position` toward the origin.
    pub fn directional(position: [f32; 3], intensity: f32, ambient: f32) -> Self {
        let direction = Vector3::from(position).normalize();
        Self {
            direction: direction.into(),
            intensity,
            colour: [1.0, 1.0, 1.0],
            ambient,
        }
    }
}

/// Static surface appearance: flat-shaded solid colour with rough/metal
/// response baked into the shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    colour: [f32; 3],
    roughness: f32,
    metalness: f32,
    _padding: [f32; 3],
}

impl MaterialUniform {
    pub fn new(colour: [f32; 3], roughness: f32, metalness: f32) -> Self {
        Self {
            colour,
            roughness,
            metalness,
            _padding: [0.0; 3],
        }
    }
}

/// Light and material uniforms bundled with their GPU resources.
#[derive(Debug)]
pub struct ShadingResources {
    pub light: LightUniform,
    pub material: MaterialUniform,
    pub light_buffer: wgpu::Buffer,
    pub material_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl ShadingResources {
    pub fn new(device: &wgpu::Device, light: LightUniform, material: MaterialUniform) -> Self {
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[light]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Material Buffer"),
            contents: bytemuck::cast_slice(&[material]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: material_buffer.as_entire_binding(),
                },
            ],
            label: Some("shading_bind_group"),
        });

        Self {
            light,
            material,
            light_buffer,
            material_buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    };
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[uniform_entry(0), uniform_entry(1)],
        label: Some("shading_bind_group_layout"),
    })
}
