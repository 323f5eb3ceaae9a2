//! GPU mesh data and the instanced draw extension.
//!
//! A [`Mesh`] owns the vertex and index buffers for one shape. The backdrop
//! only ever uploads a single flat-shaded hull, but the upload path is kept
//! generic over any [`FacetedMesh`].

use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::geometry::hull::FacetedMesh;

/// Anything that can describe its vertex buffer layout to a pipeline.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// One vertex of the lattice mesh: position and per-face normal. No texture
/// coordinates; the surface is a solid shaded colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for MeshVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// A mesh uploaded to the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl Mesh {
    /// Upload flat-shaded hull data into vertex and index buffers.
    pub fn from_faceted(device: &wgpu::Device, name: &str, faceted: &FacetedMesh) -> Self {
        let vertices: Vec<MeshVertex> = faceted
            .positions
            .iter()
            .zip(faceted.normals.iter())
            .map(|(&position, &normal)| MeshVertex { position, normal })
            .collect();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&faceted.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: faceted.indices.len() as u32,
        }
    }
}

/// Extends `wgpu::RenderPass` with an instanced mesh draw. The instance
/// buffer is expected in vertex slot 1 (set by the caller, so several draws
/// can share one buffer).
pub trait DrawLattice<'a> {
    fn draw_mesh_instanced(
        &mut self,
        mesh: &'a Mesh,
        instances: Range<u32>,
        camera_bind_group: &'a wgpu::BindGroup,
        shading_bind_group: &'a wgpu::BindGroup,
        spin_bind_group: &'a wgpu::BindGroup,
    );
}

impl<'a, 'b> DrawLattice<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh_instanced(
        &mut self,
        mesh: &'b Mesh,
        instances: Range<u32>,
        camera_bind_group: &'b wgpu::BindGroup,
        shading_bind_group: &'b wgpu::BindGroup,
        spin_bind_group: &'b wgpu::BindGroup,
    ) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.set_bind_group(0, camera_bind_group, &[]);
        self.set_bind_group(1, shading_bind_group, &[]);
        self.set_bind_group(2, spin_bind_group, &[]);
        self.draw_indexed(0..mesh.num_elements, 0, instances);
    }
}
