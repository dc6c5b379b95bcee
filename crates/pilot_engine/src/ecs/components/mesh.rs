//! Mesh component: an ordered list of submeshes
//!
//! Each submesh owns its vertex attribute streams on the CPU side. Once
//! uploaded, the device buffer handles live in [`MeshBuffers`].

use thiserror::Error;

use crate::ecs::{Component, ComponentType, Entity};
use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::BufferHandle;

/// Inconsistent submesh data found by [`SubMesh::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A populated attribute stream does not match the position count
    #[error("{attribute} has {len} entries, expected {expected}")]
    AttributeLength {
        /// Stream name
        attribute: &'static str,
        /// Entries in the stream
        len: usize,
        /// Position count
        expected: usize,
    },

    /// An index points past the last vertex
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Position count
        vertex_count: usize,
    },
}

/// Device-side buffers for a submesh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshBuffers {
    /// Vertex buffer handle
    pub vertex_buffer: Option<BufferHandle>,
    /// Index buffer handle
    pub index_buffer: Option<BufferHandle>,
    /// Number of vertices in the vertex buffer
    pub vertex_count: u32,
    /// Number of indices in the index buffer
    pub index_count: u32,
}

impl MeshBuffers {
    /// Whether both buffers have been created
    pub const fn is_uploaded(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }
}

/// One drawable piece of a mesh with a single material
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    /// Uploaded buffers
    pub buffers: MeshBuffers,
    /// Material entity used to shade this submesh
    pub material: Entity,
    /// Offset into the renderer's shared vertex storage
    pub storage_offset: u32,

    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals
    pub normals: Vec<Vec3>,
    /// Vertex tangents (w holds handedness)
    pub tangents: Vec<Vec4>,
    /// First vertex color channel
    pub colors0: Vec<Vec4>,
    /// Second vertex color channel
    pub colors1: Vec<Vec4>,
    /// First skinning weight set
    pub weights0: Vec<Vec4>,
    /// Second skinning weight set
    pub weights1: Vec<Vec4>,
    /// First skinning joint set
    pub joints0: Vec<Vec4>,
    /// Second skinning joint set
    pub joints1: Vec<Vec4>,
    /// First texture coordinate set
    pub uv0: Vec<Vec2>,
    /// Second texture coordinate set
    pub uv1: Vec<Vec2>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl SubMesh {
    /// Number of vertices (length of the position stream)
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Interleave positions and the first color channel as `xyz rgba`
    ///
    /// Missing colors default to opaque white.
    pub fn interleave_position_color(&self) -> Vec<f32> {
        let white = Vec4::new(1.0, 1.0, 1.0, 1.0);
        self.positions
            .iter()
            .enumerate()
            .flat_map(|(i, p)| {
                let c = self.colors0.get(i).copied().unwrap_or(white);
                [p.x, p.y, p.z, c.x, c.y, c.z, c.w]
            })
            .collect()
    }

    /// Check that every populated attribute stream matches the position count
    /// and that every index is in range
    pub fn validate(&self) -> Result<(), MeshError> {
        let count = self.positions.len();
        let streams = [
            ("normals", self.normals.len()),
            ("tangents", self.tangents.len()),
            ("colors0", self.colors0.len()),
            ("colors1", self.colors1.len()),
            ("weights0", self.weights0.len()),
            ("weights1", self.weights1.len()),
            ("joints0", self.joints0.len()),
            ("joints1", self.joints1.len()),
            ("uv0", self.uv0.len()),
            ("uv1", self.uv1.len()),
        ];

        for (attribute, len) in streams {
            if len != 0 && len != count {
                return Err(MeshError::AttributeLength {
                    attribute,
                    len,
                    expected: count,
                });
            }
        }

        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: count,
            });
        }

        Ok(())
    }
}

/// ECS Mesh component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshComponent {
    /// Submeshes in draw order
    pub submeshes: Vec<SubMesh>,
}

impl Component for MeshComponent {
    const TYPE: ComponentType = ComponentType::Mesh;
}
