use crate::error::LoadError;
use std::mem::size_of;

// laid out so a slice of these can be handed to the gpu as-is
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub texcoord: [f32; 2],
    // (0, 0, 0) means "not given", see normals.rs
    pub normal: [f32; 3],
}

/// One indexed triangle list, ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    // order matters, it's the vertex buffer layout
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// A mesh packed into a single buffer: vertices first, indices after.
pub struct UploadBytes {
    pub bytes: Vec<u8>,
    pub idx_offset: u64,
    pub idx_count: u32,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: vec![],
            indices: vec![],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether this is worth drawing at all; callers should check this before upload.
    pub fn is_renderable(&self) -> bool {
        !self.vertices.is_empty() && !self.indices.is_empty() && self.indices.len() % 3 == 0
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        if self.indices.len() % 3 != 0 {
            return Err(LoadError::InvalidMesh(format!(
                "{}: {} indices is not a whole number of triangles",
                self.name,
                self.indices.len()
            )));
        }
        if let Some(bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(LoadError::InvalidMesh(format!(
                "{}: index {} out of bounds for {} vertices",
                self.name,
                bad,
                self.vertices.len()
            )));
        }
        Ok(())
    }

    /// Axis aligned (min, max) over all positions.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = self.vertices.first()?.position;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(mut mn, mut mx), v| {
                    for axis in 0..3 {
                        mn[axis] = mn[axis].min(v.position[axis]);
                        mx[axis] = mx[axis].max(v.position[axis]);
                    }
                    (mn, mx)
                }),
        )
    }

    /// Flat 2x2 quad facing +Y, for when the real model didn't load.
    pub fn fallback_quad() -> Self {
        let up = [0.0, 1.0, 0.0];
        Self {
            name: "fallback quad".to_string(),
            vertices: vec![
                Vertex {
                    position: [-1.0, 0.0, -1.0],
                    texcoord: [0.0, 0.0],
                    normal: up,
                },
                Vertex {
                    position: [1.0, 0.0, -1.0],
                    texcoord: [1.0, 0.0],
                    normal: up,
                },
                Vertex {
                    position: [1.0, 0.0, 1.0],
                    texcoord: [1.0, 1.0],
                    normal: up,
                },
                Vertex {
                    position: [-1.0, 0.0, 1.0],
                    texcoord: [0.0, 1.0],
                    normal: up,
                },
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    pub fn size_in_bytes(&self) -> usize {
        self.vertices.len() * size_of::<Vertex>() + self.indices.len() * size_of::<u32>()
    }

    pub fn upload_bytes(&self) -> UploadBytes {
        let vtxln = self.vertices.len() * size_of::<Vertex>();
        let idxln = self.indices.len() * size_of::<u32>();
        let mut bytes = vec![0u8; vtxln + idxln];
        // Vertex is repr(C) and all f32, so there's no padding to worry about
        unsafe {
            std::ptr::copy_nonoverlapping(
                self.vertices.as_ptr() as *const u8,
                bytes.as_mut_ptr(),
                vtxln,
            );
            std::ptr::copy_nonoverlapping(
                self.indices.as_ptr() as *const u8,
                bytes.as_mut_ptr().add(vtxln),
                idxln,
            );
        }
        UploadBytes {
            bytes,
            idx_offset: vtxln as u64,
            idx_count: self.indices.len() as u32,
        }
    }
}
