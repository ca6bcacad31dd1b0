use crate::mesh::Vertex;
use std::collections::BTreeMap;

/// The (v, vt, vn) triple of a face corner after index resolution.
/// 0 in any slot means that attribute wasn't given.
// field order is the comparison order, so don't shuffle these
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexKey {
    pub position: i32,
    pub texcoord: i32,
    pub normal: i32,
}

/// Hands out one output index per distinct [`VertexKey`].
///
/// Lives for exactly one parse; an index, once handed out, never changes.
#[derive(Debug, Default)]
pub struct VertexCache {
    indices: BTreeMap<VertexKey, u32>,
}

impl VertexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `key`'s vertex, building and appending it to `vertices` the first time round.
    pub fn get_or_insert_with(
        &mut self,
        key: VertexKey,
        vertices: &mut Vec<Vertex>,
        make: impl FnOnce() -> Vertex,
    ) -> u32 {
        *self.indices.entry(key).or_insert_with(|| {
            vertices.push(make());
            (vertices.len() - 1) as u32
        })
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
