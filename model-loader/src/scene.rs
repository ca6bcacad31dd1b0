//! In-memory scene graph, the shape an fbx-style importer hands us.
//!
//! Nodes own their children outright and carry their local transform, a separate
//! "geometric" transform that only applies to the node's own mesh (not to children),
//! and optionally a polygon mesh whose per-corner attributes live in layer elements.

use crate::error::LoadError;
use nalgebra::{Matrix4, Vector3};
use std::path::Path;

/// What a layer element's entries are indexed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingMode {
    // one entry per control point, shared by every corner touching it
    ByControlPoint,
    // one entry per polygon corner
    ByPolygonVertex,
}

/// Whether a layer element is read straight or through its index array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceMode {
    Direct,
    IndexToDirect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerElement<T> {
    pub mapping: MappingMode,
    pub reference: ReferenceMode,
    pub direct: Vec<T>,
    // only read for IndexToDirect
    pub index: Vec<i32>,
}

impl<T: Copy> LayerElement<T> {
    pub fn direct(mapping: MappingMode, direct: Vec<T>) -> Self {
        Self {
            mapping,
            reference: ReferenceMode::Direct,
            direct,
            index: vec![],
        }
    }

    pub fn indexed(mapping: MappingMode, direct: Vec<T>, index: Vec<i32>) -> Self {
        Self {
            mapping,
            reference: ReferenceMode::IndexToDirect,
            direct,
            index,
        }
    }

    /// The value for one corner, or `None` if the element doesn't cover it.
    pub fn resolve(&self, control_point: usize, polygon_vertex: usize) -> Option<T> {
        let slot = match self.mapping {
            MappingMode::ByControlPoint => control_point,
            MappingMode::ByPolygonVertex => polygon_vertex,
        };
        let idx = match self.reference {
            ReferenceMode::Direct => slot,
            ReferenceMode::IndexToDirect => usize::try_from(*self.index.get(slot)?).ok()?,
        };
        self.direct.get(idx).copied()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UvSet {
    pub name: String,
    pub element: LayerElement<[f32; 2]>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneMesh {
    pub control_points: Vec<[f32; 3]>,
    // corner count of each polygon, in order
    pub polygon_sizes: Vec<usize>,
    // control point index of every corner, polygons back to back
    pub polygon_vertices: Vec<i32>,
    pub uvs: Vec<UvSet>,
    pub normals: Option<LayerElement<[f32; 3]>>,
}

impl SceneMesh {
    pub fn polygon_count(&self) -> usize {
        self.polygon_sizes.len()
    }

    pub fn polygon_size(&self, polygon: usize) -> Option<usize> {
        self.polygon_sizes.get(polygon).copied()
    }

    /// Offset of the polygon's first corner into `polygon_vertices`.
    /// Sums every earlier polygon, so don't call it per corner on big meshes.
    pub fn polygon_vertex_index(&self, polygon: usize) -> Option<usize> {
        if polygon >= self.polygon_sizes.len() {
            return None;
        }
        Some(self.polygon_sizes[..polygon].iter().sum())
    }

    /// Control point used by corner `corner` of `polygon`.
    pub fn polygon_vertex(&self, polygon: usize, corner: usize) -> Option<usize> {
        if corner >= self.polygon_size(polygon)? {
            return None;
        }
        let idx = *self
            .polygon_vertices
            .get(self.polygon_vertex_index(polygon)? + corner)?;
        usize::try_from(idx).ok()
    }

    pub fn uv_set_names(&self) -> Vec<&str> {
        self.uvs.iter().map(|set| set.name.as_str()).collect()
    }
}

/// Translation, then XYZ euler rotation (radians), then scale; applied scale first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scaling: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scaling: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn scaled(x: f32, y: f32, z: f32) -> Self {
        Self {
            scaling: Vector3::new(x, y, z),
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.translation)
            * Matrix4::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
            * Matrix4::new_nonuniform_scaling(&self.scaling)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse_textures: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub local: Transform,
    // pivot-style offset for this node's geometry only, children don't inherit it
    pub geometric: Transform,
    pub mesh: Option<SceneMesh>,
    pub materials: Vec<Material>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn global_transform(&self, parent: &Matrix4<f32>) -> Matrix4<f32> {
        parent * self.local.matrix()
    }
}

/// An imported scene. Owning one of these is owning everything the import produced;
/// it goes away with the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub name: String,
    pub root: SceneNode,
}

/// Turns a file into a [`Scene`]; the format-specific part that lives outside this crate.
pub trait SceneImporter {
    fn import(&self, path: &Path) -> Result<Scene, LoadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_all_modes() {
        let direct_cp = LayerElement::direct(MappingMode::ByControlPoint, vec![1, 2, 3]);
        assert_eq!(direct_cp.resolve(2, 0), Some(3));
        let direct_pv = LayerElement::direct(MappingMode::ByPolygonVertex, vec![1, 2, 3]);
        assert_eq!(direct_pv.resolve(2, 0), Some(1));
        let indexed_cp =
            LayerElement::indexed(MappingMode::ByControlPoint, vec![10, 20], vec![1, 0, 1]);
        assert_eq!(indexed_cp.resolve(1, 2), Some(10));
        let indexed_pv =
            LayerElement::indexed(MappingMode::ByPolygonVertex, vec![10, 20], vec![1, 0, 1]);
        assert_eq!(indexed_pv.resolve(1, 2), Some(20));
    }

    #[test]
    fn resolve_out_of_range_is_none() {
        let el = LayerElement::indexed(MappingMode::ByPolygonVertex, vec![10], vec![0, -1, 5]);
        assert_eq!(el.resolve(0, 1), None);
        assert_eq!(el.resolve(0, 2), None);
        assert_eq!(el.resolve(0, 3), None);
    }

    #[test]
    fn polygon_offsets() {
        let mesh = SceneMesh {
            control_points: vec![[0.0; 3]; 5],
            polygon_sizes: vec![3, 4],
            polygon_vertices: vec![0, 1, 2, 1, 2, 3, 4],
            ..Default::default()
        };
        assert_eq!(mesh.polygon_count(), 2);
        assert_eq!(mesh.polygon_vertex_index(1), Some(3));
        assert_eq!(mesh.polygon_vertex(1, 3), Some(4));
        assert_eq!(mesh.polygon_vertex(1, 4), None);
    }

    #[test]
    fn out_of_range_polygon_is_none() {
        let mesh = SceneMesh {
            control_points: vec![[0.0; 3]; 3],
            polygon_sizes: vec![3],
            polygon_vertices: vec![0, 1, 2],
            ..Default::default()
        };
        assert_eq!(mesh.polygon_size(0), Some(3));
        assert_eq!(mesh.polygon_size(1), None);
        assert_eq!(mesh.polygon_vertex_index(1), None);
        assert_eq!(mesh.polygon_vertex(1, 0), None);
        assert_eq!(mesh.polygon_vertex(0, 3), None);
    }

    #[test]
    fn global_transform_composes_parent_first() {
        let mut node = SceneNode::new("child");
        node.local.translation = Vector3::new(1.0, 0.0, 0.0);
        let parent = Transform::scaled(2.0, 2.0, 2.0).matrix();
        let world = node.global_transform(&parent);
        let p = world.transform_point(&nalgebra::Point3::origin());
        assert!((p.x - 2.0).abs() < 1e-6);
    }
}
