// walks a scene graph and turns every mesh-bearing node into its own Mesh
// unlike obj.rs nothing is deduplicated here: each polygon corner is its own vertex

use crate::error::LoadError;
use crate::mesh::{Mesh, Vertex};
use crate::normals::reconstruct_normals;
use crate::options::LoadOptions;
use crate::scene::{Scene, SceneImporter, SceneNode};
use crate::triangulate::{fan, flip_winding};
use nalgebra::{Matrix3, Matrix4, Vector3};
use std::path::Path;

/// Everything pulled out of one imported scene.
#[derive(Debug, Default)]
pub struct LoadedScene {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub texture_file_names: Vec<String>,
}

/// Import `path`, pull the meshes out, then let the scene go.
pub fn load_scene(
    importer: &dyn SceneImporter,
    path: &Path,
    options: &LoadOptions,
) -> Result<LoadedScene, LoadError> {
    let scene = importer.import(path).map_err(|e| {
        log::error!("Unable to import {}: {}", path.display(), e);
        e
    })?;
    log::info!("Imported scene {} from {}", scene.name, path.display());
    let loaded = LoadedScene {
        name: scene.name.clone(),
        meshes: extract_meshes(&scene, options),
        texture_file_names: texture_file_names(&scene),
    };
    // scene (and whatever the importer hung off it) is released here, not later
    drop(scene);
    log::info!("Extracted {} meshes from {}", loaded.meshes.len(), loaded.name);
    Ok(loaded)
}

pub fn extract_meshes(scene: &Scene, options: &LoadOptions) -> Vec<Mesh> {
    let mut meshes = vec![];
    // the root itself is just a container, only its descendants can carry meshes
    let root = scene.root.global_transform(&Matrix4::identity());
    for child in &scene.root.children {
        visit_node(child, &root, options, &mut meshes);
    }
    meshes
}

// pretty naive recursion, depth is whatever the scene's depth is
pub fn visit_node(
    node: &SceneNode,
    parent: &Matrix4<f32>,
    options: &LoadOptions,
    out: &mut Vec<Mesh>,
) {
    let global = node.global_transform(parent);
    if node.mesh.is_some() {
        let world = global * node.geometric.matrix();
        if let Some(mesh) = extract_mesh(node, &world, options) {
            out.push(mesh);
        }
    }
    for child in &node.children {
        visit_node(child, &global, options, out);
    }
}

/// One node's mesh as a triangle list; `world` is its global transform times its geometric one.
pub fn extract_mesh(node: &SceneNode, world: &Matrix4<f32>, options: &LoadOptions) -> Option<Mesh> {
    let src = node.mesh.as_ref()?;
    let uvs = src.uvs.first().map(|set| &set.element);
    if let Some(set) = src.uvs.first() {
        log::debug!("{} uses uv set {}", node.name, set.name);
    }

    let mut mesh = Mesh::new(node.name.clone());
    mesh.vertices.reserve(src.polygon_vertices.len());
    mesh.indices.reserve(src.polygon_count() * 3);

    // running offset of each polygon's first corner; keeps the walk linear
    let mut base = 0;
    'polygons: for (polygon, &size) in src.polygon_sizes.iter().enumerate() {
        let first = base;
        base += size;

        let mut corners = Vec::with_capacity(size);
        for corner in 0..size {
            let pv = first + corner;
            let cp = match src
                .polygon_vertices
                .get(pv)
                .and_then(|&cp| usize::try_from(cp).ok())
            {
                Some(cp) if cp < src.control_points.len() => cp,
                _ => {
                    log::warn!(
                        "{}: polygon {} references a missing control point, skipping it",
                        node.name,
                        polygon
                    );
                    continue 'polygons;
                }
            };
            let texcoord = match uvs.and_then(|el| el.resolve(cp, pv)) {
                Some([u, v]) if options.flip_v => [u, 1.0 - v],
                Some(uv) => uv,
                None => [0.0, 0.0],
            };
            corners.push(Vertex {
                position: src.control_points[cp],
                texcoord,
                normal: src
                    .normals
                    .as_ref()
                    .and_then(|el| el.resolve(cp, pv))
                    .unwrap_or_default(),
            });
        }

        let start = mesh.vertices.len() as u32;
        mesh.vertices.extend(corners);
        for triangle in fan(size) {
            mesh.indices
                .extend(triangle.iter().map(|&c| start + c as u32));
        }
    }

    // the importer would generate these for us; without one we do it ourselves
    if src.normals.is_none() {
        reconstruct_normals(&mut mesh);
    }

    let mirrored = options.detect_mirroring && is_mirrored(world);
    if mirrored || options.force_flip_winding {
        log::debug!(
            "{}: flipping winding (mirrored: {}, forced: {})",
            node.name,
            mirrored,
            options.force_flip_winding
        );
        flip_winding(&mut mesh.indices);
    }
    Some(mesh)
}

/// Per-axis scale of an affine transform. One axis carries the sign of the
/// determinant, so the product of all three is negative exactly when the
/// transform mirrors.
pub fn scale_components(world: &Matrix4<f32>) -> Vector3<f32> {
    let linear: Matrix3<f32> = world.fixed_slice::<3, 3>(0, 0).into_owned();
    let sign = if linear.determinant() < 0.0 { -1.0 } else { 1.0 };
    Vector3::new(
        sign * linear.column(0).norm(),
        linear.column(1).norm(),
        linear.column(2).norm(),
    )
}

pub fn is_mirrored(world: &Matrix4<f32>) -> bool {
    let s = scale_components(world);
    s.x * s.y * s.z < 0.0
}

/// Diffuse texture names of every material in the scene, in traversal order.
pub fn texture_file_names(scene: &Scene) -> Vec<String> {
    fn collect(node: &SceneNode, out: &mut Vec<String>) {
        for material in &node.materials {
            out.extend(material.diffuse_textures.iter().cloned());
        }
        for child in &node.children {
            collect(child, out);
        }
    }
    let mut out = vec![];
    collect(&scene.root, &mut out);
    out
}
