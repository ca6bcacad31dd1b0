//! Turns OBJ files and imported scene graphs into indexed triangle meshes
//! (position, texcoord, normal + u32 indices) that can go straight into a vertex buffer.

pub mod cache;
pub mod error;
pub mod mesh;
pub mod normals;
pub mod obj;
pub mod options;
pub mod resource;
pub mod scene;
pub mod scene_extract;
pub mod triangulate;

pub use error::LoadError;
pub use mesh::{Mesh, UploadBytes, Vertex};
pub use obj::{load_obj, parse_obj};
pub use options::{LoadOptions, GPU_LOAD_OPTIONS, RAW_LOAD_OPTIONS};
pub use resource::{Model3D, ModelFormat, Resource, ResourceKind, ResourceState};
pub use scene::{Scene, SceneImporter, SceneNode};
pub use scene_extract::{extract_meshes, load_scene, LoadedScene};
