use crate::error::LoadError;
use crate::mesh::Mesh;
use crate::obj::load_obj;
use crate::options::LoadOptions;
use crate::scene::SceneImporter;
use crate::scene_extract::load_scene;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

// only models for now; textures/shaders belong to the renderer side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Model3D,
}

pub trait Resource {
    fn kind(&self) -> ResourceKind;
    fn name(&self) -> &str;
    fn state(&self) -> ResourceState;
    fn load(&mut self, path: &Path) -> Result<(), LoadError>;
    fn init(&mut self) -> Result<(), LoadError>;
    fn unload(&mut self);
    fn size_in_bytes(&self) -> usize;
}

/// Where a model's meshes come from, fixed when the model is created.
pub enum ModelFormat {
    Obj,
    Scene(Box<dyn SceneImporter>),
}

pub struct Model3D {
    name: String,
    path: Option<PathBuf>,
    format: ModelFormat,
    options: LoadOptions,
    state: ResourceState,
    meshes: Vec<Mesh>,
    texture_file_names: Vec<String>,
}

impl Model3D {
    pub fn new(name: impl Into<String>, format: ModelFormat, options: LoadOptions) -> Self {
        Self {
            name: name.into(),
            path: None,
            format,
            options,
            state: ResourceState::Unloaded,
            meshes: vec![],
            texture_file_names: vec![],
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn texture_file_names(&self) -> &[String] {
        &self.texture_file_names
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(&self, path: &Path) -> Result<(Vec<Mesh>, Vec<String>), LoadError> {
        match &self.format {
            ModelFormat::Obj => Ok((vec![load_obj(path, &self.options)?], vec![])),
            ModelFormat::Scene(importer) => {
                let scene = load_scene(importer.as_ref(), path, &self.options)?;
                Ok((scene.meshes, scene.texture_file_names))
            }
        }
    }
}

impl Resource for Model3D {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Model3D
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ResourceState {
        self.state
    }

    fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        self.path = Some(path.to_path_buf());
        self.state = ResourceState::Loading;
        match self.read(path) {
            Ok((meshes, textures)) => {
                self.meshes = meshes;
                self.texture_file_names = textures;
                self.state = ResourceState::Loaded;
                Ok(())
            }
            Err(e) => {
                self.meshes.clear();
                self.texture_file_names.clear();
                self.state = ResourceState::Failed;
                Err(e)
            }
        }
    }

    // nothing to upload from here, so init just makes sure what we have is drawable
    fn init(&mut self) -> Result<(), LoadError> {
        for mesh in &self.meshes {
            if let Err(e) = mesh.validate() {
                self.state = ResourceState::Failed;
                return Err(e);
            }
        }
        Ok(())
    }

    fn unload(&mut self) {
        self.meshes.clear();
        self.texture_file_names.clear();
        self.state = ResourceState::Unloaded;
    }

    fn size_in_bytes(&self) -> usize {
        self.meshes.iter().map(Mesh::size_in_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Material, Scene, SceneMesh, SceneNode};

    struct OneTriangle;

    impl SceneImporter for OneTriangle {
        fn import(&self, path: &Path) -> Result<Scene, LoadError> {
            if path.extension().map_or(true, |ext| ext != "fbx") {
                return Err(LoadError::Import(format!("{} is not fbx", path.display())));
            }
            let mut child = SceneNode::new("tri");
            child.mesh = Some(SceneMesh {
                control_points: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                polygon_sizes: vec![3],
                polygon_vertices: vec![0, 1, 2],
                ..Default::default()
            });
            child.materials.push(Material {
                name: "skin".into(),
                diffuse_textures: vec!["skin.png".into()],
            });
            let mut root = SceneNode::new("root");
            root.children.push(child);
            Ok(Scene {
                name: "one".into(),
                root,
            })
        }
    }

    #[test]
    fn scene_model_lifecycle() {
        let mut model = Model3D::new(
            "tri",
            ModelFormat::Scene(Box::new(OneTriangle)),
            LoadOptions::default(),
        );
        assert_eq!(model.state(), ResourceState::Unloaded);
        assert_eq!(model.kind(), ResourceKind::Model3D);
        model.load(Path::new("tri.fbx")).unwrap();
        assert_eq!(model.state(), ResourceState::Loaded);
        assert!(model.init().is_ok());
        assert_eq!(model.meshes().len(), 1);
        assert_eq!(model.texture_file_names(), ["skin.png".to_string()]);
        assert_eq!(model.size_in_bytes(), 3 * 32 + 3 * 4);
        model.unload();
        assert_eq!(model.state(), ResourceState::Unloaded);
        assert_eq!(model.size_in_bytes(), 0);
    }

    #[test]
    fn failed_import_marks_failed() {
        let mut model = Model3D::new(
            "tri",
            ModelFormat::Scene(Box::new(OneTriangle)),
            LoadOptions::default(),
        );
        assert!(matches!(
            model.load(Path::new("tri.obj")),
            Err(LoadError::Import(_))
        ));
        assert_eq!(model.state(), ResourceState::Failed);
        assert!(model.meshes().is_empty());
    }

    #[test]
    fn missing_obj_marks_failed() {
        let mut model = Model3D::new("gone", ModelFormat::Obj, LoadOptions::default());
        assert!(model.load(Path::new("/no/such/model.obj")).is_err());
        assert_eq!(model.state(), ResourceState::Failed);
        assert_eq!(model.path(), Some(Path::new("/no/such/model.obj")));
    }
}
