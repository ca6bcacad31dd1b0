use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while turning a file or scene into meshes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsing finished but produced no vertices or no indices.
    #[error("{name} produced no geometry")]
    Empty { name: String },

    /// Geometry that breaks the index invariants.
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// The scene importer refused the file.
    #[error("scene import failed: {0}")]
    Import(String),
}
