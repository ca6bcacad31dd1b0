/// Knobs shared by the obj parser and the scene extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    // obj/fbx store V growing downwards; we want it growing upwards
    pub flip_v: bool,
    pub detect_mirroring: bool,
    // flip every triangle of every scene mesh, mirrored or not
    pub force_flip_winding: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        GPU_LOAD_OPTIONS
    }
}

/// What you almost always want when the result is going straight into a vertex buffer.
pub const GPU_LOAD_OPTIONS: LoadOptions = LoadOptions {
    flip_v: true,
    detect_mirroring: true,
    force_flip_winding: false,
};

/// Keeps texture coordinates and winding exactly as authored.
pub const RAW_LOAD_OPTIONS: LoadOptions = LoadOptions {
    flip_v: false,
    detect_mirroring: false,
    force_flip_winding: false,
};
