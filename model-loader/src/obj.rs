// obj faces can index position, texcoord and normal separately;
// a gpu vertex buffer can't, so every distinct v/vt/vn combo used by a face
// becomes one output vertex and the faces get a single unified index buffer

use crate::cache::{VertexCache, VertexKey};
use crate::error::LoadError;
use crate::mesh::{Mesh, Vertex};
use crate::normals::{needs_normals, reconstruct_normals};
use crate::options::LoadOptions;
use crate::triangulate::fan;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// everything is 1-indexed in obj, so slot 0 of each pool is the "not given" value
struct Pools {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

impl Pools {
    fn new() -> Self {
        Self {
            positions: vec![[0.0; 3]],
            texcoords: vec![[0.0; 2]],
            normals: vec![[0.0; 3]],
        }
    }

    fn vertex(&self, key: VertexKey) -> Vertex {
        Vertex {
            position: self.positions[key.position as usize],
            texcoord: self.texcoords[key.texcoord as usize],
            normal: self.normals[key.normal as usize],
        }
    }
}

pub fn load_obj(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| {
        log::error!("Couldn't open {}: {}", path.display(), source);
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse_obj(
        BufReader::new(file),
        path.display().to_string(),
        options,
    )
}

pub fn parse_obj<R: BufRead>(
    reader: R,
    name: impl Into<String>,
    options: &LoadOptions,
) -> Result<Mesh, LoadError> {
    let mut mesh = Mesh::new(name);
    log::info!("Parsing {}", mesh.name);
    let mut pools = Pools::new();
    let mut cache = VertexCache::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| {
            log::error!("Read failed in {} at line {}: {}", mesh.name, lineno + 1, source);
            LoadError::Io {
                path: mesh.name.clone().into(),
                source,
            }
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => pools.positions.push(floats(tokens, lineno)),
            Some("vt") => {
                let [u, v] = floats(tokens, lineno);
                let v = if options.flip_v { 1.0 - v } else { v };
                pools.texcoords.push([u, v]);
            }
            Some("vn") => pools.normals.push(floats(tokens, lineno)),
            Some("f") => {
                let polygon: Vec<VertexKey> = tokens
                    .filter_map(|token| corner(token, &pools, lineno))
                    .collect();
                if polygon.len() < 3 {
                    log::warn!(
                        "Skipping face with {} usable corners at line {}",
                        polygon.len(),
                        lineno + 1
                    );
                    continue;
                }
                for triangle in fan(polygon.len()) {
                    for c in triangle {
                        let key = polygon[c];
                        let idx = cache.get_or_insert_with(key, &mut mesh.vertices, || {
                            pools.vertex(key)
                        });
                        mesh.indices.push(idx);
                    }
                }
            }
            // o, g, s, usemtl, mtllib... nothing geometric about them
            _ => {}
        }
    }

    if needs_normals(&mesh.vertices) {
        log::debug!("{} has no normals, generating them", mesh.name);
        reconstruct_normals(&mut mesh);
    }

    if mesh.vertices.is_empty() || mesh.indices.is_empty() {
        log::error!("{} produced no vertices/indices", mesh.name);
        return Err(LoadError::Empty { name: mesh.name });
    }
    log::info!(
        "Parsed {}: {} vertices, {} indices ({} unique corners)",
        mesh.name,
        mesh.vertex_count(),
        mesh.index_count(),
        cache.len()
    );
    Ok(mesh)
}

// missing or junk numbers become 0, same as a failed stream read would
fn floats<'a, const N: usize>(
    mut tokens: impl Iterator<Item = &'a str>,
    lineno: usize,
) -> [f32; N] {
    let mut out = [0.0; N];
    for slot in out.iter_mut() {
        match tokens.next().map(str::parse::<f32>) {
            Some(Ok(f)) => *slot = f,
            _ => {
                log::warn!("Bad or missing number at line {}, using 0", lineno + 1);
                break;
            }
        }
    }
    out
}

// splits `v`, `v/vt`, `v/vt/vn` or `v//vn`; absent fields are 0
fn split_corner(token: &str) -> Option<(i32, i32, i32)> {
    let mut parts = token.split('/');
    let field = |part: Option<&str>| match part {
        None | Some("") => Some(0),
        Some(s) => s.parse::<i32>().ok(),
    };
    let v = field(parts.next())?;
    let vt = field(parts.next()).unwrap_or(0);
    let vn = field(parts.next()).unwrap_or(0);
    Some((v, vt, vn))
}

// negative indices count back from the end: -1 is the newest element
// len includes the sentinel, which is exactly what makes -1 land on the last element
fn resolve(idx: i32, len: usize) -> i32 {
    if idx < 0 {
        len as i32 + idx
    } else {
        idx
    }
}

fn corner(token: &str, pools: &Pools, lineno: usize) -> Option<VertexKey> {
    let Some((v, vt, vn)) = split_corner(token) else {
        log::warn!("Unreadable face corner {:?} at line {}", token, lineno + 1);
        return None;
    };
    let position = resolve(v, pools.positions.len());
    if position <= 0 || position as usize >= pools.positions.len() {
        log::warn!(
            "Position index {} out of range at line {}, skipping corner",
            v,
            lineno + 1
        );
        return None;
    }
    let clamp = |i: i32, len: usize| if i < 0 || i as usize >= len { 0 } else { i };
    Some(VertexKey {
        position,
        texcoord: clamp(resolve(vt, pools.texcoords.len()), pools.texcoords.len()),
        normal: clamp(resolve(vn, pools.normals.len()), pools.normals.len()),
    })
}
