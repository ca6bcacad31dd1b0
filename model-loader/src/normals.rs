use crate::mesh::{Mesh, Vertex};
use nalgebra::Vector3;

/// True when no vertex carries a normal, i.e. the source didn't give us any.
pub fn needs_normals(vertices: &[Vertex]) -> bool {
    vertices.iter().all(|v| v.normal == [0.0, 0.0, 0.0])
}

// smooth normals: each face normal gets added to its three corners and the sum normalized
// the cross product isn't normalized first, so bigger triangles pull harder
pub fn reconstruct_normals(mesh: &mut Mesh) {
    if mesh.indices.len() < 3 {
        return;
    }
    let mut acc = vec![Vector3::<f32>::zeros(); mesh.vertices.len()];
    for triangle in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let (Some(va), Some(vb), Some(vc)) =
            (mesh.vertices.get(a), mesh.vertices.get(b), mesh.vertices.get(c))
        else {
            log::warn!(
                "{}: triangle {:?} points past {} vertices, ignoring it",
                mesh.name,
                triangle,
                mesh.vertices.len()
            );
            continue;
        };
        let pa: Vector3<f32> = va.position.into();
        let pb: Vector3<f32> = vb.position.into();
        let pc: Vector3<f32> = vc.position.into();
        let n = (pb - pa).cross(&(pc - pa));
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    for (v, sum) in mesh.vertices.iter_mut().zip(acc) {
        // untouched or fully degenerate vertices stay at zero instead of going NaN
        v.normal = sum
            .try_normalize(1e-8)
            .unwrap_or_else(Vector3::zeros)
            .into();
    }
}
