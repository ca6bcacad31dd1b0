use log::LevelFilter;
use model_loader::{load_obj, LoadOptions, Mesh};

fn main() {
    let mut args = std::env::args();
    let _ = args.next();
    let Some(modelpath) = args.next() else {
        eprintln!("usage: model-loader <model.obj> [flip_v] [quiet]");
        std::process::exit(2);
    };
    let flip_v: bool = args
        .next()
        .map(|a| a.parse().unwrap_or(true))
        .unwrap_or(true);
    let quiet: bool = args
        .next()
        .map(|a| a.parse().unwrap_or(false))
        .unwrap_or(false);

    simple_logger::SimpleLogger::new()
        .with_level(if quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Info
        })
        .init()
        .unwrap();

    let options = LoadOptions {
        flip_v,
        ..Default::default()
    };
    // something always gets handed on, even if it's just a quad
    let mesh = load_obj(&modelpath, &options).unwrap_or_else(|e| {
        log::error!("Load failed ({}), using fallback quad", e);
        Mesh::fallback_quad()
    });

    log::info!(
        "Mesh {}: V={} I={} triangles={}",
        mesh.name,
        mesh.vertex_count(),
        mesh.index_count(),
        mesh.triangle_count()
    );
    if let Some((mn, mx)) = mesh.bounds() {
        let center: [f32; 3] = std::array::from_fn(|i| 0.5 * (mn[i] + mx[i]));
        let radius = (0..3)
            .map(|i| 0.5 * (mx[i] - mn[i]))
            .map(|e| e * e)
            .sum::<f32>()
            .sqrt();
        log::info!(
            "Bounds {:?} .. {:?}, center {:?}, radius {}",
            mn,
            mx,
            center,
            radius
        );
    }
    let upload = mesh.upload_bytes();
    log::info!(
        "Upload buffer: {} bytes, indices at offset {} ({} of them)",
        upload.bytes.len(),
        upload.idx_offset,
        upload.idx_count
    );
}
