#![allow(clippy::unwrap_used)]

use cablegen::material::{ConductorMaterial, InsulatorMaterial, LapMaterial, MaterialLibrary};
use cablegen::operations::assembly::{ConductorParams, InsulatorParams, MakePartArray};
use cablegen::operations::creation::{MakeBraid, MakeCentralFiller, MakeLap};
use cablegen::operations::BuildContext;
use cablegen::progress::ProgressLog;
use cablegen::scene::Scene;
use cablegen::tessellation::TessellationParams;

fn init_tracing() {
    // WARN for everything, DEBUG for cablegen; RUST_LOG overrides.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("cablegen=debug".parse().unwrap());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

fn insulator() -> InsulatorParams {
    InsulatorParams {
        outer_radius: 0.0015,
        inner_radius: 0.001,
        material: "pvc".parse::<InsulatorMaterial>().unwrap(),
        colors: Vec::new(),
        peel_length: 0.02,
    }
    .with_color_list("brown black gr/ye")
}

fn conductor() -> ConductorParams {
    ConductorParams {
        radius: 0.001,
        strand_radius: 0.0002,
        strand_pitch: 30.0,
        material: "cu".parse::<ConductorMaterial>().unwrap(),
    }
}

#[test]
fn three_core_cable() {
    init_tracing();
    let mut scene = Scene::new();
    let mut materials = MaterialLibrary::new();
    let mut progress = ProgressLog::default();
    let mut ctx = BuildContext::new(&mut scene, &mut materials).with_progress(&mut progress);

    let (length, pitch, lay_radius) = (0.1, 10.0, 0.0018);
    let parts = MakePartArray::new(length, pitch, lay_radius, true, insulator(), conductor())
        .execute(&mut ctx)
        .unwrap();
    let filler = MakeCentralFiller::new(length, 0.0035, 0.0005, InsulatorMaterial::Fill, "grey")
        .execute(&mut ctx)
        .unwrap();
    let lap = MakeLap::new(length, 0.0036, LapMaterial::Nylon)
        .execute(&mut ctx)
        .unwrap();
    let braid = MakeBraid::new(length, 0.0037, 3, 4, 20.0, 0.0001, ConductorMaterial::TinnedCopper)
        .execute(&mut ctx)
        .unwrap();

    let params = TessellationParams::default();
    let mesh = ctx.scene.to_mesh(parts, params).unwrap();
    assert!(!mesh.is_empty());
    for v in &mesh.vertices {
        assert!(v.x.hypot(v.y) < lay_radius + 0.0015 + 1e-4);
        assert!(v.z > -1e-3 && v.z < length + 1e-3);
    }

    for id in [filler, lap, braid] {
        assert!(!ctx.scene.to_mesh(id, params).unwrap().is_empty());
    }
    assert_eq!(ctx.scene.object(parts).unwrap().name, "PartArray");
    assert_eq!(ctx.scene.object(braid).unwrap().name, "Braid");

    // The braid reports last: bundles then layers.
    assert_eq!(progress.total, 8 + 3);
    assert!(progress.finished);
    // Conductor, stripe and base colours of the three cores plus filler,
    // lap and braid.
    assert!(materials.len() >= 7);
}
