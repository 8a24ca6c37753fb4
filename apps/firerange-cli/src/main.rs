use anyhow::Context;
use clap::{Parser, Subcommand};
use firerange_assets::{AssetStore, CpuMesh};
use firerange_common::{MeshHandle, Transform};
use firerange_control::{MotionController, bullet_transform};
use firerange_input::InputState;
use firerange_render::{DebugTextRenderer, Renderer};
use firerange_scene::{EntityKind, Scene};
use glam::Vec3;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "firerange-cli", about = "Headless tools for the shooting gallery")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions
    Info,
    /// Run a scripted session without a window and print the resulting scene
    Demo {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "120")]
        ticks: u64,
    },
    /// Import a glTF model and print its manifest as JSON
    Inspect {
        /// Path to a .glb or .gltf file
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("firerange-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("scene: tick={}", Scene::new().tick());
            println!("input: {}", firerange_input::crate_info());
            println!("control: {}", firerange_control::crate_info());
            println!("assets: {}", firerange_assets::crate_info());
            println!("render: {}", firerange_render::crate_info());
        }
        Commands::Demo { ticks } => run_demo(ticks),
        Commands::Inspect { path } => {
            let mut store = AssetStore::new();
            store
                .import_gltf(&path)
                .with_context(|| format!("import {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&store.manifest())?);
        }
    }

    Ok(())
}

/// Scripted stand-in for a windowed session: advance a bit, turn a bit,
/// strafe a bit, then fire once.
fn run_demo(ticks: u64) {
    let mut assets = AssetStore::new();
    let target_asset = assets.register_mesh(CpuMesh::unit_cube("target"));
    let blaster_asset = assets.register_mesh(CpuMesh::unit_cube("blaster"));
    let bullet_asset = assets.register_mesh(CpuMesh::unit_cube("bullet"));

    let mut scene = Scene::new();
    for x in [0.0, 1.0, 2.0, -2.0] {
        scene.spawn(
            EntityKind::Target,
            MeshHandle(target_asset.0),
            Transform {
                position: Vec3::new(x, 0.0, -3.0),
                ..Transform::default()
            },
        );
    }
    let blaster = scene.spawn(
        EntityKind::Blaster,
        MeshHandle(blaster_asset.0),
        Transform {
            position: Vec3::new(0.0, 0.0, -1.0),
            ..Transform::default()
        },
    );
    scene.camera.attach(
        blaster,
        Transform {
            position: Vec3::new(0.0, 0.5, 1.0),
            ..Transform::default()
        },
    );

    let controller = MotionController::new(blaster);
    let mut input = InputState::new();

    // Three phases of held keys: forward, turn left, strafe right.
    let phase = (ticks / 3).max(1);
    input.press("w");
    for _ in 0..phase {
        controller.update(&mut scene, &input);
        scene.step();
    }
    input.release("w");
    input.press("a");
    for _ in 0..phase {
        controller.update(&mut scene, &input);
        scene.step();
    }
    input.release("a");
    input.press("shift");
    input.press("d");
    for _ in 0..phase {
        controller.update(&mut scene, &input);
        scene.step();
    }
    input.release("d");
    input.release("shift");

    // One trigger pull on the way out.
    if let Some(data) = scene.get(blaster).copied() {
        let half_depth = assets
            .get_mesh(blaster_asset)
            .map(|m| m.bounds.half_depth())
            .unwrap_or(0.0);
        let pose = bullet_transform(&data.transform, scene.camera_forward(), half_depth);
        scene.spawn(EntityKind::Bullet, MeshHandle(bullet_asset.0), pose);
    }

    print!("{}", DebugTextRenderer::new().render(&scene));
    println!(
        "Simulated {} ticks: {} entities, facing=({:.2}, {:.2}, {:.2})",
        scene.tick(),
        scene.entity_count(),
        scene.camera_forward().x,
        scene.camera_forward().y,
        scene.camera_forward().z
    );
}
