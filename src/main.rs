use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tessel::blocks::BlockRegistry;
use tessel::edit::OverlaySnapshot;
use tessel::geom::Vec3;
use tessel::world::{provider_from_config, worldgen::Mode};
use tessel::{EditCommand, RecordingSink, TesselConfig, VoxelWorld};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    Flat,
    Heightmap,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless chunk streaming and meshing run", long_about = None)]
struct Args {
    /// Path to tessel.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Block catalogue TOML; overrides the config file
    #[arg(long)]
    blocks: Option<PathBuf>,

    /// Number of streaming ticks to run
    #[arg(long, default_value_t = 16)]
    ticks: u32,

    /// Viewpoint speed along +x, in blocks per tick
    #[arg(long, default_value_t = 8.0)]
    speed: f32,

    /// Terrain provider; overrides the config file
    #[arg(long, value_enum)]
    provider: Option<ProviderKind>,

    /// Block edit `x,y,z=name`, applied before the first tick (repeatable)
    #[arg(long)]
    edit: Vec<EditCommand>,

    /// Overlay snapshot to import before the first tick
    #[arg(long)]
    overlay_in: Option<PathBuf>,

    /// Where to write the overlay snapshot after the run
    #[arg(long)]
    overlay_out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => TesselConfig::load_from_path(path)?,
        None => TesselConfig::default(),
    };
    if let Some(p) = args.blocks.clone() {
        cfg.blocks = Some(p);
    }
    if let Some(kind) = args.provider {
        cfg.worldgen.mode = match kind {
            ProviderKind::Flat => Mode::Flat,
            ProviderKind::Heightmap => Mode::Heightmap,
        };
    }

    let registry = match &cfg.blocks {
        Some(path) => BlockRegistry::load_from_path(path)?,
        None => BlockRegistry::builtin()?,
    };
    log::info!("loaded {} block definitions", registry.len());
    let dims = cfg.chunk.dims();
    let provider = provider_from_config(&cfg.worldgen, &registry, dims)?;
    let mut world = VoxelWorld::new(Arc::new(registry), &cfg.stream, provider, RecordingSink::default())?;

    if let Some(path) = &args.overlay_in {
        let n = world.import_overlay(&OverlaySnapshot::load(path)?);
        log::info!("imported {n} overlay edits from {}", path.display());
    }
    for e in &args.edit {
        world.apply_block_change(e.position, e.block.as_deref());
    }

    let start_y = cfg.worldgen.height.base + 8.0;
    let mut pos = Vec3::new(0.0, start_y, 0.0);
    for tick in 0..args.ticks {
        let stats = world.update(pos);
        log::info!(
            target: "world",
            "[tick {}] pos ({:.1}, {:.1}, {:.1}) +{} -{} failed {} meshed {} empty {} resident {} meshes {} quads {}",
            tick,
            pos.x,
            pos.y,
            pos.z,
            stats.stream.loaded,
            stats.stream.unloaded,
            stats.stream.failed,
            stats.meshed,
            stats.empty,
            world.manager().loaded_len(),
            world.mesh_count(),
            world.sink().live_quads()
        );
        pos += Vec3::new(args.speed, 0.0, 0.0);
    }

    for e in &args.edit {
        let name = world
            .get_block_definition_at(e.position)
            .map_or("air", |d| d.name.as_str());
        log::info!("block at ({}, {}, {}) is {}", e.position.x, e.position.y, e.position.z, name);
    }

    if let Some(path) = &args.overlay_out {
        world.export_overlay().save(path)?;
        log::info!("wrote {} overlay edits to {}", world.overlay().len(), path.display());
    }
    let overlay = world.overlay().stats();
    log::info!(
        "done: {} chunks, {} meshes, {} edits in {} chunk buckets",
        world.manager().loaded_len(),
        world.mesh_count(),
        overlay.block_edits,
        overlay.chunk_entries
    );
    world.dispose();
    Ok(())
}
