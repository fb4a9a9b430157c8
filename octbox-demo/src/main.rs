//! Fills an octree with random cubes, moves them around, queries them and removes some again,
//! logging the shape of the tree along the way.
//!
//! Run with `RUST_LOG=info` for a summary or `RUST_LOG=octbox_index=trace` to follow every split
//! and merge.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::{dvec3, DVec3};
use log::info;
use octbox_index::{Bounds3, Motion, ObjectId, Octree};
use rand::prelude::*;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "octbox-demo")]
#[command(about = "Exercises an octree with random cubes")]
struct Args {
    /// Path to a configuration TOML file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random cubes to insert.
    #[arg(short, long, default_value_t = 1000)]
    objects: usize,

    /// Seed for the random number generator.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of random colliding queries to run.
    #[arg(short, long, default_value_t = 100)]
    queries: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };

    basic()?;

    let region = Bounds3::cube(DVec3::ZERO, 2.0 * config.half_extent);
    let mut octree = Octree::with_config(region, config.octree)
        .context("Failed to construct octree from config")?;
    let mut rng = StdRng::seed_from_u64(args.seed);

    let ids = (0..args.objects)
        .filter_map(|index| octree.insert(index, random_cube(&mut rng, &config)))
        .collect::<Vec<_>>();
    log_stats("after inserting", &octree);

    let moved = ids
        .iter()
        .filter(|&&id| {
            let center = random_center(&mut rng, &config);
            octree.move_object(id, Motion::Recenter(center))
        })
        .count();
    info!("moved {moved} of {} objects", ids.len());
    log_stats("after moving", &octree);

    let hits = (0..args.queries)
        .map(|_| {
            let query = Bounds3::cube(
                random_center(&mut rng, &config),
                config.half_extent / 10.0,
            );
            octree.colliding(query).len()
        })
        .sum::<usize>();
    info!(
        "{} queries found {hits} colliding objects in total",
        args.queries
    );

    let removed = remove_half(&mut octree, &ids, &mut rng);
    info!("removed {removed} objects");
    log_stats("after removing", &octree);

    Ok(())
}

/// A single small cube in a small tree, moved once within and once out of the tree.
fn basic() -> Result<()> {
    let mut octree = Octree::new(Bounds3::new(DVec3::ONE, DVec3::splat(4.0)))?;
    let id = octree
        .insert("cube", Bounds3::cube(dvec3(2.0, 2.0, 3.0), 0.5))
        .context("Cube should fit the tree")?;
    info!("inserted {id}");

    let colliding = octree.colliding(Bounds3::new(DVec3::ZERO, dvec3(0.9, 2.9, 0.9)));
    info!("{} objects collide with the corner", colliding.len());

    info!(
        "move within the tree: {}",
        octree.move_object(id, Motion::Recenter(dvec3(2.0, 2.0, 3.0)))
    );
    info!(
        "move outside of the tree: {}",
        octree.move_object(id, Motion::Recenter(dvec3(2.0, 2.0, 8.0)))
    );
    Ok(())
}

fn random_center(rng: &mut StdRng, config: &Config) -> DVec3 {
    let reach = config.half_extent - config.object_size / 2.0;
    [0.0; 3].map(|_| rng.gen_range(-reach..=reach)).into()
}

fn random_cube(rng: &mut StdRng, config: &Config) -> Bounds3 {
    Bounds3::cube(random_center(rng, config), config.object_size)
}

fn remove_half<T>(octree: &mut Octree<T>, ids: &[ObjectId], rng: &mut StdRng) -> usize {
    ids.choose_multiple(rng, ids.len() / 2)
        .filter(|&&id| octree.remove(id).is_some())
        .count()
}

fn log_stats<T>(stage: &str, octree: &Octree<T>) {
    info!(
        "{stage}: {} objects in {} nodes, height {}, usage {:.3}",
        octree.len(),
        octree.node_count(),
        octree.height(),
        octree.usage()
    );
}
