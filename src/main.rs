//! lshmem — LSH associative memory demonstration.
//!
//! Builds a deterministic synthetic image, stores a handful of its pixel
//! blocks auto-associatively, trains, and then measures how well the memory
//! restores noise-corrupted copies of those blocks.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing_subscriber::EnvFilter;

use lshmem::codec::{block_to_vec, decode_block, Raster, Rgb};
use lshmem::config;
use lshmem::kernels::vector_ops;
use lshmem::memory::MemoryConfig;
use lshmem::training::TrainingSession;

/// Train and query an LSH associative memory on image blocks.
#[derive(Parser, Debug)]
#[command(name = "lshmem", about = "LSH associative memory on image blocks", version)]
struct Cli {
    /// Block side in pixels; side² × 4 must be a power of two.
    #[arg(long, default_value_t = config::BLOCK_SIDE)]
    block_side: usize,

    /// Hash rows summed per recall.
    #[arg(short, long, default_value_t = config::DEFAULT_DENSITY)]
    density: usize,

    /// Base seed of the projection rows.
    #[arg(short, long, default_value_t = config::DEFAULT_HASH_SEED)]
    seed: u32,

    /// Number of blocks to store.
    #[arg(short = 'k', long, default_value_t = 8)]
    samples: usize,

    /// Training cycles over the whole sample set.
    #[arg(short, long, default_value_t = 20)]
    cycles: usize,

    /// Standard deviation of the noise added before recall, in pixel units.
    #[arg(long, default_value_t = 40.0)]
    noise: f32,

    /// Seed for the synthetic image, block placement and noise.
    #[arg(long, default_value_t = 1)]
    image_seed: u64,

    /// Synthetic image width.
    #[arg(long, default_value_t = 600)]
    width: usize,

    /// Synthetic image height.
    #[arg(long, default_value_t = 400)]
    height: usize,
}

/// Smooth colour field with a few discs, so blocks differ from each other.
fn synthetic_raster(width: usize, height: usize, rng: &mut StdRng) -> Raster {
    let discs: Vec<(f32, f32, f32, Rgb)> = (0..12)
        .map(|_| {
            let cx = rng.gen_range(0.0..width as f32);
            let cy = rng.gen_range(0.0..height as f32);
            let r = rng.gen_range(10.0..60.0);
            (cx, cy, r, Rgb::new(rng.gen(), rng.gen(), rng.gen()))
        })
        .collect();

    Raster::from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        for &(cx, cy, r, colour) in &discs {
            if (fx - cx).powi(2) + (fy - cy).powi(2) <= r * r {
                return colour;
            }
        }
        let u = fx / width.max(1) as f32;
        let v = fy / height.max(1) as f32;
        Rgb::new(
            (255.0 * u) as u8,
            (255.0 * v) as u8,
            (127.5 * (1.0 + (8.0 * u + 5.0 * v).sin())) as u8,
        )
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("lshmem v{}", env!("CARGO_PKG_VERSION"));

    let side = cli.block_side;
    if side == 0 || side > cli.width || side > cli.height {
        bail!(
            "block side {} does not fit a {}x{} image",
            side,
            cli.width,
            cli.height
        );
    }
    let vec_len = config::block_vec_len(side).context("block side too large")?;
    let mem_config = MemoryConfig::new(vec_len, cli.density, cli.seed);
    let mut session = TrainingSession::new(mem_config, cli.samples)
        .context("invalid memory configuration")?;

    tracing::info!(
        "Memory: vec_len={}, density={}, seed={}, {} weights",
        mem_config.vec_len,
        mem_config.density,
        mem_config.hash_seed,
        mem_config.weight_count(),
    );

    let mut rng = StdRng::seed_from_u64(cli.image_seed);
    let raster = synthetic_raster(cli.width, cli.height, &mut rng);

    let mut clean = Vec::with_capacity(cli.samples);
    let mut originals = Vec::with_capacity(cli.samples);
    for _ in 0..cli.samples {
        let x = rng.gen_range(0..=cli.width - side);
        let y = rng.gen_range(0..=cli.height - side);
        let block = raster
            .block_at(x, y, side)
            .with_context(|| format!("reading block at ({}, {})", x, y))?;
        let v = block_to_vec(&block);
        session.add_sample(v.clone()).context("storing sample")?;
        clean.push(v);
        originals.push(block);
    }
    tracing::info!("Stored {} blocks of {}x{} pixels", clean.len(), side, side);

    session.toggle_training();
    for cycle in 1..=cli.cycles {
        if let Some(err) = session.run_cycle().context("training cycle")? {
            tracing::info!("Training cycle {}: mean recall error {:.4}", cycle, err);
        }
    }
    session.toggle_training();

    let normal = Normal::new(0.0f32, cli.noise.max(0.0)).context("invalid noise level")?;
    let noisy: Vec<Vec<f32>> = clean
        .iter()
        .map(|v| {
            v.chunks_exact(config::CHANNELS_PER_PIXEL)
                .flat_map(|px| {
                    let mut px = px.to_vec();
                    for c in px.iter_mut().take(3) {
                        *c += normal.sample(&mut rng);
                    }
                    px
                })
                .collect()
        })
        .collect();

    let recalled = session
        .memory()
        .recall_batch(&noisy)
        .context("recalling noisy blocks")?;

    let (mut noisy_total, mut recalled_total) = (0.0f32, 0.0f32);
    for (i, ((c, n), r)) in clean.iter().zip(&noisy).zip(&recalled).enumerate() {
        let before = vector_ops::distance(n, c)?;
        let after = vector_ops::distance(r, c)?;
        noisy_total += before;
        recalled_total += after;

        let restored = decode_block(r, side)?;
        let exact = restored
            .pixels()
            .iter()
            .zip(originals[i].pixels())
            .filter(|(a, b)| a == b)
            .count();
        tracing::info!(
            "Block {}: error {:.2} noisy -> {:.2} recalled, {:.1}% pixels exact",
            i,
            before,
            after,
            100.0 * exact as f32 / (side * side) as f32
        );
    }

    if !clean.is_empty() {
        let n = clean.len() as f32;
        tracing::info!(
            "Mean error: {:.2} noisy -> {:.2} recalled",
            noisy_total / n,
            recalled_total / n
        );
    }

    let report = session.report();
    tracing::info!("Cycles recorded: {}", report.cycles_recorded);
    if let Some(best) = report.best_error {
        tracing::info!("  Best training error: {:.4}", best);
    }
    tracing::info!("  Converging: {}", report.converging);

    tracing::info!("Done.");
    Ok(())
}
