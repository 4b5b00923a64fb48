//! ASCII preview of generated terrain signals.
//!
//! Renders a biome map around the world origin, one glyph per sampled column.
//! Run with `cargo run -p strata-demo -- --seed abc` and vary `--stride` to
//! zoom between region-scale and column-scale structure. With
//! `--bench-regions N` it also pushes an N x N block of regions through the
//! background sampler and reports throughput.

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use strata_biome::{Biome, DecorSet};
use strata_rand::Seed;
use strata_terrain::{RegionCoord, RegionSampler, RegionTask, TerrainEngine, TerrainParams};

#[derive(Parser, Debug)]
#[command(name = "strata-demo", about = "ASCII preview of generated terrain signals")]
struct Args {
    /// World seed; a plain number is used directly, anything else is hashed.
    #[arg(long, default_value = "42")]
    seed: String,

    /// Fractal height domain extent.
    #[arg(long, default_value_t = 10_000_000)]
    domain_size: i64,

    /// Displacement roughness; defaults to domain_size / 500.
    #[arg(long)]
    roughness: Option<f64>,

    /// Worley point density for biome regions.
    #[arg(long, default_value_t = 0.0001)]
    density: f64,

    /// Map width in glyphs.
    #[arg(long, default_value_t = 120)]
    width: i64,

    /// Map height in glyphs.
    #[arg(long, default_value_t = 40)]
    height: i64,

    /// World units per glyph.
    #[arg(long, default_value_t = 16)]
    stride: i64,

    /// Also sample an N x N block of regions through the background pool.
    #[arg(long, default_value_t = 0)]
    bench_regions: i64,

    /// Log filter override, e.g. "debug,strata_terrain=trace".
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() {
    let args = Args::parse();
    strata_log::init_logging(None, cfg!(debug_assertions), args.log_filter.as_deref());

    let seed = parse_seed(&args.seed);
    let params = TerrainParams {
        seed: seed.value(),
        domain_size: args.domain_size,
        roughness: args
            .roughness
            .unwrap_or(args.domain_size as f64 / 500.0),
        cell_density: args.density,
        ..Default::default()
    };

    let engine = match TerrainEngine::new(params, &DecorSet::full()) {
        Ok(engine) => Arc::new(engine),
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    render_map(&engine, args.width, args.height, args.stride);

    if args.bench_regions > 0 {
        bench_regions(&engine, args.bench_regions);
    }
}

/// Numeric seeds pass through; anything else is hashed to a u64.
fn parse_seed(text: &str) -> Seed {
    match text.parse::<u64>() {
        Ok(numeric) => Seed::new(numeric),
        Err(_) => Seed::from(text),
    }
}

/// One glyph per biome. The match is exhaustive on purpose: adding a biome
/// without teaching the preview about it must not compile.
fn biome_glyph(biome: Biome) -> char {
    match biome {
        Biome::Ocean => '~',
        Biome::Beach => '.',
        Biome::Plains => '"',
        Biome::Forest => 'T',
        Biome::Taiga => 't',
        Biome::Tundra => '*',
        Biome::Desert => ':',
        Biome::Mountains => '^',
    }
}

fn render_map(engine: &TerrainEngine, width: i64, height: i64, stride: i64) {
    info!(
        "rendering {width}x{height} map at stride {stride} ({} x {} world units)",
        width * stride,
        height * stride
    );
    for row in 0..height {
        let mut line = String::with_capacity(width as usize);
        for col in 0..width {
            let x = (col - width / 2) * stride;
            let z = (row - height / 2) * stride;
            line.push(biome_glyph(engine.biome(x, z)));
        }
        println!("{line}");
    }
}

fn bench_regions(engine: &Arc<TerrainEngine>, edge: i64) {
    let sampler = RegionSampler::with_defaults(Arc::clone(engine));
    let started = std::time::Instant::now();

    let mut submitted = 0_u64;
    for x in 0..edge {
        for z in 0..edge {
            let task = RegionTask {
                region: RegionCoord { x, z },
                priority: (x * x + z * z) as u64,
            };
            if sampler.submit(task).is_ok() {
                submitted += 1;
            }
        }
    }

    let mut received = 0_u64;
    let mut sample_time_total = 0_u64;
    while received < submitted {
        for region in sampler.drain_results() {
            sample_time_total += region.sample_time_us;
            received += 1;
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    let elapsed = started.elapsed();
    info!(
        "sampled {received} regions ({} columns) in {:.1?}; mean {}us per region on workers",
        received * 256,
        elapsed,
        sample_time_total / received.max(1)
    );
}
