//! bogota: three commuter routes across Bogotá with rust_route.
//!
//! Plans a walk from home to Universidad Externado, a drive from there to
//! the Iberoamericana, and a drive back home.  Each route loads only the
//! road network within 5 km of the midpoint of its endpoints.
//!
//! Runs against the small CSV map in `data/` by default; pass `--pbf` with a
//! Bogotá OpenStreetMap extract (build with `--features osm`) for real
//! streets, or `--routes` to plan your own list.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use env_logger::{Env, Target};
use log::error;

use rt_core::{GeoPoint, TransitMode};
use rt_output::{CsvWriter, GeoJsonWriter, RouteOutputRenderer, RouteWriter};
use rt_route::{BatchSummary, RoutePlanner, RouteOutcome, RouteRequest, load_requests_csv};
use rt_spatial::{CsvMapSource, DEFAULT_BUFFER_KM, DijkstraRouter, GraphLoader, LoaderConfig, MapSource};

// ── Built-in routes ───────────────────────────────────────────────────────────

const HOME:      GeoPoint = GeoPoint { lat: 4.606979, lon: -74.073794 };
const EXTERNADO: GeoPoint = GeoPoint { lat: 4.595600, lon: -74.069014 };
const IBERO:     GeoPoint = GeoPoint { lat: 4.649893, lon: -74.057384 };

fn builtin_routes() -> Vec<RouteRequest> {
    vec![
        RouteRequest::new("Route 1: Home -> Externado on foot", TransitMode::Walk, HOME, EXTERNADO),
        RouteRequest::new("Route 2: Externado -> Iberoamericana by car", TransitMode::Drive, EXTERNADO, IBERO),
        RouteRequest::new("Route 3: Iberoamericana -> Home by car", TransitMode::Drive, IBERO, HOME),
    ]
}

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Csv,
    Geojson,
}

#[derive(Parser)]
#[command(name = "bogota")]
#[command(about = "Shortest-time routes over bounded OpenStreetMap road networks")]
struct Cli {
    /// Node CSV (`id,lat,lon`); defaults to the bundled sample map
    #[arg(long, requires = "edges", conflicts_with = "pbf")]
    nodes: Option<PathBuf>,

    /// Edge CSV (`from,to,length_m,highway,oneway`)
    #[arg(long, requires = "nodes", conflicts_with = "pbf")]
    edges: Option<PathBuf>,

    /// OpenStreetMap PBF extract (requires the `osm` feature)
    #[arg(long)]
    pbf: Option<PathBuf>,

    /// Route list CSV; defaults to the three built-in Bogotá routes
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Keep every intermediate node instead of merging degree-2 chains
    #[arg(long)]
    no_simplify: bool,

    /// Keep all connected components, not just the largest
    #[arg(long)]
    retain_all: bool,

    /// Re-read the map data for every route
    #[arg(long)]
    no_cache: bool,
}

impl Cli {
    fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            use_cache:  !self.no_cache,
            simplify:   !self.no_simplify,
            retain_all: self.retain_all,
        }
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    println!("=== bogota: rust_route ===");

    let requests = match &cli.routes {
        Some(path) => load_requests_csv(path)
            .with_context(|| format!("reading route list {}", path.display()))?,
        None => builtin_routes(),
    };
    println!("Routes: {}  |  Default buffer: {DEFAULT_BUFFER_KM} km", requests.len());

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;

    let config = cli.loader_config();

    if let Some(pbf) = &cli.pbf {
        return run_pbf(pbf, config, &requests, &cli);
    }

    let source = match (&cli.nodes, &cli.edges) {
        (Some(nodes), Some(edges)) => CsvMapSource::new(nodes, edges),
        _ => CsvMapSource::from_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("data")),
    };
    plan_all(source, config, &requests, &cli)
}

#[cfg(feature = "osm")]
fn run_pbf(pbf: &Path, config: LoaderConfig, requests: &[RouteRequest], cli: &Cli) -> Result<()> {
    plan_all(rt_spatial::PbfMapSource::new(pbf), config, requests, cli)
}

#[cfg(not(feature = "osm"))]
fn run_pbf(pbf: &Path, _: LoaderConfig, _: &[RouteRequest], _: &Cli) -> Result<()> {
    bail!("cannot read {}: rebuild with `--features osm` for PBF support", pbf.display())
}

fn plan_all<S: MapSource>(
    source: S,
    config: LoaderConfig,
    requests: &[RouteRequest],
    cli: &Cli,
) -> Result<()> {
    println!("Map source: {}", source.name());
    let planner = RoutePlanner::new(GraphLoader::new(source, config), DijkstraRouter);

    let t0 = Instant::now();
    let summary = match cli.format {
        Format::Csv => render(&planner, requests, CsvWriter::new(&cli.out)?)?,
        Format::Geojson => render(&planner, requests, GeoJsonWriter::new(&cli.out))?,
    };
    let elapsed = t0.elapsed();

    println!();
    for outcome in &summary.outcomes {
        match outcome {
            RouteOutcome::Found(r) => println!(
                "  {:<50} {:>3} nodes  {:>8.0} m  {:>7.1} min",
                r.label,
                r.route.nodes.len(),
                r.length_m,
                r.total_minutes()
            ),
            other => println!(
                "  {:<50} skipped: {}",
                other.label(),
                other.skip_reason().unwrap_or_default()
            ),
        }
    }
    println!();
    println!(
        "{} found, {} without path, {} failed in {:.2}s",
        summary.found(),
        summary.no_path(),
        summary.failed(),
        elapsed.as_secs_f64()
    );
    println!("Output written to {}", cli.out.display());
    Ok(())
}

fn render<S: MapSource, W: RouteWriter>(
    planner: &RoutePlanner<S, DijkstraRouter>,
    requests: &[RouteRequest],
    writer: W,
) -> Result<BatchSummary> {
    let mut renderer = RouteOutputRenderer::new(writer);
    let summary = planner.run_batch(requests, &mut renderer);
    if let Some(e) = renderer.take_error() {
        bail!("output error: {e}");
    }
    Ok(summary)
}
