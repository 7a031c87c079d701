use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdg4_deep_dive::config::Settings;
use sdg4_deep_dive::contract::{self, ContractError};
use sdg4_deep_dive::map::{self, FeatureCollection, MapEvent, MapScene, MapState};
use sdg4_deep_dive::models::DeepDiveBundle;
use sdg4_deep_dive::noise::{NoiseSource, UniformNoise, ZeroNoise};
use sdg4_deep_dive::{catalog, chart, export, generator, report};

#[derive(Parser)]
#[command(name = "sdg4-deep-dive")]
#[command(about = "Data layer for the SDG 4 Quality Education campaign site", long_about = None)]
struct Cli {
    /// TOML file with generator settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the simulated fetch latency
    #[arg(long, global = true)]
    delay_ms: Option<u64>,
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a deep dive bundle as JSON
    #[command(group(
        ArgGroup::new("jitter")
            .args(["seed", "no_noise"])
            .multiple(false)
    ))]
    Generate {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        no_noise: bool,
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        compact: bool,
    },
    /// Print what each chart renders for a bundle, as JSON
    Charts {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Look up a live SDG indicator
    Indicator {
        #[arg(long)]
        id: String,
    },
    /// Check a bundle against the chart view contract
    Validate {
        /// JSON bundle; a fresh one is generated when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Write a markdown report of the bundle
    Report {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Export each dataset as CSV
    Export {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Render the campaign map as SVG
    Map {
        /// World GeoJSON feature collection
        #[arg(long)]
        world: Option<PathBuf>,
        /// Regional GeoJSON shown when zoomed in
        #[arg(long)]
        region: Option<PathBuf>,
        #[arg(long)]
        zoomed: bool,
        /// Country name under the pointer
        #[arg(long)]
        hover: Option<String>,
        #[arg(long, default_value_t = 960.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List campaign projects
    Projects,
    /// Show one project
    Project {
        #[arg(long)]
        slug: String,
    },
    /// List SDG goals with their 2030 projection
    Goals,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn noise_source(seed: Option<u64>, no_noise: bool) -> Box<dyn NoiseSource> {
    match (no_noise, seed) {
        (true, _) => Box::new(ZeroNoise),
        (false, Some(seed)) => Box::new(UniformNoise::seeded(seed)),
        (false, None) => Box::new(UniformNoise::from_entropy()),
    }
}

async fn fetch_bundle(settings: &Settings, seed: Option<u64>, no_noise: bool) -> DeepDiveBundle {
    let mut noise = noise_source(seed.or(settings.seed), no_noise);
    generator::fetch_deep_dive_bundle(&settings.trends, &mut noise, settings.delay()).await
}

fn write_output(out: Option<&Path>, body: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Written to {}.", path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn read_geojson(path: Option<&Path>) -> anyhow::Result<Option<FeatureCollection>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let collection = FeatureCollection::from_json(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(collection))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        settings.delay_ms = delay_ms;
    }

    match cli.command {
        Commands::Generate {
            seed,
            no_noise,
            out,
            compact,
        } => {
            let bundle = fetch_bundle(&settings, seed, no_noise).await;
            let json = if compact {
                serde_json::to_string(&bundle)?
            } else {
                serde_json::to_string_pretty(&bundle)?
            };
            write_output(out.as_deref(), &json)?;
        }
        Commands::Charts { seed } => {
            let bundle = fetch_bundle(&settings, seed, false).await;
            let view = chart::ChartViewModel::from_bundle(&bundle);
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Indicator { id } => {
            let data = generator::fetch_indicator_data(&id).await;
            if data.data.is_empty() && data.trends.is_empty() {
                println!("No live data for indicator {id}.");
            } else {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
        }
        Commands::Validate { input } => {
            let result = match &input {
                Some(path) => {
                    let raw = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    contract::load_bundle(&raw, &settings.trends).map(|_| ())
                }
                None => {
                    let bundle = fetch_bundle(&settings, None, false).await;
                    contract::validate_bundle(&bundle, &settings.trends)
                        .map_err(ContractError::from)
                }
            };

            match result {
                Ok(()) => println!("Bundle satisfies the chart contract."),
                Err(ContractError::Violations(report)) => {
                    println!("{report}");
                    anyhow::bail!("bundle failed validation");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::Report { seed, out } => {
            let bundle = fetch_bundle(&settings, seed, false).await;
            let report = report::build_report(&bundle, chrono::Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { dir, seed } => {
            let bundle = fetch_bundle(&settings, seed, false).await;
            let files = export::export_bundle(&dir, &bundle)?;
            println!("Exported {} files to {}.", files.len(), dir.display());
        }
        Commands::Map {
            world,
            region,
            zoomed,
            hover,
            width,
            height,
            out,
        } => {
            let scene = MapScene {
                width,
                height,
                world: read_geojson(world.as_deref())?,
                region: read_geojson(region.as_deref())?,
            };
            let mut state = MapState::default().apply(MapEvent::SetZoom(zoomed));
            if let Some(name) = hover {
                state = state.apply(MapEvent::Hover(name));
            }
            if let Some(tip) = map::hover_tip(&state) {
                eprintln!("{tip}");
            }
            let svg = map::render_svg(&scene, &state).context("failed to render map")?;
            write_output(out.as_deref(), &svg)?;
        }
        Commands::Projects => {
            for (index, project) in catalog::PROJECTS.iter().enumerate() {
                println!(
                    "{}. {} ({}, {}) [{}]",
                    index + 1,
                    project.title,
                    project.location,
                    project.year,
                    project.slug
                );
            }
        }
        Commands::Project { slug } => {
            let project = catalog::project_by_slug(&slug)
                .with_context(|| format!("no project with slug {slug}"))?;
            println!("{} ({})", project.title, project.year);
            println!("{}", project.location);
            println!();
            println!("{}", project.description);
            println!();
            println!("Problem: {}", project.full_description.problem);
            println!("Solution: {}", project.full_description.solution);
            println!("Impact: {}", project.full_description.impact);
            for metric in project.impact_metrics {
                println!("- {metric}");
            }
        }
        Commands::Goals => {
            for goal in catalog::SDG_GOALS {
                println!(
                    "Goal {:>2} {:<24} {:>3}% {}",
                    goal.id,
                    goal.title,
                    goal.progress,
                    "#".repeat(usize::from(goal.progress) / 5)
                );
            }
            println!(
                "Average 2030 projection: {}",
                chart::to_percent(catalog::average_progress())
            );
        }
    }

    Ok(())
}
