use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli_style;
use cli_style::get_styles;

use pezzottify_recommender::config::{self, AppConfig};
use pezzottify_recommender::dataset::Datasets;
use pezzottify_recommender::pipeline::{run_build, BuildManifest};
use pezzottify_recommender::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};
use pezzottify_recommender::Strategy;

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

fn parse_dir(s: &str) -> Result<PathBuf, String> {
    let path = parse_path(s)?;
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", s));
    }
    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", s));
    }
    Ok(path)
}

#[derive(Parser, Debug)]
#[command(styles=get_styles(), version, about = "Content based and collaborative song recommendations")]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, global = true, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog, the feature matrix and the built artifacts.
    /// Can also be specified in config file.
    #[clap(long, global = true, value_parser = parse_dir)]
    pub data_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, global = true, default_value_t = 3002)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, global = true, default_value_t = 9092)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, global = true, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Number of recommendations returned when a request doesn't ask for a specific amount.
    #[clap(long, global = true)]
    pub default_k: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Builds the interaction matrix and the filtered catalog from the listening history.
    Build {
        /// Number of shards the listening history is aggregated in.
        /// Defaults to the number of worker threads.
        #[clap(long)]
        shards: Option<usize>,
    },

    /// Prints the songs most similar to the given one.
    Recommend {
        #[clap(short, long, value_enum, default_value = "content")]
        strategy: Strategy,

        /// Song name, case insensitive.
        #[clap(long)]
        song: String,

        /// Artist name, case insensitive.
        #[clap(long)]
        artist: String,

        /// Number of recommendations, on top of the queried song.
        #[clap(short)]
        k: Option<usize>,
    },

    /// Loads every available dataset and verifies it is consistent.
    Check,

    /// Serves recommendations over HTTP.
    Serve,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        let build_shards = match args.command {
            Command::Build { shards } => shards,
            _ => None,
        };
        config::CliConfig {
            data_dir: args.data_dir.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            default_k: args.default_k,
            build_shards,
        }
    }
}

fn build(config: &AppConfig) -> Result<ExitCode> {
    let manifest = run_build(config)?;

    cli_style::print_section_header("Build");
    print_manifest(&manifest);
    cli_style::print_section_footer();
    cli_style::print_success(&format!("Artifacts written to {:?}", config.data_dir));
    Ok(ExitCode::SUCCESS)
}

fn recommend(
    config: &AppConfig,
    strategy: Strategy,
    song: &str,
    artist: &str,
    k: Option<usize>,
) -> Result<ExitCode> {
    let datasets = Datasets::load_strategies(config, &[strategy])?;
    let k = k.unwrap_or(config.default_k);

    let songs = match datasets.recommend(strategy, song, artist, k) {
        Ok(songs) => songs,
        Err(err) => {
            cli_style::print_error(&err.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };

    cli_style::print_section_header(&format!("{} recommendations", strategy));
    let mut songs = songs.into_iter();
    if let Some(now_playing) = songs.next() {
        cli_style::print_now_playing(
            &now_playing.song.name,
            &now_playing.song.artist,
            now_playing.song.spotify_preview_url.as_deref(),
        );
    }
    println!();
    let mut any = false;
    for (rank, scored) in songs.enumerate() {
        any = true;
        cli_style::print_ranked_song(
            rank + 1,
            &scored.song.name,
            &scored.song.artist,
            scored.similarity,
        );
    }
    if !any {
        cli_style::print_empty_list("No other songs to recommend");
    }
    cli_style::print_section_footer();
    Ok(ExitCode::SUCCESS)
}

fn check(config: &AppConfig) -> Result<ExitCode> {
    let datasets = Datasets::load(config)?;

    if let Some(content) = &datasets.content {
        cli_style::print_section_header("Content dataset");
        cli_style::print_key_value("Catalog rows", &content.catalog().len().to_string());
        cli_style::print_key_value(
            "Feature matrix",
            &format!(
                "{}x{}, {} stored values",
                content.features().rows(),
                content.features().cols(),
                content.features().nnz()
            ),
        );
        cli_style::print_section_footer();
    }

    if let Some(collaborative) = &datasets.collaborative {
        let interactions = collaborative.interactions();
        cli_style::print_section_header("Collaborative dataset");
        cli_style::print_key_value(
            "Filtered catalog rows",
            &collaborative.catalog().len().to_string(),
        );
        cli_style::print_key_value(
            "Interaction matrix",
            &format!(
                "{} tracks x {} users, {} cells",
                interactions.rows(),
                interactions.users(),
                interactions.nnz()
            ),
        );
        if let Ok(manifest) = BuildManifest::load(config.build_manifest_path()) {
            print_manifest(&manifest);
        }
        cli_style::print_section_footer();
    }

    if datasets.strategies().is_empty() {
        cli_style::print_warning(&format!("No dataset found in {:?}", config.data_dir));
        return Ok(ExitCode::FAILURE);
    }
    cli_style::print_success("All loaded datasets are consistent");
    Ok(ExitCode::SUCCESS)
}

fn print_manifest(manifest: &BuildManifest) {
    cli_style::print_key_value("Built at", &manifest.built_at.to_rfc3339());
    cli_style::print_key_value("Listening events", &manifest.events.to_string());
    cli_style::print_key_value(
        "Tracks x users",
        &format!("{} x {}", manifest.tracks, manifest.users),
    );
    cli_style::print_key_value("Stored cells", &manifest.stored_cells.to_string());
    cli_style::print_key_value("Total playcount", &manifest.total_playcount.to_string());
    cli_style::print_key_value(
        "Filtered catalog rows",
        &manifest.filtered_catalog_rows.to_string(),
    );
}

async fn serve(config: &AppConfig) -> Result<ExitCode> {
    info!("Initializing metrics...");
    metrics::init_metrics();

    let datasets = Datasets::load(config)?;
    if datasets.strategies().is_empty() {
        anyhow::bail!("No dataset to serve in {:?}", config.data_dir);
    }
    run_server(ServerConfig::from(config), Arc::new(datasets)).await?;
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = AppConfig::resolve(&cli_config, file_config)?;
    info!("Using data directory {:?}", app_config.data_dir);

    match cli_args.command {
        Command::Build { .. } => build(&app_config),
        Command::Recommend {
            strategy,
            song,
            artist,
            k,
        } => recommend(&app_config, strategy, &song, &artist, k),
        Command::Check => check(&app_config),
        Command::Serve => serve(&app_config).await,
    }
}
