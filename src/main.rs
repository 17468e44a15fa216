use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trackboard::dataset::DEFAULT_DATA_PATH;
use trackboard::filter::UnknownExplicit;
use trackboard::serve::ServeConfig;
use trackboard::{report, view, DatasetCache, ExplicitFilter, FilterSelection};

#[derive(Parser, Debug)]
#[command(name = "trackboard")]
#[command(author, version, about = "Interactive dashboard over a CSV of music-track metadata")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Track dataset (CSV)
    #[arg(long, global = true, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive dashboard (default)
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8501)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Don't open a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Render one filter selection to an .html or .json file
    Snapshot {
        /// Output file (default: trackboard-reports/snapshot_<timestamp>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only these artists (repeatable)
        #[arg(long)]
        artist: Vec<String>,

        /// Keep only these album types (repeatable)
        #[arg(long)]
        album_type: Vec<String>,

        /// Explicit content: All, True or False
        #[arg(long, default_value = "All", value_parser = parse_explicit)]
        explicit: ExplicitFilter,
    },
}

// Reject typos instead of falling back to All
fn parse_explicit(value: &str) -> Result<ExplicitFilter, UnknownExplicit> {
    value.parse()
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let cache = DatasetCache::new(&args.data);

    match args.command.unwrap_or(Command::Serve {
        port: ServeConfig::default().port,
        host: ServeConfig::default().host,
        no_open: false,
    }) {
        Command::Serve { port, host, no_open } => {
            let config = ServeConfig {
                host,
                port,
                open_browser: !no_open,
            };
            trackboard::serve::start(cache, &config)
                .with_context(|| format!("dashboard could not start with {}", args.data.display()))
        }

        Command::Snapshot {
            output,
            artist,
            album_type,
            explicit,
        } => {
            let dataset = cache
                .get()
                .with_context(|| format!("cannot load {}", args.data.display()))?;

            let selection = FilterSelection::new()
                .with_artists(artist)
                .with_album_types(album_type)
                .with_explicit(explicit);

            let output = match output {
                Some(path) => path,
                None => {
                    let dir = PathBuf::from("trackboard-reports");
                    std::fs::create_dir_all(&dir)
                        .with_context(|| format!("cannot create {}", dir.display()))?;
                    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
                    dir.join(format!("snapshot_{}.html", timestamp))
                }
            };

            let vm = view::render(&dataset, &selection);
            report::generate(&output, &vm)
                .with_context(|| format!("cannot write {}", output.display()))?;

            info!(
                path = %output.display(),
                tracks = vm.summary.count,
                "snapshot written"
            );
            eprintln!("\x1b[32mSnapshot saved: {}\x1b[0m", output.display());
            Ok(())
        }
    }
}
