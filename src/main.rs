use anyhow::Result;
use cinerec::utils::validation::sanitize_string;
use cinerec::{configure_threads, init_tracing, AppState, Config, RecommendationItem};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Overrides the catalog path from the configuration.
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Movies with similar genres, cast, director and plot.
    Content {
        #[arg(short, long)]
        movie: i64,
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Movies liked by users who rate like this user.
    Collaborative {
        #[arg(short, long)]
        user: i64,
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Collaborative results, topped up with movies similar to `--movie`.
    Hybrid {
        #[arg(short, long)]
        user: i64,
        #[arg(short, long)]
        movie: Option<i64>,
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Catalog and index sizes.
    Stats,
}

fn print_items(items: &[RecommendationItem], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No recommendations available.");
    }
    for item in items {
        println!(
            "- {} (ID: {}) score {:.4}",
            sanitize_string(&item.movie.title, 120),
            item.movie.id,
            item.score
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", &args.log_level);
    }
    init_tracing();

    let mut config = Config::load_or_default(&args.config)?;
    if let Some(catalog) = args.catalog {
        config.catalog.path = catalog;
    }
    configure_threads(config.compute.threads);

    let state = AppState::new(config).await?;
    info!("Configuration loaded: {:?}", state.config);
    let service = &state.recommendation_service;

    match args.command {
        Command::Content { movie, count } => {
            print_items(&service.content_based(movie, count), args.json)?;
        }
        Command::Collaborative { user, count } => {
            print_items(&service.collaborative(user, count), args.json)?;
        }
        Command::Hybrid { user, movie, count } => {
            print_items(&service.hybrid(user, movie, count), args.json)?;
        }
        Command::Stats => {
            let stats = service.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("movies:      {}", stats.movies);
                println!("users:       {}", stats.users);
                println!("ratings:     {}", stats.ratings);
                println!("terms:       {}", stats.vocabulary_size);
                println!("rated cells: {}", stats.rated_cells);
            }
        }
    }

    Ok(())
}
