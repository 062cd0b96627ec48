//! dinerec - Smart Restaurant Recommender CLI
//!
//! Usage:
//!   dinerec home                          # Welcome page
//!   dinerec options --city Bangalore      # Cascading filter options
//!   dinerec recommend --city Bangalore --cuisine Pizzas \
//!       --rating 4.2 --rating-count 120 --cost 400 --method cosine
//!   dinerec browse                        # Interactive menus
//!   dinerec check                         # Validate artifacts

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;
mod output;

use commands::{browse, check, home, options, recommend, Settings};
use dinerec::config::DinerecConfig;
use dinerec::filter::FilterState;
use dinerec::metrics::DistanceMethod;
use error::Result;

/// dinerec - Smart Restaurant Recommender
///
/// Filter restaurants by city, cuisine, rating, rating count and cost, then
/// get the most similar restaurants from the pre-trained PCA and k-means
/// models.
#[derive(Parser)]
#[command(name = "dinerec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding the archive and model artifacts
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode (results and errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Filter choices, top of the cascade first
#[derive(Args)]
struct FilterArgs {
    /// City
    #[arg(long)]
    city: Option<String>,

    /// Cuisine
    #[arg(long)]
    cuisine: Option<String>,

    /// Rating
    #[arg(long)]
    rating: Option<f64>,

    /// Rating count
    #[arg(long)]
    rating_count: Option<f64>,

    /// Cost
    #[arg(long)]
    cost: Option<f64>,
}

impl FilterArgs {
    fn into_state(self) -> FilterState {
        FilterState {
            city: self.city,
            cuisine: self.cuisine,
            rating: self.rating,
            rating_count: self.rating_count,
            cost: self.cost,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Welcome page
    Home,

    /// Show the filter options down to the first unchosen level
    Options {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Recommend restaurants similar to a full selection
    Recommend {
        /// City
        #[arg(long)]
        city: String,

        /// Cuisine
        #[arg(long)]
        cuisine: String,

        /// Rating
        #[arg(long)]
        rating: f64,

        /// Rating count
        #[arg(long)]
        rating_count: f64,

        /// Cost
        #[arg(long)]
        cost: f64,

        /// Distance method: euclidean or cosine
        #[arg(long, default_value = "euclidean")]
        method: DistanceMethod,

        /// Number of restaurants to show
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Pick filters from numbered menus
    Browse {
        /// Number of restaurants to show
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Load every artifact and report shapes
    Check,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn settings(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => DinerecConfig::from_path(path)?,
        None => DinerecConfig::default(),
    };
    let mut artifacts = file.artifacts;
    if let Some(dir) = &cli.data_dir {
        artifacts.data_dir = dir.clone();
    }
    Ok(Settings {
        artifacts,
        recommender: file.recommender,
        json: cli.json,
        quiet: cli.quiet,
    })
}

fn with_top_k(mut settings: Settings, top_k: Option<usize>) -> Result<Settings> {
    if let Some(k) = top_k {
        settings.recommender = settings.recommender.with_top_k(k);
        settings.recommender.validate()?;
    }
    Ok(settings)
}

fn dispatch(command: Commands, settings: Settings) -> Result<()> {
    match command {
        Commands::Home => home::run(&settings),

        Commands::Options { filters } => options::run(&settings, &filters.into_state()),

        Commands::Recommend {
            city,
            cuisine,
            rating,
            rating_count,
            cost,
            method,
            top_k,
        } => {
            let state = FilterState::new()
                .with_city(city)
                .with_cuisine(cuisine)
                .with_rating(rating)
                .with_rating_count(rating_count)
                .with_cost(cost);
            recommend::run(&with_top_k(settings, top_k)?, &state, method)
        }

        Commands::Browse { top_k } => browse::run(&with_top_k(settings, top_k)?),

        Commands::Check => check::run(&settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match settings(&cli) {
        Ok(settings) => dispatch(cli.command, settings),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_warning() => {
            output::warning(&e.to_string());
            e.exit_code()
        }
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
