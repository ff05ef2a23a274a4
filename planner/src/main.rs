use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use canvas::endpoint::planner::{Order, PlannableType, PlannerFilter, PlannerQuery};
use clap::{ArgAction, Parser};
use failure::Error;
use tracing::{debug, error, warn};
use tracing_subscriber::EnvFilter;

use planner::backend::instructure::Canvas;
use planner::{Config, ErrorKind, TypeFilter, DEFAULT_BASE_URL, DEFAULT_COUNT};

/// Prints the titles of your upcoming Canvas planner items.
#[derive(Parser, Debug)]
#[command(name = "planner", version)]
struct Cli {
    /// How many items to print
    #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    count: usize,

    /// Comma separated plannable types to keep, e.g. assignment,quiz
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values_t = [PlannableType::Assignment, PlannableType::Quiz]
    )]
    types: Vec<PlannableType>,

    /// Items requested per page
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
    per_page: u32,

    /// Sort order, asc or desc
    #[arg(long, default_value = "desc")]
    order: Order,

    /// Only items on or after this date (ISO 8601)
    #[arg(long)]
    start_date: Option<String>,

    /// Only items before this date (ISO 8601)
    #[arg(long)]
    end_date: Option<String>,

    /// new_activity, incomplete_items or complete_items
    #[arg(long)]
    filter: Option<PlannerFilter>,

    /// Canvas instance to talk to
    #[arg(long, env = "CANVAS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Canvas API access token
    #[arg(long, env = "CANVAS_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Log more, repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    // Read before parsing so .env values can back the `env` arguments.
    let dotenv = dotenv::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli, dotenv) {
        error!("{}", e);
        for cause in e.iter_causes() {
            error!("caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli, dotenv: Result<PathBuf, dotenv::Error>) -> Result<(), Error> {
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(dotenv::Error::Io(ref e)) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no .env file")
        }
        Err(e) => return Err(ErrorKind::DotEnv(e.to_string()).into()),
    }

    let query = PlannerQuery {
        start_date: cli.start_date,
        end_date: cli.end_date,
        filter: cli.filter,
        order: cli.order,
        per_page: cli.per_page,
    };
    let cfg = Config::new(
        &cli.base_url,
        cli.access_token.as_deref(),
        query,
        TypeFilter::new(cli.types),
        cli.count,
    )?;

    let backend = Canvas::new(cfg.canvas.clone(), cfg.query.clone())?;
    let plannables = planner::collect(&backend, &cfg.types, cfg.count)?;
    if plannables.len() < cfg.count {
        warn!(
            found = plannables.len(),
            wanted = cfg.count,
            "Canvas returned fewer matching items than requested"
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for plannable in &plannables {
        writeln!(out, "{}", plannable.plannable.title)?;
    }
    out.flush()?;

    Ok(())
}
