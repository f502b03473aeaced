use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wdi_query::{Action, Engine, EngineConfig, Query, Response};

#[derive(Parser, Debug)]
#[command(
    name = "wdiq",
    version,
    about = "Answer indicator queries against a World Bank WDI CSV table"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one router action (e.g. gini, pib-year, unemp-avg) and print the result as JSON.
    Query(QueryArgs),
    /// Run a JSON-encoded query ({"indicator":"gini","mode":"latest","country":"ESP"}).
    Request(RequestArgs),
    /// List every supported action name.
    Actions,
}

#[derive(Args, Debug)]
struct Source {
    /// Datafile for the WDI family (uses the default table layout).
    #[arg(long, conflicts_with = "config")]
    data: Option<PathBuf>,
    /// JSON engine configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Action name, <indicator>[-year|-avg|-count|-max|-min]
    #[arg(short, long)]
    action: String,
    /// Country code as it appears in the first column (e.g. ESP)
    #[arg(short, long)]
    country: Option<String>,
    /// Year (YYYY)
    #[arg(short, long)]
    year: Option<String>,
    #[command(flatten)]
    source: Source,
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Query as JSON
    request: String,
    #[command(flatten)]
    source: Source,
}

fn load_engine(source: &Source) -> Result<Engine> {
    let config = match (&source.data, &source.config) {
        (Some(data), _) => EngineConfig::single(data),
        (None, Some(path)) => EngineConfig::from_path(path)?,
        (None, None) => anyhow::bail!("either --data or --config is required"),
    };
    Engine::new(config)
}

fn print_response(r: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&r)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Query(args) => cmd_query(args),
        Command::Request(args) => cmd_request(args),
        Command::Actions => {
            for a in Action::all() {
                println!("{}\t{}", a, a.indicator.entry().name);
            }
            Ok(())
        }
    }
}

fn cmd_query(args: QueryArgs) -> Result<()> {
    let action: Action = args.action.parse()?;
    let engine = load_engine(&args.source)?;
    let result = engine.run_action(action, args.country.as_deref(), args.year.as_deref());
    if let Err(e) = &result {
        log::warn!("{action}: {e}");
    }
    print_response(Response::from(result))
}

fn cmd_request(args: RequestArgs) -> Result<()> {
    let query: Query = serde_json::from_str(&args.request).context("parse request")?;
    let engine = load_engine(&args.source)?;
    print_response(engine.respond(&query))
}
