use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use city_graph::storage::EdgeStore;
use city_graph::{export, logging, server, Config, RouteGraph, StoreConfig};

#[derive(Parser)]
#[command(name = "city-graph", version, about = "Reachability and shortest routes over a city's place graph")]
struct Cli {
    /// Configuration file (TOML). Missing file means defaults.
    #[arg(short, long, default_value = "city-graph.toml", global = true)]
    config: PathBuf,

    /// Edge list JSON file; overrides the configured store.
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `city_graph=debug,info`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP route service
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// List every place in index order
    Places,
    /// Check whether DESTINATION is reachable from ORIGIN
    Connectivity { origin: String, destination: String },
    /// Shortest route from ORIGIN to DESTINATION
    Route { origin: String, destination: String },
    /// Export the edge list as JSON, or the matrices as a text report
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        matrices: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(cli).await;
    logging::shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> city_graph::Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;
    if let Some(path) = cli.data {
        config.store = StoreConfig::Json { path };
    }
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    logging::init(&config.log)?;

    let store = config.store.open();

    // the raw edge dump needs only the store, so it still works on data the
    // loader rejects
    if let Command::Export { output, matrices: false } = &cli.command {
        let mut writer = open_output(output.as_deref())?;
        let count = export::export_edges_json(&store, &mut writer).await?;
        writer.flush()?;
        tracing::info!(records = count, "exported edge list");
        return store.shutdown().await;
    }

    let graph = Arc::new(RouteGraph::open(store).await?);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(Arc::clone(&graph), &config.server).await?;
        }
        Command::Places => {
            for (i, place) in graph.places().iter().enumerate() {
                println!("{i:>4}  {place}");
            }
        }
        Command::Connectivity { origin, destination } => {
            let link = graph.connectivity(&origin, &destination)?;
            println!(
                "{origin} -> {destination}: {} ({})",
                if link.connected { "connected" } else { "not connected" },
                if link.direct_edge { "direct edge" } else { "no direct edge" },
            );
        }
        Command::Route { origin, destination } => {
            let route = graph.require_route(&origin, &destination)?;
            println!("{route}");
        }
        Command::Export { output, .. } => {
            let mut writer = open_output(output.as_deref())?;
            export::write_matrix_report(&graph.snapshot(), &mut writer)?;
            writer.flush()?;
        }
    }

    graph.store().shutdown().await
}

fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}
