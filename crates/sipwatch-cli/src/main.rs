//! CLI for sipwatch — a SIP/VoIP security operations dashboard in your terminal.

mod commands;
mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sipwatch")]
#[command(about = "sipwatch — SIP/VoIP security operations dashboard on synthetic telemetry")]
#[command(version = sipwatch_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard: overview, live calls, analytics, alerts, network map
    Monitor {
        /// Refresh interval in milliseconds
        #[arg(
            long,
            env = "SIPWATCH_INTERVAL_MS",
            default_value_t = 5000,
            allow_negative_numbers = true
        )]
        interval_ms: i64,

        /// Seed the telemetry generator for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print one JSON line per published snapshot (the initial one included)
    Stream {
        /// Refresh interval in milliseconds
        #[arg(
            long,
            env = "SIPWATCH_INTERVAL_MS",
            default_value_t = 5000,
            allow_negative_numbers = true
        )]
        interval_ms: i64,

        /// Seed the telemetry generator for a reproducible stream
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many lines (0 = until Ctrl-C)
        #[arg(long, default_value_t = 0)]
        count: u64,
    },

    /// Generate a single snapshot and print it as JSON
    Snapshot {
        /// Seed the telemetry generator
        #[arg(long)]
        seed: Option<u64>,

        /// Write the snapshot to this path instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Print the static network topology (nodes and links) as JSON
    Topology,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor { interval_ms, seed } => commands::monitor::run(interval_ms, seed),
        Commands::Stream {
            interval_ms,
            seed,
            count,
        } => commands::stream::run(interval_ms, seed, count),
        Commands::Snapshot { seed, output } => commands::snapshot::run(seed, output.as_deref()),
        Commands::Topology => commands::topology::run(),
    }
}
