//! tegenome CLI - replay transposable element scripts on a circular genome.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use tegenome::simulation::{compare_backends, Replay, ReplayScript, Snapshot};
use tegenome::Backend;

/// tegenome - circular genome with transposable elements
#[derive(Parser, Debug)]
#[command(name = "tegenome")]
#[command(author, version, about = "Replays transposable element operations on a circular genome", long_about = None)]
struct Cli {
    /// Log more detail (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON script and print the genome after every operation
    Run {
        /// Script file
        script: PathBuf,

        /// Override the backend named in the script
        #[arg(short, long, value_enum)]
        backend: Option<Backend>,

        /// Emit one JSON snapshot per line instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay the built-in demonstration scenario
    Demo {
        #[arg(short, long, value_enum, default_value_t = Backend::Array)]
        backend: Backend,

        /// Emit one JSON snapshot per line instead of text
        #[arg(long)]
        json: bool,

        /// Print the scenario as a JSON script instead of running it
        #[arg(long)]
        print_script: bool,
    },

    /// Replay a script on both backends and check that they agree
    Compare {
        /// Script file
        script: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            script,
            backend,
            json,
        } => {
            let mut script = load_script(&script)?;
            if let Some(backend) = backend {
                script = script.with_backend(backend);
            }
            replay(&script, json)?;
        }
        Commands::Demo {
            backend,
            json,
            print_script,
        } => {
            let script = ReplayScript::demo(backend);
            if print_script {
                println!("{}", script.to_json_string()?);
            } else {
                replay(&script, json)?;
            }
        }
        Commands::Compare { script } => {
            let script = load_script(&script)?;
            match compare_backends(&script).context("Replay failed")? {
                None => println!(
                    "Backends agree on all {} steps",
                    script.operations.len() + 1
                ),
                Some(divergence) => {
                    println!("array : {}", format_snapshot(&divergence.array));
                    println!("linked: {}", format_snapshot(&divergence.linked));
                    anyhow::bail!("Backends diverge at step {}", divergence.step);
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_script(path: &Path) -> Result<ReplayScript> {
    ReplayScript::from_file(path)
        .with_context(|| format!("Failed to load script {}", path.display()))
}

fn replay(script: &ReplayScript, json: bool) -> Result<()> {
    let snapshots = Replay::new(script).run().context("Replay failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for snapshot in &snapshots {
        if json {
            writeln!(out, "{}", serde_json::to_string(snapshot)?)?;
        } else {
            writeln!(out, "{}", format_snapshot(snapshot))?;
        }
    }
    Ok(())
}

fn format_snapshot(snapshot: &Snapshot) -> String {
    let operation = snapshot
        .operation
        .map(|op| op.to_string())
        .unwrap_or_else(|| "initial".to_string());
    let active: Vec<String> = snapshot.active.iter().map(|id| id.to_string()).collect();
    format!(
        "{:>3}  {:<18} {}  [{}]",
        snapshot.step,
        operation,
        snapshot.rendered,
        active.join(", ")
    )
}
