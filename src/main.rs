use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// Runs a LudusScript file and prints the objects it emits as JSON.
#[derive(Parser, Debug)]
#[command(name = "ludus", version, about, long_about = None)]
struct Args {
    /// Script to run. Starts an interactive session when omitted
    script: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Write the JSON to FILE instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

/// Logging is off unless RUST_LOG is set.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn compile(path: &Path, pretty: bool) -> Result<String> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Cannot open {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "read script");

    let records = ludus::run(&source)?;
    Ok(ludus::json::to_json(&records, pretty)?)
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let path = match &args.script {
        Some(path) => path,
        None => {
            println!("LudusScript interactive session. Press Ctrl-D to leave.");
            if let Err(err) = ludus::repl::start(io::stdin().lock(), io::stdout()) {
                eprintln!("Error: {}", err);
                process::exit(1);
            }
            return;
        }
    };

    let json = match compile(path, args.pretty) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    };

    match &args.output {
        Some(file) => {
            if let Err(err) = fs::write(file, format!("{}\n", json)) {
                eprintln!("Error: cannot write {}: {}", file.display(), err);
                process::exit(3);
            }
            println!("Output saved to {}", file.display());
        }
        None => println!("{}", json),
    }
}
