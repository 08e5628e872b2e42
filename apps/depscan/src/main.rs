use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dashmap::DashMap;
use depscan_build_order::Config;
use log::{debug, info};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "depscan")]
#[command(about = "Comment-aware import scanning and build ordering for JavaScript", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the live imports of a single file
    Imports(ImportsArgs),
    /// Compute the build order of every entry file
    Order(Config),
}

#[derive(Debug, Args)]
struct ImportsArgs {
    /// Source file to scan
    file: PathBuf,

    /// Print the imports as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Imports(args) => {
            let cache = DashMap::new();
            let edges = depscan_build_order::imports_for(&args.file, &cache)?;
            debug!("Found {} imports in {}", edges.len(), args.file.display());

            if args.json {
                depscan_build_order::print_json(&mut stdout, &edges, true)?;
            } else {
                depscan_build_order::print_imports(&mut stdout, &args.file, &edges)?;
            }
            Ok(())
        }
        Commands::Order(mut cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Computing build order (using {} threads)", num_threads);

            let report = depscan_build_order::run_build_order(&mut cfg)?;
            debug!("Config: root={:?}, entry_glob={:?}", cfg.root, cfg.entry_glob);
            let elapsed_ms = start.elapsed().as_millis();

            if cfg.json {
                depscan_build_order::print_json(&mut stdout, &report, cfg.build_options.pretty)?;
            } else {
                depscan_build_order::print_build_order(&mut stdout, &report, &cfg)?;
                writeln!(
                    stdout,
                    "\n{} Finished in {}ms on {} files (using {} threads).",
                    "●".bright_blue(),
                    elapsed_ms.to_string().cyan(),
                    report.files_analyzed.to_string().cyan(),
                    num_threads.to_string().cyan()
                )?;
            }
            stdout.flush()?;

            if report.has_problems() {
                // Non-zero exit to fail CI
                std::process::exit(1);
            }

            Ok(())
        }
    }
}
