//! sgf-triangles command line.
//!
//! ## Usage
//!
//! - `sgf-triangles repair <FILE>` - Print a record with its handicap encoding fixed
//! - `sgf-triangles triangles <FILE>` - Print the empty triangles of one game as JSON
//! - `sgf-triangles scan <DIR>` - Catalog every record under a directory as JSON lines
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use log::info;

use sgf_triangles::catalog::{ScanConfig, analyze_record, scan, write_rows};
use sgf_triangles::constants::DEFAULT_MIN_MOVES;
use sgf_triangles::repair::read_record;

/// Empty-triangle statistics for archived Go games
#[derive(Parser)]
#[command(name = "sgf-triangles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a record with its handicap encoding repaired
    Repair {
        /// SGF file to read
        file: PathBuf,
    },
    /// Replay one game and print its empty triangles for each color
    Triangles {
        /// SGF file to read
        file: PathBuf,
    },
    /// Catalog every *.sgf file under a directory as JSON lines
    Scan {
        /// Directory searched recursively
        dir: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip games with fewer moves than this
        #[arg(long, default_value_t = DEFAULT_MIN_MOVES)]
        min_moves: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    match cli.command {
        Commands::Repair { file } => {
            let text =
                read_record(&file).with_context(|| format!("cannot repair {}", file.display()))?;
            io::stdout().write_all(text.as_bytes())?;
        }
        Commands::Triangles { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("cannot read {}", file.display()))?;
            let analysis = analyze_record(&text)
                .with_context(|| format!("cannot analyze {}", file.display()))?;
            println!("{}", serde_json::to_string(&analysis.triangles)?);
        }
        Commands::Scan {
            dir,
            output,
            min_moves,
        } => {
            let config = ScanConfig::new(dir)
                .with_min_moves(min_moves)
                .with_output(output);
            let summary = scan(&config)
                .with_context(|| format!("cannot scan {}", config.root.display()))?;
            match &config.output {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("cannot create {}", path.display()))?;
                    write_rows(&summary.rows, BufWriter::new(file))?;
                    info!("wrote {} rows to {}", summary.rows.len(), path.display());
                }
                None => write_rows(&summary.rows, io::stdout().lock())?,
            }
        }
    }
    Ok(())
}
