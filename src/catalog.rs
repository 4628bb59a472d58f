//! Batch processing of a directory of records into catalog rows.
//!
//! Every record runs through the full pipeline on its own: repair, parse,
//! metadata, move extraction, and empty-triangle replay. Records are
//! independent, so they are processed in parallel; rows come back in path
//! order. A record that fails any stage is logged and skipped, never stored
//! with partial results.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::board::Color;
use crate::constants::DEFAULT_MIN_MOVES;
use crate::error::{Error, Result};
use crate::metadata::GameMetadata;
use crate::moves::extract;
use crate::repair::repair_record;
use crate::sgf;
use crate::triangles::{TrianglesByColor, empty_triangles_by_color};

/// Configuration for a directory scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory searched recursively for `*.sgf` files
    pub root: PathBuf,
    /// Games with fewer main-line moves are skipped
    pub min_moves: usize,
    /// JSON lines destination; stdout when `None`
    pub output: Option<PathBuf>,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            min_moves: DEFAULT_MIN_MOVES,
            output: None,
        }
    }

    pub fn with_min_moves(mut self, min_moves: usize) -> Self {
        self.min_moves = min_moves;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

/// Everything derived from one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAnalysis {
    pub metadata: GameMetadata,
    pub triangles: TrianglesByColor,
}

/// One catalog row, shaped for an external `games` table loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRow {
    pub id: Option<String>,
    pub date: Option<String>,
    pub filename: String,
    pub size: Option<usize>,
    pub handicap: Option<usize>,
    pub komi: Option<f64>,
    pub wname: Option<String>,
    pub bname: Option<String>,
    pub wrank: Option<String>,
    pub brank: Option<String>,
    pub num_moves: usize,
    pub winner: Option<&'static str>,
    pub wtris: Vec<usize>,
    pub btris: Vec<usize>,
}

impl GameRow {
    pub fn new(filename: String, analysis: GameAnalysis) -> Self {
        let GameAnalysis { metadata: m, triangles } = analysis;
        Self {
            id: m.game_id,
            date: m.date,
            filename,
            size: m.size,
            handicap: m.handicap,
            komi: m.komi,
            wname: m.white_name,
            bname: m.black_name,
            wrank: m.white_rank,
            brank: m.black_rank,
            num_moves: m.num_moves,
            winner: m.winner.map(|c| match c {
                Color::Black => "B",
                Color::White => "W",
            }),
            wtris: triangles.white,
            btris: triangles.black,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanSummary {
    pub rows: Vec<GameRow>,
    /// Records below the minimum move count
    pub too_short: usize,
    /// Records that failed to repair, parse, or replay
    pub failed: usize,
}

/// Run the whole pipeline on one record's text.
pub fn analyze_record(text: &str) -> Result<GameAnalysis> {
    let repaired = repair_record(text)?;
    let root = sgf::parse(&repaired)?;
    let metadata = GameMetadata::from_tree(&root)?;
    let setup = extract(&root)?;
    let triangles = empty_triangles_by_color(&setup)?;
    Ok(GameAnalysis { metadata, triangles })
}

/// All `*.sgf` files under `root`, sorted.
pub fn find_records(root: &Path) -> Result<Vec<PathBuf>> {
    let root_str = root.to_str().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("non UTF-8 path {}", root.display()),
        ))
    })?;
    let pattern = format!("{}/**/*.sgf", glob::Pattern::escape(root_str));
    let mut paths = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::Io(e.into_error()))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// `Ok(None)` when the game is shorter than `min_moves`.
fn process_record(path: &Path, min_moves: usize) -> Result<Option<GameRow>> {
    let analysis = analyze_record(&fs::read_to_string(path)?)?;
    if analysis.metadata.num_moves < min_moves {
        return Ok(None);
    }
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(GameRow::new(filename, analysis)))
}

/// Scan `config.root` and build a row for every usable game.
pub fn scan(config: &ScanConfig) -> Result<ScanSummary> {
    let paths = find_records(&config.root)?;
    info!("found {} records under {}", paths.len(), config.root.display());

    let results: Vec<(&PathBuf, Result<Option<GameRow>>)> = paths
        .par_iter()
        .map(|path| (path, process_record(path, config.min_moves)))
        .collect();

    let mut summary = ScanSummary::default();
    for (path, result) in results {
        match result {
            Ok(Some(row)) => summary.rows.push(row),
            Ok(None) => summary.too_short += 1,
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                summary.failed += 1;
            }
        }
    }
    info!(
        "catalogued {} games ({} too short, {} failed)",
        summary.rows.len(),
        summary.too_short,
        summary.failed
    );
    Ok(summary)
}

/// Write rows as JSON lines.
pub fn write_rows<W: Write>(rows: &[GameRow], mut out: W) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut out, row).map_err(std::io::Error::from)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
