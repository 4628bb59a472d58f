//! sgf-triangles: empty-triangle statistics for archived Go games.
//!
//! Records go through a short pipeline:
//!
//! 1. [`repair`] fixes a handicap encoding defect in the raw text
//! 2. [`sgf`] parses the repaired text into a game tree
//! 3. [`moves`] extracts the board size, setup stones, and move list
//! 4. [`triangles`] replays the game on a [`board::Board`] and reports
//!    every move that creates an empty triangle
//!
//! [`metadata`] reads the root properties into a typed record and
//! [`catalog`] runs the pipeline over a directory of records.
//!
//! ## Example
//!
//! ```
//! use sgf_triangles::{moves, repair, sgf, triangles};
//!
//! let text = repair::repair_record("(;SZ[19];B[dd];W[pp];B[ed];W[pq];B[de])")?;
//! let root = sgf::parse(&text)?;
//! let setup = moves::extract(&root)?;
//! assert_eq!(triangles::empty_triangles(&setup)?, [5]);
//! # Ok::<(), sgf_triangles::Error>(())
//! ```

pub mod board;
pub mod catalog;
pub mod constants;
pub mod error;
pub mod metadata;
pub mod moves;
pub mod repair;
pub mod sgf;
pub mod triangles;

pub use error::{Error, Result};
