//! Empty-triangle detection over a replayed game.
//!
//! An empty triangle is a 2x2 block holding three stones of one color and one
//! empty point. After each stone is played, the blocks containing the new
//! stone are checked; moves that complete at least one such block are
//! reported by their 1-based move number.
//!
//! Moves that capture while forming the shape are still reported: the check
//! runs on the board after the capture is resolved.

use log::trace;
use serde::Serialize;

use crate::board::{Board, Color};
use crate::constants::DIAGONALS;
use crate::error::{Error, Result};
use crate::moves::GameSetup;

/// Move numbers of the empty triangles played by each side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrianglesByColor {
    pub black: Vec<usize>,
    pub white: Vec<usize>,
}

/// Whether the stone just played at (row, col) completes an empty triangle.
pub fn is_empty_triangle(board: &Board, row: usize, col: usize, color: Color) -> Result<bool> {
    for (dr, dc) in DIAGONALS {
        let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if r >= board.size || c >= board.size {
            continue;
        }
        let mut own = 0;
        let mut empty = 0;
        for cell in [(row, col), (row, c), (r, col), (r, c)] {
            match board.get(cell.0, cell.1)? {
                Some(stone) if stone == color => own += 1,
                None => empty += 1,
                Some(_) => {}
            }
        }
        if own == 3 && empty == 1 {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Replay the game and return every empty triangle with the color that played it.
///
/// Setup stones go down first without capture checks. Passes take a move
/// number but never touch the board. Either the whole game replays and the
/// full list is returned, or the first failure is returned.
pub fn find_empty_triangles(setup: &GameSetup) -> Result<Vec<(usize, Color)>> {
    let mut board = Board::new(setup.size);
    for &(color, (row, col)) in &setup.placements {
        board.place(row, col, color)?;
    }

    let mut found = Vec::new();
    for (i, mv) in setup.moves.iter().enumerate() {
        let move_number = i + 1;
        let Some((row, col)) = mv.point else {
            continue;
        };
        match board.play(row, col, mv.color) {
            Ok(result) if result.captures > 0 => {
                trace!("move {move_number} captured {} stones", result.captures);
            }
            Ok(_) => {}
            Err(err @ Error::OutOfBounds { .. }) => return Err(err),
            Err(err) => {
                return Err(Error::InvalidGameReplay {
                    move_number,
                    source: Box::new(err),
                });
            }
        }
        if is_empty_triangle(&board, row, col, mv.color)? {
            found.push((move_number, mv.color));
        }
    }
    Ok(found)
}

/// Move numbers of every move that creates an empty triangle, in order.
pub fn empty_triangles(setup: &GameSetup) -> Result<Vec<usize>> {
    Ok(find_empty_triangles(setup)?
        .into_iter()
        .map(|(n, _)| n)
        .collect())
}

pub fn empty_triangles_by_color(setup: &GameSetup) -> Result<TrianglesByColor> {
    let mut out = TrianglesByColor::default();
    for (n, color) in find_empty_triangles(setup)? {
        match color {
            Color::Black => out.black.push(n),
            Color::White => out.white.push(n),
        }
    }
    Ok(out)
}
