//! Square Go board with capture rules.
//!
//! Cells hold `Option<Color>` (`None` is empty). Groups and liberties are
//! never cached: every capture or suicide check flood-fills from the stone in
//! question, so the result depends only on the current grid.

use std::fmt;

use serde::Serialize;

use crate::constants::DELTA;
use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// A board point as (row, col), both zero-based.
pub type Point = (usize, usize);

#[derive(Clone)]
pub struct Board {
    pub size: usize,
    cells: Vec<Option<Color>>,
}

/// Outcome of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    /// Number of opposing stones removed by the move.
    pub captures: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.size || col >= self.size {
            return Err(Error::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(())
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Option<Color>> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.idx(row, col)])
    }

    /// Put a setup stone on the board without any capture or suicide logic.
    pub fn place(&mut self, row: usize, col: usize, color: Color) -> Result<()> {
        self.check_bounds(row, col)?;
        let i = self.idx(row, col);
        self.cells[i] = Some(color);
        Ok(())
    }

    fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Point> + '_ {
        DELTA.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.size && c < self.size).then_some((r, c))
        })
    }

    /// Play a stone with standard capture rules.
    ///
    /// Opposing groups left without liberties are removed. A move that
    /// captures nothing and leaves its own group without liberties is
    /// rejected, and the board is left exactly as it was.
    pub fn play(&mut self, row: usize, col: usize, color: Color) -> Result<MoveResult> {
        if self.get(row, col)?.is_some() {
            return Err(Error::PointOccupied { row, col });
        }
        let idx = self.idx(row, col);
        self.cells[idx] = Some(color);

        let opp = color.opponent();
        let mut to_remove: Vec<Point> = Vec::new();
        for (nr, nc) in self.neighbors(row, col) {
            let ni = self.idx(nr, nc);
            // Two neighbors may belong to the same group
            if self.cells[ni] == Some(opp)
                && !to_remove.contains(&(nr, nc))
                && self.group_liberties(nr, nc) == 0
            {
                self.collect_group(nr, nc, &mut to_remove);
            }
        }

        if to_remove.is_empty() && self.group_liberties(row, col) == 0 {
            self.cells[idx] = None; // undo suicidal move
            return Err(Error::IllegalSuicideMove { row, col });
        }

        for &(rr, rc) in &to_remove {
            let i = self.idx(rr, rc);
            self.cells[i] = None;
        }
        Ok(MoveResult {
            captures: to_remove.len(),
        })
    }

    /// Flood-fill the group containing (row, col), appending its stones to `out`.
    fn collect_group(&self, row: usize, col: usize, out: &mut Vec<Point>) -> usize {
        let Some(color) = self.cells[self.idx(row, col)] else {
            return 0;
        };
        let mut stack = vec![(row, col)];
        let mut visited = vec![false; self.size * self.size];
        let mut count = 0;
        while let Some((cr, cc)) = stack.pop() {
            let i = self.idx(cr, cc);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            out.push((cr, cc));
            count += 1;
            for (nr, nc) in self.neighbors(cr, cc) {
                let ni = self.idx(nr, nc);
                if !visited[ni] && self.cells[ni] == Some(color) {
                    stack.push((nr, nc));
                }
            }
        }
        count
    }

    /// Count the distinct empty points adjacent to the group at (row, col).
    pub fn group_liberties(&self, row: usize, col: usize) -> usize {
        let Some(color) = self.cells[self.idx(row, col)] else {
            return 0;
        };
        let mut stack = vec![(row, col)];
        let mut visited = vec![false; self.size * self.size];
        let mut liberty_visited = vec![false; self.size * self.size];
        let mut liberties = 0;
        while let Some((cr, cc)) = stack.pop() {
            let i = self.idx(cr, cc);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for (nr, nc) in self.neighbors(cr, cc) {
                let ni = self.idx(nr, nc);
                match self.cells[ni] {
                    None => {
                        if !liberty_visited[ni] {
                            liberty_visited[ni] = true;
                            liberties += 1;
                        }
                    }
                    Some(c) if c == color && !visited[ni] => stack.push((nr, nc)),
                    _ => {}
                }
            }
        }
        liberties
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.cells[self.idx(row, col)] {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
