//! Extraction of setup stones and the main-line move list from a parsed record.

use sgf_parse::go::{self, Prop};

use crate::board::{Color, Point};
use crate::constants::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, TT_PASS_MAX_SIZE};
use crate::error::{Error, Result};
use crate::sgf::{GoNode, main_sequence};

/// One play of the game. `point` is `None` for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub color: Color,
    pub point: Option<Point>,
}

/// Everything needed to replay a game on a fresh board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub size: usize,
    /// Stones placed before play starts (handicap or setup).
    pub placements: Vec<(Color, Point)>,
    pub moves: Vec<Move>,
}

/// Read the `SZ` property, defaulting to 19. Only square boards are supported.
pub fn board_size(root: &GoNode) -> Result<usize> {
    match root.get_property("SZ") {
        None => Ok(DEFAULT_BOARD_SIZE),
        Some(Prop::SZ((width, height)))
            if width == height && (1..=MAX_BOARD_SIZE).contains(&usize::from(*width)) =>
        {
            Ok(usize::from(*width))
        }
        Some(other) => Err(Error::RecordParse(format!("unsupported board size {other:?}"))),
    }
}

/// Convert an SGF point: `x` is the column and `y` the row, both counted from
/// the top-left corner. Points past the board edge are kept as-is; the board
/// rejects them when the move is replayed.
fn to_point(point: &go::Point) -> Point {
    (usize::from(point.y), usize::from(point.x))
}

/// Decode a move value. `tt` is a pass on boards up to 19x19.
fn move_point(mv: &go::Move, size: usize) -> Option<Point> {
    match mv {
        go::Move::Pass => None,
        go::Move::Move(p) if p.x == 19 && p.y == 19 && size <= TT_PASS_MAX_SIZE => None,
        go::Move::Move(p) => Some(to_point(p)),
    }
}

/// Setup or move properties whose values could not be read.
fn reject_invalid(prop: &Prop) -> Result<()> {
    match prop {
        Prop::Invalid(ident, values)
            if matches!(ident.as_str(), "B" | "W" | "AB" | "AW" | "AE") =>
        {
            Err(Error::RecordParse(format!("invalid {ident} value {values:?}")))
        }
        _ => Ok(()),
    }
}

/// Collect the board size, root setup stones, and main-line moves.
///
/// Nodes after the root that carry neither `B` nor `W` are skipped. Setup
/// properties are only accepted on the root node. Setup stones come back
/// Black first, each color ordered by point.
pub fn extract(root: &GoNode) -> Result<GameSetup> {
    let size = board_size(root)?;

    let mut placements = Vec::new();
    for prop in root.properties() {
        reject_invalid(prop)?;
        let (color, points) = match prop {
            Prop::AB(points) => (Color::Black, points),
            Prop::AW(points) => (Color::White, points),
            _ => continue,
        };
        placements.extend(points.iter().map(|p| (color, to_point(p))));
    }
    placements.sort_by_key(|&(color, point)| (color == Color::White, point));

    let mut moves = Vec::new();
    for node in main_sequence(root).into_iter().skip(1) {
        let mut played = None;
        for prop in node.properties() {
            reject_invalid(prop)?;
            match prop {
                Prop::AB(_) | Prop::AW(_) | Prop::AE(_) => {
                    return Err(Error::RecordParse(
                        "setup property after the root node".to_string(),
                    ));
                }
                Prop::B(mv) if played.is_none() => played = Some((Color::Black, mv)),
                Prop::W(mv) if played.is_none() => played = Some((Color::White, mv)),
                _ => {}
            }
        }
        if let Some((color, mv)) = played {
            moves.push(Move {
                color,
                point: move_point(mv, size),
            });
        }
    }

    if moves.is_empty() {
        return Err(Error::EmptyGame);
    }
    Ok(GameSetup {
        size,
        placements,
        moves,
    })
}
