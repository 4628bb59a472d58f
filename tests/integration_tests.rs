//! Integration tests for sgf-triangles
//!
//! Record fixtures live in tests/data/. The `*_error.sgf` files carry the
//! handicap encoding defect; the matching `*_corrected.sgf` files hold the
//! expected repair output byte for byte.

use std::fs;
use std::path::{Path, PathBuf};

use sgf_triangles::Error;
use sgf_triangles::board::{Board, Color};
use sgf_triangles::catalog::{ScanConfig, analyze_record, find_records, scan};
use sgf_triangles::moves::{GameSetup, Move, extract};
use sgf_triangles::repair::{read_record, repair_record};
use sgf_triangles::sgf::parse;
use sgf_triangles::triangles::empty_triangles;

// =============================================================================
// Helper functions
// =============================================================================

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn read_data(name: &str) -> String {
    fs::read_to_string(data_path(name)).unwrap()
}

/// Replay moves given as (color, point) with `None` for a pass.
fn replay(
    size: usize,
    moves: &[(Color, Option<(usize, usize)>)],
) -> sgf_triangles::Result<Vec<usize>> {
    let setup = GameSetup {
        size,
        placements: Vec::new(),
        moves: moves
            .iter()
            .map(|&(color, point)| Move { color, point })
            .collect(),
    };
    empty_triangles(&setup)
}

fn stones(board: &Board, color: Color) -> usize {
    (0..board.size)
        .flat_map(|row| (0..board.size).map(move |col| (row, col)))
        .filter(|&(row, col)| board.get(row, col).unwrap() == Some(color))
        .count()
}

const B: Color = Color::Black;
const W: Color = Color::White;

// =============================================================================
// Handicap repair
// =============================================================================

#[test]
fn test_no_change_one_handicap() {
    let text = read_data("handicap1.sgf");
    assert_eq!(repair_record(&text).unwrap(), text);
}

#[test]
fn test_correct_two_handicap() {
    let text = read_data("handicap2_error.sgf");
    let expected = read_data("handicap2_corrected.sgf");
    assert_eq!(repair_record(&text).unwrap(), expected);
}

#[test]
fn test_correct_nine_handicap() {
    let text = read_data("handicap9_error.sgf");
    let expected = read_data("handicap9_corrected.sgf");
    assert_eq!(read_record(&data_path("handicap9_error.sgf")).unwrap(), expected);
    assert_eq!(repair_record(&text).unwrap(), expected);
}

#[test]
fn test_repair_idempotent_on_fixtures() {
    for name in [
        "handicap1.sgf",
        "handicap2_error.sgf",
        "handicap9_error.sgf",
        "full_game_no_handicap.sgf",
    ] {
        let once = repair_record(&read_data(name)).unwrap();
        assert_eq!(repair_record(&once).unwrap(), once, "not idempotent: {name}");
    }
}

#[test]
fn test_no_handicap_tag_is_noop() {
    let text = read_data("full_game_no_handicap.sgf");
    assert_eq!(repair_record(&text).unwrap(), text);
}

#[test]
fn test_repaired_shape() {
    let repaired = repair_record(&read_data("handicap9_error.sgf")).unwrap();
    let setup = extract(&parse(&repaired).unwrap()).unwrap();
    assert_eq!(setup.placements.len(), 9);
    assert!(setup.placements.iter().all(|&(c, _)| c == Color::Black));
    // 17 coordinate tokens in the tail, 9 of them handicap stones
    assert_eq!(setup.moves.len(), 8);
    for (i, mv) in setup.moves.iter().enumerate() {
        let expected = if i % 2 == 0 { W } else { B };
        assert_eq!(mv.color, expected, "move {}", i + 1);
    }
}

#[test]
fn test_well_formed_record_with_comment_keeps_its_moves() {
    let text = "(;SZ[19]HA[2]AB[dd][pp];W[dp];B[pd]C[gg])";
    assert_eq!(repair_record(text).unwrap(), text);
    let analysis = analyze_record(text).unwrap();
    assert_eq!(analysis.metadata.handicap, Some(2));
    assert_eq!(analysis.metadata.num_moves, 2);
}

#[test]
fn test_read_record_missing_file() {
    assert!(matches!(
        read_record(&data_path("does_not_exist.sgf")),
        Err(Error::Io(_))
    ));
}

// =============================================================================
// Board replay
// =============================================================================

#[test]
fn test_capture_removes_whole_group_only() {
    let mut board = Board::new(9);
    // White pair at (4,4),(4,5), an unrelated White stone at (0,8)
    board.play(4, 4, W).unwrap();
    board.play(4, 5, W).unwrap();
    board.play(0, 8, W).unwrap();
    for &(r, c) in &[(3, 4), (3, 5), (5, 4), (5, 5), (4, 3)] {
        board.play(r, c, B).unwrap();
    }
    let result = board.play(4, 6, B).unwrap();
    assert_eq!(result.captures, 2);
    assert_eq!(board.get(4, 4).unwrap(), None);
    assert_eq!(board.get(4, 5).unwrap(), None);
    assert_eq!(board.get(0, 8).unwrap(), Some(W));
    assert_eq!(stones(&board, B), 6);
}

#[test]
fn test_edge_capture() {
    let mut board = Board::new(9);
    board.play(0, 0, W).unwrap();
    board.play(0, 1, B).unwrap();
    assert_eq!(board.group_liberties(0, 0), 1);
    let result = board.play(1, 0, B).unwrap();
    assert_eq!(result.captures, 1);
    assert_eq!(board.get(0, 0).unwrap(), None);
}

#[test]
fn test_suicide_rejected_board_unchanged() {
    let mut board = Board::new(9);
    // Black eye at (1,1)
    for &(r, c) in &[(0, 1), (1, 0), (1, 2), (2, 1)] {
        board.play(r, c, B).unwrap();
    }
    let before = board.to_string();
    assert!(matches!(
        board.play(1, 1, W),
        Err(Error::IllegalSuicideMove { row: 1, col: 1 })
    ));
    assert_eq!(board.to_string(), before);
    assert_eq!(board.get(1, 1).unwrap(), None);
}

#[test]
fn test_multi_stone_suicide_rejected() {
    let mut board = Board::new(5);
    // White (0,0) then filling (0,1) would leave the pair with no liberties
    board.place(0, 2, B).unwrap();
    board.place(1, 0, B).unwrap();
    board.place(1, 1, B).unwrap();
    board.play(0, 0, W).unwrap();
    assert!(matches!(
        board.play(0, 1, W),
        Err(Error::IllegalSuicideMove { .. })
    ));
    assert_eq!(board.get(0, 0).unwrap(), Some(W));
    assert_eq!(board.get(0, 1).unwrap(), None);
}

// =============================================================================
// Empty triangles
// =============================================================================

#[test]
fn test_empty_triangle_third_move() {
    let found = replay(19, &[(B, Some((3, 3))), (B, Some((3, 4))), (B, Some((4, 3)))]).unwrap();
    assert_eq!(found, [3]);
}

#[test]
fn test_pass_consumes_move_number() {
    let found = replay(
        19,
        &[
            (B, Some((3, 3))),
            (W, None),
            (B, Some((3, 4))),
            (W, None),
            (B, Some((4, 3))),
            (W, None),
        ],
    )
    .unwrap();
    assert_eq!(found, [5]);
}

#[test]
fn test_capturing_triangle_is_counted() {
    let found = replay(
        9,
        &[
            (B, Some((1, 1))),
            (W, Some((0, 0))),
            (B, Some((1, 0))),
            (W, None),
            (B, Some((0, 1))),
        ],
    )
    .unwrap();
    assert_eq!(found, [5]);
}

#[test]
fn test_out_of_range_aborts_replay() {
    let result = replay(9, &[(B, Some((2, 2))), (W, Some((9, 0)))]);
    assert!(matches!(
        result,
        Err(Error::OutOfBounds { row: 9, col: 0, size: 9 })
    ));
}

#[test]
fn test_occupied_point_aborts_replay() {
    let result = replay(9, &[(B, Some((2, 2))), (W, Some((2, 2)))]);
    assert!(matches!(
        result,
        Err(Error::InvalidGameReplay { move_number: 2, .. })
    ));
}

#[test]
fn test_full_game_no_handicap() {
    let analysis = analyze_record(&read_data("full_game_no_handicap.sgf")).unwrap();
    assert_eq!(analysis.triangles.black, [5]);
    assert_eq!(analysis.triangles.white, [6]);
    assert_eq!(analysis.metadata.num_moves, 9);
    assert_eq!(analysis.metadata.game_id.as_deref(), Some("77"));
    assert_eq!(analysis.metadata.winner, Some(B));
    assert_eq!(analysis.metadata.ranked, Some(false));
}

#[test]
fn test_handicap_game_after_repair() {
    let analysis = analyze_record(&read_data("handicap2_error.sgf")).unwrap();
    assert_eq!(analysis.metadata.handicap, Some(2));
    assert_eq!(analysis.metadata.num_moves, 7);
    assert!(analysis.triangles.black.is_empty());
    assert!(analysis.triangles.white.is_empty());
}

#[test]
fn test_missing_handicap_stones() {
    let text = "(;GM[1]SZ[19]HA[3];B[pd];W[dd])";
    assert!(matches!(
        analyze_record(text),
        Err(Error::MissingHandicapStones { handicap: 3 })
    ));
}

// =============================================================================
// Catalog scan
// =============================================================================

#[test]
fn test_scan_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("2020").join("05");
    fs::create_dir_all(&nested).unwrap();
    fs::copy(
        data_path("full_game_no_handicap.sgf"),
        dir.path().join("a_full.sgf"),
    )
    .unwrap();
    fs::copy(data_path("handicap2_error.sgf"), nested.join("b_handicap.sgf")).unwrap();
    fs::write(dir.path().join("c_short.sgf"), "(;SZ[9];B[aa];W[bb])").unwrap();
    fs::write(dir.path().join("d_broken.sgf"), "(;SZ[9];B[aa];W[ZZ])").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a record").unwrap();

    let paths = find_records(dir.path()).unwrap();
    assert_eq!(paths.len(), 4);

    let summary = scan(&ScanConfig::new(dir.path()).with_min_moves(5)).unwrap();
    assert_eq!(summary.too_short, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.rows.len(), 2);

    let full = summary
        .rows
        .iter()
        .find(|r| r.filename == "a_full.sgf")
        .unwrap();
    assert_eq!(full.id.as_deref(), Some("77"));
    assert_eq!(full.btris, [5]);
    assert_eq!(full.wtris, [6]);
    assert_eq!(full.winner, Some("B"));

    let handicap = summary
        .rows
        .iter()
        .find(|r| r.filename == "b_handicap.sgf")
        .unwrap();
    assert_eq!(handicap.handicap, Some(2));
    assert_eq!(handicap.num_moves, 7);
}
