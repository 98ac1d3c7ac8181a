//! Board tests - grid access, placement and row clearing

use blockfall::core::{Board, Tetromino};
use blockfall::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn filled_count(board: &Board) -> usize {
    board.cells().iter().filter(|c| c.is_filled()).count()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.cell_at(x, y), Cell::Empty, "cell ({x}, {y})");
        }
    }
}

#[test]
fn test_board_out_of_bounds_reads_empty() {
    let board = Board::from_rows(&["IIIIIIIIII"]);

    assert_eq!(board.cell_at(-1, 19), Cell::Empty);
    assert_eq!(board.cell_at(BOARD_WIDTH as i8, 19), Cell::Empty);
    assert_eq!(board.cell_at(0, BOARD_HEIGHT as i8), Cell::Empty);
    assert_eq!(board.cell_at(0, -1), Cell::Empty);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Cell::Filled(PieceKind::T)));
    assert_eq!(board.cell_at(5, 10), Cell::Filled(PieceKind::T));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, Cell::Empty));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Cell::Filled(PieceKind::T)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Cell::Filled(PieceKind::T)));
}

#[test]
fn test_can_place_walls_and_floor() {
    let board = Board::new();
    let o = Tetromino::new(PieceKind::O);

    // O occupies columns 1-2 and rows 0-1 of its box
    assert!(board.can_place(&o, -1, 0));
    assert!(!board.can_place(&o, -2, 0));
    assert!(board.can_place(&o, 7, 0));
    assert!(!board.can_place(&o, 8, 0));
    assert!(board.can_place(&o, 3, 18));
    assert!(!board.can_place(&o, 3, 19));
}

#[test]
fn test_can_place_ignores_rows_above_top() {
    let board = Board::from_rows(&["IIIIIIIIII"; 20]);
    let o = Tetromino::new(PieceKind::O);

    // Entirely above the visible top never collides
    assert!(board.can_place(&o, 3, -2));
    assert!(!board.can_place(&o, 3, -1));
    // Still bounded by the walls up there
    assert!(!board.can_place(&o, 8, -2));
}

#[test]
fn test_can_place_detects_overlap() {
    let board = Board::from_rows(&["....T....."]);
    let mut i = Tetromino::new(PieceKind::I);
    i.rotate_cw();

    // Vertical I on column x + 2
    assert!(!board.can_place(&i, 2, 16));
    assert!(board.can_place(&i, 2, 15));
    assert!(board.can_place(&i, 1, 16));
}

#[test]
fn test_lock_writes_kind() {
    let mut board = Board::new();
    let t = Tetromino {
        kind: PieceKind::T,
        rotation: Rotation::South,
    };
    board.lock(&t, 0, 18);

    assert_eq!(board.cell_at(0, 18), Cell::Filled(PieceKind::T));
    assert_eq!(board.cell_at(1, 18), Cell::Filled(PieceKind::T));
    assert_eq!(board.cell_at(2, 18), Cell::Filled(PieceKind::T));
    assert_eq!(board.cell_at(1, 19), Cell::Filled(PieceKind::T));
    assert_eq!(filled_count(&board), 4);
}

#[test]
fn test_completed_rows() {
    let board = Board::from_rows(&[
        "IIIIIIIIII",
        "IIII.IIIII",
        "IIIIIIIIII",
        "IIIIIIIIII",
    ]);
    assert_eq!(board.completed_rows().as_slice(), &[16, 18, 19]);
    assert!(board.is_row_full(16));
    assert!(!board.is_row_full(17));
    assert!(!board.is_row_full(20));
}

#[test]
fn test_clear_single_row_shifts_above_down() {
    let mut board = Board::from_rows(&["..Z.......", "IIIIIIIIII"]);
    let cleared = board.clear_full_rows();

    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(board.cell_at(2, 19), Cell::Filled(PieceKind::Z));
    assert_eq!(filled_count(&board), 1);
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::from_rows(&[
        "S.........",
        "IIIIIIIIII",
        ".T........",
        "IIIIIIIIII",
        "..L.......",
    ]);
    let removed = board.clear_rows(&[16, 18]);

    assert_eq!(removed, 2);
    assert_eq!(board.cell_at(0, 17), Cell::Filled(PieceKind::S));
    assert_eq!(board.cell_at(1, 18), Cell::Filled(PieceKind::T));
    assert_eq!(board.cell_at(2, 19), Cell::Filled(PieceKind::L));
    assert_eq!(filled_count(&board), 3);
}

#[test]
fn test_clear_rows_order_and_duplicates_do_not_matter() {
    let rows = [
        "J.........",
        "IIIIIIIIII",
        ".O........",
        "IIIIIIIIII",
    ];
    let mut a = Board::from_rows(&rows);
    let mut b = Board::from_rows(&rows);

    assert_eq!(a.clear_rows(&[17, 19]), 2);
    assert_eq!(b.clear_rows(&[19, 17, 19]), 2);
    assert_eq!(a, b);
}

#[test]
fn test_clear_rows_empty_list_is_noop() {
    let mut board = Board::from_rows(&["IIIIIIIIII"]);
    let before = board.clone();
    assert_eq!(board.clear_rows(&[]), 0);
    assert_eq!(board, before);
}

#[test]
fn test_clear_all_rows() {
    let mut board = Board::from_rows(&["IIIIIIIIII"; 20]);
    assert_eq!(board.clear_full_rows().len(), 20);
    assert_eq!(filled_count(&board), 0);
}

#[test]
fn test_reset_empties_board() {
    let mut board = Board::from_rows(&["TTTT......", "IIIIIIIII."]);
    board.reset();
    assert_eq!(board, Board::new());
}
