//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the visible top (y < 0) exist only for the falling piece; they are
//! never stored.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices, bounded by the board height
pub type RowList = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    ///
    /// Out-of-bounds positions read as `Cell::Empty`. Use [`Board::can_place`]
    /// when bounds matter.
    pub fn cell_at(&self, x: i8, y: i8) -> Cell {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx],
            None => Cell::Empty,
        }
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is on the board and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.cell_at(x, y).is_filled()
    }

    /// Check whether `piece` fits with its bounding box at (x, y).
    ///
    /// Every cell must lie inside the side walls and above the floor. Cells
    /// above the visible top are allowed and never collide.
    pub fn can_place(&self, piece: &Tetromino, x: i8, y: i8) -> bool {
        piece.cells().iter().all(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            py < 0 || self.cells[(py as usize) * WIDTH + px as usize].is_empty()
        })
    }

    /// Write `piece` into the board with its bounding box at (x, y).
    ///
    /// Cells above the visible top are dropped. No collision check happens
    /// here; callers lock only positions that passed [`Board::can_place`].
    ///
    /// # Panics
    ///
    /// Panics if a cell lies outside the side walls or below the floor.
    pub fn lock(&mut self, piece: &Tetromino, x: i8, y: i8) {
        for &(dx, dy) in piece.cells().iter() {
            let px = x + dx;
            let py = y + dy;
            assert!(
                px >= 0 && px < BOARD_WIDTH as i8 && py < BOARD_HEIGHT as i8,
                "lock out of bounds: ({px}, {py})"
            );
            if py >= 0 {
                self.cells[(py as usize) * WIDTH + px as usize] = Cell::Filled(piece.kind);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(Cell::is_filled)
    }

    /// Indices of all full rows, top to bottom
    pub fn completed_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove the given rows and compact everything above them downward.
    ///
    /// Rows may come in any order; duplicates are counted once. The result is
    /// the same as removing each row on its own and letting the stack settle
    /// with no gaps. Uses a two-pointer pass with zero allocation.
    ///
    /// Returns the number of rows removed.
    ///
    /// # Panics
    ///
    /// Panics if a row index is outside the board.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut remove = [false; HEIGHT];
        for &y in rows {
            assert!(y < HEIGHT, "row index out of range: {y}");
            remove[y] = true;
        }

        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * WIDTH;
                self.cells
                    .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
            }
        }

        // Rows left over at the top are fresh empty rows
        self.cells[..write_y * WIDTH].fill(Cell::Empty);

        write_y
    }

    /// Clear all full rows and return the row indices that were cleared (top to bottom)
    pub fn clear_full_rows(&mut self) -> RowList {
        let rows = self.completed_rows();
        if !rows.is_empty() {
            self.clear_rows(&rows);
        }
        rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Build a board from text rows, aligned to the bottom.
    ///
    /// `.` is empty, a piece letter fills with that kind, anything else fills
    /// with `I`. Missing rows at the top are empty.
    ///
    /// # Panics
    ///
    /// Panics if more than 20 rows or a row of other than 10 characters is given.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= HEIGHT, "too many rows: {}", rows.len());
        let mut board = Self::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), WIDTH, "row {i} must be {WIDTH} wide");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    other => Cell::Filled(
                        PieceKind::from_str(&other.to_string()).unwrap_or(PieceKind::I),
                    ),
                };
                board.cells[(top + i) * WIDTH + x] = cell;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
