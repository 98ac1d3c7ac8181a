//! Pieces module - tetromino shape table and the rotatable piece value
//!
//! Every kind has four rotation entries inside a 4x4 bounding box. Offsets are
//! `(x, y)` with `y` growing downward, listed row by row. Symmetric kinds repeat
//! entries on purpose: O uses one matrix for all four, and I, S and Z alternate
//! between two.

use crate::types::{PieceKind, Rotation, ROTATION_KICKS};

/// Offset of a single mino relative to the bounding box origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the bounding box origin
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => get_o_shape(rotation),
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece shapes
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        // horizontal on row 1
        Rotation::North | Rotation::South => [(0, 1), (1, 1), (2, 1), (3, 1)],
        // vertical on column 2
        Rotation::East | Rotation::West => [(2, 0), (2, 1), (2, 2), (2, 3)],
    }
}

/// O piece shapes (same for all rotations)
fn get_o_shape(_rotation: Rotation) -> PieceShape {
    [(1, 0), (2, 0), (1, 1), (2, 1)]
}

/// T piece shapes
fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 0), (1, 0), (2, 0), (1, 1)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece shapes
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East | Rotation::West => [(1, 0), (1, 1), (2, 1), (2, 2)],
    }
}

/// Z piece shapes
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East | Rotation::West => [(2, 0), (1, 1), (2, 1), (1, 2)],
    }
}

/// J piece shapes
fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 0), (1, 0), (2, 0), (2, 1)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

/// L piece shapes
fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 0), (1, 0), (2, 0), (0, 1)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

/// A piece kind plus its current rotation.
///
/// Position is not part of the piece; the session tracks where the bounding
/// box sits on the board. Rotating never checks the board, callers decide
/// whether the result is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
}

impl Tetromino {
    /// Create a new tetromino in its spawn rotation
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
        }
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }

    /// Occupied offsets for the current rotation
    pub fn cells(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Number of columns spanned by the occupied cells
    pub fn width(&self) -> u8 {
        let shape = self.cells();
        let min = shape.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let max = shape.iter().map(|&(x, _)| x).max().unwrap_or(0);
        (max - min + 1) as u8
    }

    /// Number of rows spanned by the occupied cells
    pub fn height(&self) -> u8 {
        let shape = self.cells();
        let min = shape.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let max = shape.iter().map(|&(_, y)| y).max().unwrap_or(0);
        (max - min + 1) as u8
    }
}

/// Rotate `piece` at (x, y), trying the kick offsets when it does not fit in place
///
/// `fits` decides whether a piece fits with its bounding box at a position.
/// Returns the rotated piece and the applied offset, or `None` if neither the
/// in-place rotation nor any kick fits (the caller keeps the old piece).
pub fn try_rotate(
    piece: Tetromino,
    x: i8,
    y: i8,
    clockwise: bool,
    fits: impl Fn(&Tetromino, i8, i8) -> bool,
) -> Option<(Tetromino, (i8, i8))> {
    let mut rotated = piece;
    if clockwise {
        rotated.rotate_cw();
    } else {
        rotated.rotate_ccw();
    }

    std::iter::once((0, 0))
        .chain(ROTATION_KICKS)
        .find(|&(dx, dy)| fits(&rotated, x + dx, y + dy))
        .map(|offset| (rotated, offset))
}
