//! Read-only view of a session, filled in place so front-ends can reuse one
//! buffer every frame.

use arrayvec::ArrayVec;

use crate::game_state::ActivePiece;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW};

pub type GridSnapshot = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.piece.kind,
            rotation: value.piece.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Locked cells, `board[y][x]`
    pub board: GridSnapshot,
    /// `None` once the game is over
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next_queue: ArrayVec<PieceKind, NEXT_PREVIEW>,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    /// Effective fall interval, soft drop included
    pub fall_interval_ms: u32,
    pub soft_dropping: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next_queue.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.fall_interval_ms = 0;
        self.soft_dropping = false;
        self.game_over = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Whether the active piece covers (x, y)
    pub fn active_covers(&self, x: i8, y: i8) -> bool {
        self.active.is_some_and(|a| {
            crate::pieces::get_shape(a.kind, a.rotation)
                .iter()
                .any(|&(dx, dy)| (a.x + dx, a.y + dy) == (x, y))
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next_queue: ArrayVec::new(),
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: 0,
            soft_dropping: false,
            game_over: false,
        }
    }
}
