//! Game state module - the per-game session state machine
//!
//! This module ties together all core components: board, pieces, piece supply
//! and scoring. It advances on ticks (elapsed milliseconds) and on discrete
//! player commands, and handles locking, line clears, spawning and game over.
//!
//! States: a piece is always either falling or the game is over. Locking and
//! spawning happen inside a single call and are never observable on their own.
//!
//! Commands that are illegal right now (game over, blocked move, rotation with
//! no fitting kick) are silent no-ops; they report `false` and change nothing.

use crate::board::Board;
use crate::pieces::{try_rotate, PieceShape, Tetromino};
use crate::rng::{PieceSupply, RandomSource, SimpleRng};
use crate::scoring::ScoreTracker;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// The falling piece and where its bounding box sits on the board
///
/// `y` may be negative while the piece is partly above the visible top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Tetromino,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A fresh piece of `kind` at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            piece: Tetromino::new(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.piece.rotation
    }

    /// Absolute board coordinates of the four cells
    pub fn cells(&self) -> PieceShape {
        self.piece.cells().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether any cell lies above the visible top
    pub fn is_above_top(&self) -> bool {
        self.cells().iter().any(|&(_, y)| y < 0)
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession<R: RandomSource = SimpleRng> {
    board: Board,
    supply: PieceSupply<R>,
    score: ScoreTracker,
    active: ActivePiece,
    game_over: bool,
    soft_dropping: bool,
    /// Time accumulated toward the next fall step
    fall_timer_ms: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameSession<SimpleRng> {
    /// Create and start a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameSession<R> {
    /// Create and start a new game drawing pieces with `rng`
    pub fn with_rng(rng: R) -> Self {
        Self::with_board(Board::new(), rng)
    }

    /// Create and start a game on a prepared board (puzzles, replays, tests)
    ///
    /// Full rows in `board` are left alone until the next lock clears them.
    pub fn with_board(board: Board, rng: R) -> Self {
        let supply = PieceSupply::new(rng);
        let mut session = Self {
            board,
            supply,
            score: ScoreTracker::new(),
            active: ActivePiece::spawn(PieceKind::I),
            game_over: false,
            soft_dropping: false,
            fall_timer_ms: 0,
            last_event: None,
        };
        session.spawn_next();
        session
    }

    /// Throw the current game away and start a fresh one
    ///
    /// The RNG keeps its state, so a restarted game gets new bags.
    pub fn restart(&mut self) {
        self.board.reset();
        self.supply.reset();
        self.score.reset();
        self.game_over = false;
        self.soft_dropping = false;
        self.fall_timer_ms = 0;
        self.last_event = None;
        self.spawn_next();
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn score(&self) -> u64 {
        self.score.score()
    }

    pub fn level(&self) -> u32 {
        self.score.level()
    }

    pub fn lines(&self) -> u32 {
        self.score.lines()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> u8 {
        self.board.width()
    }

    pub fn height(&self) -> u8 {
        self.board.height()
    }

    pub fn cell_at(&self, x: i8, y: i8) -> Cell {
        self.board.cell_at(x, y)
    }

    pub fn active(&self) -> ActivePiece {
        self.active
    }

    /// Absolute cells of the active piece
    pub fn active_cells(&self) -> PieceShape {
        self.active.cells()
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Effective fall interval: the soft drop interval while soft dropping,
    /// otherwise the level's interval
    pub fn fall_interval_ms(&self) -> u32 {
        if self.soft_dropping {
            SOFT_DROP_INTERVAL_MS
        } else {
            self.score.fall_interval_ms()
        }
    }

    /// Peek at up to `count` upcoming piece kinds
    pub fn peek_next(&mut self, count: usize) -> Vec<PieceKind> {
        self.supply.peek(count)
    }

    /// Upcoming piece kinds currently queued, without topping up the queue
    pub fn upcoming(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.supply.pending()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Rows the active piece can fall before it rests on something
    pub fn drop_distance(&self) -> u32 {
        let ActivePiece { piece, x, y } = self.active;
        let mut distance: i8 = 0;
        while self.board.can_place(&piece, x, y + distance + 1) {
            distance += 1;
        }
        distance as u32
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        if self.game_over {
            return None;
        }
        Some(self.active.y + self.drop_distance() as i8)
    }

    /// Draw the next kind and place it at the spawn position
    fn spawn_next(&mut self) {
        let kind = self.supply.next();
        self.spawn_piece(ActivePiece::spawn(kind));
    }

    /// Make `candidate` the active piece, ending the game if it does not fit
    ///
    /// A blocked spawn never touches the board.
    fn spawn_piece(&mut self, candidate: ActivePiece) -> bool {
        self.active = candidate;
        if !self
            .board
            .can_place(&candidate.piece, candidate.x, candidate.y)
        {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let ActivePiece { piece, x, y } = self.active;
        if !self.board.can_place(&piece, x + dx, y + dy) {
            return false;
        }
        self.active.x = x + dx;
        self.active.y = y + dy;
        true
    }

    /// Try to rotate the active piece, falling back to the kick offsets
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let ActivePiece { piece, x, y } = self.active;
        let board = &self.board;
        let Some((rotated, (dx, dy))) =
            try_rotate(piece, x, y, clockwise, |p, px, py| board.can_place(p, px, py))
        else {
            return false;
        };

        self.active = ActivePiece {
            piece: rotated,
            x: x + dx,
            y: y + dy,
        };
        true
    }

    /// Lock the active piece, clear lines, then spawn or end the game
    fn lock_active(&mut self, hard_drop_distance: Option<u32>) {
        let active = self.active;
        self.board.lock(&active.piece, active.x, active.y);
        let topped_out = active.is_above_top();

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;
        let line_clear_score = self.score.add_lines(lines_cleared);

        self.last_event = Some(LockEvent {
            kind: active.kind(),
            lines_cleared,
            line_clear_score,
            hard_drop_distance,
            topped_out,
        });

        if topped_out {
            self.game_over = true;
        } else {
            self.spawn_next();
        }
    }

    /// Main game tick - accumulate elapsed time and apply gravity
    ///
    /// Once the accumulated time reaches the fall interval, the piece tries to
    /// move down one row; if it cannot, it locks. At most one fall attempt
    /// happens per tick and the accumulator restarts from zero afterwards, so
    /// any remainder is discarded.
    ///
    /// Returns true if a fall attempt happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms() {
            return false;
        }

        if self.try_move(0, 1) {
            if self.soft_dropping {
                self.score.add_soft_drop(1);
            }
        } else {
            self.lock_active(None);
        }
        self.fall_timer_ms = 0;
        true
    }

    pub fn move_left(&mut self) -> bool {
        !self.game_over && self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        !self.game_over && self.try_move(1, 0)
    }

    pub fn rotate_cw(&mut self) -> bool {
        !self.game_over && self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        !self.game_over && self.try_rotate(false)
    }

    /// Turn soft drop on or off. Only changes the fall interval and scoring;
    /// the piece does not move here.
    pub fn set_soft_drop(&mut self, active: bool) -> bool {
        if self.game_over {
            return false;
        }
        self.soft_dropping = active;
        true
    }

    /// Hard drop the active piece to the bottom and lock it
    ///
    /// A piece that is already resting still locks (distance zero).
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let distance = self.drop_distance();
        self.active.y += distance as i8;
        self.score.add_hard_drop(distance);
        self.lock_active(Some(distance));
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::SoftDropStart => self.set_soft_drop(true),
            GameAction::SoftDropStop => self.set_soft_drop(false),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = if self.game_over {
            None
        } else {
            Some(ActiveSnapshot::from(self.active))
        };
        out.ghost_y = self.ghost_y();
        out.next_queue.clear();
        out.next_queue
            .extend(self.supply.pending().take(NEXT_PREVIEW));
        out.score = self.score.score();
        out.level = self.score.level();
        out.lines = self.score.lines();
        out.fall_interval_ms = self.fall_interval_ms();
        out.soft_dropping = self.soft_dropping;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bags come out as O, I, T, S, Z, J, L.
    struct OFirst;

    impl RandomSource for OFirst {
        fn next_below(&mut self, bound: u32) -> u32 {
            if bound == 2 {
                0
            } else {
                bound - 1
            }
        }
    }

    fn o_first_session() -> GameSession<OFirst> {
        GameSession::with_rng(OFirst)
    }

    #[test]
    fn test_new_session_is_falling() {
        let state = GameSession::new(12345);

        assert!(!state.game_over);
        assert!(!state.soft_dropping);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.active.x, SPAWN_X);
        assert_eq!(state.active.y, SPAWN_Y);
        assert_eq!(state.active.rotation(), Rotation::North);
        assert!(state.board.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_scripted_rng_order() {
        let mut state = o_first_session();
        assert_eq!(state.active.kind(), PieceKind::O);
        assert_eq!(state.peek_next(2), vec![PieceKind::I, PieceKind::T]);
    }

    #[test]
    fn test_tick_accumulates_until_interval() {
        let mut state = o_first_session();

        assert!(!state.tick(300));
        assert!(!state.tick(399));
        assert_eq!(state.active.y, SPAWN_Y);
        assert_eq!(state.fall_timer_ms, 699);

        assert!(state.tick(1));
        assert_eq!(state.active.y, SPAWN_Y + 1);
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_tick_discards_remainder_and_steps_once() {
        let mut state = o_first_session();

        // A huge delta still moves only one row and leaves nothing behind
        assert!(state.tick(5000));
        assert_eq!(state.active.y, SPAWN_Y + 1);
        assert_eq!(state.fall_timer_ms, 0);
        assert!(!state.tick(699));
    }

    #[test]
    fn test_soft_drop_interval_and_points() {
        let mut state = o_first_session();
        assert!(state.set_soft_drop(true));
        assert_eq!(state.fall_interval_ms(), SOFT_DROP_INTERVAL_MS);

        assert!(!state.tick(49));
        assert!(state.tick(1));
        assert_eq!(state.active.y, SPAWN_Y + 1);
        assert_eq!(state.score(), 1);

        state.set_soft_drop(false);
        assert_eq!(state.fall_interval_ms(), 700);
        assert!(state.tick(700));
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_set_soft_drop_does_not_move() {
        let mut state = o_first_session();
        let before = state.active;
        state.set_soft_drop(true);
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_lock_on_blocked_fall() {
        let mut state = o_first_session();
        state.active.y = 18;

        assert!(state.tick(700));
        assert_eq!(state.cell_at(4, 18), Cell::Filled(PieceKind::O));
        assert_eq!(state.cell_at(5, 19), Cell::Filled(PieceKind::O));
        assert_eq!(state.active.kind(), PieceKind::I);
        assert_eq!(state.active.y, SPAWN_Y);
        assert_eq!(state.fall_timer_ms, 0);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(event.hard_drop_distance, None);
        assert!(!event.topped_out);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_top_out_on_lock_leaves_board_untouched() {
        let mut state = o_first_session();
        // Columns under the spawned O are full to the top
        for y in 0..BOARD_HEIGHT as i8 {
            state.board_mut().set(4, y, Cell::Filled(PieceKind::J));
            state.board_mut().set(5, y, Cell::Filled(PieceKind::J));
        }
        let before = state.board.clone();

        assert!(state.tick(700));
        assert!(state.game_over);
        assert_eq!(state.board, before);
        assert!(state.take_last_event().unwrap().topped_out);
    }

    #[test]
    fn test_spawn_blocked_ends_game_without_locking() {
        let mut state = o_first_session();
        state.board_mut().set(4, 0, Cell::Filled(PieceKind::T));
        let before = state.board.clone();

        let candidate = ActivePiece {
            piece: Tetromino::new(PieceKind::O),
            x: SPAWN_X,
            y: 0,
        };
        assert!(!state.spawn_piece(candidate));
        assert!(state.game_over);
        assert_eq!(state.board, before);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_game_over_freezes_everything_but_restart() {
        let mut state = o_first_session();
        state.game_over = true;
        let board = state.board.clone();
        let active = state.active;

        assert!(!state.tick(10_000));
        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate_cw());
        assert!(!state.rotate_ccw());
        assert!(!state.set_soft_drop(true));
        assert!(!state.hard_drop());
        assert_eq!(state.board, board);
        assert_eq!(state.active, active);
        assert_eq!(state.score(), 0);
        assert!(state.ghost_y().is_none());

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = o_first_session();
        state.set_soft_drop(true);
        state.hard_drop();
        state.tick(30);
        assert!(state.score() > 0);

        state.restart();
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert!(!state.soft_dropping);
        assert_eq!(state.fall_timer_ms, 0);
        assert!(state.board.cells().iter().all(Cell::is_empty));
        assert!(state.take_last_event().is_none());
        // Fresh bag after reset
        assert_eq!(state.active.kind(), PieceKind::O);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut state = o_first_session();
        // O occupies columns x+1..=x+2, so it stops at x = -1
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_left() {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active.x, -1);
    }

    #[test]
    fn test_move_blocked_by_stack() {
        let mut state = o_first_session();
        state.active.y = 10;
        state.board_mut().set(6, 10, Cell::Filled(PieceKind::S));

        assert!(!state.move_right());
        assert_eq!(state.active.x, SPAWN_X);
        assert!(state.move_left());
    }

    #[test]
    fn test_rotate_uses_first_fitting_kick() {
        let mut state = o_first_session();
        state.active = ActivePiece {
            piece: Tetromino {
                kind: PieceKind::I,
                rotation: Rotation::East,
            },
            x: -2,
            y: 5,
        };

        // Turned flat at x = -2 the I pokes out of the left wall; (+2, 0) is the first fit
        assert!(state.rotate_cw());
        assert_eq!(state.active.rotation(), Rotation::South);
        assert_eq!((state.active.x, state.active.y), (0, 5));
    }

    #[test]
    fn test_rotate_reverts_when_no_kick_fits() {
        let mut state = o_first_session();
        // One-wide well in column 0, bottom six rows
        for y in 14..BOARD_HEIGHT as i8 {
            for x in 1..BOARD_WIDTH as i8 {
                state.board_mut().set(x, y, Cell::Filled(PieceKind::Z));
            }
        }
        let resting = ActivePiece {
            piece: Tetromino {
                kind: PieceKind::I,
                rotation: Rotation::East,
            },
            x: -2,
            y: 16,
        };
        state.active = resting;

        assert!(!state.rotate_cw());
        assert!(!state.rotate_ccw());
        assert_eq!(state.active, resting);
    }

    #[test]
    fn test_hard_drop_scores_distance_and_locks() {
        let mut state = o_first_session();

        assert_eq!(state.drop_distance(), 20);
        assert_eq!(state.ghost_y(), Some(18));
        assert!(state.hard_drop());

        assert_eq!(state.score(), 40);
        assert_eq!(state.cell_at(4, 19), Cell::Filled(PieceKind::O));
        assert_eq!(state.active.kind(), PieceKind::I);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.hard_drop_distance, Some(20));
    }

    #[test]
    fn test_hard_drop_zero_distance_still_locks() {
        let mut state = o_first_session();
        state.active.y = 18;
        assert_eq!(state.drop_distance(), 0);

        assert!(state.hard_drop());
        assert_eq!(state.score(), 0);
        assert_eq!(state.cell_at(5, 18), Cell::Filled(PieceKind::O));
        assert_eq!(state.take_last_event().unwrap().hard_drop_distance, Some(0));
    }

    #[test]
    fn test_line_clear_scores_and_compacts() {
        let mut state = o_first_session();
        // Bottom two rows full except the O's columns
        for y in 18..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 4 && x != 5 {
                    state.board_mut().set(x, y, Cell::Filled(PieceKind::L));
                }
            }
        }
        state.board_mut().set(0, 17, Cell::Filled(PieceKind::T));

        assert!(state.hard_drop());
        assert_eq!(state.lines(), 2);
        // 20 rows of hard drop + 300 for a double at level 1
        assert_eq!(state.score(), 40 + 300);
        assert_eq!(state.cell_at(0, 19), Cell::Filled(PieceKind::T));
        assert_eq!(state.board.cells().iter().filter(|c| c.is_filled()).count(), 1);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 2);
        assert_eq!(event.line_clear_score, 300);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = o_first_session();
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active.x, SPAWN_X + 1);
        assert!(state.apply_action(GameAction::SoftDropStart));
        assert!(state.soft_dropping);
        assert!(state.apply_action(GameAction::SoftDropStop));
        assert!(!state.soft_dropping);
        // O rotates in place
        assert!(state.apply_action(GameAction::RotateCw));
        assert_eq!(state.active.rotation(), Rotation::East);
        assert!(state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active.kind(), PieceKind::I);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let state = o_first_session();
        let snap = state.snapshot();

        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::O);
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(
            snap.next_queue.as_slice(),
            &[PieceKind::I, PieceKind::T, PieceKind::S]
        );
        assert_eq!(snap.level, 1);
        assert_eq!(snap.fall_interval_ms, 700);
        assert!(!snap.game_over);
    }
}
