//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing and naming, so they
//! can be shared between the rule engine, the input layer and any presentation.
//!
//! # Board Dimensions
//!
//! - **Rows**: 22 (indexed 0-21, row grows downward)
//! - **Columns**: 10 (indexed 0-9, column grows rightward)
//! - **Spawn origin**: row 1, column `cols / 2`
//!
//! # Pacing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `STARTING_INTERVAL_MS` | 750 | Gravity step at level 0 |
//! | `INTERVAL_DECAY` | 0.875 | Step multiplier per level |
//! | `MIN_INTERVAL_MS` | 20 | Fastest allowed step |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, ShapeKind, BOARD_COLS, BOARD_ROWS};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//! assert!(ShapeKind::Empty.is_empty());
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_ROWS, 22);
//! assert_eq!(BOARD_COLS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Rows of the standard playfield (two rows above the visible 20)
pub const BOARD_ROWS: usize = 22;

/// Columns of the standard playfield
pub const BOARD_COLS: usize = 10;

/// Row at which a new piece's pivot is placed
pub const SPAWN_ROW: i32 = 1;

/// Number of upcoming kinds shown in the preview queue
pub const PREVIEW_DEPTH: usize = 5;

/// Gravity interval at level 0
pub const STARTING_INTERVAL_MS: u32 = 750;

/// Floor for the gravity interval
pub const MIN_INTERVAL_MS: u32 = 20;

/// Interval multiplier applied once per level
pub const INTERVAL_DECAY: f64 = 0.875;

/// Lines that must be cleared to gain one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base award for clearing 1, 2, 3 or 4 rows with one piece.
///
/// Multiplied by `(level + 1)`.
pub const LINE_SCORES: [u32; 4] = [100, 300, 500, 800];

/// Points per soft-drop command
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row descended during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Kind of a piece, or `Empty` for an unoccupied cell.
///
/// Colors follow the usual guideline assignment:
/// - **O**: yellow, **I**: cyan, **T**: purple, **L**: orange
/// - **J**: blue, **S**: green, **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Empty,
    O,
    I,
    T,
    L,
    J,
    S,
    Z,
}

/// The seven kinds that make up one bag
pub const ALL_SHAPES: [ShapeKind; 7] = [
    ShapeKind::O,
    ShapeKind::I,
    ShapeKind::T,
    ShapeKind::L,
    ShapeKind::J,
    ShapeKind::S,
    ShapeKind::Z,
];

impl ShapeKind {
    pub fn is_empty(self) -> bool {
        self == ShapeKind::Empty
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("empty"), Some(ShapeKind::Empty));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" | "n" => Some(ShapeKind::Empty),
            "o" => Some(ShapeKind::O),
            "i" => Some(ShapeKind::I),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Empty => "empty",
            ShapeKind::O => "o",
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Result of testing a piece at a position on a grid.
///
/// `Left` and `Right` are reported before `Touch` so that a rotation next to a
/// wall can tell "shift and retry" apart from "blocked".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceOutcome {
    /// Placed; the grid now tracks the piece at the new position
    Ok,
    /// Overlaps a filled cell or leaves the grid vertically
    Touch,
    /// A cell lies left of column 0
    Left,
    /// A cell lies right of the last column
    Right,
}

impl PlaceOutcome {
    pub fn is_ok(self) -> bool {
        self == PlaceOutcome::Ok
    }
}

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Cleared and waiting for `start`
    #[default]
    Idle,
    /// A piece is falling
    Running,
    /// Pacing stopped by the player
    Paused,
    /// A piece has landed; the next one spawns on the next pacing tick
    LineClearPending,
    /// Spawn failed; only `start` or `reset` leave this phase
    GameOver,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::LineClearPending => "lineClearPending",
            Phase::GameOver => "gameOver",
        }
    }

    /// Whether the pacing clock should be delivering ticks
    pub fn is_ticking(self) -> bool {
        matches!(self, Phase::Running | Phase::LineClearPending)
    }
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    pub fn delta(self) -> i32 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Clockwise,
    Counterclockwise,
}

/// Abstract commands a presentation layer sends to the engine.
///
/// These are independent of any input device; see the input crate for a
/// terminal key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Begin a game, or resume a paused one
    Start,
    /// Toggle pause
    Pause,
    /// Clear everything back to idle
    Reset,
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Move piece one row down (with soft drop scoring)
    SoftDrop,
    /// Drop piece until it lands
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateClockwise,
    /// Rotate piece 90° counter-clockwise
    RotateCounterclockwise,
    /// Swap the falling piece with the held one
    Hold,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateCw"), Some(Command::RotateClockwise));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "pause" => Some(Command::Pause),
            "reset" => Some(Command::Reset),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotateclockwise" | "rotatecw" => Some(Command::RotateClockwise),
            "rotatecounterclockwise" | "rotateccw" => Some(Command::RotateCounterclockwise),
            "hold" => Some(Command::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Reset => "reset",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateClockwise => "rotateClockwise",
            Command::RotateCounterclockwise => "rotateCounterclockwise",
            Command::Hold => "hold",
        }
    }

    /// Whether this command acts on the falling piece
    pub fn is_piece_command(self) -> bool {
        !matches!(self, Command::Start | Command::Pause | Command::Reset)
    }
}

/// Notification emitted by the engine after a command or tick completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The falling piece was planted into the grid
    PieceLanded,
    /// Rows removed by the last landing
    LinesCleared(u32),
    LevelChanged(u32),
    ScoreChanged(u32),
    /// The pacing clock must be restarted at this interval
    IntervalChanged(u32),
    /// Spawn failed. `high_score` already includes this round.
    GameOver { final_score: u32, high_score: u32 },
    StateChanged(Phase),
    /// A piece went into the hold slot
    PieceHeld(ShapeKind),
    /// A command was refused; state is unchanged
    Rejected(Command),
}
