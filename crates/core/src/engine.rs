//! Game engine module - the spawn, gravity, lock and clear cycle
//!
//! [`GameEngine`] owns one [`Grid`], one [`Randomizer`] and all counters for a
//! session. It is driven from outside by two serialized sources:
//!
//! - [`GameEngine::on_pacing_tick`], called every [`GameEngine::step_interval_ms`]
//! - [`GameEngine::apply`], called for each player [`Command`]
//!
//! Neither call blocks. After each one the caller drains [`GameEvent`]s with
//! [`GameEngine::drain_events`] to update its display and restart its clock
//! when the interval changes.
//!
//! When a piece lands the engine enters [`Phase::LineClearPending`] and the next
//! piece appears on the following pacing tick.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::grid::{Grid, Placement};
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::scoring;
use crate::snapshot::GameSnapshot;
use crate::types::{Command, GameEvent, Phase, PlaceOutcome, ShapeKind, Shift, Turn};

/// Complete rule state for one game session
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    config: EngineConfig,
    grid: Grid,
    randomizer: Randomizer<R>,
    next_queue: VecDeque<ShapeKind>,
    /// Held piece in the orientation it had when it was set aside
    held: Option<Piece>,
    /// Set by a hold, cleared by the next spawn
    hold_used: bool,
    score: u32,
    lines_cleared: u32,
    level: u32,
    step_interval_ms: u32,
    high_score: u32,
    phase: Phase,
    /// Phase to return to when a pause ends
    resume_phase: Phase,
    events: Vec<GameEvent>,
}

impl GameEngine<StdRng> {
    /// Create an engine from a validated config.
    ///
    /// The piece supply is seeded from `config.seed`, or from OS entropy
    /// when no seed is set.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let randomizer = match config.seed {
            Some(seed) => Randomizer::new(seed),
            None => Randomizer::from_entropy(),
        };
        Ok(Self::build(config, randomizer))
    }

    /// Standard rules with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(EngineConfig::seeded(seed), Randomizer::new(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine around any generator
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, Randomizer::with_rng(rng)))
    }

    fn build(config: EngineConfig, mut randomizer: Randomizer<R>) -> Self {
        let next_queue = (0..config.preview_depth)
            .map(|_| randomizer.next())
            .collect();

        Self {
            grid: Grid::new(config.rows, config.cols),
            randomizer,
            next_queue,
            held: None,
            hold_used: false,
            score: 0,
            lines_cleared: 0,
            level: 0,
            step_interval_ms: scoring::step_interval_ms(&config, 0),
            high_score: config.high_score,
            phase: Phase::Idle,
            resume_phase: Phase::Running,
            events: Vec::new(),
            config,
        }
    }

    // ---- lifecycle ----

    /// Begin play.
    ///
    /// From `Idle` the first piece spawns. From `GameOver` everything is
    /// cleared first. From `Paused` this resumes. Returns `false` if a game is
    /// already running.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Running | Phase::LineClearPending => return false,
            Phase::Paused => return self.pause(),
            Phase::GameOver => self.clear(),
            Phase::Idle => {}
        }

        info!(seed = ?self.config.seed, "game started");
        self.set_phase(Phase::Running);
        if !self.grid.has_current() {
            self.spawn();
        }
        true
    }

    /// Toggle between playing and paused
    pub fn pause(&mut self) -> bool {
        match self.phase {
            Phase::Running | Phase::LineClearPending => {
                self.resume_phase = self.phase;
                self.set_phase(Phase::Paused);
                true
            }
            Phase::Paused => {
                self.set_phase(self.resume_phase);
                true
            }
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Reset the board, counters and piece supply and return to `Idle`.
    ///
    /// The high score survives.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.randomizer.discard_bag();
        self.next_queue.clear();
        for _ in 0..self.config.preview_depth {
            let kind = self.randomizer.next();
            self.next_queue.push_back(kind);
        }
        self.held = None;
        self.hold_used = false;
        self.lines_cleared = 0;

        if self.score != 0 {
            self.score = 0;
            self.events.push(GameEvent::ScoreChanged(0));
        }
        if self.level != 0 {
            self.level = 0;
            self.events.push(GameEvent::LevelChanged(0));
        }
        self.update_interval();
        self.resume_phase = Phase::Running;
        self.set_phase(Phase::Idle);
        debug!("engine cleared");
    }

    /// Advance the game by one pacing tick.
    ///
    /// While running the piece falls one row. After a landing the next
    /// piece spawns. Other phases ignore the tick.
    pub fn on_pacing_tick(&mut self) {
        match self.phase {
            Phase::Running => {
                self.one_step_down();
            }
            Phase::LineClearPending => {
                self.set_phase(Phase::Running);
                self.spawn();
            }
            Phase::Idle | Phase::Paused | Phase::GameOver => {}
        }
    }

    // ---- piece movement ----
    //
    // These act only while a piece is falling in `Phase::Running`; in any
    // other phase they return `false` (or `0`) and change nothing.

    /// Gravity step: move the falling piece down one row, or land it.
    ///
    /// Returns `true` if the piece moved. Landing plants the piece, removes
    /// full rows, updates score, lines, level and interval, and defers the
    /// next spawn to the following tick.
    pub fn one_step_down(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if self.shift_down() {
            return true;
        }
        self.land();
        false
    }

    /// Move the falling piece one column. Rejected moves change nothing.
    pub fn move_sideways(&mut self, shift: Shift) -> bool {
        let Some(current) = self.playing_current() else {
            return false;
        };
        self.grid
            .test_and_place(current.piece, current.row, current.col + shift.delta())
            .is_ok()
    }

    /// Rotate the falling piece with a single-column wall kick.
    ///
    /// Clockwise uses [`Piece::rotate_right`]. If the rotated piece sticks out
    /// past a wall it is retried one column away from that wall; if that also
    /// fails, or if it hit something other than a wall, nothing changes.
    pub fn rotate(&mut self, turn: Turn) -> bool {
        let Some(current) = self.playing_current() else {
            return false;
        };
        let rotated = match turn {
            Turn::Clockwise => current.piece.rotate_right(),
            Turn::Counterclockwise => current.piece.rotate_left(),
        };

        let kick = match self.grid.test_and_place(rotated, current.row, current.col) {
            PlaceOutcome::Ok => return true,
            PlaceOutcome::Left => 1,
            PlaceOutcome::Right => -1,
            PlaceOutcome::Touch => return false,
        };
        self.grid
            .test_and_place(rotated, current.row, current.col + kick)
            .is_ok()
    }

    /// Hard drop: fall until landing, scoring a bonus per row descended.
    ///
    /// Returns the number of rows descended.
    pub fn drop_down(&mut self) -> u32 {
        if !self.is_playing() {
            return 0;
        }

        let mut rows = 0;
        while self.shift_down() {
            rows += 1;
        }

        let bonus = scoring::hard_drop_bonus(&self.config, rows);
        if bonus > 0 {
            self.add_score(bonus);
        }
        debug!(rows, bonus, "hard drop");
        self.land();
        rows
    }

    /// Soft drop: award the per-press bonus and take one gravity step
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if self.config.soft_drop_points > 0 {
            self.add_score(self.config.soft_drop_points);
        }
        self.one_step_down();
        true
    }

    /// Swap the falling piece with the held piece.
    ///
    /// With nothing held yet the head of the preview queue comes in instead.
    /// The incoming piece keeps its stored orientation and is tested at the
    /// current pivot; if it does not fit, nothing changes and the queue is not
    /// consumed.
    pub fn hold_current_piece(&mut self) -> bool {
        let Some(current) = self.playing_current() else {
            return false;
        };
        if self.config.hold_once_per_piece && self.hold_used {
            return false;
        }

        let incoming = match self.held {
            Some(piece) => piece,
            None => match self.next_queue.front() {
                Some(&kind) => Piece::create(kind),
                None => return false,
            },
        };
        if !self
            .grid
            .test_and_place(incoming, current.row, current.col)
            .is_ok()
        {
            return false;
        }

        if self.held.is_none() {
            self.next_piece();
        }
        self.held = Some(current.piece);
        self.hold_used = true;

        debug!(held = ?current.piece.kind(), incoming = ?incoming.kind(), "hold");
        self.events.push(GameEvent::PieceHeld(current.piece.kind()));
        true
    }

    /// Pop the head of the preview queue and append a fresh draw
    pub fn next_piece(&mut self) -> ShapeKind {
        let kind = self
            .next_queue
            .pop_front()
            .unwrap_or_else(|| self.randomizer.next());
        let drawn = self.randomizer.next();
        self.next_queue.push_back(drawn);
        kind
    }

    /// Apply a player command.
    ///
    /// Piece commands are only accepted while a piece is falling. Refused
    /// commands return `false` and queue a [`GameEvent::Rejected`].
    ///
    /// A hard drop counts as accepted even when the piece is already resting.
    pub fn apply(&mut self, command: Command) -> bool {
        let accepted = match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Reset => {
                self.clear();
                true
            }
            command if command.is_piece_command() && !self.is_playing() => false,
            Command::MoveLeft => self.move_sideways(Shift::Left),
            Command::MoveRight => self.move_sideways(Shift::Right),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => {
                self.drop_down();
                true
            }
            Command::RotateClockwise => self.rotate(Turn::Clockwise),
            Command::RotateCounterclockwise => self.rotate(Turn::Counterclockwise),
            Command::Hold => self.hold_current_piece(),
        };

        if !accepted {
            self.events.push(GameEvent::Rejected(command));
        }
        accepted
    }

    /// Take all notifications queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- internals ----

    fn is_playing(&self) -> bool {
        self.phase == Phase::Running && self.grid.has_current()
    }

    fn playing_current(&self) -> Option<Placement> {
        if self.phase == Phase::Running {
            self.grid.current()
        } else {
            None
        }
    }

    fn shift_down(&mut self) -> bool {
        let Some(current) = self.grid.current() else {
            return false;
        };
        self.grid
            .test_and_place(current.piece, current.row + 1, current.col)
            .is_ok()
    }

    fn spawn(&mut self) -> bool {
        let kind = self.next_piece();
        let row = self.config.spawn_row;
        let col = self.config.spawn_column();

        if self.grid.test_and_place(Piece::create(kind), row, col).is_ok() {
            self.hold_used = false;
            debug!(?kind, row, col, "spawned");
            true
        } else {
            debug!(?kind, "spawn blocked");
            self.game_over();
            false
        }
    }

    fn land(&mut self) {
        self.grid.plant();
        self.grid.clear_current();
        self.events.push(GameEvent::PieceLanded);

        let removed = self.grid.winnow();
        if removed > 0 {
            self.lines_cleared += removed as u32;
            let level = scoring::level_for_lines(&self.config, self.lines_cleared);
            let award = scoring::line_clear_score(&self.config, removed, level);
            debug!(removed, award, "rows cleared");

            self.events.push(GameEvent::LinesCleared(removed as u32));
            self.add_score(award);

            if level != self.level {
                self.level = level;
                info!(level, "level up");
                self.events.push(GameEvent::LevelChanged(level));
                self.update_interval();
            }
        }

        self.set_phase(Phase::LineClearPending);
    }

    fn game_over(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        info!(score = self.score, high_score = self.high_score, "game over");
        self.set_phase(Phase::GameOver);
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
            high_score: self.high_score,
        });
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    fn update_interval(&mut self) {
        let interval = scoring::step_interval_ms(&self.config, self.level);
        if interval != self.step_interval_ms {
            self.step_interval_ms = interval;
            self.events.push(GameEvent::IntervalChanged(interval));
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = self.phase.as_str(), to = phase.as_str(), "phase");
            self.phase = phase;
            self.events.push(GameEvent::StateChanged(phase));
        }
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_lines_cleared(&mut self, lines: u32) {
        self.lines_cleared = lines;
        self.level = scoring::level_for_lines(&self.config, lines);
        self.step_interval_ms = scoring::step_interval_ms(&self.config, self.level);
    }
}

impl<R> GameEngine<R> {
    // ---- queries ----

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Stored kind at `(row, col)`; the falling piece is not included.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn cell_at(&self, row: usize, col: usize) -> ShapeKind {
        self.grid.cell_at(row, col)
    }

    pub fn current_piece(&self) -> Piece {
        self.grid.current_piece()
    }

    pub fn current_row(&self) -> i32 {
        self.grid.current_row()
    }

    pub fn current_column(&self) -> i32 {
        self.grid.current_column()
    }

    pub fn current(&self) -> Option<Placement> {
        self.grid.current()
    }

    /// Pivot row where the falling piece would land
    pub fn ghost_row(&self) -> Option<i32> {
        self.grid.landing_row()
    }

    /// Upcoming kinds, next first
    pub fn next_queue(&self) -> &VecDeque<ShapeKind> {
        &self.next_queue
    }

    pub fn held_kind(&self) -> Option<ShapeKind> {
        self.held.map(|p| p.kind())
    }

    pub fn held_piece(&self) -> Option<Piece> {
        self.held
    }

    /// Whether a hold is allowed right now
    pub fn can_hold(&self) -> bool {
        self.grid.has_current() && !(self.config.hold_once_per_piece && self.hold_used)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Interval the pacing clock should use for the next tick
    pub fn step_interval_ms(&self) -> u32 {
        self.step_interval_ms
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Write the presentation view into `out`, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.grid.rows();
        out.cols = self.grid.cols();
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.current = self.grid.current();
        out.ghost_row = self.grid.landing_row();
        out.next_queue.clear();
        out.next_queue.extend(self.next_queue.iter().copied());
        out.held = self.held_kind();
        out.can_hold = self.can_hold();
        out.score = self.score;
        out.level = self.level;
        out.lines_cleared = self.lines_cleared;
        out.step_interval_ms = self.step_interval_ms;
        out.high_score = self.high_score;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }
}

impl Default for GameEngine<StdRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(seed: u64) -> GameEngine {
        let mut engine = GameEngine::with_seed(seed);
        assert!(engine.start());
        engine.drain_events();
        engine
    }

    /// Fill `row` except the columns in `gap`
    fn fill_row_except(grid: &mut Grid, row: usize, gap: std::ops::RangeInclusive<usize>) {
        for col in 0..grid.cols() {
            if !gap.contains(&col) {
                grid.set_cell(row, col, ShapeKind::Z);
            }
        }
    }

    fn place(engine: &mut GameEngine, piece: Piece, row: i32, col: i32) {
        assert!(engine.grid_mut().test_and_place(piece, row, col).is_ok());
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = GameEngine::with_seed(1);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 0);
        assert_eq!(engine.lines_cleared(), 0);
        assert_eq!(engine.step_interval_ms(), 750);
        assert_eq!(engine.next_queue().len(), 5);
        assert_eq!(engine.held_kind(), None);
        assert!(!engine.grid().has_current());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            lines_per_level: 0,
            ..EngineConfig::seeded(1)
        };
        assert_eq!(
            GameEngine::new(config).err(),
            Some(ConfigError::ZeroLinesPerLevel)
        );
    }

    #[test]
    fn test_start_spawns_preview_head() {
        let mut engine = GameEngine::with_seed(3);
        let head = engine.next_queue()[0];
        let second = engine.next_queue()[1];

        assert!(engine.start());
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.current_piece().kind(), head);
        assert_eq!(engine.current_row(), 1);
        assert_eq!(engine.current_column(), 5);
        assert_eq!(engine.next_queue()[0], second);
        assert_eq!(engine.next_queue().len(), 5);
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::StateChanged(Phase::Running)]
        );
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut engine = running(1);
        assert!(!engine.apply(Command::Start));
        assert_eq!(
            engine.drain_events(),
            vec![GameEvent::Rejected(Command::Start)]
        );
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = running(42);
        let mut b = running(42);
        for _ in 0..20 {
            a.apply(Command::HardDrop);
            b.apply(Command::HardDrop);
            a.on_pacing_tick();
            b.on_pacing_tick();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut engine = running(1);
        let row = engine.current_row();
        engine.on_pacing_tick();
        assert_eq!(engine.current_row(), row + 1);
    }

    #[test]
    fn test_single_line_clear_scores_100() {
        let mut engine = running(1);
        fill_row_except(engine.grid_mut(), 21, 3..=6);
        place(&mut engine, Piece::create(ShapeKind::I), 21, 5);

        assert!(!engine.one_step_down());
        assert_eq!(engine.lines_cleared(), 1);
        assert_eq!(engine.level(), 0);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.phase(), Phase::LineClearPending);
        assert!(engine.grid().cells().iter().all(|c| c.is_empty()));
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::PieceLanded,
                GameEvent::LinesCleared(1),
                GameEvent::ScoreChanged(100),
                GameEvent::StateChanged(Phase::LineClearPending),
            ]
        );
    }

    #[test]
    fn test_spawn_waits_for_next_tick() {
        let mut engine = running(1);
        place(&mut engine, Piece::create(ShapeKind::O), 20, 4);
        assert!(!engine.one_step_down());
        assert!(!engine.grid().has_current());
        assert_eq!(engine.phase(), Phase::LineClearPending);

        let head = engine.next_queue()[0];
        engine.on_pacing_tick();
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.current_piece().kind(), head);
        assert_eq!(engine.current_row(), 1);
    }

    #[test]
    fn test_tenth_line_raises_level_and_speed() {
        let mut engine = running(1);
        engine.set_lines_cleared(9);
        fill_row_except(engine.grid_mut(), 21, 3..=6);
        place(&mut engine, Piece::create(ShapeKind::I), 21, 5);

        engine.one_step_down();
        assert_eq!(engine.lines_cleared(), 10);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.step_interval_ms(), 656);
        // Scored at the new level
        assert_eq!(engine.score(), 200);

        let events = engine.drain_events();
        assert!(events.contains(&GameEvent::LevelChanged(1)));
        assert!(events.contains(&GameEvent::IntervalChanged(656)));
    }

    #[test]
    fn test_tetris_scores_800() {
        let mut engine = running(1);
        for row in 18..22 {
            fill_row_except(engine.grid_mut(), row, 0..=0);
        }
        // Vertical I in column 0, covering rows 18..=21
        place(&mut engine, Piece::create(ShapeKind::I).rotate_right(), 20, 0);

        assert!(!engine.one_step_down());
        assert_eq!(engine.lines_cleared(), 4);
        assert_eq!(engine.score(), 800);
    }

    #[test]
    fn test_hard_drop_from_spawn_row() {
        let mut engine = running(1);
        place(&mut engine, Piece::create(ShapeKind::O), 1, 4);

        assert_eq!(engine.drop_down(), 19);
        assert_eq!(engine.score(), 38);
        assert_eq!(engine.cell_at(20, 4), ShapeKind::O);
        assert_eq!(engine.cell_at(21, 5), ShapeKind::O);
        assert_eq!(engine.phase(), Phase::LineClearPending);
    }

    #[test]
    fn test_hard_drop_bonus_adds_to_line_score() {
        let mut engine = running(1);
        fill_row_except(engine.grid_mut(), 21, 3..=6);
        place(&mut engine, Piece::create(ShapeKind::I), 11, 5);

        assert_eq!(engine.drop_down(), 10);
        assert_eq!(engine.score(), 20 + 100);
    }

    #[test]
    fn test_soft_drop_awards_per_press() {
        let mut engine = running(1);
        let row = engine.current_row();
        assert!(engine.apply(Command::SoftDrop));
        assert!(engine.apply(Command::SoftDrop));
        assert_eq!(engine.score(), 2);
        assert_eq!(engine.current_row(), row + 2);
    }

    #[test]
    fn test_move_sideways_stops_at_wall() {
        let mut engine = running(1);
        place(&mut engine, Piece::create(ShapeKind::O), 10, 4);

        let mut moves = 0;
        while engine.move_sideways(Shift::Left) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(engine.current_column(), 0);
        assert!(!engine.apply(Command::MoveLeft));
        assert_eq!(engine.current_column(), 0);
    }

    #[test]
    fn test_rotate_kicks_off_left_wall() {
        let mut engine = running(1);
        // Vertical I at column 0; turning it flat needs two cells left of the pivot.
        let vertical = Piece::create(ShapeKind::I).rotate_right();
        place(&mut engine, vertical, 10, 0);

        // (c,r) -> (r,-c) maps the column offsets back to -2..=1 on row 0.
        // Column -2 is left of the wall, so the kick moves to column 1,
        // which still leaves a cell at -1 and the rotation is rejected.
        assert!(!engine.rotate(Turn::Counterclockwise));
        assert_eq!(engine.current_piece(), vertical);
        assert_eq!(engine.current_column(), 0);

        place(&mut engine, vertical, 10, 1);
        assert!(engine.rotate(Turn::Counterclockwise));
        assert_eq!(engine.current_column(), 2);
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let mut engine = running(1);
        // T pointing right with pivot on the right wall; turning it adds a cell at col+1.
        let t = Piece::create(ShapeKind::T).rotate_left();
        assert_eq!(t.max_col(), 0);
        place(&mut engine, t, 10, 9);

        assert!(engine.rotate(Turn::Clockwise));
        assert_eq!(engine.current_column(), 8);
        assert_eq!(engine.current_piece(), t.rotate_right());
    }

    #[test]
    fn test_rotate_blocked_by_stack_is_rejected() {
        let mut engine = running(1);
        let t = Piece::create(ShapeKind::T);
        place(&mut engine, t, 10, 5);
        engine.grid_mut().set_cell(11, 5, ShapeKind::S);

        // Both turns put a cell at (11, 5).
        assert!(!engine.rotate(Turn::Clockwise));
        assert!(!engine.rotate(Turn::Counterclockwise));
        assert_eq!(engine.current_piece(), t);
    }

    #[test]
    fn test_hold_takes_preview_head_and_keeps_orientation() {
        let mut engine = running(1);
        let rotated_t = Piece::create(ShapeKind::T).rotate_right();
        place(&mut engine, rotated_t, 10, 5);
        let head = engine.next_queue()[0];
        let second = engine.next_queue()[1];

        assert!(engine.apply(Command::Hold));
        assert_eq!(engine.held_piece(), Some(rotated_t));
        assert_eq!(engine.held_kind(), Some(ShapeKind::T));
        assert_eq!(engine.current_piece(), Piece::create(head));
        assert_eq!((engine.current_row(), engine.current_column()), (10, 5));
        assert_eq!(engine.next_queue()[0], second);
        assert_eq!(engine.next_queue().len(), 5);
        assert!(engine
            .drain_events()
            .contains(&GameEvent::PieceHeld(ShapeKind::T)));
    }

    #[test]
    fn test_hold_swaps_with_held_piece() {
        let mut engine = running(1);
        let t = Piece::create(ShapeKind::T).rotate_left();
        place(&mut engine, t, 10, 5);
        assert!(engine.hold_current_piece());
        let incoming = engine.current_piece();
        let queue: Vec<_> = engine.next_queue().iter().copied().collect();

        assert!(engine.hold_current_piece());
        assert_eq!(engine.current_piece(), t);
        assert_eq!(engine.held_piece(), Some(incoming));
        // Queue untouched by a swap with the held piece
        assert_eq!(engine.next_queue().iter().copied().collect::<Vec<_>>(), queue);
    }

    #[test]
    fn test_blocked_hold_changes_nothing() {
        let mut engine = running(1);
        // Vertical I; every spawn shape has a cell beside the pivot column.
        let vertical = Piece::create(ShapeKind::I).rotate_right();
        place(&mut engine, vertical, 10, 5);
        for row in 0..22 {
            for col in 0..10 {
                if col != 5 || !(8..=11).contains(&row) {
                    engine.grid_mut().set_cell(row, col, ShapeKind::Z);
                }
            }
        }
        let before = engine.snapshot();

        assert!(!engine.apply(Command::Hold));
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.held_kind(), None);
    }

    #[test]
    fn test_hold_once_per_piece_switch() {
        let config = EngineConfig {
            hold_once_per_piece: true,
            ..EngineConfig::seeded(1)
        };
        let mut engine = GameEngine::new(config).unwrap();
        engine.start();
        place(&mut engine, Piece::create(ShapeKind::T), 10, 5);

        assert!(engine.hold_current_piece());
        assert!(!engine.can_hold());
        assert!(!engine.hold_current_piece());

        engine.drop_down();
        engine.on_pacing_tick();
        assert!(engine.can_hold());
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let config = EngineConfig {
            high_score: 5,
            ..EngineConfig::seeded(1)
        };
        let mut engine = GameEngine::new(config).unwrap();
        for row in 0..4 {
            fill_row_except(engine.grid_mut(), row, 9..=9);
        }

        assert!(engine.start());
        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::StateChanged(Phase::Running),
                GameEvent::StateChanged(Phase::GameOver),
                GameEvent::GameOver {
                    final_score: 0,
                    high_score: 5
                },
            ]
        );

        // Ticks and piece commands do nothing after game over
        engine.on_pacing_tick();
        assert!(!engine.apply(Command::MoveLeft));
        assert_eq!(engine.phase(), Phase::GameOver);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut engine = running(1);
        place(&mut engine, Piece::create(ShapeKind::O), 1, 4);
        engine.drop_down();
        for row in 0..4 {
            fill_row_except(engine.grid_mut(), row, 9..=9);
        }
        engine.on_pacing_tick();

        assert_eq!(engine.phase(), Phase::GameOver);
        assert_eq!(engine.high_score(), 38);
        assert!(engine.drain_events().contains(&GameEvent::GameOver {
            final_score: 38,
            high_score: 38
        }));
    }

    #[test]
    fn test_start_after_game_over_clears() {
        let mut engine = running(1);
        place(&mut engine, Piece::create(ShapeKind::O), 1, 4);
        engine.drop_down();
        for row in 0..4 {
            fill_row_except(engine.grid_mut(), row, 9..=9);
        }
        engine.on_pacing_tick();
        assert_eq!(engine.phase(), Phase::GameOver);

        assert!(engine.start());
        assert_eq!(engine.phase(), Phase::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.high_score(), 38);
        assert_eq!(engine.current_row(), 1);
        let stored = engine.grid().cells().iter().filter(|c| !c.is_empty()).count();
        assert_eq!(stored, 0);
    }

    #[test]
    fn test_pause_toggles_and_stops_gravity() {
        let mut engine = running(1);
        let row = engine.current_row();

        assert!(engine.apply(Command::Pause));
        assert_eq!(engine.phase(), Phase::Paused);
        engine.on_pacing_tick();
        assert_eq!(engine.current_row(), row);
        assert!(!engine.apply(Command::MoveRight));

        assert!(engine.apply(Command::Pause));
        assert_eq!(engine.phase(), Phase::Running);
        engine.on_pacing_tick();
        assert_eq!(engine.current_row(), row + 1);
    }

    #[test]
    fn test_direct_moves_do_nothing_while_paused() {
        let mut engine = running(1);
        place(&mut engine, Piece::create(ShapeKind::T), 10, 5);
        assert!(engine.pause());
        engine.drain_events();
        let before = engine.snapshot();

        assert!(!engine.one_step_down());
        assert!(!engine.move_sideways(Shift::Left));
        assert!(!engine.move_sideways(Shift::Right));
        assert!(!engine.rotate(Turn::Clockwise));
        assert!(!engine.rotate(Turn::Counterclockwise));
        assert_eq!(engine.drop_down(), 0);
        assert!(!engine.soft_drop());
        assert!(!engine.hold_current_piece());

        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.phase(), Phase::Paused);
        assert!(engine.drain_events().is_empty());

        // Resuming still returns to the paused phase
        assert!(engine.pause());
        assert_eq!(engine.phase(), Phase::Running);
        assert!(engine.one_step_down());
    }

    #[test]
    fn test_direct_moves_do_nothing_before_start() {
        let mut engine = GameEngine::with_seed(1);
        let before = engine.snapshot();

        assert!(!engine.one_step_down());
        assert_eq!(engine.drop_down(), 0);
        assert!(!engine.soft_drop());
        assert!(!engine.hold_current_piece());
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_pause_restores_pending_spawn() {
        let mut engine = running(1);
        engine.drop_down();
        assert_eq!(engine.phase(), Phase::LineClearPending);

        engine.pause();
        assert!(engine.start());
        assert_eq!(engine.phase(), Phase::LineClearPending);
        engine.on_pacing_tick();
        assert!(engine.grid().has_current());
    }

    #[test]
    fn test_pause_in_idle_is_rejected() {
        let mut engine = GameEngine::with_seed(1);
        assert!(!engine.apply(Command::Pause));
        assert!(!engine.apply(Command::HardDrop));
        assert_eq!(engine.phase(), Phase::Idle);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut engine = running(1);
        engine.apply(Command::HardDrop);
        engine.on_pacing_tick();
        engine.apply(Command::Hold);
        assert!(engine.score() > 0);

        assert!(engine.apply(Command::Reset));
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.held_kind(), None);
        assert_eq!(engine.next_queue().len(), 5);
        assert_eq!(engine.step_interval_ms(), 750);
        assert!(!engine.grid().has_current());
        assert!(engine.grid().cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_next_piece_rotates_queue() {
        let mut engine = GameEngine::with_seed(9);
        let before: Vec<_> = engine.next_queue().iter().copied().collect();
        let popped = engine.next_piece();

        assert_eq!(popped, before[0]);
        let after: Vec<_> = engine.next_queue().iter().copied().collect();
        assert_eq!(&after[..4], &before[1..]);
        assert_eq!(after.len(), 5);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = running(2);
        engine.apply(Command::SoftDrop);
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.rows, 22);
        assert_eq!(snapshot.cols, 10);
        assert_eq!(snapshot.cells.len(), 220);
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.phase, Phase::Running);
        assert_eq!(snapshot.current, engine.current());
        assert_eq!(snapshot.ghost_row, engine.ghost_row());
        assert_eq!(snapshot.next_queue.len(), 5);
    }
}
