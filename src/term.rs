//! Terminal front end: turns a [`GameSnapshot`] into crossterm commands.
//!
//! Layout is computed by pure functions ([`board_glyph`], [`side_panel`]) so it
//! can be unit-tested; [`TerminalRenderer`] only owns the terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::core::GameSnapshot;
use crate::types::{Phase, ShapeKind};

/// One board cell as two terminal columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub text: &'static str,
    pub color: Option<Color>,
}

pub fn kind_color(kind: ShapeKind) -> Option<Color> {
    match kind {
        ShapeKind::Empty => None,
        ShapeKind::O => Some(Color::Yellow),
        ShapeKind::I => Some(Color::Cyan),
        ShapeKind::T => Some(Color::Magenta),
        ShapeKind::L => Some(Color::DarkYellow),
        ShapeKind::J => Some(Color::Blue),
        ShapeKind::S => Some(Color::Green),
        ShapeKind::Z => Some(Color::Red),
    }
}

/// Glyph for board cell `(row, col)`: block, ghost or empty
pub fn board_glyph(snapshot: &GameSnapshot, row: usize, col: usize) -> Glyph {
    let kind = snapshot.visible_cell(row, col);
    if !kind.is_empty() {
        Glyph {
            text: "[]",
            color: kind_color(kind),
        }
    } else if snapshot.is_ghost_cell(row, col) {
        Glyph {
            text: "::",
            color: Some(Color::DarkGrey),
        }
    } else {
        Glyph {
            text: " .",
            color: None,
        }
    }
}

/// Text lines shown to the right of the board
pub fn side_panel(snapshot: &GameSnapshot) -> Vec<String> {
    let mut lines = vec![
        format!("SCORE  {}", snapshot.score),
        format!("HIGH   {}", snapshot.high_score),
        format!("LEVEL  {}", snapshot.level),
        format!("LINES  {}", snapshot.lines_cleared),
        String::new(),
    ];

    let next: Vec<_> = snapshot
        .next_queue
        .iter()
        .map(|k| k.as_str().to_uppercase())
        .collect();
    lines.push(format!("NEXT   {}", next.join(" ")));

    let hold = snapshot
        .held
        .map_or_else(|| "-".to_string(), |k| k.as_str().to_uppercase());
    lines.push(format!("HOLD   {hold}"));
    lines.push(String::new());

    let status = match snapshot.phase {
        Phase::Idle => "ENTER to start",
        Phase::Paused => "PAUSED (P to resume)",
        Phase::GameOver => "GAME OVER (ENTER to restart)",
        Phase::Running | Phase::LineClearPending => "",
    };
    lines.push(status.to_string());
    lines
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw the whole frame
    pub fn draw(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        self.buf.clear();
        encode_frame_into(snapshot, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_frame_into(snapshot: &GameSnapshot, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let panel = side_panel(snapshot);
    let panel_col = (snapshot.cols * 2 + 6) as u16;

    for row in 0..snapshot.rows {
        out.queue(cursor::MoveTo(0, row as u16))?;
        out.queue(Print("<!"))?;
        for col in 0..snapshot.cols {
            let glyph = board_glyph(snapshot, row, col);
            match glyph.color {
                Some(color) => {
                    out.queue(SetForegroundColor(color))?;
                    out.queue(Print(glyph.text))?;
                    out.queue(ResetColor)?;
                }
                None => {
                    out.queue(Print(glyph.text))?;
                }
            }
        }
        out.queue(Print("!>"))?;

        if let Some(line) = panel.get(row) {
            out.queue(cursor::MoveTo(panel_col, row as u16))?;
            out.queue(Print(line))?;
        }
    }

    out.queue(cursor::MoveTo(0, snapshot.rows as u16))?;
    out.queue(Print("<!"))?;
    out.queue(Print("=".repeat(snapshot.cols * 2)))?;
    out.queue(Print("!>"))?;
    Ok(())
}
