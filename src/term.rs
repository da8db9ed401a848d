use std::io::{self, Stdout, Write, stdout};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::grid::Position;
use crate::surface::Surface;

/// Crossterm-backed surface. Drawing commands are queued and only hit the
/// terminal on `flush`.
pub struct TermManager {
    stdout: Stdout,
    raw: bool,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), raw: false }
    }
}

impl Default for TermManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TermManager {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))
    }

    fn move_to(&mut self, pos: Position) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.x, pos.y))
    }

    fn set_color(&mut self, color: Color) -> io::Result<()> {
        queue!(self.stdout, style::SetForegroundColor(color))
    }

    fn write_glyph(&mut self, glyph: &str) -> io::Result<()> {
        queue!(self.stdout, style::Print(glyph))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn enter_alternate_screen(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)
    }

    fn leave_alternate_screen(&mut self) -> io::Result<()> {
        execute!(self.stdout, style::ResetColor, LeaveAlternateScreen)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show)
    }

    fn enable_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !poll(timeout)? {
            return Ok(None);
        }

        match read()? {
            Event::Key(ev) if ev.kind != KeyEventKind::Release => Ok(Some(ev)),
            _ => Ok(None),
        }
    }
}
