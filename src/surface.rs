use std::io;
use std::time::Duration;

use crossterm::event::KeyEvent;
use crossterm::style::Color;

use crate::grid::Position;

/// What the engine needs from a terminal: absolute cursor moves, colors,
/// glyphs, screen modes, and a source of key presses. Output may be buffered
/// until `flush`.
pub trait Surface {
    fn clear(&mut self) -> io::Result<()>;
    fn move_to(&mut self, pos: Position) -> io::Result<()>;
    fn set_color(&mut self, color: Color) -> io::Result<()>;
    fn write_glyph(&mut self, glyph: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;

    fn enter_alternate_screen(&mut self) -> io::Result<()>;
    fn leave_alternate_screen(&mut self) -> io::Result<()>;
    fn hide_cursor(&mut self) -> io::Result<()>;
    fn show_cursor(&mut self) -> io::Result<()>;
    fn enable_raw_mode(&mut self) -> io::Result<()>;
    fn disable_raw_mode(&mut self) -> io::Result<()>;

    /// Waits up to `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;

    fn print_at(&mut self, pos: Position, ch: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.move_to(pos)?;
        self.write_glyph(ch.encode_utf8(&mut buf))
    }

    fn setup(&mut self) -> io::Result<()> {
        self.enter_alternate_screen()?;
        self.enable_raw_mode()?;
        self.hide_cursor()?;
        self.flush()
    }

    /// Attempts every step even if an earlier one fails, and reports the
    /// first failure.
    fn restore(&mut self) -> io::Result<()> {
        let raw = self.disable_raw_mode();
        let cursor = self.show_cursor();
        let screen = self.leave_alternate_screen();
        let flushed = self.flush();

        raw.and(cursor).and(screen).and(flushed)
    }
}
