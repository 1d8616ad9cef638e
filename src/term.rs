use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use crate::config::BoardConfig;
use crate::input::KeySource;
use crate::render::{Font, Surface};
use crate::{GameError, Result};

const UPPER_HALF: char = '▀';
const LOWER_HALF: char = '▄';

/// Terminal-backed drawing surface.
///
/// Pixels are bucketed into board cells; each terminal character shows two cell
/// rows using half-block glyphs. Text is overlaid after the cells. The terminal is
/// put into raw mode on creation and restored when the surface is dropped.
pub struct TermSurface {
    width: u32,
    height: u32,
    cell_width: u32,
    cell_height: u32,
    columns: u16,
    rows: u16,
    origin: (u16, u16),
    bordered: bool,
    stdout: Stdout,
    pixels: Vec<Option<Color>>,
    texts: Vec<Text>,
}

struct Text {
    column: u16,
    row: u16,
    content: String,
    color: Color,
}

impl TermSurface {
    pub fn new(board: &BoardConfig) -> Result<Self> {
        let cell_width = board.cell_width.max(1);
        let cell_height = board.cell_height.max(1);
        let columns = ceil_div(board.width, cell_width);
        let cell_rows = ceil_div(board.height, cell_height);
        let term_rows = ceil_div(cell_rows, 2);

        let available = terminal::size()?;
        if columns > available.0 as u32 || term_rows > available.1 as u32 {
            return Err(GameError::TerminalTooSmall {
                needed: (columns.min(u16::MAX as u32) as u16, term_rows.min(u16::MAX as u32) as u16),
                available,
            });
        }

        let (columns, rows) = (columns as u16, cell_rows as u16);
        let term_rows = term_rows as u16;
        let bordered = columns + 2 <= available.0 && term_rows + 2 <= available.1;
        let origin = ((available.0 - columns) / 2, (available.1 - term_rows) / 2);

        let mut surface = TermSurface {
            width: board.width,
            height: board.height,
            cell_width,
            cell_height,
            columns,
            rows,
            origin,
            bordered,
            stdout: stdout(),
            pixels: vec![None; columns as usize * rows as usize],
            texts: vec![],
        };
        surface.setup()?;
        Ok(surface)
    }

    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        if self.bordered {
            self.draw_borders()?;
        }
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    fn draw_borders(&mut self) -> Result<()> {
        let (left, top) = (self.origin.0 - 1, self.origin.1 - 1);
        let width = self.columns + 2;
        let height = self.term_rows() + 2;
        let (right, bottom) = (left + width - 1, top + height - 1);

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, top), style::Print(ch))?;
            queue!(self.stdout, cursor::MoveTo(x, bottom), style::Print(ch))?;
        }

        for y in top + 1..bottom {
            queue!(self.stdout, cursor::MoveTo(left, y), style::Print('|'))?;
            queue!(self.stdout, cursor::MoveTo(right, y), style::Print('|'))?;
        }

        self.stdout.flush()?;
        Ok(())
    }

    fn term_rows(&self) -> u16 {
        (self.rows + 1) / 2
    }

    /// Range of board cells covered by `[start, start + len)` pixels, clipped to `limit`.
    fn cell_span(start: i32, len: u32, cell: u32, limit: u16) -> std::ops::Range<u16> {
        let end = start as i64 + len as i64;
        if len == 0 || end <= 0 {
            return 0..0;
        }
        let first = (start.max(0) as i64 / cell as i64).min(limit as i64);
        let last = ((end - 1) / cell as i64 + 1).min(limit as i64);
        first as u16..last as u16
    }
}

impl Surface for TermSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = None);
        self.texts.clear();
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let columns = Self::cell_span(x, width, self.cell_width, self.columns);
        let rows = Self::cell_span(y, height, self.cell_height, self.rows);

        for row in rows {
            for column in columns.clone() {
                self.pixels[row as usize * self.columns as usize + column as usize] = Some(color);
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, font: Font) {
        let column = (x.max(0) as u32 / self.cell_width).min(self.columns as u32) as u16;
        let row = (y.max(0) as u32 / (self.cell_height * 2)).min(self.term_rows().saturating_sub(1) as u32) as u16;
        let room = (self.columns - column) as usize;

        self.texts.push(Text {
            column,
            row,
            content: text.chars().take(room).collect(),
            color: font.color,
        });
    }

    fn present(&mut self) -> Result<()> {
        let (ox, oy) = self.origin;
        let term_rows = self.term_rows();
        let (columns, rows, pixels) = (self.columns, self.rows, &self.pixels);
        let stdout = &mut self.stdout;

        for term_row in 0..term_rows {
            queue!(stdout, cursor::MoveTo(ox, oy + term_row))?;
            for column in 0..columns {
                let top = pixel_at(pixels, columns, rows, column, term_row * 2);
                let bottom = pixel_at(pixels, columns, rows, column, term_row * 2 + 1);

                let (ch, fg, bg) = match (top, bottom) {
                    (None, None) => (' ', Color::Reset, Color::Reset),
                    (Some(t), None) => (UPPER_HALF, t, Color::Reset),
                    (None, Some(b)) => (LOWER_HALF, b, Color::Reset),
                    (Some(t), Some(b)) => (UPPER_HALF, t, b),
                };
                queue!(stdout, style::SetForegroundColor(fg), style::SetBackgroundColor(bg), style::Print(ch))?;
            }
        }

        for text in &self.texts {
            queue!(
                stdout,
                cursor::MoveTo(ox + text.column, oy + text.row),
                style::SetForegroundColor(text.color),
                style::SetBackgroundColor(Color::Reset),
                style::Print(&text.content)
            )?;
        }

        queue!(stdout, style::ResetColor)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermSurface {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("failed to restore terminal: {}", e);
        }
    }
}

/// Keyboard events straight from the terminal.
pub struct TermKeys;

impl KeySource for TermKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout)? {
            if let Event::Key(ev) = read()? {
                return Ok(Some(ev));
            }
        }
        Ok(None)
    }

    fn wait_key(&mut self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }
}

fn pixel_at(pixels: &[Option<Color>], columns: u16, rows: u16, column: u16, row: u16) -> Option<Color> {
    if row >= rows {
        return None;
    }
    pixels[row as usize * columns as usize + column as usize]
}

fn ceil_div(a: u32, b: u32) -> u32 {
    a / b + (a % b != 0) as u32
}
