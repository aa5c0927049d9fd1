//! crossterm front end: diffed maze drawing and blocking key reads.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use unicode_width::UnicodeWidthStr;

use crate::console::{Input, Render};
use crate::game::{GameState, Glyph};
use crate::grid::Pos;

const CELL_W: usize = 2;
const MAX_ANSWER_LEN: usize = 8;

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

impl Cell {
    fn for_glyph(glyph: Glyph) -> Self {
        let color = match glyph {
            Glyph::Player => Color::Yellow,
            Glyph::Adversary => Color::Red,
            Glyph::FrozenAdversary => Color::Blue,
            Glyph::Wall => Color::Blue,
            Glyph::Floor => Color::Reset,
            Glyph::Exit => Color::Green,
            Glyph::Gate => Color::Cyan,
            Glyph::PowerUp => Color::Magenta,
        };
        Cell { glyph, color }
    }

    fn text(self) -> &'static str {
        match self.glyph {
            Glyph::Player => "😃",
            Glyph::Adversary => "👹",
            Glyph::FrozenAdversary => "🥶",
            Glyph::Wall => "██",
            Glyph::Floor => "  ",
            Glyph::Exit => "🚪",
            Glyph::Gate => "==",
            Glyph::PowerUp => "● ",
        }
    }
}

/// Where the maze goes for a given terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    /// Top-left corner of the grid; the HUD sits on the row above.
    Centered { origin_x: u16, origin_y: u16 },
    /// Columns and rows needed against what the terminal has.
    TooSmall { need: (u16, u16), have: (u16, u16) },
}

/// Remembers what is on screen so only changed cells are redrawn.
struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    /// First free row under whatever was drawn last.
    prompt_row: u16,
}

impl Renderer {
    fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            prompt_row: 0,
        }
    }

    /// Centres a `cols` x `rows` maze with the HUD above it and a prompt
    /// line below.
    fn layout(cols: usize, rows: usize, (term_w, term_h): (u16, u16)) -> Layout {
        let need_w = (cols * CELL_W) as u16;
        let need_h = (rows + 3) as u16;
        if term_w < need_w || term_h < need_h {
            return Layout::TooSmall {
                need: (need_w, need_h),
                have: (term_w, term_h),
            };
        }
        Layout::Centered {
            origin_x: (term_w - need_w) / 2,
            origin_y: (term_h - need_h) / 2 + 1,
        }
    }

    /// Moving the origin or resizing the maze invalidates the whole screen.
    fn place(&mut self, origin_x: u16, origin_y: u16, cells: usize) {
        if (origin_x, origin_y) != (self.origin_x, self.origin_y) {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.last.len() != cells {
            self.last = vec![Cell::for_glyph(Glyph::Floor); cells];
            self.needs_full = true;
        }
    }
}

/// Raw mode, alternate screen and a hidden cursor for as long as it lives.
pub struct TerminalGuard<W: Write> {
    out: W,
    restored: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            out,
            restored: false,
        };
        guard.out.execute(EnterAlternateScreen)?;
        guard.out.execute(Hide)?;
        Ok(guard)
    }

    /// Restores the terminal, reporting the first step that failed.
    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        self.reset()
    }

    /// Every step runs even when an earlier one fails.
    fn reset(&mut self) -> io::Result<()> {
        let shown = self.out.execute(Show).map(drop);
        let left = self.out.execute(LeaveAlternateScreen).map(drop);
        let raw = terminal::disable_raw_mode();
        shown.and(left).and(raw)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = self.reset() {
            log::warn!("could not restore the terminal: {err}");
        }
    }
}

pub struct TerminalConsole {
    stdout: Stdout,
    renderer: Renderer,
}

impl TerminalConsole {
    pub fn new(stdout: Stdout) -> Self {
        Self {
            stdout,
            renderer: Renderer::new(),
        }
    }

    fn draw_cell(&mut self, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = cell.text();
        let x_pos = self.renderer.origin_x + (x * CELL_W) as u16;
        let y_pos = self.renderer.origin_y + y as u16;
        self.stdout.queue(MoveTo(x_pos, y_pos))?;
        self.stdout.queue(SetForegroundColor(cell.color))?;
        self.stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                self.stdout.queue(Print(' '))?;
            }
        }
        self.stdout.queue(ResetColor)?;
        Ok(())
    }

    fn draw_hud(&mut self, hud: &str) -> io::Result<()> {
        if !self.renderer.needs_full && hud == self.renderer.last_hud {
            return Ok(());
        }
        self.stdout
            .queue(MoveTo(self.renderer.origin_x, self.renderer.origin_y - 1))?;
        self.stdout.queue(SetForegroundColor(Color::White))?;
        self.stdout.queue(Clear(ClearType::CurrentLine))?;
        self.stdout.queue(Print(hud))?;
        self.stdout.queue(ResetColor)?;
        self.renderer.last_hud = hud.to_string();
        Ok(())
    }

    fn draw_too_small(
        &mut self,
        (need_w, need_h): (u16, u16),
        (w, h): (u16, u16),
    ) -> io::Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        self.stdout.queue(MoveTo(0, 0))?;
        self.stdout.queue(Print(format!(
            "Terminal too small: the maze needs {need_w}x{need_h} (cols x rows), this one is {w}x{h}."
        )))?;
        self.renderer.needs_full = true;
        self.renderer.prompt_row = 1;
        self.stdout.flush()
    }

    fn draw_prompt(&mut self, prompt: &str, answer: &str) -> io::Result<()> {
        self.stdout.queue(MoveTo(self.renderer.origin_x, self.renderer.prompt_row))?;
        self.stdout.queue(Clear(ClearType::CurrentLine))?;
        self.stdout.queue(SetForegroundColor(Color::White))?;
        self.stdout.queue(Print(format!("{prompt} {answer}")))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(Show)?;
        self.stdout.flush()
    }

    fn clear_prompt(&mut self) -> io::Result<()> {
        self.stdout.queue(MoveTo(self.renderer.origin_x, self.renderer.prompt_row))?;
        self.stdout.queue(Clear(ClearType::CurrentLine))?;
        self.stdout.queue(Hide)?;
        self.stdout.flush()
    }
}

impl Render for TerminalConsole {
    fn render(&mut self, state: &GameState, time_left: Duration) -> io::Result<()> {
        let width = state.grid.width();
        let height = state.grid.height();

        let (origin_x, origin_y) = match Renderer::layout(width, height, terminal::size()?) {
            Layout::Centered { origin_x, origin_y } => (origin_x, origin_y),
            Layout::TooSmall { need, have } => return self.draw_too_small(need, have),
        };
        self.renderer.place(origin_x, origin_y, width * height);
        if self.renderer.needs_full {
            self.stdout.queue(Clear(ClearType::All))?;
        }
        self.renderer.prompt_row = origin_y + height as u16 + 1;
        self.draw_hud(&format!(
            "Time left: {:>3}s  (WASD to move, E to exit)",
            time_left.as_secs()
        ))?;

        for y in 0..height {
            for x in 0..width {
                let cell = Cell::for_glyph(state.glyph_at(Pos::new(x, y)));
                let idx = y * width + x;
                if self.renderer.needs_full || cell != self.renderer.last[idx] {
                    self.renderer.last[idx] = cell;
                    self.draw_cell(x, y, cell)?;
                }
            }
        }
        self.renderer.needs_full = false;

        self.stdout.flush()
    }

    fn show_text(&mut self, lines: &[String]) -> io::Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            self.stdout.queue(MoveTo(2, 1 + row as u16))?;
            self.stdout.queue(Print(line))?;
        }
        self.stdout.flush()?;
        self.renderer.origin_x = 2;
        self.renderer.prompt_row = 2 + lines.len() as u16;
        self.renderer.needs_full = true;
        Ok(())
    }
}

impl Input for TerminalConsole {
    fn read_command(&mut self) -> io::Result<char> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let command = match key.code {
                KeyCode::Char(c) => c,
                KeyCode::Up => 'w',
                KeyCode::Down => 's',
                KeyCode::Left => 'a',
                KeyCode::Right => 'd',
                KeyCode::Esc => 'e',
                KeyCode::Enter => '\n',
                _ => continue,
            };
            return Ok(command);
        }
    }

    fn read_answer(&mut self, prompt: &str) -> io::Result<String> {
        let mut answer = String::new();
        self.draw_prompt(prompt, &answer)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Enter => break,
                KeyCode::Esc => {
                    answer.clear();
                    break;
                }
                KeyCode::Backspace => {
                    answer.pop();
                }
                KeyCode::Char(c) if answer.len() < MAX_ANSWER_LEN && !c.is_control() => {
                    answer.push(c);
                }
                _ => continue,
            }
            self.draw_prompt(prompt, &answer)?;
        }
        self.clear_prompt()?;
        Ok(answer)
    }
}
