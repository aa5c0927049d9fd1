//! Capabilities the game consumes: drawing, reading keys, telling time.
//!
//! The terminal front end implements all three; tests script them.

use std::io;
use std::time::{Duration, Instant};

use crate::game::GameState;

pub trait Render {
    /// Full redraw of the maze with the countdown header.
    fn render(&mut self, state: &GameState, time_left: Duration) -> io::Result<()>;

    /// Plain text screen (menu, instructions, results).
    fn show_text(&mut self, lines: &[String]) -> io::Result<()>;
}

pub trait Input {
    /// Blocks until a single key is pressed.
    fn read_command(&mut self) -> io::Result<char>;

    /// Shows `prompt` and blocks until a line is entered.
    fn read_answer(&mut self, prompt: &str) -> io::Result<String>;
}

pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
