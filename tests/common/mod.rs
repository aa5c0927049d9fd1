#![allow(dead_code)]

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use maze_escape::{Clock, Dir, GameState, Input, Pos, Render, TerrainGrid, Tile};

/// Clock the test moves by hand. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Plays back a fixed key sequence and records what was drawn.
#[derive(Default)]
pub struct ScriptedConsole {
    pub keys: VecDeque<char>,
    pub answers: VecDeque<String>,
    /// Answer gate puzzles correctly once `answers` runs dry.
    pub solve_puzzles: bool,
    /// Time that passes while each key is being "typed".
    pub key_delay: Duration,
    pub clock: Option<ManualClock>,
    pub frames: Vec<Frame>,
    pub screens: Vec<Vec<String>>,
    pub prompts: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub player: Pos,
    pub adversary: Option<Pos>,
    pub time_left: Duration,
}

impl ScriptedConsole {
    pub fn with_keys(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
            ..Self::default()
        }
    }

    pub fn solving(mut self) -> Self {
        self.solve_puzzles = true;
        self
    }

    pub fn timed(mut self, clock: &ManualClock, key_delay: Duration) -> Self {
        self.clock = Some(clock.clone());
        self.key_delay = key_delay;
        self
    }

    pub fn last_screen(&self) -> &[String] {
        self.screens.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Render for ScriptedConsole {
    fn render(&mut self, state: &GameState, time_left: Duration) -> io::Result<()> {
        self.frames.push(Frame {
            player: state.player,
            adversary: state.adversary.map(|a| a.pos),
            time_left,
        });
        Ok(())
    }

    fn show_text(&mut self, lines: &[String]) -> io::Result<()> {
        self.screens.push(lines.to_vec());
        Ok(())
    }
}

impl Input for ScriptedConsole {
    fn read_command(&mut self) -> io::Result<char> {
        let key = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script ran out of keys"))?;
        if let Some(clock) = &self.clock {
            clock.advance(self.key_delay);
        }
        Ok(key)
    }

    fn read_answer(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        if let Some(answer) = self.answers.pop_front() {
            return Ok(answer);
        }
        if self.solve_puzzles {
            return Ok(solve(prompt).to_string());
        }
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "script ran out of answers",
        ))
    }
}

/// Sums the two operands of a "Gate puzzle: a + b = ?" prompt.
pub fn solve(prompt: &str) -> u32 {
    prompt
        .split(|c: char| !c.is_ascii_digit())
        .filter_map(|part| part.parse::<u32>().ok())
        .sum()
}

pub fn key_for(dir: Dir) -> char {
    match dir {
        Dir::Up => 'w',
        Dir::Down => 's',
        Dir::Left => 'a',
        Dir::Right => 'd',
    }
}

/// Shortest key sequence from `from` to `to` over non-wall cells.
pub fn path_keys(grid: &TerrainGrid, from: Pos, to: Pos) -> Option<String> {
    let mut came_from: HashMap<Pos, (Pos, Dir)> = HashMap::new();
    let mut q = VecDeque::from([from]);
    while let Some(pos) = q.pop_front() {
        if pos == to {
            let mut keys = Vec::new();
            let mut at = to;
            while at != from {
                let (prev, dir) = came_from[&at];
                keys.push(key_for(dir));
                at = prev;
            }
            return Some(keys.into_iter().rev().collect());
        }
        for dir in Dir::ALL {
            let Some(next) = grid.step(pos, dir) else {
                continue;
            };
            if next == from || came_from.contains_key(&next) || grid.tile(next) == Tile::Wall {
                continue;
            }
            came_from.insert(next, (pos, dir));
            q.push_back(next);
        }
    }
    None
}

/// Walls all round with a single open row at y = 1.
pub fn corridor(width: usize) -> TerrainGrid {
    let mut grid = TerrainGrid::filled(width, 3, Tile::Wall);
    for x in 1..width - 1 {
        grid.set(Pos::new(x, 1), Tile::Floor);
    }
    grid
}
