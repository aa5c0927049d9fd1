//! Session state and the turn-by-turn state machine.

use std::io;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::adversary::Adversary;
use crate::config::SessionConfig;
use crate::console::{Clock, Input, Render};
use crate::error::SetupError;
use crate::grid::{Dir, Pos, TerrainGrid, Tile};
use crate::interaction::{resolve_entry, Entry};
use crate::maze::{carve, reachable_from};
use crate::populate::populate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossReason {
    Timeout,
    Captured,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Won,
    Lost(LossReason),
    Exited,
}

impl Phase {
    pub fn is_over(self) -> bool {
        self != Phase::Playing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Quit,
    /// Unrecognised keys still cost a turn.
    Wait,
}

impl Command {
    pub fn parse(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Command::Move(Dir::Up),
            's' | 'j' => Command::Move(Dir::Down),
            'a' | 'h' => Command::Move(Dir::Left),
            'd' | 'l' => Command::Move(Dir::Right),
            'e' | 'q' => Command::Quit,
            _ => Command::Wait,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Player,
    Adversary,
    FrozenAdversary,
    Wall,
    Floor,
    Exit,
    Gate,
    PowerUp,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: TerrainGrid,
    pub player: Pos,
    pub exit: Pos,
    pub adversary: Option<Adversary>,
    pub time_left: Duration,
    pub phase: Phase,
}

impl GameState {
    pub fn new(config: &SessionConfig, rng: &mut ChaCha8Rng) -> Result<Self, SetupError> {
        let mut grid = carve(config.width, config.height, config.start, rng)?;
        let placement = populate(&mut grid, config.start, config.counts, rng)?;
        log::debug!(
            "exit at ({}, {}), {} gates, {} power-ups",
            placement.exit.x,
            placement.exit.y,
            placement.gates.len(),
            placement.power_ups.len()
        );
        debug_assert!(
            reachable_from(&grid, config.start, |t| t != Tile::Wall).contains(&placement.exit),
            "exit cut off from the start"
        );
        Ok(Self {
            grid,
            player: config.start,
            exit: placement.exit,
            adversary: config.adversary.then(|| Adversary::new(placement.adversary)),
            time_left: config.time_limit,
            phase: Phase::Playing,
        })
    }

    /// Entities drawn over terrain; the terrain itself is left untouched.
    pub fn glyph_at(&self, pos: Pos) -> Glyph {
        if pos == self.player {
            return Glyph::Player;
        }
        if let Some(adversary) = self.adversary.filter(|a| a.pos == pos) {
            if adversary.is_frozen() {
                return Glyph::FrozenAdversary;
            }
            return Glyph::Adversary;
        }
        match self.grid.tile(pos) {
            Tile::Wall => Glyph::Wall,
            Tile::Floor => Glyph::Floor,
            Tile::Exit => Glyph::Exit,
            Tile::Gate => Glyph::Gate,
            Tile::PowerUp => Glyph::PowerUp,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub phase: Phase,
    pub turns: u64,
    pub elapsed: Duration,
}

impl Outcome {
    pub fn message(&self) -> String {
        match self.phase {
            Phase::Won => format!(
                "Congratulations! You escaped the maze in {} turns ({}s).",
                self.turns,
                self.elapsed.as_secs()
            ),
            Phase::Lost(LossReason::Timeout) => {
                "Time's up! You failed to escape the maze.".to_string()
            }
            Phase::Lost(LossReason::Captured) => {
                "You were caught by the adversary! Game over.".to_string()
            }
            Phase::Exited => "Left the maze. Back to the main menu.".to_string(),
            Phase::Playing => "The game is still running.".to_string(),
        }
    }
}

pub struct Session<C: Clock> {
    state: GameState,
    rng: ChaCha8Rng,
    clock: C,
    started: Duration,
    limit: Duration,
    turns: u64,
}

impl<C: Clock> Session<C> {
    pub fn start(config: &SessionConfig, seed: u64, clock: C) -> Result<Self, SetupError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let state = GameState::new(config, &mut rng)?;
        log::info!(
            "session started: seed {seed}, {}x{}, {}s",
            config.width,
            config.height,
            config.time_limit.as_secs()
        );
        Ok(Self::from_state(state, config.time_limit, rng, clock))
    }

    /// Runs a hand-built state; the countdown starts now.
    pub fn from_state(state: GameState, limit: Duration, rng: ChaCha8Rng, clock: C) -> Self {
        let started = clock.now();
        Self {
            state,
            rng,
            clock,
            started,
            limit,
            turns: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn time_left(&self) -> Duration {
        let elapsed = self.clock.now().saturating_sub(self.started);
        self.limit.saturating_sub(elapsed)
    }

    /// Plays one turn. The countdown is only looked at here, before the
    /// command is read, never while waiting for the player.
    pub fn turn<T: Render + Input>(&mut self, console: &mut T) -> io::Result<Phase> {
        if self.state.phase.is_over() {
            return Ok(self.state.phase);
        }

        let time_left = self.time_left();
        self.state.time_left = time_left;
        if time_left.is_zero() {
            return Ok(self.finish(Phase::Lost(LossReason::Timeout)));
        }

        console.render(&self.state, time_left)?;
        let command = Command::parse(console.read_command()?);
        self.turns += 1;

        match command {
            Command::Quit => return Ok(self.finish(Phase::Exited)),
            Command::Move(dir) => self.move_player(dir, console)?,
            Command::Wait => log::debug!("turn {}: no move", self.turns),
        }

        if let Some(adversary) = self.state.adversary.as_mut() {
            adversary.step(self.state.player, &self.state.grid);
        }

        if self.state.player == self.state.exit {
            return Ok(self.finish(Phase::Won));
        }
        if self.state.adversary.map(|a| a.pos) == Some(self.state.player) {
            return Ok(self.finish(Phase::Lost(LossReason::Captured)));
        }
        Ok(Phase::Playing)
    }

    /// Plays turns until the session ends, then draws the final position.
    pub fn run<T: Render + Input>(mut self, console: &mut T) -> io::Result<Outcome> {
        while !self.turn(console)?.is_over() {}
        self.state.time_left = self.time_left();
        console.render(&self.state, self.state.time_left)?;
        Ok(Outcome {
            phase: self.state.phase,
            turns: self.turns,
            elapsed: self.clock.now().saturating_sub(self.started),
        })
    }

    fn move_player<T: Input>(&mut self, dir: Dir, input: &mut T) -> io::Result<()> {
        let Some(target) = self.state.grid.step(self.state.player, dir) else {
            return Ok(());
        };
        let entry = resolve_entry(
            &mut self.state.grid,
            target,
            self.state.adversary.as_mut(),
            &mut self.rng,
            input,
        )?;
        if entry == Entry::Allowed {
            self.state.player = target;
        }
        log::debug!(
            "turn {}: {:?} -> {:?}, player at ({}, {})",
            self.turns,
            dir,
            entry,
            self.state.player.x,
            self.state.player.y
        );
        Ok(())
    }

    fn finish(&mut self, phase: Phase) -> Phase {
        log::info!("session over after {} turns: {:?}", self.turns, phase);
        self.state.phase = phase;
        phase
    }
}
