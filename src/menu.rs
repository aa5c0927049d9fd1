//! Text menu wrapped around game sessions.

use std::io;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{Difficulty, SessionConfig};
use crate::console::{Clock, Input, Render};
use crate::error::MenuError;
use crate::game::Session;

const INSTRUCTIONS: [&str; 8] = [
    "How to play",
    "",
    "Move with W A S D (or the arrow keys). E or Esc leaves the maze.",
    "Reach the exit before the countdown runs out.",
    "The exit is sealed by gates: answer the sum to open one for good.",
    "A power-up freezes the adversary for one turn.",
    "The adversary moves after you, up to one step on each axis.",
    "Any other key waits a turn, and the adversary still moves.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Instructions,
    Settings,
    Quit,
}

impl MenuChoice {
    pub fn parse(key: char) -> Result<Self, MenuError> {
        match key {
            '1' => Ok(MenuChoice::Start),
            '2' => Ok(MenuChoice::Instructions),
            '3' => Ok(MenuChoice::Settings),
            '4' => Ok(MenuChoice::Quit),
            _ => Err(MenuError::InvalidSelection { input: key, max: 4 }),
        }
    }
}

pub fn parse_difficulty(key: char) -> Result<Difficulty, MenuError> {
    match key {
        '1' => Ok(Difficulty::Easy),
        '2' => Ok(Difficulty::Medium),
        '3' => Ok(Difficulty::Hard),
        _ => Err(MenuError::InvalidSelection { input: key, max: 3 }),
    }
}

pub struct Menu {
    difficulty: Difficulty,
    time_limit: Option<Duration>,
    custom: Option<SessionConfig>,
    rng: ChaCha8Rng,
    status: Option<String>,
}

impl Menu {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            time_limit: None,
            custom: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            status: None,
        }
    }

    /// Overrides the difficulty's countdown for every session.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Plays `config` instead of the difficulty's board until a difficulty
    /// is picked in the settings.
    pub fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.custom = Some(config);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Last one-line message shown under the menu.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn session_config(&self) -> SessionConfig {
        let config = self
            .custom
            .unwrap_or_else(|| self.difficulty.session_config());
        match self.time_limit {
            Some(limit) => config.with_time_limit(limit),
            None => config,
        }
    }

    /// Runs until the player picks Quit.
    pub fn run<T: Render + Input>(
        &mut self,
        console: &mut T,
        clock: &impl Clock,
    ) -> io::Result<()> {
        loop {
            console.show_text(&self.lines())?;
            let choice = match MenuChoice::parse(console.read_command()?) {
                Ok(choice) => choice,
                Err(err) => {
                    self.status = Some(err.to_string());
                    continue;
                }
            };
            match choice {
                MenuChoice::Start => self.play(console, clock)?,
                MenuChoice::Instructions => {
                    let mut lines: Vec<String> =
                        INSTRUCTIONS.iter().map(|s| s.to_string()).collect();
                    lines.push(String::new());
                    lines.push("Press any key to return.".to_string());
                    console.show_text(&lines)?;
                    console.read_command()?;
                    self.status = None;
                }
                MenuChoice::Settings => self.settings(console)?,
                MenuChoice::Quit => {
                    log::info!("quit from menu");
                    return Ok(());
                }
            }
        }
    }

    fn play<T: Render + Input>(
        &mut self,
        console: &mut T,
        clock: &impl Clock,
    ) -> io::Result<()> {
        let seed: u64 = self.rng.gen();
        let config = self.session_config();
        log::info!("starting {} session", self.difficulty);
        self.status = Some(match Session::start(&config, seed, clock) {
            Ok(session) => session.run(console)?.message(),
            Err(err) => {
                log::warn!("session setup failed (seed {seed}): {err}");
                format!("Could not start a game: {err}.")
            }
        });
        Ok(())
    }

    fn settings<T: Render + Input>(&mut self, console: &mut T) -> io::Result<()> {
        let mut error: Option<MenuError> = None;
        loop {
            let mut lines = vec!["Select Difficulty:".to_string(), String::new()];
            for (idx, difficulty) in Difficulty::ALL.iter().enumerate() {
                let config = difficulty.session_config();
                lines.push(format!(
                    "{}. {:<6} {}x{}, {}s",
                    idx + 1,
                    difficulty.to_string(),
                    config.width,
                    config.height,
                    config.time_limit.as_secs()
                ));
            }
            if let Some(err) = &error {
                lines.push(String::new());
                lines.push(err.to_string());
            }
            console.show_text(&lines)?;
            match parse_difficulty(console.read_command()?) {
                Ok(difficulty) => {
                    log::info!("difficulty set to {difficulty}");
                    self.difficulty = difficulty;
                    self.custom = None;
                    self.status = Some(format!("Difficulty set to {difficulty}."));
                    return Ok(());
                }
                Err(err) => error = Some(err),
            }
        }
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Main Menu:".to_string(),
            String::new(),
            "1. Start Game".to_string(),
            "2. Instructions".to_string(),
            format!("3. Settings ({})", self.difficulty),
            "4. Quit".to_string(),
            String::new(),
            "Enter your choice (1-4)".to_string(),
        ];
        if let Some(status) = &self.status {
            lines.push(String::new());
            lines.push(status.clone());
        }
        lines
    }
}
