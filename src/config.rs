use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::grid::Pos;
use crate::populate::PlacementCounts;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Smaller grids get more time; larger ones less.
    pub fn session_config(self) -> SessionConfig {
        let (width, height, secs, extra_gates, power_ups) = match self {
            Difficulty::Easy => (15, 9, 60, 1, 2),
            Difficulty::Medium => (21, 11, 45, 2, 1),
            Difficulty::Hard => (31, 15, 30, 3, 1),
        };
        SessionConfig {
            width,
            height,
            start: Pos::new(1, 1),
            time_limit: Duration::from_secs(secs),
            counts: PlacementCounts {
                extra_gates,
                power_ups,
            },
            adversary: true,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Everything a session needs to know up front. Fixed once the session starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub width: usize,
    pub height: usize,
    pub start: Pos,
    pub time_limit: Duration,
    pub counts: PlacementCounts,
    pub adversary: bool,
}

impl SessionConfig {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn without_adversary(mut self) -> Self {
        self.adversary = false;
        self
    }
}
