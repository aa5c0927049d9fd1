//! Turn-based terminal maze escape: carve a maze, seal its exit behind
//! arithmetic gates, and outrun a pursuing adversary before time runs out.

pub mod adversary;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod grid;
pub mod interaction;
pub mod maze;
pub mod menu;
pub mod populate;
pub mod term;

pub use adversary::Adversary;
pub use config::{Difficulty, SessionConfig};
pub use console::{Clock, Input, Render, SystemClock};
pub use error::{MenuError, SetupError};
pub use game::{Command, GameState, Glyph, LossReason, Outcome, Phase, Session};
pub use grid::{Dir, Pos, TerrainGrid, Tile};
pub use interaction::{resolve_entry, Entry, Puzzle};
pub use maze::{carve, reachable_from};
pub use menu::Menu;
pub use populate::{populate, Placement, PlacementCounts};
