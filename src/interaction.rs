//! What happens when the player tries to enter a cell.

use std::io;

use rand::Rng;

use crate::adversary::Adversary;
use crate::console::Input;
use crate::grid::{Pos, TerrainGrid, Tile};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Allowed,
    Blocked,
}

/// Arithmetic challenge guarding a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Puzzle {
    pub lhs: u32,
    pub rhs: u32,
}

impl Puzzle {
    pub fn roll(rng: &mut impl Rng) -> Self {
        Self {
            lhs: rng.gen_range(1..=100),
            rhs: rng.gen_range(1..=100),
        }
    }

    pub fn answer(&self) -> u32 {
        self.lhs + self.rhs
    }

    pub fn prompt(&self) -> String {
        format!("Gate puzzle: {} + {} = ?", self.lhs, self.rhs)
    }

    /// Anything that does not parse as the sum is a wrong answer.
    pub fn check(&self, reply: &str) -> bool {
        reply.trim().parse::<u32>().ok() == Some(self.answer())
    }
}

pub fn resolve_entry(
    grid: &mut TerrainGrid,
    target: Pos,
    adversary: Option<&mut Adversary>,
    rng: &mut impl Rng,
    input: &mut impl Input,
) -> io::Result<Entry> {
    match grid.tile(target) {
        Tile::Wall => Ok(Entry::Blocked),
        Tile::Gate => {
            let puzzle = Puzzle::roll(rng);
            let reply = input.read_answer(&puzzle.prompt())?;
            if puzzle.check(&reply) {
                log::debug!("gate at ({}, {}) solved", target.x, target.y);
                grid.set(target, Tile::Floor);
                Ok(Entry::Allowed)
            } else {
                log::debug!(
                    "gate at ({}, {}) stays shut: {:?} is not {}",
                    target.x,
                    target.y,
                    reply,
                    puzzle.answer()
                );
                Ok(Entry::Blocked)
            }
        }
        Tile::PowerUp => {
            grid.set(target, Tile::Floor);
            if let Some(adversary) = adversary {
                log::debug!("power-up collected, adversary frozen");
                adversary.freeze();
            }
            Ok(Entry::Allowed)
        }
        Tile::Floor | Tile::Exit => Ok(Entry::Allowed),
    }
}
