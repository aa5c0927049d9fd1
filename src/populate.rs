//! Places the exit, gates, power-ups and the adversary on a carved maze.

use rand::Rng;

use crate::error::SetupError;
use crate::grid::{Pos, TerrainGrid, Tile};

pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementCounts {
    pub extra_gates: usize,
    pub power_ups: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub exit: Pos,
    /// Gates sealing the exit first, then the extra ones.
    pub gates: Vec<Pos>,
    pub power_ups: Vec<Pos>,
    pub adversary: Pos,
}

pub fn populate(
    grid: &mut TerrainGrid,
    player: Pos,
    counts: PlacementCounts,
    rng: &mut impl Rng,
) -> Result<Placement, SetupError> {
    let exit = sample(grid, rng, "exit", |g, pos| {
        g.tile(pos) == Tile::Wall && touches_floor(g, pos) && pos.manhattan(player) > 1
    })?;
    grid.set(exit, Tile::Exit);

    // Seal every approach to the exit, corridor cells included.
    let mut gates = Vec::new();
    let around: Vec<Pos> = grid.neighbors(exit).collect();
    for pos in around {
        if grid.is_border(pos) {
            continue;
        }
        if matches!(grid.tile(pos), Tile::Wall | Tile::Floor) {
            grid.set(pos, Tile::Gate);
            gates.push(pos);
        }
    }

    for _ in 0..counts.extra_gates {
        let pos = sample(grid, rng, "gate", |g, pos| {
            g.tile(pos) == Tile::Wall && !g.is_border(pos) && touches_floor(g, pos)
        })?;
        grid.set(pos, Tile::Gate);
        gates.push(pos);
    }

    let mut power_ups = Vec::with_capacity(counts.power_ups);
    for _ in 0..counts.power_ups {
        let pos = sample(grid, rng, "power-up", |g, pos| {
            g.tile(pos) == Tile::Floor && pos != player
        })?;
        grid.set(pos, Tile::PowerUp);
        power_ups.push(pos);
    }

    let adversary = sample(grid, rng, "adversary", |g, pos| {
        g.tile(pos) == Tile::Floor && pos != player
    })?;

    Ok(Placement {
        exit,
        gates,
        power_ups,
        adversary,
    })
}

fn touches_floor(grid: &TerrainGrid, pos: Pos) -> bool {
    grid.neighbors(pos).any(|n| grid.tile(n) == Tile::Floor)
}

fn sample(
    grid: &TerrainGrid,
    rng: &mut impl Rng,
    what: &'static str,
    mut accept: impl FnMut(&TerrainGrid, Pos) -> bool,
) -> Result<Pos, SetupError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = Pos::new(
            rng.gen_range(0..grid.width()),
            rng.gen_range(0..grid.height()),
        );
        if accept(grid, pos) {
            return Ok(pos);
        }
    }
    log::warn!("gave up placing {what} after {MAX_PLACEMENT_ATTEMPTS} attempts");
    Err(SetupError::PlacementExhausted {
        what,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}
