//! Randomized depth-first maze carving over the odd-coordinate lattice.
//!
//! Lattice cells sit at odd coordinates; the even cells between them are the
//! walls that carving knocks through. Every lattice cell ends up connected to
//! the start by exactly one path.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SetupError;
use crate::grid::{Dir, Pos, TerrainGrid, Tile};

struct Frame {
    pos: Pos,
    dirs: [Dir; 4],
    next: usize,
}

impl Frame {
    fn enter(pos: Pos, rng: &mut impl Rng) -> Self {
        let mut dirs = Dir::ALL;
        dirs.shuffle(rng);
        Self { pos, dirs, next: 0 }
    }

    fn next_dir(&mut self) -> Option<Dir> {
        let dir = self.dirs.get(self.next).copied()?;
        self.next += 1;
        Some(dir)
    }
}

pub fn lattice_cells(width: usize, height: usize) -> usize {
    ((width - 1) / 2) * ((height - 1) / 2)
}

pub fn carve(
    width: usize,
    height: usize,
    start: Pos,
    rng: &mut impl Rng,
) -> Result<TerrainGrid, SetupError> {
    if width < 3 || height < 3 || width % 2 == 0 || height % 2 == 0 {
        return Err(SetupError::InvalidDimensions { width, height });
    }
    if start.x % 2 == 0 || start.y % 2 == 0 || start.x >= width - 1 || start.y >= height - 1 {
        return Err(SetupError::InvalidStart(start));
    }

    let mut grid = TerrainGrid::filled(width, height, Tile::Wall);
    // One frame per lattice cell at most, since a cell is only entered while
    // it is still a wall.
    let mut stack = Vec::with_capacity(lattice_cells(width, height));
    grid.set(start, Tile::Floor);
    stack.push(Frame::enter(start, rng));

    while let Some(frame) = stack.last_mut() {
        let Some(dir) = frame.next_dir() else {
            stack.pop();
            continue;
        };
        let pos = frame.pos;
        let Some(dest) = pos.offset(dir, 2, width, height) else {
            continue;
        };
        if grid.is_border(dest) || grid.tile(dest) != Tile::Wall {
            continue;
        }
        let between = Pos::new((pos.x + dest.x) / 2, (pos.y + dest.y) / 2);
        grid.set(between, Tile::Floor);
        grid.set(dest, Tile::Floor);
        stack.push(Frame::enter(dest, rng));
    }

    Ok(grid)
}

/// Breadth-first flood from `start` over cells accepted by `passable`.
/// Returns the visited cells in visit order; `start` is always first.
pub fn reachable_from(
    grid: &TerrainGrid,
    start: Pos,
    passable: impl Fn(Tile) -> bool,
) -> Vec<Pos> {
    let width = grid.width();
    let mut seen = vec![false; width * grid.height()];
    let mut order = Vec::new();
    let mut q = VecDeque::new();
    if !grid.in_bounds(start) {
        return order;
    }
    seen[start.y * width + start.x] = true;
    q.push_back(start);
    while let Some(pos) = q.pop_front() {
        order.push(pos);
        for next in grid.neighbors(pos) {
            let idx = next.y * width + next.x;
            if seen[idx] || !passable(grid.tile(next)) {
                continue;
            }
            seen[idx] = true;
            q.push_back(next);
        }
    }
    order
}
