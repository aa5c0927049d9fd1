use crate::grid::{Dir, Pos, TerrainGrid};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adversary {
    pub pos: Pos,
    pub frozen_turns: u32,
}

impl Adversary {
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            frozen_turns: 0,
        }
    }

    pub fn freeze(&mut self) {
        self.frozen_turns = 1;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen_turns > 0
    }

    /// One pursuit step toward `player`: a horizontal move, then a vertical
    /// one, each taken only if it lands on a passable cell. A frozen
    /// adversary spends the step thawing instead.
    pub fn step(&mut self, player: Pos, grid: &TerrainGrid) {
        if self.frozen_turns > 0 {
            self.frozen_turns -= 1;
            return;
        }
        let horizontal = match player.x.cmp(&self.pos.x) {
            std::cmp::Ordering::Less => Some(Dir::Left),
            std::cmp::Ordering::Greater => Some(Dir::Right),
            std::cmp::Ordering::Equal => None,
        };
        if let Some(dir) = horizontal {
            self.try_move(dir, grid);
        }
        let vertical = match player.y.cmp(&self.pos.y) {
            std::cmp::Ordering::Less => Some(Dir::Up),
            std::cmp::Ordering::Greater => Some(Dir::Down),
            std::cmp::Ordering::Equal => None,
        };
        if let Some(dir) = vertical {
            self.try_move(dir, grid);
        }
    }

    fn try_move(&mut self, dir: Dir, grid: &TerrainGrid) {
        if let Some(next) = grid.step(self.pos, dir) {
            if grid.tile(next).passable() {
                self.pos = next;
            }
        }
    }
}
