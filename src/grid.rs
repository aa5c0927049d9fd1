//! Terrain layer of the maze and the coordinate types used to walk it.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Floor,
    Exit,
    Gate,
    PowerUp,
}

impl Tile {
    /// Cells the adversary may stand on. Unsolved gates block everyone.
    pub fn passable(self) -> bool {
        !matches!(self, Tile::Wall | Tile::Gate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbour `dist` cells away, or `None` when it would leave a
    /// `width` x `height` grid.
    pub fn offset(self, dir: Dir, dist: usize, width: usize, height: usize) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = self.x as isize + dx * dist as isize;
        let ny = self.y as isize + dy * dist as isize;
        if nx < 0 || ny < 0 {
            return None;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        if nx >= width || ny >= height {
            return None;
        }
        Some(Pos { x: nx, y: ny })
    }

    pub fn step(self, dir: Dir, width: usize, height: usize) -> Option<Pos> {
        self.offset(dir, 1, width, height)
    }

    pub fn manhattan(self, other: Pos) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TerrainGrid {
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Out-of-bounds reads see a wall, so callers never index past the edge.
    pub fn tile(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set(&mut self, pos: Pos, tile: Tile) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn step(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        pos.step(dir, self.width, self.height)
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL.into_iter().filter_map(move |dir| self.step(pos, dir))
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x + 1 == self.width || pos.y + 1 == self.height
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Pos { x, y }))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    fn index(&self, pos: Pos) -> usize {
        pos.y * self.width + pos.x
    }
}
