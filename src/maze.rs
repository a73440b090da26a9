//! Word-maze generation.
//!
//! A randomized depth-first walk carves a single path from the top-left to
//! the bottom-right corner. Every cell on that path gets a word from the
//! level's target sound class; the rest of the grid is filled with decoys.

use crate::difficulty::SUPPORTED_GRID_SIZES;
use crate::vocabulary::{SoundClass, WordBank};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(&self, other: &Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.manhattan(other) == 1
    }

    /// Up, down, left and right neighbours that fall inside a `size` grid
    pub fn neighbors(&self, size: usize) -> Vec<Position> {
        let mut out = Vec::with_capacity(4);
        if self.row > 0 {
            out.push(Position::new(self.row - 1, self.col));
        }
        if self.row + 1 < size {
            out.push(Position::new(self.row + 1, self.col));
        }
        if self.col > 0 {
            out.push(Position::new(self.row, self.col - 1));
        }
        if self.col + 1 < size {
            out.push(Position::new(self.row, self.col + 1));
        }
        out
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// One step in `dir`; None when it would leave the top or left edge.
    pub fn step(&self, dir: Step) -> Option<Position> {
        match dir {
            Step::Up => self.row.checked_sub(1).map(|row| Position::new(row, self.col)),
            Step::Down => Some(Position::new(self.row + 1, self.col)),
            Step::Left => self.col.checked_sub(1).map(|col| Position::new(self.row, col)),
            Step::Right => Some(Position::new(self.row, self.col + 1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub word: String,
    pub is_path: bool,
}

/// Square, row-major matrix of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Panics unless `cells` holds exactly `size * size` entries.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(cells.len(), size * size, "grid must be square");
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if pos.in_bounds(self.size) {
            self.cells.get(pos.row * self.size + pos.col)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new(i / size, i % size), cell))
    }
}

/// A generated board; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub grid: Grid,
    pub path_sound: SoundClass,
    pub grid_size: usize,
    /// Solution path from the origin to the terminal cell, in walking order
    pub path: Vec<Position>,
}

impl Level {
    /// Assemble a level from a prebuilt grid and its solution path.
    pub fn new(grid: Grid, path_sound: SoundClass, path: Vec<Position>) -> Self {
        let grid_size = grid.size();
        Self {
            grid,
            path_sound,
            grid_size,
            path,
        }
    }

    pub fn start(&self) -> Position {
        Position::ORIGIN
    }

    pub fn terminal(&self) -> Position {
        Position::new(self.grid_size - 1, self.grid_size - 1)
    }
}

/// Build a level of `grid_size`.
///
/// Panics if `grid_size` is not one of the supported tier sizes.
pub fn generate_level<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    hardened: bool,
    bank: &WordBank,
) -> Level {
    assert!(
        SUPPORTED_GRID_SIZES.contains(&grid_size),
        "unsupported grid size {grid_size}"
    );

    let path_sound = if rng.gen_bool(0.5) {
        SoundClass::A
    } else {
        SoundClass::B
    };

    let path = carve_path(rng, grid_size);
    let mut on_path = vec![false; grid_size * grid_size];
    for pos in &path {
        on_path[pos.row * grid_size + pos.col] = true;
    }

    let cells = on_path
        .into_iter()
        .map(|is_path| {
            let class = if is_path {
                path_sound
            } else if hardened {
                path_sound.other()
            } else if rng.gen_bool(0.5) {
                path_sound
            } else {
                path_sound.other()
            };
            Cell {
                word: bank.random_word(rng, class).to_string(),
                is_path,
            }
        })
        .collect();

    tracing::debug!(grid_size, hardened, path_len = path.len(), "generated level");

    Level::new(Grid::from_cells(grid_size, cells), path_sound, path)
}

/// Randomized DFS from the origin to the far corner, returning the walked path.
///
/// Parents are recorded as cells are discovered, so the path is read back
/// exactly rather than inferred from adjacency.
pub fn carve_path<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<Position> {
    let start = Position::ORIGIN;
    let end = Position::new(size - 1, size - 1);
    let idx = |p: Position| p.row * size + p.col;

    let mut visited = vec![false; size * size];
    let mut parent: Vec<Option<Position>> = vec![None; size * size];
    let mut stack = vec![start];
    visited[idx(start)] = true;

    while let Some(&current) = stack.last() {
        if current == end {
            break;
        }

        let mut candidates: Vec<Position> = current
            .neighbors(size)
            .into_iter()
            .filter(|n| !visited[idx(*n)])
            .collect();
        candidates.shuffle(rng);

        match candidates.first() {
            Some(&next) => {
                visited[idx(next)] = true;
                parent[idx(next)] = Some(current);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    let mut path = vec![end];
    let mut cursor = end;
    while let Some(prev) = parent[idx(cursor)] {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    path
}
