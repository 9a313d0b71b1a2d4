//! Contribution heatmap the snake feeds on

use rand::Rng;
use rand::seq::SliceRandom;

use super::state::Position;

/// Highest contribution level a cell can hold
pub const MAX_LEVEL: u8 = 4;

/// Weighted pool new cells are drawn from: 4 at 40%, 3 at 30%, 2 at 20%, 1 at 10%
pub const CONTRIBUTION_LEVELS: [u8; 10] = [4, 4, 4, 4, 3, 3, 3, 2, 2, 1];

/// How much a visit removes from a cell
pub const CONSUME_AMOUNT: u8 = 2;

/// Square grid of contribution levels, indexed `[y][x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<u8>>,
}

impl Grid {
    /// Sample every cell independently from [`CONTRIBUTION_LEVELS`]
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut cells = Vec::with_capacity(size);
        for _ in 0..size {
            let row: Vec<u8> = (0..size)
                .map(|_| *CONTRIBUTION_LEVELS.choose(rng).unwrap_or(&MAX_LEVEL))
                .collect();
            cells.push(row);
        }
        Self { cells }
    }

    /// Grid with every cell at `level`
    pub fn filled(size: usize, level: u8) -> Self {
        Self {
            cells: vec![vec![level.min(MAX_LEVEL); size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Level at `pos`; positions must be inside the grid
    pub fn level(&self, pos: Position) -> u8 {
        self.cells[pos.y as usize][pos.x as usize]
    }

    pub fn set_level(&mut self, pos: Position, level: u8) {
        self.cells[pos.y as usize][pos.x as usize] = level.min(MAX_LEVEL);
    }

    /// Take [`CONSUME_AMOUNT`] from the cell, flooring at zero
    ///
    /// Returns the level left behind.
    pub fn consume(&mut self, pos: Position) -> u8 {
        let cell = &mut self.cells[pos.y as usize][pos.x as usize];
        *cell = cell.saturating_sub(CONSUME_AMOUNT);
        *cell
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Sum of all levels left on the grid
    pub fn remaining(&self) -> u32 {
        self.cells.iter().flatten().map(|&level| u32::from(level)).sum()
    }
}
