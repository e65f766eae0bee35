// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and adjacency queries

use serde::{Deserialize, Serialize};

use crate::{ColorId, Coord};

/// Smallest allowed board dimension per axis
pub const MIN_DIM: u8 = 3;
/// Largest allowed board dimension per axis
pub const MAX_DIM: u8 = 20;
/// Largest allowed number of distinct stone colors
pub const MAX_COLORS: u8 = 8;

/// Rectangular grid of optional stone colors.
///
/// Pure storage plus bounds/occupancy queries; the rule components treat it
/// as input and produce new boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: u8,
    height: u8,
    cells: Vec<Option<ColorId>>,
}

impl Board {
    /// Create a new empty board with the specified dimensions
    pub fn new(width: u8, height: u8) -> Self {
        let cells = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![None; cells],
        }
    }

    /// Board width in cells
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Board height in cells
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check whether a coordinate lies on the board
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> usize {
        (coord.y as usize) * (self.width as usize) + (coord.x as usize)
    }

    /// Get the stone at the specified coordinate
    pub fn get(&self, coord: Coord) -> Option<ColorId> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells[self.index(coord)]
    }

    /// Place a stone; returns false if out of bounds or occupied
    pub fn place(&mut self, coord: Coord, color: ColorId) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        let idx = self.index(coord);
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(color);
        true
    }

    /// Remove a stone; returns the color that was removed, if any
    pub fn remove(&mut self, coord: Coord) -> Option<ColorId> {
        if !self.in_bounds(coord) {
            return None;
        }
        let idx = self.index(coord);
        self.cells[idx].take()
    }

    /// Orthogonally adjacent coordinates (up, down, left, right)
    pub fn adjacent(&self, coord: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(4);
        let Coord { x, y } = coord;

        if y > 0 {
            result.push(Coord::new(x, y - 1));
        }
        if y < self.height - 1 {
            result.push(Coord::new(x, y + 1));
        }
        if x > 0 {
            result.push(Coord::new(x - 1, y));
        }
        if x < self.width - 1 {
            result.push(Coord::new(x + 1, y));
        }

        result
    }

    /// The 8-neighbourhood (Chebyshev distance 1), excluding the center.
    ///
    /// Used by explosion handling; liberties always use [`Board::adjacent`].
    pub fn box_neighbors(&self, coord: Coord) -> Vec<Coord> {
        let mut result = Vec::with_capacity(8);
        let x = coord.x as i16;
        let y = coord.y as i16;

        for dy in -1..=1i16 {
            for dx in -1..=1i16 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x + dx;
                let ny = y + dy;
                if nx >= 0 && ny >= 0 {
                    let c = Coord::new(nx as u8, ny as u8);
                    if self.in_bounds(c) {
                        result.push(c);
                    }
                }
            }
        }

        result
    }

    /// Iterate every coordinate on the board in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.width;
        let height = self.height;
        (0..height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Count stones of the given color currently on the board
    pub fn count_stones(&self, color: ColorId) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    /// Collect every stone of the given color
    pub fn stones_of(&self, color: ColorId) -> Vec<Coord> {
        self.coords().filter(|&c| self.get(c) == Some(color)).collect()
    }
}
