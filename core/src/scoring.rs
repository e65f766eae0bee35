// SPDX-License-Identifier: MIT OR Apache-2.0

//! Territory counting helper
//!
//! Not wired into any variant: none of the shipped modes score territory.
//! Kept for consumers that want an estimate over a finished board.

use std::collections::{HashSet, VecDeque};

use crate::board::Board;
use crate::{ColorId, Coord};

/// Count surrounded territory per color id.
///
/// Each empty region is flood-filled; if every stone bordering the region
/// shares one color, the region's size is credited to that color. Regions
/// bordered by multiple colors (or by nothing) count for no one.
pub fn territory(board: &Board, color_count: u8) -> Vec<u32> {
    let mut tally = vec![0u32; color_count as usize];
    let mut seen = HashSet::<Coord>::new();

    for coord in board.coords() {
        if board.get(coord).is_some() || seen.contains(&coord) {
            continue;
        }
        let (region, borders) = region_and_borders(board, coord, &mut seen);
        if borders.len() == 1 {
            let owner = borders.into_iter().next().unwrap();
            tally[owner.index()] += region.len() as u32;
        }
    }

    tally
}

/// BFS over empty cells; returns the region and the bordering stone colors.
fn region_and_borders(
    board: &Board,
    start: Coord,
    global_seen: &mut HashSet<Coord>,
) -> (HashSet<Coord>, HashSet<ColorId>) {
    let mut queue = VecDeque::from([start]);
    let mut region = HashSet::from([start]);
    let mut borders = HashSet::new();
    global_seen.insert(start);

    while let Some(current) = queue.pop_front() {
        for neighbor in board.adjacent(current) {
            match board.get(neighbor) {
                Some(color) => {
                    borders.insert(color);
                }
                None => {
                    if region.insert(neighbor) {
                        global_seen.insert(neighbor);
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }

    (region, borders)
}
