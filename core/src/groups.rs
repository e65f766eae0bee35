// SPDX-License-Identifier: MIT OR Apache-2.0

//! Group flood fill and liberty counting

use std::collections::HashSet;

use crate::board::Board;
use crate::Coord;

/// Find all stones in the group connected to the stone at `seed`.
///
/// Breadth-first traversal over 4-adjacent same-colored cells. An empty
/// seed returns the empty set.
pub fn group(board: &Board, seed: Coord) -> HashSet<Coord> {
    let target_color = match board.get(seed) {
        Some(color) => color,
        None => return HashSet::new(),
    };

    let mut members = HashSet::new();
    let mut queue = vec![seed];

    while let Some(current) = queue.pop() {
        if !members.insert(current) {
            continue;
        }

        for neighbor in board.adjacent(current) {
            if board.get(neighbor) == Some(target_color) && !members.contains(&neighbor) {
                queue.push(neighbor);
            }
        }
    }

    members
}

/// Count the distinct empty cells adjacent to any stone in the group.
///
/// Distinct liberty cells, not adjacency edges: a single empty cell touching
/// three group stones counts once.
pub fn liberties(board: &Board, group: &HashSet<Coord>) -> usize {
    let mut liberty_cells = HashSet::new();

    for &coord in group {
        for neighbor in board.adjacent(coord) {
            if board.get(neighbor).is_none() {
                liberty_cells.insert(neighbor);
            }
        }
    }

    liberty_cells.len()
}
