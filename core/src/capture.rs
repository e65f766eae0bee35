// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capture resolution: zero-liberty sweep and ko point derivation

use std::collections::HashSet;

use crate::board::Board;
use crate::groups;
use crate::{ColorId, Coord};

/// Result of running capture resolution after a placement or move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Every stone removed, with its color
    pub removed: Vec<(Coord, ColorId)>,
    /// Stones removed per color id
    pub removed_by_color: Vec<u16>,
    /// Forbidden recapture target for the immediately following action
    pub ko: Option<Coord>,
}

impl CaptureOutcome {
    /// Total stones removed across all colors
    pub fn total_removed(&self) -> usize {
        self.removed.len()
    }
}

/// Remove every zero-liberty group from a board on which a stone was just
/// placed or moved to `played`.
///
/// Scans each cell once; every stone's group is computed at most one time.
/// The group containing `played` is judged last, on the post-removal board,
/// so that captures it produces are never mistaken for its own death. On
/// boards reached through the validator that final check never removes
/// anything.
///
/// Ko point rule: if exactly one stone was removed in total, and the group
/// containing `played` is a single stone with exactly one liberty after
/// removal, the ko point is the removed stone's cell.
pub fn resolve(board: &mut Board, played: Coord, color_count: u8) -> CaptureOutcome {
    let mut removed = Vec::new();
    let mut removed_by_color = vec![0u16; color_count as usize];

    let own_group = groups::group(board, played);
    let mut visited: HashSet<Coord> = own_group.clone();

    for coord in board.coords().collect::<Vec<_>>() {
        if visited.contains(&coord) {
            continue;
        }
        let color = match board.get(coord) {
            Some(c) => c,
            None => continue,
        };

        let members = groups::group(board, coord);
        // Mark the whole group visited regardless of outcome to avoid
        // rescanning it from another member cell.
        visited.extend(members.iter().copied());

        if groups::liberties(board, &members) == 0 {
            for &member in &members {
                board.remove(member);
                removed.push((member, color));
            }
            removed_by_color[color.index()] += u16::try_from(members.len()).unwrap_or(u16::MAX);
        }
    }

    // The played group, judged on the post-removal board
    let own_group = groups::group(board, played);
    if !own_group.is_empty() && groups::liberties(board, &own_group) == 0 {
        let color = board.get(played);
        for &member in &own_group {
            if let Some(c) = board.remove(member) {
                removed.push((member, c));
                removed_by_color[c.index()] += 1;
            }
        }
        tracing::warn!(?played, ?color, "played group had no liberties after sweep");
    }

    let ko = derive_ko(board, played, &removed);

    CaptureOutcome {
        removed,
        removed_by_color,
        ko,
    }
}

/// Single-stone immediate-recapture heuristic; not superko detection.
fn derive_ko(board: &Board, played: Coord, removed: &[(Coord, ColorId)]) -> Option<Coord> {
    if removed.len() != 1 {
        return None;
    }

    let own_group = groups::group(board, played);
    if own_group.len() == 1 && groups::liberties(board, &own_group) == 1 {
        Some(removed[0].0)
    } else {
        None
    }
}
