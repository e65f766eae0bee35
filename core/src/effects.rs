// SPDX-License-Identifier: MIT OR Apache-2.0

//! Special per-move effects: hidden mines and drone strikes
//!
//! Effects are rolled once, on the live resolution path, and the outcome is
//! recorded on the action itself; replay re-applies the recorded outcome
//! rather than re-rolling.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::variant::VariantConfig;
use crate::{ColorId, Coord};

/// The hidden set of armed trap cells, fixed at game creation.
///
/// Never exposed through any externally-readable representation of game
/// state; consumed mines are deleted as they fire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineField {
    cells: HashSet<Coord>,
}

impl MineField {
    /// Field with no armed cells (variants without mines)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Field with a fixed set of armed cells (prepared boards, tests)
    pub fn with_cells(cells: impl IntoIterator<Item = Coord>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// Arm `config.mine_count()` distinct cells chosen uniformly at random
    pub fn generate<R: Rng>(config: &VariantConfig, rng: &mut R) -> Self {
        let count = config.mine_count();
        if count == 0 {
            return Self::empty();
        }

        let width = config.width as usize;
        let area = width * config.height as usize;
        let cells = rand::seq::index::sample(rng, area, count)
            .into_iter()
            .map(|idx| Coord::new((idx % width) as u8, (idx / width) as u8))
            .collect();

        Self { cells }
    }

    /// Whether the cell is armed
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    /// Disarm a consumed mine; returns false if the cell was not armed
    pub fn consume(&mut self, coord: Coord) -> bool {
        self.cells.remove(&coord)
    }

    /// Number of armed cells remaining
    pub fn armed(&self) -> usize {
        self.cells.len()
    }
}

/// Resolved outcome of a special effect, recorded on the action log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectRecord {
    /// A placed/moved stone landed on a mine. The trigger stone and every
    /// stone in its 8-neighbourhood are destroyed; normal capture and ko
    /// processing is suppressed for the action.
    Explosion {
        /// Cell the triggering stone landed on
        trigger: Coord,
        /// Color of the triggering stone
        color: ColorId,
        /// Neighbouring stones destroyed (the trigger stone is destroyed too)
        destroyed: Vec<(Coord, ColorId)>,
    },
    /// A drone removed one random stone of the color that just moved.
    DroneStrike {
        /// Edge cell the drone entered from
        launched_from: Coord,
        /// The stone it removed
        target: Coord,
        /// Color of the removed stone
        color: ColorId,
    },
}

/// Destroyed stones for an explosion triggered at `trigger`, computed on a
/// board that already holds the triggering stone. Chebyshev adjacency,
/// distinct from the 4-adjacency used for liberties.
pub fn explosion_damage(board: &Board, trigger: Coord) -> Vec<(Coord, ColorId)> {
    board
        .box_neighbors(trigger)
        .into_iter()
        .filter_map(|c| board.get(c).map(|color| (c, color)))
        .collect()
}

/// Roll for a drone strike after a successful place/move by `mover`.
///
/// Fires with the configured probability, and only when the mover and at
/// least one other color both have stones on the board.
pub fn roll_drone<R: Rng>(
    board: &Board,
    config: &VariantConfig,
    mover: ColorId,
    rng: &mut R,
) -> Option<EffectRecord> {
    if config.drone_probability <= 0.0 {
        return None;
    }

    let targets = board.stones_of(mover);
    if targets.is_empty() {
        return None;
    }
    let others_present = (0..config.color_count)
        .map(ColorId)
        .any(|c| c != mover && board.count_stones(c) > 0);
    if !others_present {
        return None;
    }

    if !rng.gen_bool(config.drone_probability) {
        return None;
    }

    let target = *targets.choose(rng)?;
    let launched_from = random_edge_cell(board, rng);
    Some(EffectRecord::DroneStrike {
        launched_from,
        target,
        color: mover,
    })
}

/// A uniformly random cell on one of the four board edges
fn random_edge_cell<R: Rng>(board: &Board, rng: &mut R) -> Coord {
    let w = board.width();
    let h = board.height();
    match rng.gen_range(0..4u8) {
        0 => Coord::new(rng.gen_range(0..w), 0),
        1 => Coord::new(rng.gen_range(0..w), h - 1),
        2 => Coord::new(0, rng.gen_range(0..h)),
        _ => Coord::new(w - 1, rng.gen_range(0..h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn minefield_density_and_consumption() {
        let config = VariantConfig::minefield(9);
        let mut rng = StdRng::seed_from_u64(7);
        let mut mines = MineField::generate(&config, &mut rng);
        assert_eq!(mines.armed(), 8);

        let armed: Vec<Coord> = (0..9)
            .flat_map(|y| (0..9).map(move |x| Coord::new(x, y)))
            .filter(|&c| mines.contains(c))
            .collect();
        assert_eq!(armed.len(), 8);
        assert!(mines.consume(armed[0]));
        assert!(!mines.consume(armed[0]));
        assert_eq!(mines.armed(), 7);
    }

    #[test]
    fn explosion_covers_chebyshev_neighbourhood() {
        let mut board = Board::new(9, 9);
        board.place(Coord::new(4, 4), ColorId(0));
        board.place(Coord::new(3, 3), ColorId(1)); // diagonal: in blast
        board.place(Coord::new(4, 5), ColorId(1));
        board.place(Coord::new(6, 4), ColorId(1)); // distance 2: spared

        let destroyed = explosion_damage(&board, Coord::new(4, 4));
        assert_eq!(destroyed.len(), 2);
        assert!(destroyed.contains(&(Coord::new(3, 3), ColorId(1))));
        assert!(!destroyed.iter().any(|(c, _)| *c == Coord::new(6, 4)));
    }

    #[test]
    fn drone_needs_two_colors_on_board() {
        let config = VariantConfig::minefield(9);
        let mut rng = StdRng::seed_from_u64(1);
        let mut board = Board::new(9, 9);
        board.place(Coord::new(0, 0), ColorId(0));

        for _ in 0..64 {
            assert!(roll_drone(&board, &config, ColorId(0), &mut rng).is_none());
        }

        board.place(Coord::new(8, 8), ColorId(1));
        let fired = (0..256).any(|_| {
            matches!(
                roll_drone(&board, &config, ColorId(0), &mut rng),
                Some(EffectRecord::DroneStrike {
                    target,
                    color: ColorId(0),
                    ..
                }) if target == Coord::new(0, 0)
            )
        });
        assert!(fired, "a 10% roll should fire within 256 attempts");
    }
}
