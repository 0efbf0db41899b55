//! Board encoding from the learner's own point of view
//!
//! The learner always sees its own marks as `+1` and the opponent's as `-1`,
//! whichever physical symbol it plays. One table therefore serves both the
//! opening and the replying seat.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{BoardState, Cell, Player},
};

/// Canonical state key: `+1` own mark, `-1` opponent mark, `0` empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PerspectiveState([i8; 9]);

impl PerspectiveState {
    /// Encode `cells` as seen by the player holding `me`.
    pub fn from_cells(cells: &[Cell; 9], me: Player) -> Self {
        let sign = me.mark();
        Self(cells.map(|cell| cell.value() * sign))
    }

    /// Encode a state from the point of view of the player to move.
    pub fn from_board(state: &BoardState) -> Self {
        Self::from_cells(&state.cells, state.to_move)
    }

    /// Decode back to raw cells for the player holding `me`.
    pub fn to_cells(&self, me: Player) -> [Cell; 9] {
        let sign = me.mark();
        self.0.map(|value| match value * sign {
            1 => Cell::X,
            -1 => Cell::O,
            _ => Cell::Empty,
        })
    }

    /// Build a key from raw values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCellValue`] for values outside `{-1, 0, 1}`.
    pub fn from_values(values: [i8; 9]) -> Result<Self> {
        if let Some((position, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, v)| !(-1..=1).contains(v))
        {
            return Err(Error::InvalidCellValue { value, position });
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> [i8; 9] {
        self.0
    }
}

impl fmt::Display for PerspectiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.0 {
            let c = match value {
                1 => '+',
                -1 => '-',
                _ => '.',
            };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
