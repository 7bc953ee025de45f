//! Single-channel planes and the stacked feature tensor.

use cozy_chess::Square;
use serde::{Deserialize, Serialize};

/// Board size along each axis.
pub const BOARD_SIZE: usize = 8;

/// Number of stacked planes in a [`FeatureTensor`].
pub const NUM_PLANES: usize = 3;

/// Total number of bytes in a tensor: 8 × 8 × 3 = 192
pub const NUM_FEATURES: usize = BOARD_SIZE * BOARD_SIZE * NUM_PLANES;

/// Channel index of the piece strength plane.
pub const STRENGTH_PLANE: usize = 0;
/// Channel index of the king location plane.
pub const KING_PLANE: usize = 1;
/// Channel index of the square contest plane.
pub const CONTEST_PLANE: usize = 2;

/// An 8x8 grid of bytes. Row 0 is rank 8, column 0 is the a-file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Plane([[u8; BOARD_SIZE]; BOARD_SIZE]);

impl Plane {
    /// Neutral mid-gray used for empty or uncontested squares.
    pub const BACKGROUND: u8 = 127;

    /// A plane filled with [`Plane::BACKGROUND`].
    pub fn background() -> Self {
        Self([[Self::BACKGROUND; BOARD_SIZE]; BOARD_SIZE])
    }

    pub fn from_rows(rows: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.0[row][col]
    }

    /// Value stored for a board square.
    #[inline]
    pub fn at(&self, square: Square) -> u8 {
        let (row, col) = square_to_cell(square);
        self.0[row][col]
    }

    /// Only encoders write planes, and only while building them.
    #[inline]
    pub(crate) fn set(&mut self, square: Square, value: u8) {
        let (row, col) = square_to_cell(square);
        self.0[row][col] = value;
    }

    /// Iterates all 64 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().flat_map(|row| row.iter().copied())
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::background()
    }
}

/// Maps a square onto (row, col) with rank 8 on top.
#[inline]
pub fn square_to_cell(square: Square) -> (usize, usize) {
    let rank = square.rank() as usize;
    let file = square.file() as usize;
    (BOARD_SIZE - 1 - rank, file)
}

/// The (8, 8, 3) stack `[strength, king, contest]`, stored height-width-channel.
///
/// Serializes as nested arrays in the same layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureTensor {
    data: [[[u8; NUM_PLANES]; BOARD_SIZE]; BOARD_SIZE],
}

impl FeatureTensor {
    /// Stacks three planes in channel order.
    pub fn assemble(strength: &Plane, king: &Plane, contest: &Plane) -> Self {
        let mut data = [[[0u8; NUM_PLANES]; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in data.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = [
                    strength.get(row, col),
                    king.get(row, col),
                    contest.get(row, col),
                ];
            }
        }
        Self { data }
    }

    /// Pulls the stack apart again, preserving channel order.
    ///
    /// `FeatureTensor::assemble(&a, &b, &c).split() == [a, b, c]` for any planes.
    pub fn split(&self) -> [Plane; NUM_PLANES] {
        [
            self.channel(STRENGTH_PLANE),
            self.channel(KING_PLANE),
            self.channel(CONTEST_PLANE),
        ]
    }

    /// Copies one channel out as a plane.
    ///
    /// # Panics
    /// Panics if `index >= NUM_PLANES`.
    pub fn channel(&self, index: usize) -> Plane {
        let mut rows = [[0u8; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in rows.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = self.data[row][col][index];
            }
        }
        Plane::from_rows(rows)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize, channel: usize) -> u8 {
        self.data[row][col][channel]
    }

    /// Flattens to `NUM_FEATURES` bytes in height-width-channel order.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|row| row.iter().flat_map(|cell| cell.iter().copied()))
            .collect()
    }

    /// Rebuilds a tensor from [`FeatureTensor::to_bytes`] output.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != NUM_FEATURES {
            return None;
        }
        let mut data = [[[0u8; NUM_PLANES]; BOARD_SIZE]; BOARD_SIZE];
        for (i, chunk) in bytes.chunks_exact(NUM_PLANES).enumerate() {
            data[i / BOARD_SIZE][i % BOARD_SIZE].copy_from_slice(chunk);
        }
        Some(Self { data })
    }

    /// Lays the planes next to each other in one 8x24 grayscale canvas,
    /// strength on the left, contest on the right. Handy for eyeballing.
    pub fn side_by_side(&self) -> [[u8; BOARD_SIZE * NUM_PLANES]; BOARD_SIZE] {
        let mut canvas = [[0u8; BOARD_SIZE * NUM_PLANES]; BOARD_SIZE];
        for (index, plane) in self.split().iter().enumerate() {
            for (row, cells) in plane.rows().iter().enumerate() {
                canvas[row][index * BOARD_SIZE..(index + 1) * BOARD_SIZE].copy_from_slice(cells);
            }
        }
        canvas
    }
}

#[cfg(test)]
#[path = "plane_tests.rs"]
mod plane_tests;
