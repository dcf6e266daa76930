//! Piece module - 4x4 piece matrices and pure transforms
//!
//! A piece is immutable data: a 4x4 occupancy matrix plus an anchor (x, y),
//! the board coordinate of the matrix's top-left corner. Movement and
//! rotation produce new values; callers check legality against the board
//! afterward.

use blockfall_types::{ShapeKind, SPAWN_X, SPAWN_Y};

use crate::rng::SimpleRng;

/// 4x4 occupancy matrix, row-major
pub type PieceMatrix = [[bool; 4]; 4];

/// Build a matrix from four row bitmasks (most significant bit = left column).
const fn pattern(rows: [u8; 4]) -> PieceMatrix {
    let mut m = [[false; 4]; 4];
    let mut i = 0;
    while i < 4 {
        let mut j = 0;
        while j < 4 {
            m[i][j] = (rows[i] & (1 << (3 - j))) != 0;
            j += 1;
        }
        i += 1;
    }
    m
}

/// The seven canonical shape templates, in [`ShapeKind::ALL`] order.
const SHAPES: [PieceMatrix; 7] = [
    // I
    pattern([0b0000, 0b1111, 0b0000, 0b0000]),
    // O
    pattern([0b0110, 0b0110, 0b0000, 0b0000]),
    // T
    pattern([0b0100, 0b1110, 0b0000, 0b0000]),
    // S
    pattern([0b0110, 0b1100, 0b0000, 0b0000]),
    // Z
    pattern([0b1100, 0b0110, 0b0000, 0b0000]),
    // J
    pattern([0b1000, 0b1110, 0b0000, 0b0000]),
    // L
    pattern([0b0010, 0b1110, 0b0000, 0b0000]),
];

/// Horizontal offsets tried, in order, when a rotation collides.
///
/// A single fixed sequence applies uniformly to every shape; there are no
/// vertical kicks.
pub const KICK_OFFSETS: [i8; 6] = [-1, 1, -2, 2, -3, 3];

/// A falling (or queued) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: ShapeKind,
    pub cells: PieceMatrix,
    /// Board x of the matrix's top-left corner
    pub x: i8,
    /// Board y of the matrix's top-left corner
    pub y: i8,
}

impl Piece {
    /// Create a piece of the given shape at the spawn anchor.
    pub fn spawn(kind: ShapeKind) -> Self {
        let index = ShapeKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        Self {
            kind,
            cells: SHAPES[index],
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Draw a uniformly random shape at the spawn anchor.
    pub fn random(rng: &mut SimpleRng) -> Self {
        let kind = ShapeKind::ALL[rng.next_range(7) as usize];
        Self::spawn(kind)
    }

    /// The piece moved by (dx, dy); legality is the caller's concern.
    pub fn translated(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The piece rotated 90 degrees clockwise around the matrix center:
    /// `new[j][3-i] = old[i][j]` (transpose then reverse rows).
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; 4]; 4];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, occupied) in row.iter().enumerate() {
                if *occupied {
                    cells[j][3 - i] = true;
                }
            }
        }
        Self { cells, ..*self }
    }

    /// Board coordinates of the occupied cells.
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells.iter().enumerate().flat_map(move |(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, occupied)| **occupied)
                .map(move |(j, _)| (self.x + j as i8, self.y + i as i8))
        })
    }
}

/// Rotate a piece clockwise with wall kicks.
///
/// The naive rotation is tried first; if it collides, the offsets in
/// [`KICK_OFFSETS`] are applied to the rotated candidate in order and the
/// first non-colliding position wins. Returns `None` when every candidate
/// collides, in which case the caller keeps the pre-rotation piece.
pub fn try_rotate_cw(piece: &Piece, collides: impl Fn(&Piece) -> bool) -> Option<Piece> {
    let rotated = piece.rotated_cw();
    if !collides(&rotated) {
        return Some(rotated);
    }
    for offset in KICK_OFFSETS {
        let kicked = rotated.translated(offset, 0);
        if !collides(&kicked) {
            return Some(kicked);
        }
    }
    None
}
