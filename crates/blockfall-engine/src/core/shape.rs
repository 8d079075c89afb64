use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize, Serializer};

/// Occupancy matrix of a piece, at most 4×4 cells.
///
/// Each row is stored as a bitmask where bit `x` set means column `x` is
/// occupied. Shapes are plain values: rotation returns a new `Shape` and never
/// touches the original.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, Shape};
///
/// let t = PieceKind::T.shape();
/// assert_eq!(t.to_string(), ".#.\n###");
///
/// let rotated = t.rotated_right();
/// assert_eq!((rotated.width(), rotated.height()), (2, 3));
/// assert_eq!(rotated.to_string(), "#.\n##\n#.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    rows: [u8; Shape::MAX_SIZE],
}

impl Shape {
    /// Maximum width and height of a shape.
    pub const MAX_SIZE: usize = 4;
    /// Maximum number of occupied cells in a shape.
    pub const MAX_CELLS: usize = Self::MAX_SIZE * Self::MAX_SIZE;

    /// Builds a shape from a literal `H×W` boolean matrix (`cells[y][x]`).
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than [`Self::MAX_SIZE`].
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn from_cells<const W: usize, const H: usize>(cells: [[bool; W]; H]) -> Self {
        assert!(W > 0 && W <= Self::MAX_SIZE);
        assert!(H > 0 && H <= Self::MAX_SIZE);
        let mut rows = [0; Self::MAX_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                if cells[y][x] {
                    rows[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            rows,
        }
    }

    /// Number of columns of the bounding box.
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows of the bounding box.
    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns whether the cell at column `x`, row `y` is occupied.
    ///
    /// Cells outside the bounding box are never occupied.
    #[must_use]
    pub const fn is_occupied(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.rows[y as usize] & (1 << x) != 0
    }

    /// Returns the `(x, y)` offsets of all occupied cells, row by row.
    #[must_use]
    pub fn occupied_cells(&self) -> ArrayVec<(u8, u8), { Shape::MAX_CELLS }> {
        let mut cells = ArrayVec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_occupied(x, y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Returns this shape rotated 90° clockwise.
    ///
    /// A `rows × cols` matrix becomes `cols × rows`, with
    /// `result[j][rows - 1 - i] = source[i][j]`.
    #[must_use]
    pub const fn rotated_right(self) -> Self {
        let height = self.height as usize;
        let mut rows = [0; Self::MAX_SIZE];
        let mut i = 0;
        while i < height {
            let mut j = 0;
            while j < self.width as usize {
                if self.rows[i] & (1 << j) != 0 {
                    rows[j] |= 1 << (height - 1 - i);
                }
                j += 1;
            }
            i += 1;
        }
        Self {
            width: self.height,
            height: self.width,
            rows,
        }
    }

    fn row_string(&self, y: u8) -> String {
        (0..self.width)
            .map(|x| if self.is_occupied(x, y) { '#' } else { '.' })
            .collect()
    }
}

/// Renders the shape as `#`/`.` rows separated by newlines.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&self.row_string(y))?;
        }
        Ok(())
    }
}

impl Serialize for Shape {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Format: one string per row (e.g., [".#.", "###"])
        serializer.collect_seq((0..self.height).map(|y| self.row_string(y)))
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in declaration order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the canonical (spawn orientation) shape of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }
}

const SHAPES: [Shape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    [
        // I-piece
        Shape::from_cells([[C, C, C, C]]),
        // O-piece
        Shape::from_cells([[C, C], [C, C]]),
        // T-piece
        Shape::from_cells([[E, C, E], [C, C, C]]),
        // S-piece
        Shape::from_cells([[E, C, C], [C, C, E]]),
        // Z-piece
        Shape::from_cells([[C, C, E], [E, C, C]]),
        // J-piece
        Shape::from_cells([[C, E, E], [C, C, C]]),
        // L-piece
        Shape::from_cells([[E, E, C], [C, C, C]]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_shapes() {
        let expected = [
            (PieceKind::I, "####"),
            (PieceKind::O, "##\n##"),
            (PieceKind::T, ".#.\n###"),
            (PieceKind::S, ".##\n##."),
            (PieceKind::Z, "##.\n.##"),
            (PieceKind::J, "#..\n###"),
            (PieceKind::L, "..#\n###"),
        ];
        for (kind, pattern) in expected {
            assert_eq!(kind.shape().to_string(), pattern, "shape of {kind}");
        }
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().occupied_cells().len(), 4, "cells of {kind}");
        }
    }

    #[test]
    fn test_rotate_i_piece() {
        let i = PieceKind::I.shape();
        let vertical = i.rotated_right();
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        assert_eq!(vertical.to_string(), "#\n#\n#\n#");
        assert_eq!(vertical.rotated_right(), i);
    }

    #[test]
    fn test_rotate_follows_clockwise_formula() {
        // result[j][rows - 1 - i] = source[i][j]
        for kind in PieceKind::ALL {
            let source = kind.shape();
            let rotated = source.rotated_right();
            for i in 0..source.height() {
                for j in 0..source.width() {
                    assert_eq!(
                        rotated.is_occupied(source.height() - 1 - i, j),
                        source.is_occupied(j, i),
                        "{kind} cell ({i}, {j})",
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotate_l_piece_sequence() {
        let l = PieceKind::L.shape();
        let r1 = l.rotated_right();
        let r2 = r1.rotated_right();
        let r3 = r2.rotated_right();
        assert_eq!(r1.to_string(), "#.\n#.\n##");
        assert_eq!(r2.to_string(), "###\n#..");
        assert_eq!(r3.to_string(), "##\n.#\n.#");
        assert_eq!(r3.rotated_right(), l);
    }

    #[test]
    fn test_rotate_does_not_mutate_source() {
        let t = PieceKind::T.shape();
        let copy = t;
        let _ = t.rotated_right();
        assert_eq!(t, copy);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            let rotated = shape
                .rotated_right()
                .rotated_right()
                .rotated_right()
                .rotated_right();
            assert_eq!(rotated, shape, "four rotations of {kind}");
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let o = PieceKind::O.shape();
        assert_eq!(o.rotated_right(), o);
    }

    #[test]
    fn test_is_occupied_outside_bounds() {
        let t = PieceKind::T.shape();
        assert!(!t.is_occupied(3, 0));
        assert!(!t.is_occupied(0, 2));
    }

    #[test]
    fn test_shape_serialization() {
        let serialized = serde_json::to_string(&PieceKind::S.shape()).unwrap();
        assert_eq!(serialized, r###"[".##","##."]"###);
    }

    #[test]
    fn test_piece_kind_display() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.to_string(), kind.as_char().to_string());
        }
    }
}
