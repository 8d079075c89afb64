use serde::{Deserialize, Serialize};

use super::{
    piece::Piece,
    shape::{PieceKind, Shape},
};

/// A single cell of the board.
///
/// An occupied cell remembers which piece kind filled it so renderers can color
/// it; for collision and line clearing only occupancy matters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, derive_more::IsVariant,
)]
pub enum Cell {
    /// Empty cell (no piece).
    #[default]
    Empty,
    /// Cell filled by a locked piece of a specific type.
    Occupied(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid board size {rows}x{cols}: both dimensions must be between 1 and 256")]
pub struct BoardSizeError {
    rows: usize,
    cols: usize,
}

/// The fixed grid of locked cells.
///
/// Rows are stored top to bottom in a single row-major vector. Dimensions are
/// fixed at construction; a cell only becomes occupied by locking a piece with
/// [`Board::fill_piece`] and only becomes empty again through
/// [`Board::clear_lines`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, PieceKind, PiecePosition};
///
/// let mut board = Board::new(20, 10).unwrap();
/// let piece = Piece::new(PieceKind::I, PiecePosition::new(0, 19));
/// assert!(!board.is_colliding(&piece));
///
/// board.fill_piece(&piece);
/// assert!(board.is_colliding(&piece));
/// assert_eq!(board.clear_lines(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

impl Board {
    /// Largest accepted number of rows or columns.
    pub const MAX_DIMENSION: usize = 256;

    /// Creates an empty board of `rows × cols` cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardSizeError> {
        let (rows, cols) = Self::check_size(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; usize::from(rows) * usize::from(cols)],
        })
    }

    pub(crate) fn check_size(rows: usize, cols: usize) -> Result<(u16, u16), BoardSizeError> {
        let err = || BoardSizeError { rows, cols };
        let valid = 1..=Self::MAX_DIMENSION;
        if !valid.contains(&rows) || !valid.contains(&cols) {
            return Err(err());
        }
        Ok((
            u16::try_from(rows).map_err(|_| err())?,
            u16::try_from(cols).map_err(|_| err())?,
        ))
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        usize::from(self.rows)
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        usize::from(self.cols)
    }

    pub(crate) fn cols_i32(&self) -> i32 {
        i32::from(self.cols)
    }

    /// All cells in row-major order, top row first.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at column `x`, row `y`, or `None` outside the board.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.cols() {
            return None;
        }
        self.cells.get(y * self.cols() + x).copied()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn playable_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.cols())?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.rows())?;
        Some(y * self.cols() + x)
    }

    /// Returns whether `shape` can be placed with its top-left corner at `(x, y)`.
    ///
    /// Every occupied cell must land within the columns and above the bottom
    /// edge. Cells above the top edge (`y < 0`) skip the occupancy check, so
    /// pieces may hang partly above the visible grid; cells inside the grid
    /// must be empty.
    #[must_use]
    pub fn is_valid(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.occupied_cells().into_iter().all(|(dx, dy)| {
            let (bx, by) = (x + i32::from(dx), y + i32::from(dy));
            if by < 0 {
                return (0..self.cols_i32()).contains(&bx);
            }
            self.index(bx, by)
                .is_some_and(|index| self.cells[index].is_empty())
        })
    }

    /// Returns whether the piece overlaps a wall, the floor or a locked cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        let position = piece.position();
        !self.is_valid(&piece.shape(), position.x(), position.y())
    }

    /// Locks `shape` at `(x, y)` into the board, marking its cells with `kind`.
    ///
    /// Cells above the top edge are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the placement is not valid (see [`Board::is_valid`]).
    pub fn fill_shape(&mut self, shape: &Shape, x: i32, y: i32, kind: PieceKind) {
        assert!(
            self.is_valid(shape, x, y),
            "attempted to lock an invalid placement at ({x}, {y})"
        );
        for (dx, dy) in shape.occupied_cells() {
            if let Some(index) = self.index(x + i32::from(dx), y + i32::from(dy)) {
                self.cells[index] = Cell::Occupied(kind);
            }
        }
    }

    /// Locks the piece's cells into the board.
    ///
    /// # Panics
    ///
    /// Panics if the piece is colliding.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let position = piece.position();
        self.fill_shape(&piece.shape(), position.x(), position.y(), piece.kind());
    }

    /// Clears full rows and returns the number of rows cleared.
    ///
    /// Rows are scanned bottom to top; every surviving row moves down by the
    /// number of full rows found below it, and empty rows enter at the top.
    /// Non-contiguous full rows are handled in the same pass.
    pub fn clear_lines(&mut self) -> usize {
        let cols = self.cols();
        let mut count = 0;
        for y in (0..self.rows()).rev() {
            let row = y * cols..(y + 1) * cols;
            if self.cells[row.clone()].iter().all(|cell| cell.is_occupied()) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.cells.copy_within(row, (y + count) * cols);
            }
        }
        self.cells[..count * cols].fill(Cell::Empty);
        count
    }
}
