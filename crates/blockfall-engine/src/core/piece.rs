use serde::{Deserialize, Serialize};

use super::{
    board::Board,
    shape::{PieceKind, Shape},
};

/// A falling piece: a kind, its current geometry and the board position of the
/// geometry's top-left corner.
///
/// Pieces are immutable - movement and rotation operations return new `Piece`
/// instances, and the engine only stores one after the board accepted it.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Piece, PieceKind, PiecePosition};
///
/// let piece = Piece::new(PieceKind::T, PiecePosition::new(3, 0));
/// let moved = piece.right();
/// assert_eq!(moved.position(), PiecePosition::new(4, 0));
///
/// let rotated = moved.rotated_right();
/// assert_eq!(rotated.shape(), piece.rotated_shape());
/// assert_eq!(rotated.position(), moved.position());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece in its canonical orientation at `position`.
    #[must_use]
    pub const fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            position,
        }
    }

    /// Creates a piece at the spawn position of `board`.
    ///
    /// The piece is horizontally centered (`cols / 2 - width / 2`) on the top row.
    #[must_use]
    pub fn spawn(kind: PieceKind, board: &Board) -> Self {
        let shape = kind.shape();
        let x = board.cols_i32() / 2 - i32::from(shape.width()) / 2;
        Self::new(kind, PiecePosition::new(x, 0))
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Current geometry, possibly rotated from the canonical shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Returns absolute board coordinates of the occupied cells.
    ///
    /// Coordinates can lie outside the board; validity is the board's concern.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let PiecePosition { x, y } = self.position;
        self.shape
            .occupied_cells()
            .into_iter()
            .map(move |(dx, dy)| (x + i32::from(dx), y + i32::from(dy)))
    }

    /// Computes the current geometry rotated 90° clockwise without touching
    /// this piece.
    #[must_use]
    pub const fn rotated_shape(&self) -> Shape {
        self.shape.rotated_right()
    }

    /// Same piece and position with the rotated geometry.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            kind: self.kind,
            shape: self.rotated_shape(),
            position: self.position,
        }
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.moved(0, 1)
    }

    #[must_use]
    pub const fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            kind: self.kind,
            shape: self.shape,
            position: self.position.offset(dx, dy),
        }
    }
}

/// Position of a piece's top-left corner on the board.
///
/// # Coordinate System
///
/// - (0, 0) is the top-left cell of the board
/// - X increases rightward (columns)
/// - Y increases downward (rows)
/// - Both may be negative or past the board edge while a move is being checked
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: usize, cols: usize) -> Board {
        Board::new(rows, cols).unwrap()
    }

    #[test]
    fn test_spawn_is_centered() {
        let board = board(20, 10);
        let cases = [
            (PieceKind::I, 3),
            (PieceKind::O, 4),
            (PieceKind::T, 4),
            (PieceKind::S, 4),
            (PieceKind::Z, 4),
            (PieceKind::J, 4),
            (PieceKind::L, 4),
        ];
        for (kind, x) in cases {
            let piece = Piece::spawn(kind, &board);
            assert_eq!(piece.position(), PiecePosition::new(x, 0), "spawn of {kind}");
            assert_eq!(piece.shape(), kind.shape());
        }
    }

    #[test]
    fn test_spawn_on_narrow_board() {
        let board = board(4, 4);
        assert_eq!(Piece::spawn(PieceKind::I, &board).position().x(), 0);
        assert_eq!(Piece::spawn(PieceKind::T, &board).position().x(), 1);
        assert_eq!(Piece::spawn(PieceKind::O, &board).position().x(), 1);
    }

    #[test]
    fn test_moves_keep_geometry() {
        let piece = Piece::new(PieceKind::S, PiecePosition::new(2, 5));
        assert_eq!(piece.left().position(), PiecePosition::new(1, 5));
        assert_eq!(piece.right().position(), PiecePosition::new(3, 5));
        assert_eq!(piece.down().position(), PiecePosition::new(2, 6));
        assert_eq!(piece.left().shape(), piece.shape());
        assert_eq!(piece.left().kind(), PieceKind::S);
    }

    #[test]
    fn test_moves_can_leave_board() {
        let piece = Piece::new(PieceKind::O, PiecePosition::new(0, 0));
        assert_eq!(piece.left().position(), PiecePosition::new(-1, 0));
        assert_eq!(piece.moved(0, -2).position(), PiecePosition::new(0, -2));
    }

    #[test]
    fn test_rotated_shape_is_pure() {
        let piece = Piece::new(PieceKind::J, PiecePosition::new(4, 4));
        let rotated = piece.rotated_shape();
        assert_eq!(piece.shape(), PieceKind::J.shape());
        assert_eq!(rotated, PieceKind::J.shape().rotated_right());
    }

    #[test]
    fn test_occupied_positions() {
        let piece = Piece::new(PieceKind::T, PiecePosition::new(3, -1));
        let positions: Vec<_> = piece.occupied_positions().collect();
        assert_eq!(positions, vec![(4, -1), (3, 0), (4, 0), (5, 0)]);
    }

    #[test]
    fn test_piece_serialization() {
        let piece = Piece::new(PieceKind::O, PiecePosition::new(4, 18));
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(
            serialized,
            r###"{"kind":"O","shape":["##","##"],"position":{"x":4,"y":18}}"###
        );
    }
}
