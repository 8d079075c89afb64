use crate::{
    CompletePieceDropError, PieceCollisionError,
    core::{
        board::Board,
        piece::Piece,
        shape::PieceKind,
    },
};

use super::{
    config::GameConfig,
    piece_queue::{PieceQueue, PieceSeed},
};

/// Board, falling piece and upcoming pieces of one session.
///
/// `GameField` enforces the placement rules: a falling piece is only replaced
/// by one the board accepts, and locking always precedes line clearing and the
/// next spawn. Scoring and the running/game-over state live in
/// [`GameSession`](super::GameSession).
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    piece_queue: PieceQueue,
}

impl GameField {
    /// Creates an empty field and spawns the first piece from the queue.
    ///
    /// The first piece may already collide on a board narrower than the piece;
    /// check with [`Board::is_colliding`].
    #[must_use]
    pub fn new(config: &GameConfig, seed: PieceSeed) -> Self {
        let board = config.empty_board();
        let mut piece_queue = PieceQueue::with_seed(seed, config.lookahead());
        let falling_piece = Piece::spawn(piece_queue.pop_next(), &board);
        Self {
            board,
            falling_piece,
            piece_queue,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.piece_queue.next_pieces()
    }

    /// Replaces the falling piece if the board accepts it.
    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Locks the falling piece, clears full lines and spawns the next piece.
    ///
    /// Returns the number of cleared lines, and an error if the new piece
    /// collides at its spawn position.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), CompletePieceDropError>) {
        self.board.fill_piece(&self.falling_piece);
        let cleared_lines = self.board.clear_lines();

        self.falling_piece = Piece::spawn(self.piece_queue.pop_next(), &self.board);
        if self.board.is_colliding(&self.falling_piece) {
            return (
                cleared_lines,
                Err(CompletePieceDropError::NewPieceCollision),
            );
        }

        (cleared_lines, Ok(()))
    }
}
