use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use crate::{Cell, GameStats, Piece, PieceKind, SessionState};

/// Read-only view of a session after the most recent transition.
///
/// Renderers draw from a snapshot instead of borrowing the session, so nothing
/// they do can reach engine state. Two snapshots taken without a `tick` or
/// command in between compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    falling_piece: Piece,
    next_pieces: Vec<PieceKind>,
    stats: GameStats,
    state: SessionState,
}

impl Snapshot {
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        cells: Vec<Cell>,
        falling_piece: Piece,
        next_pieces: Vec<PieceKind>,
        stats: GameStats,
        state: SessionState,
    ) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self {
            rows,
            cols,
            cells,
            falling_piece,
            next_pieces,
            stats,
            state,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Locked cells in row-major order, top row first.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the locked cell at column `x`, row `y`.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.cols {
            return None;
        }
        self.cells.get(y * self.cols + x).copied()
    }

    /// Locked cells with the falling piece drawn on top.
    ///
    /// Piece cells outside the grid (above the top edge) are left out.
    #[must_use]
    pub fn composed_cells(&self) -> Vec<Cell> {
        let mut cells = self.cells.clone();
        for (x, y) in self.falling_piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < self.cols && y < self.rows {
                cells[y * self.cols + x] = Cell::Occupied(self.falling_piece.kind());
            }
        }
        cells
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    /// Upcoming piece kinds, next one first.
    #[must_use]
    pub fn next_pieces(&self) -> &[PieceKind] {
        &self.next_pieces
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    fn grid_rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks_exact(self.cols).map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(kind) => kind.as_char(),
                })
                .collect()
        })
    }
}

impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Grid rows are strings: '.' for empty, the piece letter for locked cells.
        let grid: Vec<String> = self.grid_rows().collect();
        let mut state = serializer.serialize_struct("Snapshot", 7)?;
        state.serialize_field("rows", &self.rows)?;
        state.serialize_field("cols", &self.cols)?;
        state.serialize_field("grid", &grid)?;
        state.serialize_field("falling_piece", &self.falling_piece)?;
        state.serialize_field("next_pieces", &self.next_pieces)?;
        state.serialize_field("stats", &self.stats)?;
        state.serialize_field("state", &self.state)?;
        state.end()
    }
}
