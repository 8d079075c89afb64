use blockfall_engine::{Cell, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::Widget,
};

use crate::ui::widgets::BlockDisplay;

/// A single piece kind in its spawn orientation, centered in a 4x2 box.
#[derive(Debug)]
pub struct PieceDisplay {
    kind: PieceKind,
}

impl PieceDisplay {
    pub const fn new(kind: PieceKind) -> Self {
        Self { kind }
    }

    pub const fn inner_width() -> u16 {
        4 * BlockDisplay::WIDTH
    }

    pub const fn inner_height() -> u16 {
        2 * BlockDisplay::HEIGHT
    }
}

impl Widget for PieceDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let kind = self.kind;
        let shape = kind.shape();
        let piece_area = area.centered(
            Constraint::Length(u16::from(shape.width()) * BlockDisplay::WIDTH),
            Constraint::Length(u16::from(shape.height()) * BlockDisplay::HEIGHT),
        );

        let horizontal = Layout::horizontal(
            (0..shape.width()).map(|_| Constraint::Length(BlockDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical =
            Layout::vertical((0..shape.height()).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let occupied = BlockDisplay::from_cell(Cell::Occupied(kind), false);
        let empty = BlockDisplay::from_cell(Cell::Empty, false);
        for (y, row) in (0..).zip(piece_area.layout_vec(&vertical)) {
            for (x, grid_cell) in (0..).zip(row.layout_vec(&horizontal)) {
                let display = if shape.is_occupied(x, y) {
                    &occupied
                } else {
                    &empty
                };
                display.render(grid_cell, buf);
            }
        }
    }
}
