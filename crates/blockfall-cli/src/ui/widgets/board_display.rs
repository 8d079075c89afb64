use std::iter;

use blockfall_engine::Snapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// The playfield: locked cells with the falling piece on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a Snapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells_to_u16(self.snapshot.cols(), BlockDisplay::WIDTH)
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(self.snapshot.rows(), BlockDisplay::HEIGHT)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let cols = self.snapshot.cols();
        let rows = self.snapshot.rows();
        let horizontal = Layout::horizontal(
            (0..cols).map(|_| Constraint::Length(BlockDisplay::WIDTH)),
        )
        .flex(Flex::Center);
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));

        let grid_rows = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));
        let cells = self.snapshot.composed_cells();

        for (grid_row, row) in iter::zip(grid_rows, cells.chunks_exact(cols)) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                BlockDisplay::from_cell(*cell, true).render(grid_cell, buf);
            }
        }
    }
}
