use std::iter;

use quadris_engine::RenderBoard;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::CellDisplay;

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a RenderBoard,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a RenderBoard) -> Self {
        Self { board, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..RenderBoard::WIDTH).map(|_| Constraint::Length(CellDisplay::WIDTH));
        let row_constraints =
            (0..RenderBoard::HEIGHT).map(|_| Constraint::Length(CellDisplay::HEIGHT));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ RenderBoard::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ RenderBoard::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.board.rows()) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                CellDisplay::from_render_cell(*cell).render(grid_cell, buf);
            }
        }
    }
}
