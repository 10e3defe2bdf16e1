use quadris_engine::Shape;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Paragraph, Widget},
};

use super::CellDisplay;

/// Upcoming shapes and counters shown next to the board.
#[derive(Debug)]
pub struct SidePanel {
    upcoming: Vec<Shape>,
    locked_pieces: usize,
    cleared_lines: usize,
}

impl SidePanel {
    pub const WIDTH: u16 = 16;

    pub fn new(upcoming: Vec<Shape>, locked_pieces: usize, cleared_lines: usize) -> Self {
        Self {
            upcoming,
            locked_pieces,
            cleared_lines,
        }
    }
}

impl Widget for SidePanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [next_area, stats_area] =
            Layout::vertical([Constraint::Length(12), Constraint::Length(4)]).areas(area);

        let next_block = BlockWidget::bordered().title("NEXT");
        let inner = next_block.inner(next_area);
        next_block.render(next_area, buf);
        for (row, shape) in (inner.y..inner.bottom()).step_by(2).zip(&self.upcoming) {
            let label = Rect::new(inner.x + 1, row, 2, 1);
            Line::from(shape.as_char().to_string()).render(label, buf);
            let cell = Rect::new(inner.x + 4, row, CellDisplay::WIDTH, CellDisplay::HEIGHT);
            CellDisplay::from_shape(*shape).render(cell, buf);
        }

        Paragraph::new(vec![
            Line::from(format!("Lines:  {}", self.cleared_lines)),
            Line::from(format!("Pieces: {}", self.locked_pieces)),
        ])
        .block(BlockWidget::bordered().title("STATS"))
        .render(stats_area, buf);
    }
}
