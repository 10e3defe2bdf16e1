use quadris_engine::{RenderCell, Shape};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Paragraph, Widget},
};

pub use self::{board_display::*, game_display::*, side_panel::*};

mod board_display;
mod game_display;
mod side_panel;

const BACKGROUND: Color = Color::Rgb(0, 0, 0);
const GHOST: Style = Style::new().fg(Color::Rgb(255, 255, 255)).bg(BACKGROUND);
const EMPTY_DOT: Style = Style::new().fg(Color::Rgb(127, 127, 127)).bg(BACKGROUND);

fn shape_color(shape: Shape) -> Color {
    let (r, g, b) = shape.color().rgb();
    Color::Rgb(r, g, b)
}

/// One board cell, drawn two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct CellDisplay {
    style: Style,
    symbol: &'static str,
}

impl CellDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub fn from_render_cell(cell: RenderCell) -> Self {
        match cell {
            RenderCell::Empty => Self {
                style: EMPTY_DOT,
                symbol: ".",
            },
            RenderCell::Ghost => Self {
                style: GHOST,
                symbol: "[]",
            },
            RenderCell::Piece(shape) => Self::from_shape(shape),
        }
    }

    pub fn from_shape(shape: Shape) -> Self {
        let color = shape_color(shape);
        Self {
            style: Style::new().fg(color).bg(color),
            symbol: "",
        }
    }
}

impl Widget for CellDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
