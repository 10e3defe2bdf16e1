use quadris_engine::{GameState, RenderBoard};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, Widget},
};

use super::{BoardDisplay, CellDisplay, SidePanel};

const UPCOMING_COUNT: usize = 5;

#[derive(Debug)]
pub struct GameDisplay<'a> {
    state: &'a GameState,
}

impl<'a> GameDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        #[expect(clippy::cast_possible_truncation)]
        let board_width = RenderBoard::WIDTH as u16 * CellDisplay::WIDTH + 2;
        let [board_area, panel_area] = Layout::horizontal([
            Constraint::Length(board_width),
            Constraint::Length(SidePanel::WIDTH),
        ])
        .flex(Flex::Center)
        .areas(area);

        let title = if self.state.is_game_over() {
            "GAME OVER"
        } else {
            "QUADRIS"
        };
        let render = self.state.render();
        BoardDisplay::new(&render)
            .block(BlockWidget::bordered().title(title))
            .render(board_area, buf);

        SidePanel::new(
            self.state.sequencer().upcoming(UPCOMING_COUNT),
            self.state.locked_pieces(),
            self.state.cleared_lines(),
        )
        .render(panel_area, buf);
    }
}
