use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use quadris_engine::{Command, GameState};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::Text,
};

use crate::ui::GameDisplay;

#[derive(Debug)]
pub struct App {
    state: GameState,
    is_exiting: bool,
}

impl App {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            is_exiting: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        while !self.is_exiting {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_event(&event::read()?);
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) {
        let help_text = if self.state.is_game_over() {
            "Game over | Esc (Quit)"
        } else {
            "Controls: ← → A D (Move) | ↓ S (Soft Drop) | ↑ W (Hard Drop) | Q Z / E X (Rotate) | Esc (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(GameDisplay::new(&self.state), main_area);
        frame.render_widget(help_text, help_area);
    }

    fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };
        if event.kind != KeyEventKind::Press {
            return;
        }
        if event.code == KeyCode::Esc {
            self.is_exiting = true;
            return;
        }
        if let Some(command) = key_command(event.code) {
            self.state = self.state.apply(command);
        }
    }
}

fn key_command(code: KeyCode) -> Option<Command> {
    let command = match code {
        KeyCode::Left | KeyCode::Char('a') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Command::MoveRight,
        KeyCode::Down | KeyCode::Char('s') => Command::SoftDrop,
        KeyCode::Up | KeyCode::Char('w') => Command::HardDrop,
        KeyCode::Char('q' | 'z') => Command::RotateCounterclockwise,
        KeyCode::Char('e' | 'x') => Command::RotateClockwise,
        _ => return None,
    };
    Some(command)
}
