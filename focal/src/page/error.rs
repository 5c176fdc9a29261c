use crossterm::event::{Event, KeyCode};
use lucerna::SessionStore;
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph},
};

use crate::{app::Message, config::Config, utils::center};

/// Page: Error
///
/// Displays an error
pub struct Error {
    message: String,
}

impl Error {
    pub fn new(message: String) -> Self {
        Self { message }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config, _store: &SessionStore) {
        let center = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let text = Paragraph::new(Line::from(vec![
            Span::styled(
                "Error: ",
                Style::new().bold().fg(config.settings.theme.text.error),
            ),
            Span::raw(self.message.as_str()),
        ]))
        .block(Block::new().padding(Padding::new(0, 0, center.height / 2, 0)));

        frame.render_widget(text, center);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("ERROR | <Enter> back to the dashboard"))
    }

    pub fn handle_events(
        &mut self,
        event: &Event,
        _config: &Config,
        _store: &mut SessionStore,
    ) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && key.code == KeyCode::Enter
        {
            return Some(Message::Reset);
        }

        None
    }
}

impl From<Box<dyn std::error::Error + Send>> for Error {
    fn from(error: Box<dyn std::error::Error + Send>) -> Self {
        Self::new(error.to_string())
    }
}
