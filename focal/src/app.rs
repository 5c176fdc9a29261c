use std::io::stdout;
use std::path::Path;
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use derive_more::From;
use lucerna::SessionStore;
use ratatui::{
    Frame,
    style::{Style, Stylize},
    text::ToLine,
    widgets::Padding,
};
use thiserror::Error;

use crate::config::Config;
use crate::page;
use crate::utils::ROUNDED_BLOCK;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// An app message
pub enum Message {
    /// An error occurred
    Error(Box<dyn std::error::Error + Send>),
    /// Show a specific page
    Show(page::Page),
    /// Reset to the dashboard
    Reset,
    /// Quit the application
    Quit,
}

#[derive(Debug, From, Error)]
pub enum StartupError {
    #[error("Failed to read snapshot file: {0}")]
    ReadSnapshot(std::io::Error),

    #[error("{0}")]
    Import(lucerna::SnapshotError),
}

/// The app itself
pub struct App {
    page: page::Page,
    config: Config,
    store: SessionStore,
}

impl App {
    /// Creates a new `App`, optionally restoring a snapshot first.
    pub fn new(config: Config, snapshot: Option<&Path>) -> Result<Self, StartupError> {
        let mut store = SessionStore::new();
        if let Some(path) = snapshot {
            let json = std::fs::read_to_string(path)?;
            store.import_json(&json)?;
        }

        Ok(Self {
            page: page::Dashboard::new(&store).into(),
            config,
            store,
        })
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        execute!(stdout(), SetCursorStyle::SteadyBar)?;

        loop {
            let event = event::poll(POLL_INTERVAL)?.then(event::read).transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Error(error) => self.page = page::Error::from(error).into(),
                    Message::Show(page) => self.page = page,
                    Message::Reset => self.page = page::Dashboard::new(&self.store).into(),
                    Message::Quit => break,
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        ratatui::restore();

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let theme = &self.config.settings.theme;
        let mut block = ROUNDED_BLOCK
            .style(Style::new().fg(theme.term_fg).bg(theme.term_bg))
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("FOCAL".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.config) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.config, &self.store);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        let event = event_opt?;
        self.page
            .handle_events(&event, &self.config, &mut self.store)
            .or_else(|| match event {
                Event::Key(key) => Self::handle_key_event(&key),
                _ => None,
            })
    }

    /// Global key events
    const fn handle_key_event(key: &KeyEvent) -> Option<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Esc, KeyModifiers::NONE) => Some(Message::Reset),
            _ => None,
        }
    }
}
