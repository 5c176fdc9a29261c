use crossterm::event::Event;
use lucerna::SessionStore;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod dashboard;
pub mod entry;
pub mod error;
pub mod reference;

pub use dashboard::Dashboard;
pub use entry::Entry;
pub use error::Error;
pub use reference::Reference;

use crate::{app::Message, config::Config};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Dashboard, Entry, Reference, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config, store: &SessionStore) {
        match self {
            Self::Dashboard(page) => page.render(frame, area, config, store),
            Self::Entry(page) => page.render(frame, area, config, store),
            Self::Reference(page) => page.render(frame, area, config, store),
            Self::Error(page) => page.render(frame, area, config, store),
        }
    }

    pub fn render_top(&mut self, config: &Config) -> Option<Line<'_>> {
        match self {
            Self::Dashboard(page) => page.render_top(config),
            Self::Entry(page) => page.render_top(config),
            Self::Reference(page) => page.render_top(config),
            Self::Error(page) => page.render_top(config),
        }
    }

    pub fn handle_events(
        &mut self,
        event: &Event,
        config: &Config,
        store: &mut SessionStore,
    ) -> Option<Message> {
        match self {
            Self::Dashboard(page) => page.handle_events(event, config, store),
            Self::Entry(page) => page.handle_events(event, config, store),
            Self::Reference(page) => page.handle_events(event, config, store),
            Self::Error(page) => page.handle_events(event, config, store),
        }
    }
}
