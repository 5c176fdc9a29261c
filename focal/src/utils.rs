use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType},
};

use crate::config::theme::TextTheme;

/// A block with a rounded border
pub const ROUNDED_BLOCK: Block = Block::bordered().border_type(BorderType::Rounded);

pub fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area_horizontal] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical])
        .flex(Flex::Center)
        .areas(area_horizontal);
    area
}

/// A transient feedback line shown at the bottom of a page.
#[derive(Debug, Clone)]
pub struct StatusLine {
    text: String,
    kind: StatusKind,
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Warning,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Warning,
        }
    }

    pub fn to_line(&self, theme: &TextTheme) -> Line<'_> {
        let color = match self.kind {
            StatusKind::Info => theme.success,
            StatusKind::Warning => theme.warning,
        };
        Line::styled(self.text.as_str(), Style::new().fg(color))
    }
}
