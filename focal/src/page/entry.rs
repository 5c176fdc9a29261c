use chrono::{Days, Local, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use lucerna::{SessionDraft, SessionStore, elapsed_minutes};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{List, Paragraph},
};

use crate::{
    app::Message,
    config::Config,
    utils::{ROUNDED_BLOCK, StatusLine},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Date,
    Subject,
    Start,
    End,
    Pauses,
    Focused,
}

impl Field {
    const ORDER: [Self; 6] = [
        Self::Date,
        Self::Subject,
        Self::Start,
        Self::End,
        Self::Pauses,
        Self::Focused,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|field| *field == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

/// Page: Entry
///
/// The session form. Drafts are queued with <Enter> and saved as one batch
/// with <Ctrl-S>; a draft with a bad time format is rejected on save
/// without affecting the others, and stays queued for fixing.
pub struct Entry {
    date: NaiveDate,
    subject: String,
    start: String,
    end: String,
    pauses: String,
    focused: String,
    field: Field,
    queued: Vec<SessionDraft>,
    status: Option<StatusLine>,
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

impl Entry {
    pub fn new() -> Self {
        Self {
            date: Local::now().date_naive(),
            subject: String::new(),
            start: "10:00".to_string(),
            end: "11:00".to_string(),
            pauses: "0".to_string(),
            focused: "0".to_string(),
            field: Field::Date,
            queued: Vec::new(),
            status: None,
        }
    }

    fn active_text_field(&mut self) -> Option<&mut String> {
        match self.field {
            Field::Date => None,
            Field::Subject => Some(&mut self.subject),
            Field::Start => Some(&mut self.start),
            Field::End => Some(&mut self.end),
            Field::Pauses => Some(&mut self.pauses),
            Field::Focused => Some(&mut self.focused),
        }
    }

    fn accepts(field: Field, character: char) -> bool {
        match field {
            Field::Date => false,
            Field::Subject => true,
            Field::Start | Field::End => character.is_ascii_digit() || character == ':',
            Field::Pauses | Field::Focused => character.is_ascii_digit(),
        }
    }

    fn queue_draft(&mut self) {
        self.queued.push(SessionDraft {
            subject: self.subject.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            pause_count: self.pauses.parse().unwrap_or(0),
            focused_min: self.focused.parse().unwrap_or(0),
        });
        self.status = Some(StatusLine::info(format!(
            "Queued {} draft(s) for {}",
            self.queued.len(),
            self.date
        )));
    }

    fn save_queued(&mut self, store: &mut SessionStore) {
        if self.queued.is_empty() {
            self.status = Some(StatusLine::warning("Nothing queued yet - <Enter> queues the form"));
            return;
        }

        let outcome = store.add_batch(self.date, &self.queued);

        if outcome.rejected.is_empty() {
            self.status = Some(StatusLine::info(format!(
                "Saved {} session(s)",
                outcome.saved.len()
            )));
            self.queued.clear();
            return;
        }

        // Keep the rejected drafts around so they can be fixed and retried.
        let rejected: Vec<usize> = outcome.rejected.iter().map(|(index, _)| *index).collect();
        self.queued = self
            .queued
            .iter()
            .enumerate()
            .filter(|(index, _)| rejected.contains(index))
            .map(|(_, draft)| draft.clone())
            .collect();

        self.status = Some(StatusLine::warning(format!(
            "Saved {} session(s), {} rejected for bad time format",
            outcome.saved.len(),
            rejected.len()
        )));
    }
}

// Rendering logic
impl Entry {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config, _store: &SessionStore) {
        let [form_area, queue_area] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(area);

        self.render_form(frame, form_area, config);
        self.render_queue(frame, queue_area, config);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let rows: [(Field, &str, String); 6] = [
            (Field::Date, "Date", self.date.to_string()),
            (Field::Subject, "Subject", self.subject.clone()),
            (Field::Start, "Start (HH:MM)", self.start.clone()),
            (Field::End, "End (HH:MM)", self.end.clone()),
            (Field::Pauses, "Pauses", self.pauses.clone()),
            (Field::Focused, "Focused minutes", self.focused.clone()),
        ];

        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(field, label, value)| {
                let mut selector = "  ";
                let style = if field == self.field {
                    selector = "> ";
                    Style::new().fg(theme.highlight).reversed()
                } else {
                    Style::new()
                };
                Line::from(vec![
                    Span::raw(selector),
                    Span::raw(format!("{label:<16}")),
                    Span::styled(value, style),
                ])
            })
            .collect();

        lines.push(Line::raw(""));
        lines.push(match elapsed_minutes(&self.start, &self.end) {
            Ok(minutes) => Line::styled(
                format!("  Duration: {minutes} min"),
                Style::new().fg(theme.success),
            ),
            Err(_) => Line::styled("  Duration: time format error", Style::new().fg(theme.error)),
        });

        if let Some(status) = &self.status {
            lines.push(Line::raw(""));
            lines.push(status.to_line(theme));
        }

        frame.render_widget(
            Paragraph::new(lines).block(ROUNDED_BLOCK.title("Record sessions".to_span().bold())),
            area,
        );
    }

    fn render_queue(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let block = ROUNDED_BLOCK.title("Queued drafts".to_span().bold());

        if self.queued.is_empty() {
            frame.render_widget(
                Paragraph::new("Nothing queued.\n<Enter> queues the form as one draft.")
                    .block(block)
                    .centered(),
                area,
            );
            return;
        }

        let items = self.queued.iter().map(|draft| {
            let subject = if draft.subject.trim().is_empty() {
                lucerna::DEFAULT_SUBJECT
            } else {
                draft.subject.trim()
            };
            match elapsed_minutes(&draft.start, &draft.end) {
                Ok(minutes) => Line::raw(format!(
                    "{}-{} | {:<16} | {:>4} min | focused {:>4} | pauses {:>3}",
                    draft.start, draft.end, subject, minutes, draft.focused_min, draft.pause_count
                )),
                Err(_) => Line::styled(
                    format!("{}-{} | {:<16} | time format error", draft.start, draft.end, subject),
                    Style::new().fg(theme.error),
                ),
            }
        });

        frame.render_widget(List::new(items).block(block), area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw(
            "<Enter> queue | <Ctrl-S> save | <Del> drop last | <Esc> back",
        ))
    }
}

// Event handlers
impl Entry {
    pub fn handle_events(
        &mut self,
        event: &Event,
        _config: &Config,
        store: &mut SessionStore,
    ) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            self.handle_key_event(key, store);
        }

        None
    }

    fn handle_key_event(&mut self, key: &KeyEvent, store: &mut SessionStore) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                self.save_queued(store);
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.field = self.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.field = self.field.previous(),
            KeyCode::Enter => self.queue_draft(),
            KeyCode::Delete => {
                if self.queued.pop().is_some() {
                    self.status = Some(StatusLine::info("Dropped the last queued draft"));
                }
            }
            KeyCode::Left => {
                if self.field == Field::Date
                    && let Some(date) = self.date.checked_sub_days(Days::new(1))
                {
                    self.date = date;
                }
            }
            KeyCode::Right => {
                if self.field == Field::Date
                    && let Some(date) = self.date.checked_add_days(Days::new(1))
                {
                    self.date = date;
                }
            }
            KeyCode::Backspace => {
                if let Some(value) = self.active_text_field() {
                    value.pop();
                }
            }
            KeyCode::Char(character) => {
                if Self::accepts(self.field, character)
                    && let Some(value) = self.active_text_field()
                {
                    value.push(character);
                }
            }
            _ => (),
        }
    }
}
