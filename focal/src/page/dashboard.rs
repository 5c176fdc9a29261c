use std::path::Path;

use chrono::{Days, NaiveDate};
use crossterm::event::{Event, KeyCode, KeyEvent};
use lucerna::{KpiSummary, SessionRecord, SessionStore, WeekdayTotals, select_range};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span, ToSpan},
    widgets::{Bar, BarChart, BarGroup, List, Paragraph},
};
use thiserror::Error;

use crate::{
    app::Message,
    config::Config,
    page,
    utils::{ROUNDED_BLOCK, StatusLine},
};

const KPI_LABELS: [&str; 4] = [
    "Average focus",
    "Total study time",
    "Focus ratio",
    "Pauses per hour",
];

#[derive(Debug, Error)]
enum SnapshotFileError {
    #[error("Failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0}")]
    Import(#[from] lucerna::SnapshotError),
}

/// The selected reporting period, both ends inclusive.
#[derive(Debug, Clone, Copy)]
struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl From<(NaiveDate, NaiveDate)> for DateRange {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    RangeStart,
    RangeEnd,
    List,
}

impl Focus {
    const fn next(self) -> Self {
        match self {
            Self::RangeStart => Self::RangeEnd,
            Self::RangeEnd => Self::List,
            Self::List => Self::RangeStart,
        }
    }
}

/// Page: Dashboard
///
/// KPI cards, the weekday focus chart and the deletable session list for
/// the selected period.
#[derive(Debug)]
pub struct Dashboard {
    range: Option<DateRange>,
    focus: Focus,
    selected: usize,
    status: Option<StatusLine>,
}

impl Dashboard {
    pub fn new(store: &SessionStore) -> Self {
        Self {
            range: store.date_bounds().map(DateRange::from),
            focus: Focus::List,
            selected: 0,
            status: None,
        }
    }

    /// The records of the selected period, sorted for display by date and
    /// start time. List indices refer to this ordering.
    fn visible_records(&self, store: &SessionStore) -> Vec<SessionRecord> {
        let Some(range) = self.range else {
            return Vec::new();
        };
        let mut records = select_range(&store.flatten(), range.start, range.end);
        records.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start.cmp(&b.start)));
        records
    }

    fn step_range(&mut self, days: i64) {
        let Some(range) = &mut self.range else {
            return;
        };
        // The two cursors can meet but never cross, so the period always
        // stays valid.
        let stepped = |date: NaiveDate| {
            if days < 0 {
                date.checked_sub_days(Days::new(days.unsigned_abs()))
            } else {
                date.checked_add_days(Days::new(days.unsigned_abs()))
            }
        };
        match self.focus {
            Focus::RangeStart => {
                if let Some(date) = stepped(range.start) {
                    range.start = date.min(range.end);
                }
            }
            Focus::RangeEnd => {
                if let Some(date) = stepped(range.end) {
                    range.end = date.max(range.start);
                }
            }
            Focus::List => {}
        }
    }

    fn move_selection_up(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    fn move_selection_down(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % len;
    }

    fn delete_selected(&mut self, store: &mut SessionStore) {
        let records = self.visible_records(store);
        let Some(record) = records.get(self.selected) else {
            return;
        };

        store.delete(record.id);
        self.status = Some(StatusLine::info(format!(
            "Deleted {} {} {}-{}",
            record.date, record.subject, record.start, record.end
        )));

        if self.selected + 1 >= records.len() {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    fn save_snapshot(&mut self, config: &Config, store: &SessionStore) -> Option<Message> {
        let path = config.snapshot_path();
        match Self::write_snapshot(&path, store) {
            Ok(()) => {
                self.status = Some(StatusLine::info(format!(
                    "Saved {} session(s) to {}",
                    store.session_count(),
                    path.display()
                )));
                None
            }
            Err(error) => Some(Message::Error(Box::new(error))),
        }
    }

    fn load_snapshot(&mut self, config: &Config, store: &mut SessionStore) -> Option<Message> {
        let path = config.snapshot_path();
        match Self::read_snapshot(&path, store) {
            Ok(()) => {
                self.range = store.date_bounds().map(DateRange::from);
                self.selected = 0;
                self.status = Some(StatusLine::info(format!(
                    "Loaded {} session(s) from {}",
                    store.session_count(),
                    path.display()
                )));
                None
            }
            Err(error) => Some(Message::Error(Box::new(error))),
        }
    }

    fn write_snapshot(path: &Path, store: &SessionStore) -> Result<(), SnapshotFileError> {
        let json = store.export_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn read_snapshot(path: &Path, store: &mut SessionStore) -> Result<(), SnapshotFileError> {
        let json = std::fs::read_to_string(path)?;
        store.import_json(&json)?;
        Ok(())
    }
}

// Rendering logic
impl Dashboard {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config, store: &SessionStore) {
        if store.is_empty() {
            let no_data = Paragraph::new(
                "No sessions logged yet.\nPress <a> to record your first study session.",
            )
            .block(ROUNDED_BLOCK.title("Focus Dashboard".to_span().bold()))
            .centered();
            frame.render_widget(no_data, area);
            return;
        }

        // A snapshot loaded at startup arrives before the first render.
        if self.range.is_none() {
            self.range = store.date_bounds().map(DateRange::from);
        }

        let records = self.visible_records(store);
        let kpi = KpiSummary::compute(&records);
        let totals = WeekdayTotals::collect(&records);

        let [period_area, kpi_area, chart_area, list_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Percentage(40),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_period(frame, period_area, config);
        self.render_kpi_cards(frame, kpi_area, kpi.as_ref());
        self.render_chart(frame, chart_area, config, &records, totals);
        self.render_list(frame, list_area, config, &records, kpi.as_ref());
        self.render_status(frame, status_area, config);
    }

    fn render_period(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let highlight = config.settings.theme.text.highlight;
        let endpoint_style = |focused: bool| {
            if focused {
                Style::new().fg(highlight).reversed()
            } else {
                Style::new()
            }
        };

        let line = self.range.map_or_else(
            || Line::raw("-"),
            |range| {
                Line::from(vec![
                    Span::raw("From "),
                    Span::styled(
                        range.start.to_string(),
                        endpoint_style(self.focus == Focus::RangeStart),
                    ),
                    Span::raw("  to  "),
                    Span::styled(
                        range.end.to_string(),
                        endpoint_style(self.focus == Focus::RangeEnd),
                    ),
                    Span::raw("   <Left/Right> day, <Up/Down> week, <f> full range"),
                ])
            },
        );

        frame.render_widget(
            Paragraph::new(line).block(ROUNDED_BLOCK.title("Period".to_span().bold())),
            area,
        );
    }

    fn render_kpi_cards(&self, frame: &mut Frame, area: Rect, kpi: Option<&KpiSummary>) {
        let values = kpi.map_or_else(
            || core::array::from_fn(|_| "-".to_string()),
            |kpi| {
                [
                    format!("{:.2} / 5", kpi.average_focus_score),
                    format!("{} min", kpi.total_minutes),
                    format!("{:.1} %", kpi.focus_ratio * 100.0),
                    format!("{:.2} /h", kpi.pause_rate_per_hour),
                ]
            },
        );

        let card_areas: [Rect; 4] = Layout::horizontal([Constraint::Percentage(25); 4]).areas(area);
        for ((label, value), card_area) in KPI_LABELS.iter().zip(values).zip(card_areas) {
            let card = Paragraph::new(value.bold())
                .centered()
                .block(ROUNDED_BLOCK.title(label.to_span()));
            frame.render_widget(card, card_area);
        }
    }

    fn render_chart(
        &self,
        frame: &mut Frame,
        area: Rect,
        config: &Config,
        records: &[SessionRecord],
        totals: WeekdayTotals,
    ) {
        let block = ROUNDED_BLOCK.title("Focused minutes by weekday".to_span().bold());

        if records.is_empty() {
            let no_data = Paragraph::new("No sessions in the selected period.")
                .block(block)
                .centered();
            frame.render_widget(no_data, area);
            return;
        }

        let theme = &config.settings.theme.chart;
        let bars: Vec<Bar> = totals
            .iter()
            .map(|(weekday, minutes)| {
                Bar::default()
                    .value(minutes)
                    .label(Line::from(weekday.short()))
                    .style(Style::new().fg(theme.bar))
                    .value_style(Style::new().fg(theme.value).bg(theme.bar))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(5)
            .bar_gap(2);
        frame.render_widget(chart, area);
    }

    fn render_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        config: &Config,
        records: &[SessionRecord],
        kpi: Option<&KpiSummary>,
    ) {
        let mut block = ROUNDED_BLOCK.title("Sessions".to_span().bold());
        if let Some(kpi) = kpi {
            block = block.title_bottom(Line::raw(format!(
                "{} session(s) | {} min total | {} min focused | {} pause(s)",
                kpi.session_count, kpi.total_minutes, kpi.focused_minutes, kpi.pause_total
            )));
        }

        if records.is_empty() {
            frame.render_widget(
                Paragraph::new("No sessions to show.").block(block).centered(),
                area,
            );
            return;
        }

        let items = records.iter().enumerate().map(|(i, record)| {
            let mut selector = "  ";
            let style = if self.focus == Focus::List && i == self.selected {
                selector = "> ";
                Style::new()
                    .fg(config.settings.theme.text.highlight)
                    .reversed()
            } else {
                Style::new()
            };

            Line::from(vec![
                Span::raw(selector),
                Span::styled(
                    format!(
                        "{} ({}) | {:<16} | {}-{} | {:>4} min | focused {:>4} | pauses {:>3}",
                        record.date,
                        record.weekday.short(),
                        record.subject,
                        record.start,
                        record.end,
                        record.duration_min,
                        record.focused_min,
                        record.pause_count
                    ),
                    style,
                ),
            ])
        });

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme.text;
        let line = self.status.as_ref().map_or_else(
            || Line::styled("<Tab> switch focus", Style::new().fg(theme.muted)),
            |status| status.to_line(theme),
        );
        frame.render_widget(Paragraph::new(line), area);
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw(
            "<a> add | <d> delete | <r> reference | <s> save | <o> load",
        ))
    }
}

// Event handlers
impl Dashboard {
    pub fn handle_events(
        &mut self,
        event: &Event,
        config: &Config,
        store: &mut SessionStore,
    ) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key_event(key, config, store);
        }

        None
    }

    fn handle_key_event(
        &mut self,
        key: &KeyEvent,
        config: &Config,
        store: &mut SessionStore,
    ) -> Option<Message> {
        match key.code {
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Char('a') => return Some(Message::Show(page::Entry::new().into())),
            KeyCode::Char('r') => return Some(Message::Show(page::Reference::default().into())),
            KeyCode::Char('s') => return self.save_snapshot(config, store),
            KeyCode::Char('o') => return self.load_snapshot(config, store),
            KeyCode::Char('f') => {
                self.range = store.date_bounds().map(DateRange::from);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.focus == Focus::List {
                    self.delete_selected(store);
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.step_range(-1),
            KeyCode::Right | KeyCode::Char('l') => self.step_range(1),
            KeyCode::Up | KeyCode::Char('k') => {
                if self.focus == Focus::List {
                    self.move_selection_up(self.visible_records(store).len());
                } else {
                    self.step_range(-7);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.focus == Focus::List {
                    self.move_selection_down(self.visible_records(store).len());
                } else {
                    self.step_range(7);
                }
            }
            _ => (),
        }

        None
    }
}
