use crossterm::event::{Event, KeyCode};
use lucerna::SessionStore;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::Paragraph,
};

use crate::{app::Message, config::Config, utils::ROUNDED_BLOCK};

/// Page: Reference
///
/// The scoring-tier tables. These bands are reading aids for the dashboard
/// numbers; the displayed score itself stays the raw ratio-times-five
/// scale and never has the penalties or caps applied.
#[derive(Debug, Default)]
pub struct Reference;

impl Reference {
    pub fn render(&self, frame: &mut Frame, area: Rect, config: &Config, _store: &SessionStore) {
        let muted = Style::new().fg(config.settings.theme.text.muted);

        let [formula_area, penalty_area, cap_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let formula_lines = vec![
            Line::raw("Total study time   = sum of session durations"),
            Line::raw("Focus ratio        = focused minutes / total minutes"),
            Line::raw("Average focus      = focus ratio x 5"),
            Line::raw("Pauses per hour    = pause total / (total minutes / 60)"),
        ];
        frame.render_widget(
            Paragraph::new(formula_lines)
                .block(ROUNDED_BLOCK.title("How the numbers are computed".to_span().bold())),
            formula_area,
        );

        let penalty_lines = vec![
            Line::raw(format!("{:<22} {:<24} {}", "Pauses per hour", "Reading", "Penalty")),
            Line::raw(""),
            Line::raw(format!("{:<22} {:<24} {}", "1.0 or fewer", "steady flow", "0")),
            Line::raw(format!("{:<22} {:<24} {}", "up to 2.0", "minor disruption", "-1")),
            Line::raw(format!("{:<22} {:<24} {}", "up to 3.0", "focus breaks often", "-2")),
            Line::raw(format!("{:<22} {:<24} {}", "more than 3.0", "focus not sustained", "-3")),
            Line::raw(""),
            Line::styled(
                "Interruptions are judged by hourly rate rather than raw count, so a long session is not at a disadvantage against a short one.",
                muted,
            ),
        ];
        frame.render_widget(
            Paragraph::new(penalty_lines)
                .block(ROUNDED_BLOCK.title("Pause-rate penalty bands".to_span().bold())),
            penalty_area,
        );

        let cap_lines = vec![
            Line::raw(format!("{:<22} {:<24} {}", "Focus ratio", "Reading", "Score cap")),
            Line::raw(""),
            Line::raw(format!("{:<22} {:<24} {}", "below 25 %", "mostly unfocused", "at most 1")),
            Line::raw(format!("{:<22} {:<24} {}", "below 50 %", "hard to sustain", "at most 2")),
            Line::raw(format!("{:<22} {:<24} {}", "below 70 %", "partially focused", "at most 3")),
            Line::raw(format!("{:<22} {:<24} {}", "70 % and up", "stable focus", "no cap")),
            Line::raw(""),
            Line::styled(
                "Keeps a score from overstating sessions where little of the logged time was actually focused.",
                muted,
            ),
        ];
        frame.render_widget(
            Paragraph::new(cap_lines)
                .block(ROUNDED_BLOCK.title("Focus-ratio score caps".to_span().bold())),
            cap_area,
        );
    }

    pub fn render_top(&self, _config: &Config) -> Option<Line<'_>> {
        Some(Line::raw("<Enter> back to the dashboard"))
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
