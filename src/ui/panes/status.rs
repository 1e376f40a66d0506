//! Status bar rendering with keybindings and run state indicators

use crate::scheduler::RunState;
use crate::structures::Domain;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub domain: Domain,
    pub algorithm: &'a str,
    pub message: &'a str,
    pub state: RunState,
    pub is_error: bool,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left_spans = vec![
        Span::styled(
            format!(" {} ", data.domain.to_string().to_uppercase()),
            Style::default()
                .bg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", data.algorithm),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.secondary),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if data.is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    let mut keybind = |key: &'static str, desc: &'static str| {
        if !right_spans.is_empty() {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    };

    keybind(" ⎵ ", " run/pause ");
    keybind(" ←/→ ", " algorithm ");
    keybind(" +/- ", " speed ");
    match data.domain {
        Domain::Array => keybind(" [/] ", " size "),
        Domain::Graph => {
            keybind(" ↑/↓ s ", " pick edge ");
            keybind(" g/x ", " add/remove node ");
        }
        Domain::Tree => keybind(" i/d/f ", " insert/delete/find "),
    }
    keybind(" r ", " reset ");
    keybind(" n ", " new ");
    keybind(" e ", " explain ");
    keybind(" ⇥ ", " surface ");
    keybind("q", " quit ");

    let indicator = match data.state {
        RunState::Running => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        RunState::Paused => Some((" ⏸ PAUSED ", DEFAULT_THEME.primary)),
        RunState::Completed => Some((" DONE ", DEFAULT_THEME.success)),
        RunState::Stopped => Some((" STOPPED ", DEFAULT_THEME.error)),
        RunState::Idle => None,
    };
    if let Some((label, color)) = indicator {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
