//! Explanation popup

use crate::explain::FALLBACK;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

/// Render `text` (a small markdown subset) centered over everything else
pub fn render_explain_popup(frame: &mut Frame, area: Rect, text: &str) {
    let popup = centered(area, 60, 50);

    let block = Block::default()
        .title(" Explanation (esc to close) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused))
        .padding(Padding::new(1, 1, 0, 0));

    let paragraph = Paragraph::new(markdown_lines(text))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

/// Headings and `**bold**` runs; everything else is plain text
fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    let heading = Style::default()
        .fg(DEFAULT_THEME.primary)
        .add_modifier(Modifier::BOLD);
    let plain = Style::default().fg(if text == FALLBACK {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.fg
    });
    let bold = plain.add_modifier(Modifier::BOLD);

    text.lines()
        .map(|line| {
            if let Some(title) = line.trim_start_matches('#').strip_prefix(' ') {
                if line.starts_with('#') {
                    return Line::from(Span::styled(title.to_string(), heading));
                }
            }
            // Odd-numbered pieces sit between a pair of `**`
            let spans = line
                .split("**")
                .enumerate()
                .filter(|(_, piece)| !piece.is_empty())
                .map(|(i, piece)| {
                    Span::styled(piece.to_string(), if i % 2 == 1 { bold } else { plain })
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
