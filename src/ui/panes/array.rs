//! Sorting surface: one bar per array element

use super::pane_block;
use crate::step::Target;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::{classify, RunView};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Bar, BarChart, BarGroup, Paragraph},
    Frame,
};

/// Render the array pane
pub fn render_array_pane(
    frame: &mut Frame,
    area: Rect,
    view: &RunView,
    title: String,
    is_focused: bool,
) {
    let block = pane_block(title, is_focused);
    let values = view
        .structure
        .as_ref()
        .and_then(|s| s.as_array())
        .unwrap_or_default();

    if values.is_empty() {
        let paragraph = Paragraph::new("(empty array, press n to generate)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let (bar_width, bar_gap) = bar_geometry(inner_width, values.len());

    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(idx, &value)| {
            let color = DEFAULT_THEME.highlight(classify(Target::Index(idx), view));
            let bar = Bar::default()
                .value(value.max(0) as u64)
                .style(Style::default().fg(color));
            // Numbers only fit when bars are wide enough
            if bar_width >= 3 {
                bar.text_value(value.to_string())
                    .value_style(Style::default().fg(DEFAULT_THEME.current_line_bg).bg(color))
            } else {
                bar.text_value(String::new())
            }
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap);
    frame.render_widget(chart, area);
}

/// Widest bars (and a one-column gap when there is room) that fit `count` bars
fn bar_geometry(width: usize, count: usize) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let with_gap = width.saturating_sub(count.saturating_sub(1)) / count;
    if with_gap >= 2 {
        (with_gap.min(u16::MAX as usize) as u16, 1)
    } else {
        ((width / count).max(1) as u16, 0)
    }
}
