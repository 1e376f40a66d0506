//! Live counters for the focused surface

use super::pane_block;
use crate::scheduler::RunState;
use crate::step::Outcome;
use crate::structures::Structure;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::RunView;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Render the stats pane
pub fn render_stats_pane(
    frame: &mut Frame,
    area: Rect,
    view: &RunView,
    state: RunState,
    speed: Duration,
) {
    let block = pane_block(" Stats ".to_string(), false);
    let stats = view.stats;

    let mut lines = vec![
        row("State", state_label(state), state_color(state)),
        row("Speed", format!("{} ms", speed.as_millis()), DEFAULT_THEME.fg),
        row("Steps", view.steps.to_string(), DEFAULT_THEME.fg),
        Line::from(""),
        row("Comparisons", stats.comparisons.to_string(), DEFAULT_THEME.primary),
        row("Swaps", stats.swaps.to_string(), DEFAULT_THEME.primary),
        row("Nodes visited", stats.nodes_visited.to_string(), DEFAULT_THEME.primary),
        row("Edges explored", stats.edges_explored.to_string(), DEFAULT_THEME.primary),
    ];

    if let Some(Structure::Tree(tree)) = &view.structure {
        let metrics = tree.metrics();
        lines.push(Line::from(""));
        lines.push(row("Tree nodes", metrics.nodes.to_string(), DEFAULT_THEME.fg));
        lines.push(row("Height", metrics.height.to_string(), DEFAULT_THEME.fg));
        lines.push(row("Leaves", metrics.leaves.to_string(), DEFAULT_THEME.fg));
    }

    if let Some(outcome) = &view.outcome {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            outcome_label(outcome),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn row(name: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<15}", name),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn state_label(state: RunState) -> String {
    match state {
        RunState::Idle => "idle",
        RunState::Running => "running",
        RunState::Paused => "paused",
        RunState::Completed => "completed",
        RunState::Stopped => "stopped",
    }
    .to_string()
}

fn state_color(state: RunState) -> Color {
    match state {
        RunState::Running => DEFAULT_THEME.secondary,
        RunState::Paused => DEFAULT_THEME.primary,
        RunState::Completed => DEFAULT_THEME.success,
        RunState::Stopped => DEFAULT_THEME.error,
        RunState::Idle => DEFAULT_THEME.fg,
    }
}

/// Short summary of how a run ended
pub fn outcome_label(outcome: &Outcome) -> String {
    match outcome {
        Outcome::NothingToDo => " Nothing to do".to_string(),
        Outcome::Sorted { positions } => format!(" Sorted {} elements", positions.len()),
        Outcome::Traversed { order } => format!(" Visited {} nodes", order.len()),
        Outcome::Path {
            distance: Some(distance),
            ..
        } => format!(" Shortest distance {}", distance),
        Outcome::Path { distance: None, .. } => " No path".to_string(),
        Outcome::Found { value, .. } => format!(" Found {}", value),
        Outcome::NotFound { value, .. } => format!(" {} not found", value),
        Outcome::Inserted { value } => format!(" Inserted {}", value),
        Outcome::AlreadyPresent { value } => format!(" {} already present", value),
        Outcome::Deleted { value } => format!(" Deleted {}", value),
        Outcome::Finished => " Finished".to_string(),
    }
}
