//! Tree surface: the BST drawn sideways, root on the left

use super::pane_block;
use crate::step::{Outcome, Target};
use crate::structures::tree::TreeNode;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::{classify, Highlight, RunView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the tree pane. `input` is the value being typed, if any.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    view: &RunView,
    input: &str,
    title: String,
    is_focused: bool,
) {
    let block = pane_block(title, is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let root = view
        .structure
        .as_ref()
        .and_then(|s| s.as_tree())
        .and_then(|t| t.root());

    let lines = match root {
        Some(root) => {
            let mut lines = Vec::new();
            sideways(root, 0, view, &mut lines);
            lines
        }
        None => vec![Line::from(Span::styled(
            "(empty tree, type a value and press i)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))],
    };
    frame.render_widget(Paragraph::new(lines), rows[0]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            result_line(view),
            Style::default().fg(DEFAULT_THEME.fg),
        ))),
        rows[1],
    );

    let input_line = Line::from(vec![
        Span::styled(" Value: ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{}▏", input),
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(input_line), rows[2]);
}

/// Reverse in-order walk: right subtree above, left subtree below
fn sideways(node: &TreeNode, depth: usize, view: &RunView, lines: &mut Vec<Line<'static>>) {
    if let Some(right) = node.right.as_deref() {
        sideways(right, depth + 1, view, lines);
    }

    let highlight = classify(Target::Key(node.value), view);
    let mut style = Style::default().fg(match highlight {
        Highlight::Unvisited => DEFAULT_THEME.fg,
        other => DEFAULT_THEME.highlight(other),
    });
    if highlight != Highlight::Unvisited {
        style = style.add_modifier(Modifier::BOLD);
    }
    let connector = if depth == 0 { "" } else { "── " };
    lines.push(Line::from(vec![
        Span::styled(
            "     ".repeat(depth),
            Style::default().fg(DEFAULT_THEME.border_normal),
        ),
        Span::styled(connector, Style::default().fg(DEFAULT_THEME.border_normal)),
        Span::styled(node.value.to_string(), style),
    ]));

    if let Some(left) = node.left.as_deref() {
        sideways(left, depth + 1, view, lines);
    }
}

fn result_line(view: &RunView) -> String {
    let keys = |targets: &[Target]| {
        targets
            .iter()
            .filter_map(|t| match t {
                Target::Key(v) => Some(v.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(", ")
    };
    match &view.outcome {
        Some(Outcome::Traversed { order }) => format!(" Traversal: [{}]", keys(order)),
        Some(Outcome::Found { value, path }) => {
            format!(" Found {} after {} node(s)", value, path.len())
        }
        Some(Outcome::NotFound { value, .. }) => format!(" {} not found", value),
        Some(Outcome::Inserted { value }) => format!(" Inserted {}", value),
        Some(Outcome::AlreadyPresent { value }) => format!(" {} is already in the tree", value),
        Some(Outcome::Deleted { value }) => format!(" Deleted {}", value),
        Some(Outcome::NothingToDo) => " Tree is empty".to_string(),
        _ if !view.visited.is_empty() => format!(" Visited: [{}]", keys(&view.visited)),
        _ => String::new(),
    }
}
