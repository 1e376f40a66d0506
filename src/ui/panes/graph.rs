//! Graph surface: nodes on a circle, weighted edges between them

use super::pane_block;
use crate::step::{Outcome, Target};
use crate::structures::graph::{Graph, NodeId};
use crate::ui::theme::DEFAULT_THEME;
use crate::view::{classify, Highlight, RunView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Paragraph,
    },
    Frame,
};
use rustc_hash::FxHashMap;
use std::f64::consts::PI;

const CANVAS_EXTENT: f64 = 100.0;
const RING_RADIUS: f64 = 38.0;

/// Render the graph pane
pub fn render_graph_pane(
    frame: &mut Frame,
    area: Rect,
    view: &RunView,
    cursor: Option<NodeId>,
    title: String,
    is_focused: bool,
) {
    let block = pane_block(title, is_focused);
    let Some(graph) = view.structure.as_ref().and_then(|s| s.as_graph()) else {
        frame.render_widget(block, area);
        return;
    };

    if graph.is_empty() {
        let paragraph = Paragraph::new("(empty graph, press g to add a node)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let positions = layout_ring(graph);
    let edges = edge_shapes(graph, view, &positions);
    let labels = node_labels(graph, view, cursor, &positions);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-CANVAS_EXTENT / 2.0, CANVAS_EXTENT / 2.0])
        .y_bounds([-CANVAS_EXTENT / 2.0, CANVAS_EXTENT / 2.0])
        .paint(move |ctx| {
            for (line, _, _) in &edges {
                ctx.draw(line);
            }
            ctx.layer();
            for (line, weight, on_path) in &edges {
                let style = if *on_path {
                    Style::default().fg(DEFAULT_THEME.path)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                };
                ctx.print(
                    (line.x1 + line.x2) / 2.0,
                    (line.y1 + line.y2) / 2.0,
                    Span::styled(weight.to_string(), style),
                );
            }
            for (x, y, span) in &labels {
                ctx.print(*x, *y, span.clone());
            }
        });
    frame.render_widget(canvas, rows[0]);

    frame.render_widget(Paragraph::new(path_summary(graph, view)), rows[1]);
}

/// Evenly spaced points on a circle, in node insertion order
fn layout_ring(graph: &Graph) -> FxHashMap<NodeId, (f64, f64)> {
    let count = graph.len().max(1) as f64;
    graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            // Start at twelve o'clock and go clockwise
            let angle = PI / 2.0 - 2.0 * PI * i as f64 / count;
            (node.id, (RING_RADIUS * angle.cos(), RING_RADIUS * angle.sin()))
        })
        .collect()
}

fn on_path(view: &RunView, edge_from: NodeId, edge_to: NodeId) -> bool {
    view.path.windows(2).any(|pair| {
        matches!(
            pair,
            [Target::Node(a), Target::Node(b)]
                if (*a == edge_from && *b == edge_to) || (*a == edge_to && *b == edge_from)
        )
    })
}

fn edge_shapes(
    graph: &Graph,
    view: &RunView,
    positions: &FxHashMap<NodeId, (f64, f64)>,
) -> Vec<(CanvasLine, u32, bool)> {
    graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let (x1, y1) = *positions.get(&edge.from)?;
            let (x2, y2) = *positions.get(&edge.to)?;
            let highlighted = on_path(view, edge.from, edge.to);
            let color = if highlighted {
                DEFAULT_THEME.path
            } else {
                DEFAULT_THEME.border_normal
            };
            Some((
                CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color,
                },
                edge.weight,
                highlighted,
            ))
        })
        .collect()
}

fn node_labels(
    graph: &Graph,
    view: &RunView,
    cursor: Option<NodeId>,
    positions: &FxHashMap<NodeId, (f64, f64)>,
) -> Vec<(f64, f64, Span<'static>)> {
    graph
        .nodes()
        .iter()
        .filter_map(|node| {
            let (x, y) = *positions.get(&node.id)?;
            let highlight = classify(Target::Node(node.id), view);
            let mut style = Style::default()
                .fg(DEFAULT_THEME.current_line_bg)
                .bg(DEFAULT_THEME.highlight(highlight));
            if highlight != Highlight::Unvisited {
                style = style.add_modifier(Modifier::BOLD);
            }
            let text = if cursor == Some(node.id) {
                format!("[{}]", node.label)
            } else {
                format!(" {} ", node.label)
            };
            Some((x, y, Span::styled(text, style)))
        })
        .collect()
}

/// One-line readout of the visit order or shortest path
fn path_summary(graph: &Graph, view: &RunView) -> Line<'static> {
    let name = |id: NodeId| graph.label(id).unwrap_or("?").to_string();
    let text = match &view.outcome {
        Some(Outcome::Path {
            nodes,
            distance: Some(distance),
        }) => format!(
            " Path: {}  (distance {})",
            nodes.iter().map(|&id| name(id)).collect::<Vec<_>>().join(" → "),
            distance
        ),
        Some(Outcome::Path { distance: None, .. }) => " Target unreachable".to_string(),
        _ if !view.visited.is_empty() => format!(
            " Visited: {}",
            view.visited
                .iter()
                .filter_map(|t| match t {
                    Target::Node(id) => Some(name(*id)),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" → ")
        ),
        _ => format!(" {} nodes, {} edges", graph.len(), graph.edges().len()),
    };
    Line::from(Span::styled(text, Style::default().fg(DEFAULT_THEME.fg)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::Structure;

    #[test]
    fn test_ring_places_every_node() {
        let graph = Graph::sample();
        let positions = layout_ring(&graph);
        assert_eq!(positions.len(), 5);
        let (x, y) = positions[&NodeId(1)];
        assert!(x.abs() < 1e-9);
        assert!((y - RING_RADIUS).abs() < 1e-9);
    }

    #[test]
    fn test_edge_on_path_either_direction() {
        let mut view = RunView::new(Structure::Graph(Graph::sample()));
        view.path = vec![Target::Node(NodeId(1)), Target::Node(NodeId(4))];
        assert!(on_path(&view, NodeId(4), NodeId(1)));
        assert!(!on_path(&view, NodeId(1), NodeId(2)));
    }

    #[test]
    fn test_cursor_node_is_bracketed() {
        let graph = Graph::sample();
        let view = RunView::new(Structure::Graph(graph.clone()));
        let positions = layout_ring(&graph);
        let labels = node_labels(&graph, &view, Some(NodeId(2)), &positions);
        let texts: Vec<String> = labels.iter().map(|(_, _, span)| span.content.to_string()).collect();
        assert_eq!(texts[0], " A ");
        assert_eq!(texts[1], "[B]");
    }
}
