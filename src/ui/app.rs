//! Main TUI application state and logic

use crate::config::{adjust_speed, Config, ARRAY_SIZE_MAX, ARRAY_SIZE_MIN};
use crate::controller::Launch;
use crate::explain::{explanation_or_fallback, BuiltinExplainer, Explainer};
use crate::producers::{Algorithm, Params};
use crate::step::Target;
use crate::structures::array::random_array;
use crate::structures::graph::{Graph, NodeId};
use crate::structures::tree::Bst;
use crate::structures::{Domain, Structure};
use crate::ui::panes::{self, stats::outcome_label, StatusRenderData};
use crate::ui::surface::Surface;
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::Tabs,
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Longest event poll; keeps the UI responsive to background runs
const MAX_POLL: Duration = Duration::from_millis(50);

/// Longest value that can be typed for tree operations
const MAX_INPUT_LEN: usize = 4;

/// Step for `[` / `]` array resizing
const ARRAY_SIZE_STEP: usize = 5;

/// Which surface is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedSurface {
    Array,
    Graph,
    Tree,
}

impl FocusedSurface {
    /// Move focus to the next surface (array -> graph -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedSurface::Array => FocusedSurface::Graph,
            FocusedSurface::Graph => FocusedSurface::Tree,
            FocusedSurface::Tree => FocusedSurface::Array,
        }
    }

    /// Move focus to the previous surface
    pub fn prev(self) -> Self {
        match self {
            FocusedSurface::Array => FocusedSurface::Tree,
            FocusedSurface::Graph => FocusedSurface::Array,
            FocusedSurface::Tree => FocusedSurface::Graph,
        }
    }

    fn index(self) -> usize {
        match self {
            FocusedSurface::Array => 0,
            FocusedSurface::Graph => 1,
            FocusedSurface::Tree => 2,
        }
    }
}

/// The main application state
pub struct App {
    pub config: Config,

    /// Sorting, graph and tree surfaces, each with its own run
    pub surfaces: [Surface; 3],

    /// Currently focused surface
    pub focused: FocusedSurface,

    /// Digits typed for tree insert/delete/search
    pub input: String,

    /// Graph node under the cursor
    pub graph_cursor: Option<NodeId>,

    /// First endpoint of an edge being created
    pub edge_source: Option<NodeId>,

    /// Open explanation popup, if any
    pub explanation: Option<String>,

    explainer: Box<dyn Explainer>,

    rng: StdRng,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a rejected action
    pub is_error: bool,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Option<Instant>,
}

impl App {
    /// Create a new app with the given configuration
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a new app drawing random structures from `rng`
    pub fn with_rng(config: Config, mut rng: StdRng) -> Self {
        let array = Surface::new(
            Domain::Array,
            &Algorithm::SORTING,
            Structure::Array(random_array(config.array_size, &mut rng)),
            config.speed(),
        );
        let graph = Surface::new(
            Domain::Graph,
            &Algorithm::GRAPH,
            Structure::Graph(Graph::sample()),
            config.speed(),
        );
        let tree = Surface::new(
            Domain::Tree,
            &Algorithm::TREE,
            Structure::Tree(Bst::sample()),
            config.tree_speed(),
        );

        let mut app = App {
            config,
            surfaces: [array, graph, tree],
            focused: FocusedSurface::Array,
            input: String::new(),
            graph_cursor: None,
            edge_source: None,
            explanation: None,
            explainer: Box::new(BuiltinExplainer),
            rng,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_error: false,
            last_space_press: None,
        };
        app.sync_graph_cursor();
        app.sync_selection();
        app
    }

    /// Swap the explanation source
    pub fn set_explainer(&mut self, explainer: Box<dyn Explainer>) {
        self.explainer = explainer;
    }

    pub fn surface(&self) -> &Surface {
        &self.surfaces[self.focused.index()]
    }

    fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surfaces[self.focused.index()]
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let now = Instant::now();
            self.tick(now);

            // Wake up in time for the next due Step
            if event::poll(self.poll_timeout(now))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key, Instant::now());
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance every surface's run; background surfaces keep going
    pub fn tick(&mut self, now: Instant) {
        for idx in 0..self.surfaces.len() {
            let surface = &mut self.surfaces[idx];
            surface.controller.tick(now);
            if surface.settle() {
                let algorithm = surface.algorithm();
                let summary = surface
                    .view
                    .borrow()
                    .outcome
                    .as_ref()
                    .map(outcome_label)
                    .unwrap_or_default();
                if idx == self.focused.index() {
                    self.set_status(format!("{} finished:{}", algorithm, summary));
                }
                self.sync_selection();
            }
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.surfaces
            .iter()
            .filter_map(|s| s.controller.next_due())
            .map(|due| due.saturating_duration_since(now))
            .min()
            .unwrap_or(MAX_POLL)
            .clamp(Duration::from_millis(1), MAX_POLL)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Tabs on top, surface in the middle, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let titles: Vec<Line> = self
            .surfaces
            .iter()
            .map(|s| {
                let marker = if s.is_busy() { " ●" } else { "" };
                Line::from(format!(" {}{} ", s.domain, marker))
            })
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.focused.index())
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .highlight_style(
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, main_chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(main_chunks[1]);

        let surface = self.surface();
        let algorithm = surface.algorithm();
        let title = if algorithm == Algorithm::TreeTraversal {
            format!(" {} ({}) ", algorithm, surface.order.label())
        } else {
            format!(" {} ", algorithm)
        };

        {
            let view = surface.view.borrow();
            match surface.domain {
                Domain::Array => panes::render_array_pane(frame, columns[0], &view, title, true),
                Domain::Graph => panes::render_graph_pane(
                    frame,
                    columns[0],
                    &view,
                    self.graph_cursor,
                    title,
                    true,
                ),
                Domain::Tree => {
                    panes::render_tree_pane(frame, columns[0], &view, &self.input, title, true)
                }
            }
            panes::render_stats_pane(
                frame,
                columns[1],
                &view,
                surface.controller.state(),
                surface.controller.speed(),
            );
        }

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &StatusRenderData {
                domain: surface.domain,
                algorithm: algorithm.label(),
                message: &self.status_message,
                state: surface.controller.state(),
                is_error: self.is_error,
            },
        );

        if let Some(text) = &self.explanation {
            panes::render_explain_popup(frame, size, text);
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if self.explanation.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('e') => self.explanation = None,
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused = self.focused.next();
                self.set_status(format!("Switched to {}", self.surface().domain));
            }
            KeyCode::BackTab => {
                self.focused = self.focused.prev();
                self.set_status(format!("Switched to {}", self.surface().domain));
            }
            KeyCode::Left | KeyCode::Right => {
                if self.reject_if_busy() {
                    return;
                }
                let surface = self.surface_mut();
                surface.cycle_algorithm(key.code == KeyCode::Right);
                let algorithm = surface.algorithm();
                self.set_status(format!("Selected {}", algorithm));
            }
            KeyCode::Char(' ') => {
                // 200ms debounce to prevent key repeat spam
                if self
                    .last_space_press
                    .is_some_and(|last| now.duration_since(last) < Duration::from_millis(200))
                {
                    return;
                }
                self.last_space_press = Some(now);
                if self.surface().is_busy() {
                    let state = self.surface_mut().controller.toggle(now);
                    self.set_status(format!("Run {:?}", state).to_lowercase());
                } else {
                    let algorithm = self.surface().algorithm();
                    self.launch(algorithm, now);
                }
            }
            KeyCode::Char('r') => {
                self.surface_mut().reset();
                self.sync_selection();
                self.set_status("Run reset; structure kept as it was".to_string());
            }
            KeyCode::Char('n') => self.regenerate(),
            KeyCode::Char('c') => self.clear_structure(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(true),
            KeyCode::Char('-') | KeyCode::Char('_') => self.change_speed(false),
            KeyCode::Char('[') => self.resize_array(false),
            KeyCode::Char(']') => self.resize_array(true),
            KeyCode::Char('o') if self.focused == FocusedSurface::Tree => {
                let surface = self.surface_mut();
                surface.cycle_order();
                let order = surface.order;
                self.set_status(format!("Traversal order: {}", order.label()));
            }
            KeyCode::Char(c @ '0'..='9') if self.focused == FocusedSurface::Tree => {
                if self.input.len() < MAX_INPUT_LEN {
                    self.input.push(c);
                    self.sync_selection();
                }
            }
            KeyCode::Backspace if self.focused == FocusedSurface::Tree => {
                self.input.pop();
                self.sync_selection();
            }
            KeyCode::Esc => {
                self.input.clear();
                self.edge_source = None;
                self.sync_selection();
            }
            KeyCode::Char('i') if self.focused == FocusedSurface::Tree => {
                self.launch(Algorithm::TreeInsert, now)
            }
            KeyCode::Char('d') if self.focused == FocusedSurface::Tree => {
                self.launch(Algorithm::TreeDelete, now)
            }
            KeyCode::Char('f') if self.focused == FocusedSurface::Tree => {
                self.launch(Algorithm::TreeSearch, now)
            }
            KeyCode::Up if self.focused == FocusedSurface::Graph => self.move_graph_cursor(false),
            KeyCode::Down if self.focused == FocusedSurface::Graph => self.move_graph_cursor(true),
            KeyCode::Char('s') if self.focused == FocusedSurface::Graph => self.pick_edge_end(),
            KeyCode::Char('g') if self.focused == FocusedSurface::Graph => self.grow_graph(),
            KeyCode::Char('x') if self.focused == FocusedSurface::Graph => self.shrink_graph(),
            KeyCode::Char('e') => {
                let algorithm = self.surface().algorithm();
                self.explanation = Some(explanation_or_fallback(self.explainer.as_ref(), algorithm));
            }
            _ => {}
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.is_error = false;
    }

    fn set_error(&mut self, message: String) {
        self.status_message = message;
        self.is_error = true;
    }

    /// Structure edits wait until the focused run is reset or done
    fn reject_if_busy(&mut self) -> bool {
        if self.surface().is_busy() {
            self.set_error("Run in progress; press r to reset".to_string());
            true
        } else {
            false
        }
    }

    /// Start `algorithm` on the focused surface
    fn launch(&mut self, algorithm: Algorithm, now: Instant) {
        if self.reject_if_busy() {
            return;
        }

        let mut params = Params::with_order(self.surface().order);
        if algorithm.needs_value() {
            match self.input.parse::<i64>() {
                Ok(value) => params.value = Some(value),
                Err(_) => {
                    self.set_error("Type a value first".to_string());
                    return;
                }
            }
        }

        let surface = self.surface_mut();
        if let Some(idx) = surface.algorithms.iter().position(|&a| a == algorithm) {
            surface.selected = idx;
        }
        match surface.launch(algorithm, params, now) {
            Ok(Launch::Started) => self.set_status(format!("Running {}", algorithm)),
            Ok(Launch::NothingToDo) => {
                let domain = surface.domain;
                self.set_status(format!("Nothing to do: the {} is empty", domain))
            }
            Err(err) => self.set_error(err.to_string()),
        }
    }

    fn regenerate(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        let structure = match self.focused {
            FocusedSurface::Array => {
                Structure::Array(random_array(self.config.array_size, &mut self.rng))
            }
            FocusedSurface::Graph => Structure::Graph(Graph::sample()),
            FocusedSurface::Tree => Structure::Tree(Bst::random(&mut self.rng)),
        };
        debug!(domain = %self.surface().domain, "new structure");
        self.surface_mut().replace(structure);
        self.sync_graph_cursor();
        self.sync_selection();
        self.set_status(format!("New {}", self.surface().domain));
    }

    fn clear_structure(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        let structure = match self.focused {
            FocusedSurface::Array => Structure::Array(Vec::new()),
            FocusedSurface::Graph => Structure::Graph(Graph::new()),
            FocusedSurface::Tree => Structure::Tree(Bst::new()),
        };
        self.surface_mut().replace(structure);
        self.sync_graph_cursor();
        self.sync_selection();
        self.set_status(format!("Cleared {}", self.surface().domain));
    }

    /// Speed applies to every surface sharing the same configured delay
    fn change_speed(&mut self, faster: bool) {
        let tree = self.focused == FocusedSurface::Tree;
        let current = if tree {
            self.config.tree_speed_ms
        } else {
            self.config.speed_ms
        };
        let next = adjust_speed(current, faster);
        if tree {
            self.config.tree_speed_ms = next;
        } else {
            self.config.speed_ms = next;
        }

        let delay = Duration::from_millis(next);
        for surface in self.surfaces.iter_mut() {
            if (surface.domain == Domain::Tree) == tree {
                surface.controller.set_speed(delay);
            }
        }
        self.set_status(format!("Delay {} ms", next));
    }

    fn resize_array(&mut self, grow: bool) {
        if self.focused != FocusedSurface::Array || self.reject_if_busy() {
            return;
        }
        let size = if grow {
            self.config.array_size.saturating_add(ARRAY_SIZE_STEP)
        } else {
            self.config.array_size.saturating_sub(ARRAY_SIZE_STEP)
        };
        self.config.array_size = size.clamp(ARRAY_SIZE_MIN, ARRAY_SIZE_MAX);
        self.regenerate();
        self.set_status(format!("Array size {}", self.config.array_size));
    }

    fn graph(&self) -> Option<&Graph> {
        self.surfaces[FocusedSurface::Graph.index()]
            .structure
            .as_graph()
    }

    /// Store an edited graph on the graph surface
    fn commit_graph(&mut self, graph: Graph) {
        self.surfaces[FocusedSurface::Graph.index()].replace(Structure::Graph(graph));
        self.sync_graph_cursor();
        self.sync_selection();
    }

    /// Keep the cursor and edge source on nodes that still exist
    fn sync_graph_cursor(&mut self) {
        let Some(graph) = self.graph() else {
            return;
        };
        let cursor = self
            .graph_cursor
            .filter(|&id| graph.contains(id))
            .or_else(|| graph.first());
        let source = self.edge_source.filter(|&id| graph.contains(id));
        self.graph_cursor = cursor;
        self.edge_source = source;
    }

    /// Step the cursor through nodes in insertion order, wrapping around
    fn move_graph_cursor(&mut self, forward: bool) {
        let Some(graph) = self.graph() else {
            return;
        };
        let nodes = graph.nodes();
        if nodes.is_empty() {
            return;
        }
        let len = nodes.len();
        let next = match self
            .graph_cursor
            .and_then(|id| nodes.iter().position(|node| node.id == id))
        {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        let id = nodes[next].id;
        self.graph_cursor = Some(id);
    }

    /// First press picks the source, second press on another node adds an
    /// edge with a random weight. Pressing on the source again deselects it.
    fn pick_edge_end(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        let Some(cursor) = self.graph_cursor else {
            self.set_error("Graph is empty; press g to add a node".to_string());
            return;
        };
        let Some(mut graph) = self.graph().cloned() else {
            return;
        };
        let label = graph.label(cursor).unwrap_or("?").to_string();

        match self.edge_source {
            None => {
                self.edge_source = Some(cursor);
                self.sync_selection();
                self.set_status(format!("Selected node {}", label));
            }
            Some(source) if source == cursor => {
                self.edge_source = None;
                self.sync_selection();
                self.set_status(format!("Deselected node {}", label));
            }
            Some(source) => {
                self.edge_source = None;
                let from = graph.label(source).unwrap_or("?").to_string();
                match graph.add_random_edge(source, cursor, &mut self.rng) {
                    Ok(weight) => {
                        debug!(%source, target = %cursor, weight, "edge added");
                        self.commit_graph(graph);
                        self.set_status(format!(
                            "Created edge {} → {} (weight {})",
                            from, label, weight
                        ));
                    }
                    Err(err) => {
                        self.sync_selection();
                        self.set_error(err.to_string());
                    }
                }
            }
        }
    }

    /// Add an unconnected node and move the cursor onto it
    fn grow_graph(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        let Some(mut graph) = self.graph().cloned() else {
            return;
        };
        let id = graph.add_node();
        let label = graph.label(id).unwrap_or("?").to_string();
        self.graph_cursor = Some(id);
        self.commit_graph(graph);
        self.set_status(format!("Added node {}", label));
    }

    /// Remove the node under the cursor and its edges
    fn shrink_graph(&mut self) {
        if self.reject_if_busy() {
            return;
        }
        let Some(mut graph) = self.graph().cloned() else {
            return;
        };
        let Some(cursor) = self.graph_cursor.filter(|&id| graph.contains(id)) else {
            self.set_error("Graph is already empty".to_string());
            return;
        };
        let label = graph.label(cursor).unwrap_or("?").to_string();
        // Land on the node before the removed one
        self.move_graph_cursor(false);
        if self.graph_cursor == Some(cursor) {
            self.graph_cursor = None;
        }
        graph.remove_node(cursor);
        self.commit_graph(graph);
        self.set_status(format!("Removed node {}", label));
    }

    /// Mark the node the next edit would touch: the typed tree value or the
    /// chosen edge source
    fn sync_selection(&mut self) {
        let typed = self.input.parse::<i64>().ok();
        let source = self.edge_source;
        for surface in self.surfaces.iter_mut() {
            let selected = match &surface.structure {
                Structure::Tree(tree) => typed
                    .filter(|&value| tree.contains(value))
                    .map(Target::Key),
                Structure::Graph(_) => source.map(Target::Node),
                Structure::Array(_) => None,
            };
            surface.view.borrow_mut().selected = selected;
        }
    }
}
