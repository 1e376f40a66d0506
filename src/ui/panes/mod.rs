//! TUI pane rendering modules
//!
//! Every pane is a stateless render function over a [`RunView`] (or plain
//! app state). Colors come from [`classify`] through the theme, so no pane
//! knows which algorithm produced the Steps it is drawing.
//!
//! # Pane Modules
//!
//! - [`array`]: bar chart of the array being sorted
//! - [`graph`]: node/edge canvas plus the Dijkstra path readout
//! - [`tree`]: sideways BST with the traversal or search result
//! - [`stats`]: live counters, tree metrics and the run outcome
//! - [`status`]: status bar with keybindings and run state
//! - [`explain`]: explanation popup
//!
//! [`RunView`]: crate::view::RunView
//! [`classify`]: crate::view::classify

pub mod array;
pub mod explain;
pub mod graph;
pub mod stats;
pub mod status;
pub mod tree;

pub use array::render_array_pane;
pub use explain::render_explain_popup;
pub use graph::render_graph_pane;
pub use stats::render_stats_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use tree::render_tree_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered block, highlighted when its surface is focused
pub(super) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
