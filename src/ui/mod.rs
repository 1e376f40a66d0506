//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, surface focus, value input
//! - **[`surface`]**: one visualization surface (sorting, graph or tree) with its
//!   own structure, [`RunView`] and [`RunController`]
//! - **[`panes`]**: stateless render functions for each visible pane
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a [`Config`] and
//! call [`App::run`] to start the event loop.
//!
//! [`RunView`]: crate::view::RunView
//! [`RunController`]: crate::controller::RunController
//! [`Config`]: crate::config::Config

pub mod app;
pub mod panes;
pub mod surface;
pub mod theme;

pub use app::App;
pub use surface::Surface;
