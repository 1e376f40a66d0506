//! # Introduction
//!
//! algotty runs textbook algorithms (sorting, graph search, binary search
//! tree operations) one observable step at a time, so they can be paused,
//! resumed, slowed down or cancelled while a terminal UI built with
//! [ratatui](https://docs.rs/ratatui) redraws after every step.
//!
//! ## Execution pipeline
//!
//! ```text
//! Structure → Producer → Scheduler → Observer (RunView) → TUI
//!                ↓
//!          StatsCollector
//! ```
//!
//! 1. [`structures`]: arrays, weighted graphs and binary search trees, plus
//!    the pre-run edits (random arrays, adding nodes, sample trees).
//! 2. [`producers`]: one explicit state machine per algorithm; each call to
//!    [`producers::StepProducer::next_step`] yields the next [`step::Step`].
//! 3. [`scheduler`]: cooperative, non-blocking pacing. The host calls
//!    [`scheduler::Scheduler::tick`] and at most one Step is delivered per
//!    tick, so pause and stop take effect between any two Steps.
//! 4. [`controller`]: the start / toggle / reset façade used by the UI.
//! 5. [`view`]: folds the Step stream into a render model and derives a
//!    highlight for each element.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported algorithms
//!
//! Sorting: bubble, selection, insertion, merge, quick (Lomuto).
//! Graph: breadth-first, depth-first, Dijkstra.
//! Tree: insert, delete, search, pre/in/post-order traversal.

pub mod config;
pub mod controller;
pub mod error;
pub mod explain;
pub mod producers;
pub mod scheduler;
pub mod stats;
pub mod step;
pub mod structures;
pub mod ui;
pub mod view;
