//! # secretome - Bacterial Secretome Dashboard
//!
//! A terminal dashboard for a table of bacterial secretome proteins using ratatui.
//!
//! ## Architecture
//!
//! The application follows an event-driven architecture with clear separation:
//! - `model`: Protein records, the dataset, and application state
//! - `formats`: Dataset loading (CSV/TSV and spreadsheets) with format detection
//! - `search`: Case-insensitive protein name search
//! - `gc`: GC content calculation
//! - `content`: Static educational text
//! - `event`: Keyboard event handling
//! - `ui`: TUI rendering with ratatui
//! - `controller`: Orchestration of state transitions
//! - `logging`: tracing subscriber setup

pub mod content;
pub mod controller;
pub mod event;
pub mod formats;
pub mod gc;
pub mod logging;
pub mod model;
pub mod search;
pub mod ui;
