//! Data model for the secretome dashboard.
//!
//! This module contains all data structures for representing:
//! - Cell values, protein records and the loaded dataset
//! - Per-view state (search, GC tool, scrolling)
//! - Application state
//!
//! The dataset is loaded once at startup and shared read-only through an
//! `Arc`; nothing in the application state mutates it.

use std::fmt;
use std::sync::Arc;

use crate::content;
use crate::gc::{compute_gc, GcContent, GcError};
use crate::search::matching_indices;
use crate::ui;

/// Name of the column searched by the protein search view.
pub const PROTEIN_NAME_COLUMN: &str = "Protein Name";

/// Cell texts read as missing values, as spreadsheet tools commonly write them.
pub const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns true if `raw` is blank or one of the [`MISSING_TOKENS`].
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

/// A single loosely-typed table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Null,
}

impl Value {
    /// Infers a value from a raw text cell: empty cells and missing-value
    /// markers are `Null`, finite numbers are `Number`, anything else is
    /// kept as `Text`.
    pub fn infer(raw: &str) -> Self {
        if is_missing(raw) {
            return Value::Null;
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Number(n),
            _ => Value::Text(raw.to_string()),
        }
    }

    /// Returns the text content, if this is a text cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the cell is empty.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            // Integral values print without a trailing ".0"
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{}", n),
            Value::Null => Ok(()),
        }
    }
}

/// One row of the dataset: an ordered mapping from column name to value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinRecord {
    /// Column names, shared with the owning dataset
    columns: Arc<[String]>,
    /// One value per column, in column order
    values: Vec<Value>,
}

impl ProteinRecord {
    /// Creates a record, padding missing trailing cells with `Null` and
    /// dropping cells beyond the header.
    pub fn new(columns: Arc<[String]>, mut values: Vec<Value>) -> Self {
        values.truncate(columns.len());
        values.resize(columns.len(), Value::Null);
        Self { columns, values }
    }

    /// Gets the value of a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }

    /// Returns the values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Iterates over `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Returns the protein name, or `None` if the cell is empty or not text.
    pub fn protein_name(&self) -> Option<&str> {
        self.get(PROTEIN_NAME_COLUMN).and_then(Value::as_text)
    }
}

/// The loaded protein table.
///
/// An empty dataset (no records) is the "unavailable" state.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Arc<[String]>,
    records: Vec<ProteinRecord>,
}

impl Dataset {
    /// Creates a dataset from a header and raw rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let columns: Arc<[String]> = Arc::from(columns);
        let records = rows
            .into_iter()
            .map(|values| ProteinRecord::new(Arc::clone(&columns), values))
            .collect();
        Self { columns, records }
    }

    /// Creates the empty ("unavailable") dataset.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Returns the column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if the dataset has the given column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Returns all records in file order.
    pub fn records(&self) -> &[ProteinRecord] {
        &self.records
    }

    /// Gets a record by index.
    pub fn get(&self, index: usize) -> Option<&ProteinRecord> {
        self.records.get(index)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The navigable views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    About,
    Search,
    GcContent,
    Database,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 4] = [Tab::About, Tab::Search, Tab::GcContent, Tab::Database];

    /// Returns the tab label.
    pub fn title(self) -> &'static str {
        match self {
            Tab::About => "About Disease",
            Tab::Search => "Search Protein",
            Tab::GcContent => "GC Content Tool",
            Tab::Database => "View Database",
        }
    }

    /// Returns the position of the tab in the tab bar.
    pub fn index(self) -> usize {
        match self {
            Tab::About => 0,
            Tab::Search => 1,
            Tab::GcContent => 2,
            Tab::Database => 3,
        }
    }

    /// Returns the tab at a position, if any.
    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    /// Returns the next tab, wrapping around.
    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Returns the previous tab, wrapping around.
    pub fn previous(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// State of the protein search view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    /// Current query text
    pub query: String,
    /// Indices of matching records; `None` while the query is empty
    pub matches: Option<Vec<usize>>,
    /// First visible result row
    pub scroll: usize,
    /// First visible result column
    pub first_column: usize,
}

/// State of the GC content view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GcView {
    /// Current sequence text
    pub input: String,
    /// Outcome for the current input; `None` while the input is empty
    pub result: Option<Result<GcContent, GcError>>,
}

/// Visible size of the content area (between the tab bar and the status bar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

/// The complete application state.
#[derive(Debug)]
pub struct AppState {
    /// The loaded dataset (empty if unavailable)
    pub dataset: Arc<Dataset>,
    /// Message describing why the dataset could not be loaded
    pub load_error: Option<String>,
    /// Currently displayed view
    pub tab: Tab,
    /// Search view state
    pub search: SearchView,
    /// GC tool state
    pub gc: GcView,
    /// First visible line of the about text
    pub about_scroll: usize,
    /// First visible row of the database table
    pub database_scroll: usize,
    /// First visible column of the database table
    pub database_column: usize,
    /// Current content area size
    pub viewport: Viewport,
    /// Whether the application should quit
    pub should_quit: bool,
    /// Status message to display
    pub status_message: Option<String>,
}

impl AppState {
    /// Creates a new application state around an already-loaded dataset.
    pub fn new(dataset: Arc<Dataset>, load_error: Option<String>) -> Self {
        Self {
            dataset,
            load_error,
            tab: Tab::default(),
            search: SearchView::default(),
            gc: GcView::default(),
            about_scroll: 0,
            database_scroll: 0,
            database_column: 0,
            viewport: Viewport::default(),
            should_quit: false,
            status_message: None,
        }
    }

    /// Returns true if the dataset is available.
    pub fn dataset_loaded(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// Updates the viewport size based on terminal dimensions.
    pub fn update_viewport_size(&mut self, rows: usize, cols: usize) {
        self.viewport = Viewport { rows, cols };
        self.clamp_scroll();
    }

    /// Switches to a specific tab.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.status_message = None;
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.select_tab(self.tab.next());
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.select_tab(self.tab.previous());
    }

    /// Returns true if the current view has a text input.
    ///
    /// The search input only exists while the dataset is loaded.
    pub fn accepts_text_input(&self) -> bool {
        match self.tab {
            Tab::Search => self.dataset_loaded(),
            Tab::GcContent => true,
            Tab::About | Tab::Database => false,
        }
    }

    /// Handles a character typed into the current view's input.
    pub fn input_char(&mut self, c: char) {
        self.edit_input(|text| text.push(c));
    }

    /// Handles pasted text in the current view's input.
    pub fn input_paste(&mut self, pasted: &str) {
        self.edit_input(|text| text.push_str(pasted));
    }

    /// Handles backspace in the current view's input.
    pub fn input_backspace(&mut self) {
        self.edit_input(|text| {
            text.pop();
        });
    }

    /// Clears the current view's input.
    pub fn clear_input(&mut self) {
        self.edit_input(String::clear);
        if self.accepts_text_input() {
            self.status_message = Some("Input cleared".to_string());
        }
    }

    /// Applies an edit to the active input and refreshes the derived result.
    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        if !self.accepts_text_input() {
            return;
        }
        self.status_message = None;
        match self.tab {
            Tab::Search => {
                edit(&mut self.search.query);
                self.refresh_search();
            }
            Tab::GcContent => {
                edit(&mut self.gc.input);
                self.refresh_gc();
            }
            Tab::About | Tab::Database => {}
        }
    }

    /// Recomputes the search matches for the current query.
    fn refresh_search(&mut self) {
        self.search.scroll = 0;
        self.search.matches = if self.search.query.is_empty() {
            None
        } else {
            Some(matching_indices(&self.dataset, &self.search.query))
        };
    }

    /// Recomputes the GC content for the current input.
    fn refresh_gc(&mut self) {
        self.gc.result = if self.gc.input.is_empty() {
            None
        } else {
            Some(compute_gc(&self.gc.input))
        };
    }

    /// Number of rows a view can scroll through.
    fn scrollable_len(&self, tab: Tab) -> usize {
        match tab {
            Tab::About => content::about_lines(ui::about_text_width(self.viewport.cols)).len(),
            Tab::Search => self.search.matches.as_ref().map_or(0, Vec::len),
            Tab::GcContent => 0,
            Tab::Database => self.dataset.len(),
        }
    }

    /// Number of rows of the active view visible at once.
    pub fn page_rows(&self) -> usize {
        ui::body_rows(self.tab, self.viewport.rows).max(1)
    }

    fn max_scroll(&self, tab: Tab) -> usize {
        let page = ui::body_rows(tab, self.viewport.rows).max(1);
        self.scrollable_len(tab).saturating_sub(page)
    }

    fn scroll_mut(&mut self, tab: Tab) -> Option<&mut usize> {
        match tab {
            Tab::About => Some(&mut self.about_scroll),
            Tab::Search => Some(&mut self.search.scroll),
            Tab::GcContent => None,
            Tab::Database => Some(&mut self.database_scroll),
        }
    }

    /// Moves the active view's scroll offset, keeping it within bounds.
    fn set_scroll(&mut self, update: impl FnOnce(usize) -> usize) {
        let tab = self.tab;
        let max = self.max_scroll(tab);
        if let Some(scroll) = self.scroll_mut(tab) {
            *scroll = update(*scroll).min(max);
        }
    }

    /// Scrolls the active view up by `n` rows.
    pub fn scroll_up(&mut self, n: usize) {
        self.set_scroll(|scroll| scroll.saturating_sub(n));
    }

    /// Scrolls the active view down by `n` rows.
    pub fn scroll_down(&mut self, n: usize) {
        self.set_scroll(|scroll| scroll.saturating_add(n));
    }

    /// Scrolls up by one page.
    pub fn page_up(&mut self) {
        self.scroll_up(self.page_rows());
    }

    /// Scrolls down by one page.
    pub fn page_down(&mut self) {
        self.scroll_down(self.page_rows());
    }

    /// Scrolls to the first row.
    pub fn scroll_to_top(&mut self) {
        self.set_scroll(|_| 0);
    }

    /// Scrolls to the last page.
    pub fn scroll_to_bottom(&mut self) {
        self.set_scroll(|_| usize::MAX);
    }

    /// Keeps every view's scroll offset within bounds after a resize.
    fn clamp_scroll(&mut self) {
        for tab in Tab::ALL {
            let max = self.max_scroll(tab);
            if let Some(scroll) = self.scroll_mut(tab) {
                *scroll = (*scroll).min(max);
            }
        }
    }

    fn column_mut(&mut self, tab: Tab) -> Option<&mut usize> {
        match tab {
            Tab::Search => Some(&mut self.search.first_column),
            Tab::Database => Some(&mut self.database_column),
            Tab::About | Tab::GcContent => None,
        }
    }

    /// Moves the active table's first visible column, keeping at least one
    /// column on screen.
    fn set_column(&mut self, update: impl FnOnce(usize) -> usize) {
        let max = self.dataset.columns().len().saturating_sub(1);
        if let Some(column) = self.column_mut(self.tab) {
            *column = update(*column).min(max);
        }
    }

    /// Scrolls the active table left by `n` columns.
    pub fn scroll_left(&mut self, n: usize) {
        self.set_column(|column| column.saturating_sub(n));
    }

    /// Scrolls the active table right by `n` columns.
    pub fn scroll_right(&mut self, n: usize) {
        self.set_column(|column| column.saturating_add(n));
    }

    /// Requests application exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
