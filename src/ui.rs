//! TUI rendering module.
//!
//! This module handles all visual rendering using ratatui:
//! - Tab bar with the four views
//! - Persistent banner when the dataset failed to load
//! - One renderer per view (about text, search, GC tool, database table)
//! - Status bar with the active view and row counts

pub mod glyphs;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::content::{about_lines, LineKind, ABOUT_TITLE};
use crate::model::{AppState, Dataset, ProteinRecord, Tab};
use crate::search::summary;
use glyphs::Glyphs;

/// Window title shown on the tab bar.
pub const APP_TITLE: &str = "Bacterial Secretome Web Tool";

/// Height of the tab bar (including borders).
const TAB_BAR_HEIGHT: u16 = 3;
/// Height of the load error banner.
const BANNER_HEIGHT: u16 = 1;
/// Height of the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// Height of the search input box (including borders).
const SEARCH_INPUT_HEIGHT: u16 = 3;
/// Height of the sequence input box (including borders).
const GC_INPUT_HEIGHT: u16 = 6;
/// Height of the one-line result message under an input.
const MESSAGE_HEIGHT: u16 = 1;
/// Rows a bordered table uses besides its body (borders + header).
const TABLE_CHROME: usize = 3;
/// Widest a table column may grow, unless it is the first one shown.
const MAX_COLUMN_WIDTH: usize = 40;
/// Gap between table columns.
const COLUMN_SPACING: usize = 2;

/// Renders the complete UI.
pub fn render(frame: &mut Frame, state: &AppState, glyphs: &Glyphs) {
    let area = frame.area();
    let banner_height = if state.load_error.is_some() { BANNER_HEIGHT } else { 0 };

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    render_tab_bar(frame, state, glyphs, main_layout[0]);
    if let Some(message) = &state.load_error {
        render_banner(frame, message, glyphs, main_layout[1]);
    }

    let content_area = main_layout[2];
    match state.tab {
        Tab::About => render_about(frame, state, content_area),
        Tab::Search => render_search(frame, state, glyphs, content_area),
        Tab::GcContent => render_gc(frame, state, glyphs, content_area),
        Tab::Database => render_database(frame, state, glyphs, content_area),
    }

    render_status_bar(frame, state, main_layout[3]);
}

fn render_tab_bar(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!("F{} {}", tab.index() + 1, tab.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .block(Block::default().borders(Borders::ALL).title(APP_TITLE))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(glyphs.tab_divider);

    frame.render_widget(tabs, area);
}

fn render_banner(frame: &mut Frame, message: &str, glyphs: &Glyphs, area: Rect) {
    let banner = Paragraph::new(Line::from(Span::styled(
        format!("{}{}", glyphs.error_prefix, message),
        Style::default()
            .fg(Color::White)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(banner, area);
}

fn render_about(frame: &mut Frame, state: &AppState, area: Rect) {
    let lines: Vec<Line> = about_lines(about_text_width(area.width as usize))
        .into_iter()
        .map(|line| match line.kind {
            LineKind::Heading => Line::from(Span::styled(
                line.text,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            LineKind::Text | LineKind::Blank => Line::from(line.text),
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(ABOUT_TITLE))
        .scroll((state.about_scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn render_search(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Protein Search Tool");
    if !state.dataset_loaded() {
        let warning = warning_line(glyphs, "Load the dataset to use this feature.");
        frame.render_widget(Paragraph::new(warning).block(block), area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Length(MESSAGE_HEIGHT),
            Constraint::Min(TABLE_CHROME as u16),
        ])
        .split(area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(state.search.query.as_str()),
        Span::styled(glyphs.cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Enter Protein Name (partial/full)"),
    );
    frame.render_widget(input, layout[0]);

    let Some(matches) = &state.search.matches else {
        return;
    };

    if matches.is_empty() {
        frame.render_widget(Paragraph::new(warning_line(glyphs, &summary(0))), layout[1]);
        return;
    }

    let message = Line::from(Span::styled(
        format!("{}{}", glyphs.ok_prefix, summary(matches.len())),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(message), layout[1]);

    let visible = body_rows(Tab::Search, area.height as usize);
    let records: Vec<(usize, &ProteinRecord)> = matches
        .iter()
        .skip(state.search.scroll)
        .take(visible)
        .filter_map(|&i| state.dataset.get(i).map(|r| (i, r)))
        .collect();
    let view = TableView {
        label: "Results",
        first_row: state.search.scroll,
        total_rows: matches.len(),
        first_column: state.search.first_column,
    };
    render_records_table(frame, &state.dataset, &records, &view, glyphs, layout[2]);
}

fn render_gc(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(GC_INPUT_HEIGHT),
            Constraint::Length(MESSAGE_HEIGHT),
            Constraint::Min(0),
        ])
        .split(area);

    let inner_width = layout[0].width.saturating_sub(2) as usize;
    let inner_height = layout[0].height.saturating_sub(2) as usize;
    let scroll = input_scroll(&state.gc.input, glyphs.cursor, inner_width, inner_height);

    let mut input = Text::raw(state.gc.input.as_str());
    input.push_span(Span::styled(glyphs.cursor, Style::default().fg(Color::Cyan)));
    let input = Paragraph::new(input)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("GC Content Calculator: paste a DNA sequence (A, T, G, C only)"),
        );
    frame.render_widget(input, layout[0]);

    let message = match &state.gc.result {
        None => return,
        Some(Ok(gc)) => Line::from(vec![
            Span::styled(glyphs.ok_prefix, Style::default().fg(Color::Green)),
            Span::styled("GC Content: ", Style::default().fg(Color::Green)),
            Span::styled(
                gc.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        Some(Err(e)) => Line::from(Span::styled(
            format!("{}{}", glyphs.error_prefix, e),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    };
    frame.render_widget(Paragraph::new(message), layout[1]);
}

fn render_database(frame: &mut Frame, state: &AppState, glyphs: &Glyphs, area: Rect) {
    let dataset = &state.dataset;
    if dataset.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Secretome Protein Database");
        frame.render_widget(Paragraph::new(warning_line(glyphs, "Database not loaded.")).block(block), area);
        return;
    }

    let visible = body_rows(Tab::Database, area.height as usize);
    let records: Vec<(usize, &ProteinRecord)> = dataset
        .records()
        .iter()
        .enumerate()
        .skip(state.database_scroll)
        .take(visible)
        .collect();
    let view = TableView {
        label: "Secretome Protein Database",
        first_row: state.database_scroll,
        total_rows: dataset.len(),
        first_column: state.database_column,
    };
    render_records_table(frame, dataset, &records, &view, glyphs, area);
}

/// Position of a records table within its data.
struct TableView<'a> {
    label: &'a str,
    first_row: usize,
    total_rows: usize,
    first_column: usize,
}

/// Picks the columns that fit in `available` cells, starting at `first`.
///
/// Returns `(column, width)` pairs. The first column shown may use the whole
/// width so that any cell can be read in full by scrolling to its column;
/// the others are capped at [`MAX_COLUMN_WIDTH`].
fn visible_columns(widths: &[usize], first: usize, available: usize) -> Vec<(usize, usize)> {
    let mut shown = Vec::new();
    let mut used = 0;
    for (column, &width) in widths.iter().enumerate().skip(first) {
        let width = if shown.is_empty() {
            width.min(available.saturating_sub(COLUMN_SPACING)).max(1)
        } else {
            width.min(MAX_COLUMN_WIDTH)
        };
        if !shown.is_empty() && used + COLUMN_SPACING + width > available {
            break;
        }
        used += COLUMN_SPACING + width;
        shown.push((column, width));
    }
    shown
}

/// Renders records as a table with a leading row-index column.
fn render_records_table(
    frame: &mut Frame,
    dataset: &Dataset,
    records: &[(usize, &ProteinRecord)],
    view: &TableView,
    glyphs: &Glyphs,
    area: Rect,
) {
    let columns = dataset.columns();
    let first_column = view.first_column.min(columns.len().saturating_sub(1));

    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|(_, record)| record.values().iter().map(|v| v.to_string()).collect())
        .collect();
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let index_width = records
        .iter()
        .map(|(index, _)| index.to_string().len())
        .max()
        .unwrap_or(1);

    // Inside the borders, after the index column
    let available = (area.width as usize).saturating_sub(2 + index_width);
    let shown = visible_columns(&widths, first_column, available);
    let last_column = shown.last().map_or(first_column, |&(column, _)| column);

    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(shown.iter().map(|&(column, width)| {
                Cell::from(truncate(&columns[column], width, glyphs.ellipsis))
            })),
    )
    .style(Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD));

    let body: Vec<Row> = records
        .iter()
        .zip(&cells)
        .map(|((index, _), row)| {
            let index = Cell::from(index.to_string()).style(Style::default().fg(Color::DarkGray));
            let values = shown
                .iter()
                .map(|&(column, width)| Cell::from(truncate(&row[column], width, glyphs.ellipsis)));
            Row::new(std::iter::once(index).chain(values))
        })
        .collect();

    let constraints: Vec<Constraint> = std::iter::once(index_width)
        .chain(shown.iter().map(|&(_, width)| width))
        .map(|w| Constraint::Length(w as u16))
        .collect();

    let title = format!(
        "{} [Cols {}-{}/{}] {}{}",
        scroll_title(view.label, view.first_row, records.len(), view.total_rows, glyphs),
        first_column + 1,
        last_column + 1,
        columns.len(),
        if first_column > 0 { glyphs.arrow_left } else { " " },
        if last_column + 1 < columns.len() { glyphs.arrow_right } else { " " },
    );
    let table = Table::new(body, constraints)
        .header(header)
        .column_spacing(COLUMN_SPACING as u16)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// Renders the status bar at the bottom.
fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let hint = "Tab/F1-F4: switch view | Arrows: scroll | Esc: clear input | Ctrl+C: quit";
    let message = state.status_message.as_deref().unwrap_or(hint);
    let left_content = format!(" {} | {} ", state.tab.title().to_uppercase(), message);

    let position_info = match state.tab {
        Tab::Search => match &state.search.matches {
            Some(matches) => format!("Matches {}/{} ", matches.len(), state.dataset.len()),
            None => format!("Records {} ", state.dataset.len()),
        },
        Tab::GcContent => format!("Length {} ", state.gc.input.chars().count()),
        Tab::About | Tab::Database => format!("Records {} ", state.dataset.len()),
    };

    let left_len = left_content.chars().count();
    let status_line = Line::from(vec![
        Span::styled(left_content, Style::default().fg(Color::Black).bg(Color::Cyan)),
        Span::styled(
            " ".repeat((area.width as usize).saturating_sub(left_len + position_info.len())),
            Style::default().bg(Color::Cyan),
        ),
        Span::styled(
            position_info,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    frame.render_widget(Paragraph::new(status_line), area);
}

fn warning_line(glyphs: &Glyphs, message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{}{}", glyphs.warn_prefix, message),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
}

/// Builds a table title with the visible row range and scroll arrows.
fn scroll_title(label: &str, first: usize, shown: usize, total: usize, glyphs: &Glyphs) -> String {
    let up = if first > 0 { glyphs.arrow_up } else { " " };
    let down = if first + shown < total { glyphs.arrow_down } else { " " };
    format!(
        "{} [Rows {}-{}/{}] {}{}",
        label,
        (first + 1).min(total),
        first + shown,
        total,
        up,
        down
    )
}

/// First wrapped line to show so that the end of `input` and the cursor stay
/// in a box of `width` x `height`.
///
/// Sequences have no spaces, so wrapping is counted per character.
fn input_scroll(input: &str, cursor: &str, width: usize, height: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let mut text = input.to_string();
    text.push_str(cursor);
    let lines: usize = text
        .split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    lines.saturating_sub(height)
}

/// Shortens `text` to at most `max` characters, marking the cut.
fn truncate(text: &str, max: usize, ellipsis: &str) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ellipsis.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ellipsis);
    out
}

/// Calculates the content area size between the tab bar and the status bar.
pub fn calculate_visible_dimensions(
    terminal_width: u16,
    terminal_height: u16,
    has_banner: bool,
) -> (usize, usize) {
    let banner = if has_banner { BANNER_HEIGHT } else { 0 };
    let rows = terminal_height.saturating_sub(TAB_BAR_HEIGHT + STATUS_BAR_HEIGHT + banner) as usize;
    (rows, terminal_width as usize)
}

/// Number of scrollable body rows a view shows in a content area of `content_rows`.
pub fn body_rows(tab: Tab, content_rows: usize) -> usize {
    match tab {
        Tab::About => content_rows.saturating_sub(2),
        Tab::Search => content_rows
            .saturating_sub((SEARCH_INPUT_HEIGHT + MESSAGE_HEIGHT) as usize + TABLE_CHROME),
        Tab::GcContent => 0,
        Tab::Database => content_rows.saturating_sub(TABLE_CHROME),
    }
}

/// Width available to the about text in a content area of `content_cols`.
pub fn about_text_width(content_cols: usize) -> usize {
    content_cols.saturating_sub(2)
}
