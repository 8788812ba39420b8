//! Terminal rendering of option lists and result pages.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use vmc_client::ClientError;
use vmc_model::{CollegeRecord, EducationLevel, ResultSchema};
use vmc_session::PageView;

/// A column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    CollegeCode,
    CollegeName,
    City,
    Course,
}

impl Column {
    pub fn title(self) -> &'static str {
        match self {
            Column::CollegeCode => "College Code",
            Column::CollegeName => "College Name",
            Column::City => "City",
            Column::Course => "Course",
        }
    }

    fn value(self, record: &CollegeRecord) -> Option<&str> {
        match self {
            Column::CollegeCode => record.college_code(),
            Column::CollegeName => Some(record.institute_name.as_str()).filter(|v| !v.is_empty()),
            Column::City => record.city(),
            Column::Course => Some(record.course.as_str()).filter(|v| !v.is_empty()),
        }
    }
}

/// Columns shown for a result set with `schema`.
pub fn columns(schema: ResultSchema) -> Vec<Column> {
    let mut columns = Vec::with_capacity(4);
    if schema.has_college_code {
        columns.push(Column::CollegeCode);
    }
    columns.push(Column::CollegeName);
    if schema.has_city {
        columns.push(Column::City);
    }
    columns.push(Column::Course);
    columns
}

pub fn results_heading(total: usize) -> String {
    format!("Available Colleges ({total} found)")
}

/// Previous/next hints under the table.
pub fn page_footer(view: &PageView<'_>) -> String {
    let mut footer = view.page_info();
    match (view.has_prev(), view.has_next()) {
        (true, true) => footer.push_str("  (prev | next)"),
        (true, false) => footer.push_str("  (prev)"),
        (false, true) => footer.push_str("  (next)"),
        (false, false) => {}
    }
    footer
}

pub fn results_table(view: &PageView<'_>) -> Table {
    let columns = columns(view.schema);
    let mut table = Table::new();
    table.set_header(
        columns
            .iter()
            .map(|column| header_cell(column.title()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for record in view.records {
        table.add_row(
            columns
                .iter()
                .map(|column| match column.value(record) {
                    Some(value) => Cell::new(value),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Heading, table and footer for one page of results.
pub fn render_page(view: &PageView<'_>) -> String {
    if view.total_records == 0 {
        return "No colleges found.".to_string();
    }
    format!(
        "{}\n{}\n{}",
        results_heading(view.total_records),
        results_table(view),
        page_footer(view)
    )
}

/// Streams for one level, or both levels when `level` is `None`.
pub fn streams_table(level: Option<EducationLevel>) -> Table {
    let levels: Vec<EducationLevel> = match level {
        Some(level) => vec![level],
        None => EducationLevel::ALL.to_vec(),
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Stream"),
        header_cell("Label"),
    ]);
    apply_table_style(&mut table);
    for level in levels {
        for option in level.streams() {
            table.add_row(vec![
                Cell::new(level.as_str()).fg(Color::Blue),
                Cell::new(option.value).add_attribute(Attribute::Bold),
                Cell::new(option.label),
            ]);
        }
    }
    table
}

/// Single-column table of option names, numbered from 1.
pub fn options_table<S: AsRef<str>>(title: &str, options: &[S]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell(title)]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, option) in options.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(option.as_ref())]);
    }
    table
}

/// Machine-readable page of results for `--format json`.
#[derive(Debug, Serialize)]
pub struct ResultsReport<'a> {
    pub total_records: usize,
    pub page: usize,
    pub total_pages: usize,
    pub columns: Vec<Column>,
    pub colleges: &'a [CollegeRecord],
}

impl<'a> ResultsReport<'a> {
    pub fn new(view: &PageView<'a>) -> Self {
        Self {
            total_records: view.total_records,
            page: view.page,
            total_pages: view.display_total(),
            columns: columns(view.schema),
            colleges: view.records,
        }
    }
}

/// Message printed for a failed command.
///
/// Directory failures are shown with their user-facing text; the full error
/// chain stays in the logs.
pub fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ClientError>() {
        Some(client_error) => client_error.user_message().to_string(),
        None => format!("{error:#}"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
