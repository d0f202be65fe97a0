use std::collections::HashSet;
use std::ops::Range;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::ApiError;
use crate::models::SortOrder;

/// A markdown table lifted out of a document: header columns, data rows in
/// document order, and the byte span the table occupied in the source text.
/// The span end excludes the final line's trailing newline, so splicing a
/// re-rendered table back in leaves everything around it byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMatch {
    Found(usize),
    NoMatch,
    NoTables,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec<'a> {
    pub column: &'a str,
    pub order: SortOrder,
}

pub fn parse_tables(content: &str) -> Vec<TableBlock> {
    let lines = line_spans(content);
    let mut tables = Vec::new();

    let mut index = 0;
    while index + 1 < lines.len() {
        let (header_start, header_line) = lines[index];
        if !looks_like_row(header_line) || !is_separator_line(lines[index + 1].1) {
            index += 1;
            continue;
        }

        let columns = split_cells(header_line);
        if columns.is_empty() || split_cells(lines[index + 1].1).len() != columns.len() {
            index += 1;
            continue;
        }

        let mut rows = Vec::new();
        let mut last = index + 1;
        let mut cursor = index + 2;
        while cursor < lines.len() {
            let (_, line) = lines[cursor];
            if !looks_like_row(line) {
                break;
            }
            let cells = split_cells(line);
            if cells.len() != columns.len() {
                break;
            }
            rows.push(cells);
            last = cursor;
            cursor += 1;
        }

        let (last_start, last_line) = lines[last];
        tables.push(TableBlock {
            columns,
            rows,
            span: header_start..last_start + last_line.len(),
        });
        index = cursor;
    }

    tables
}

pub fn find_matching(tables: &[TableBlock], row_input: &IndexMap<String, String>) -> TableMatch {
    if tables.is_empty() {
        return TableMatch::NoTables;
    }

    let wanted: HashSet<&str> = row_input.keys().map(String::as_str).collect();
    for (position, table) in tables.iter().enumerate() {
        let columns: HashSet<&str> = table.columns.iter().map(String::as_str).collect();
        if columns == wanted {
            return TableMatch::Found(position);
        }
    }

    TableMatch::NoMatch
}

pub fn append_row(table: &mut TableBlock, row_input: &IndexMap<String, String>) {
    let row = table
        .columns
        .iter()
        .map(|column| row_input.get(column).cloned().unwrap_or_default())
        .collect();
    table.rows.push(row);
}

pub fn new_table(row_input: &IndexMap<String, String>) -> TableBlock {
    TableBlock {
        columns: row_input.keys().cloned().collect(),
        rows: vec![row_input.values().cloned().collect()],
        span: 0..0,
    }
}

/// Stable sort by one column. Rows with an empty cell in that column always
/// sink to the end; the remaining rows compare numerically when every value
/// in the column is a numeric literal, lexically otherwise. `desc` reverses
/// only the filled partition's comparison.
pub fn sort_rows(table: &mut TableBlock, column: &str, order: SortOrder) -> Result<(), ApiError> {
    let Some(column_index) = table.columns.iter().position(|name| name == column) else {
        return Err(ApiError::Validation(format!(
            "sort column {column:?} does not exist in the matched table"
        )));
    };

    let (mut filled, empty): (Vec<Vec<String>>, Vec<Vec<String>>) = std::mem::take(&mut table.rows)
        .into_iter()
        .partition(|row| !row[column_index].trim().is_empty());

    let kind = classify_column(&filled, column_index);
    filled.sort_by(|left, right| {
        let ordering = match kind {
            ColumnKind::Numeric => {
                numeric_value(&left[column_index]).total_cmp(&numeric_value(&right[column_index]))
            }
            ColumnKind::Text => left[column_index].cmp(&right[column_index]),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    filled.extend(empty);
    table.rows = filled;
    Ok(())
}

pub fn render(table: &TableBlock) -> String {
    let mut output = render_line(table.columns.iter().map(String::as_str));
    output.push('\n');
    output.push_str(&render_line(table.columns.iter().map(|_| "---")));
    for row in &table.rows {
        output.push('\n');
        output.push_str(&render_line(row.iter().map(String::as_str)));
    }
    output
}

/// Insert `row_input` into the document's matching table, or create a fresh
/// table when the document has none. Tables exist but none matches the input
/// columns is a `ColumnMismatch` error and the content stays untouched.
pub fn upsert_row(
    content: &str,
    row_input: &IndexMap<String, String>,
    sort: Option<&SortSpec<'_>>,
) -> Result<String, ApiError> {
    let mut tables = parse_tables(content);

    match find_matching(&tables, row_input) {
        TableMatch::Found(position) => {
            let table = &mut tables[position];
            append_row(table, row_input);
            if let Some(spec) = sort {
                sort_rows(table, spec.column, spec.order)?;
            }
            let rendered = render(table);
            let mut updated = String::with_capacity(content.len() + rendered.len());
            updated.push_str(&content[..table.span.start]);
            updated.push_str(&rendered);
            updated.push_str(&content[table.span.end..]);
            Ok(updated)
        }
        TableMatch::NoTables => {
            let mut table = new_table(row_input);
            if let Some(spec) = sort {
                sort_rows(&mut table, spec.column, spec.order)?;
            }
            Ok(append_table(content, &render(&table)))
        }
        TableMatch::NoMatch => {
            let wanted = row_input.keys().cloned().collect::<Vec<_>>().join(", ");
            Err(ApiError::ColumnMismatch(format!(
                "column mismatch: no existing table has exactly the columns [{wanted}]"
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Numeric,
    Text,
}

fn classify_column(rows: &[Vec<String>], column_index: usize) -> ColumnKind {
    let numeric_re = Regex::new(r"^-?\d+(?:\.\d+)?$").expect("hardcoded numeric regex is valid");
    let all_numeric = rows
        .iter()
        .map(|row| row[column_index].trim())
        .filter(|value| !value.is_empty())
        .all(|value| numeric_re.is_match(value));

    if all_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

fn numeric_value(cell: &str) -> f64 {
    // Unreachable fallback: classify_column already vetted every cell.
    cell.trim().parse().unwrap_or(f64::NEG_INFINITY)
}

fn line_spans(content: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for segment in content.split_inclusive('\n') {
        let line = segment.strip_suffix('\n').unwrap_or(segment);
        let line = line.strip_suffix('\r').unwrap_or(line);
        spans.push((start, line));
        start += segment.len();
    }
    spans
}

fn looks_like_row(line: &str) -> bool {
    !line.trim().is_empty() && line.contains('|')
}

// Cell-count agreement with the header is enforced by the caller.
fn is_separator_line(line: &str) -> bool {
    let separator_re =
        Regex::new(r"^[\s|:-]*-[\s|:-]*$").expect("hardcoded separator regex is valid");
    separator_re.is_match(line)
}

fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(cell.trim());
        line.push_str(" |");
    }
    line
}

fn append_table(content: &str, rendered: &str) -> String {
    if content.is_empty() {
        return format!("{rendered}\n");
    }

    let mut updated = String::with_capacity(content.len() + rendered.len() + 2);
    updated.push_str(content);
    if !content.ends_with("\n\n") {
        if !content.ends_with('\n') {
            updated.push('\n');
        }
        updated.push('\n');
    }
    updated.push_str(rendered);
    updated.push('\n');
    updated
}
