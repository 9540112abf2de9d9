//! Checks the table layouts the decoders rely on before any decoding runs.
//!
//! Every check collects findings instead of failing fast, so one bad page
//! produces a complete report. Decoding a page with findings is not allowed.

use tracing::debug;

use super::classify::{ActionLayout, RowKind, RowShape};
use super::consts::{
    ACTION_HEADER_COLUMNS, CONTINUATION_ROW_COLUMNS, SCENARIO_ROW_COLUMNS, SIMPLE_TABLE_COLUMNS,
};
use super::document::{Row, ServicePage, Table};
use super::error::{ParseError, ParseResult};
use crate::model::ProblemRow;

/// Runs every table check for a page, in table order: actions, resource
/// types, condition keys.
pub fn verify_page(page: &ServicePage) -> Vec<ProblemRow> {
    let mut problems = Vec::new();

    if let Some(table) = page.actions_table() {
        problems.extend(verify_actions_table(&table));
    }
    if let Some(table) = page.resource_types_table() {
        problems.extend(verify_simple_table(
            &table,
            "resource types",
            "Row does not have exactly three columns",
        ));
    }
    if let Some(table) = page.condition_keys_table() {
        problems.extend(verify_simple_table(
            &table,
            "conditions",
            "Conditions row does not have exactly three columns",
        ));
    }

    debug!(problems = problems.len(), "verified page tables");
    problems
}

pub fn ensure_verified(service: &str, page: &ServicePage) -> ParseResult<()> {
    let problems = verify_page(page);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ParseError::StructuralViolation {
            service: service.to_string(),
            problems,
        })
    }
}

pub fn verify_actions_table(table: &Table) -> Vec<ProblemRow> {
    let mut problems = verify_rowspans(table);
    problems.extend(verify_row_shapes(table));
    problems.extend(verify_colspans(table));
    problems
}

/// One finding per row, for the first rowspan rule the row breaks.
pub fn verify_rowspans(table: &Table) -> Vec<ProblemRow> {
    let mut problems = Vec::new();

    for (index, row) in table.body.iter().enumerate() {
        if !row.has_rowspan() {
            continue;
        }
        if let Some(description) = rowspan_violation(table, index, row) {
            problems.push(problem(description, row));
        }
    }

    problems
}

fn rowspan_violation(table: &Table, index: usize, row: &Row) -> Option<&'static str> {
    let previous_has_rowspan = index
        .checked_sub(1)
        .and_then(|previous| table.body.get(previous))
        .is_some_and(Row::has_rowspan);
    if previous_has_rowspan {
        return Some("previous row has rowspan");
    }

    if row.column_count() != ACTION_HEADER_COLUMNS {
        return Some("does not have six columns");
    }

    let [Some(name_span), Some(description_span), Some(access_span)] =
        RowShape::of(row).lead_spans
    else {
        return Some("missing rowspan in first three columns");
    };

    if name_span == 0 || description_span == 0 || access_span == 0 {
        return Some("zero rowspan in first three columns");
    }
    if name_span < description_span {
        return Some("first column rowspan should be the biggest");
    }
    if description_span != access_span {
        return Some("second and third column rowspan should be equal");
    }
    if (3..ACTION_HEADER_COLUMNS).any(|column| row.rowspan_at(column).is_some()) {
        return Some("found rowspan in last three columns");
    }

    None
}

/// Walks the body the way the decoder groups it: rows outside any group must
/// be action headers, rows inside a group must match the width its position
/// implies, and every group must end before the table does. Rows with a
/// colspan are left to the colspan check.
pub fn verify_row_shapes(table: &Table) -> Vec<ProblemRow> {
    let mut problems = Vec::new();
    let mut continuations_left = 0usize;
    let mut scenarios_left = 0usize;
    let mut group_header: Option<&Row> = None;

    for (index, row) in table.body.iter().enumerate() {
        let expected = if continuations_left > 0 {
            continuations_left -= 1;
            CONTINUATION_ROW_COLUMNS
        } else if scenarios_left > 0 {
            scenarios_left -= 1;
            SCENARIO_ROW_COLUMNS
        } else {
            if RowShape::of(row).kind() == RowKind::ActionHeader {
                group_header = Some(row);
                (continuations_left, scenarios_left) = match ActionLayout::of(row) {
                    Ok(ActionLayout::SingleRow) => (0, 0),
                    Ok(ActionLayout::SimpleMultiRow { rows }) => (rows.saturating_sub(1), 0),
                    Ok(ActionLayout::ScenarioMultiRow {
                        base_rows,
                        spanned_rows,
                    }) => (base_rows.saturating_sub(1), spanned_rows - base_rows),
                    Err(error) => {
                        // The rowspan rules already name most bad layouts.
                        if rowspan_violation(table, index, row).is_none() {
                            problems.push(problem(layout_reason(error), row));
                        }
                        (0, 0)
                    }
                };
            }
            ACTION_HEADER_COLUMNS
        };

        if row.column_count() != expected && !row.has_colspan() {
            problems.push(problem("unexpected column count", row));
        }
    }

    if continuations_left > 0 || scenarios_left > 0 {
        if let Some(header) = group_header {
            problems.push(problem("unterminated rowspan group", header));
        }
    }

    problems
}

fn layout_reason(error: ParseError) -> String {
    match error {
        ParseError::UnrecoverableShape { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// Colspans are never expected, in any section of the table.
pub fn verify_colspans(table: &Table) -> Vec<ProblemRow> {
    table
        .all_rows()
        .filter(|row| row.has_colspan())
        .map(|row| problem("found colspan", row))
        .collect()
}

/// Resource types and condition keys tables: three plain columns per row.
/// `columns_message` is reported verbatim for rows of the wrong width.
pub fn verify_simple_table(
    table: &Table,
    label: &str,
    columns_message: &str,
) -> Vec<ProblemRow> {
    let mut problems = Vec::new();

    for row in &table.body {
        if row.has_rowspan() {
            problems.push(problem(format!("Rowspan found in {label} table"), row));
        }
        if row.has_colspan() {
            problems.push(problem(format!("Colspan found in {label} table"), row));
        }
        if row.column_count() != SIMPLE_TABLE_COLUMNS {
            problems.push(problem(columns_message, row));
        }
    }

    problems
}

fn problem(description: impl Into<String>, row: &Row) -> ProblemRow {
    ProblemRow {
        problem_description: description.into(),
        html: row.html.clone(),
    }
}
