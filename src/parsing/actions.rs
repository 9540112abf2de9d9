use tracing::debug;

use super::classify::{ActionLayout, RowKind, RowShape};
use super::consts::{
    ACTION_HEADER_COLUMNS, CONTINUATION_ROW_COLUMNS, PERMISSION_ONLY_SUFFIX, REQUIRED_MARKER,
    SCENARIO_LABEL_PREFIX_LEN, SCENARIO_ROW_COLUMNS,
};
use super::document::{Row, Table};
use super::error::{ParseError, ParseResult};
use crate::model::{Action, ActionResourceType, ResourceTypeRef, Scenario};

// [Action, Description, Access Level] own one or many rows of
// [Resource Type, Condition Keys, Dependent Actions]. Scenario rows may
// follow once the description span ends.

/// Column where the per-resource-type cells start on an action header row.
const HEADER_RESOURCE_OFFSET: usize = 3;

pub fn parse_actions(table: &Table) -> ParseResult<Vec<Action>> {
    let rows = &table.body;
    let mut actions = Vec::new();
    let mut index = 0;

    while index < rows.len() {
        let header = &rows[index];
        if RowShape::of(header).kind() != RowKind::ActionHeader {
            return Err(ParseError::shape(
                format!(
                    "expected a {ACTION_HEADER_COLUMNS}-column action row, found {} columns",
                    header.column_count()
                ),
                &header.html,
            ));
        }

        let layout = ActionLayout::of(header)?;
        let Some(group) = index
            .checked_add(layout.row_count())
            .and_then(|end| rows.get(index..end))
        else {
            return Err(ParseError::shape(
                format!(
                    "rowspan of {} runs past the end of the table",
                    layout.row_count()
                ),
                &header.html,
            ));
        };

        actions.push(decode_group(layout, group)?);
        index += group.len();
    }

    debug!(
        actions = actions.len(),
        rows = rows.len(),
        "decoded actions table"
    );
    Ok(actions)
}

/// Decodes the rows owned by one action header. `group` must start at the
/// header row and hold exactly `layout.row_count()` rows.
pub fn decode_group(layout: ActionLayout, group: &[Row]) -> ParseResult<Action> {
    match layout {
        ActionLayout::SingleRow | ActionLayout::SimpleMultiRow { .. } => decode_rows(group),
        ActionLayout::ScenarioMultiRow { base_rows, .. } => {
            let (base, scenario_rows) = group.split_at(base_rows.min(group.len()));
            let mut action = decode_rows(base)?;
            let scenarios = scenario_rows
                .iter()
                .map(parse_scenario_row)
                .collect::<ParseResult<Vec<Scenario>>>()?;
            if scenarios.is_empty() {
                let html = group.first().map(|row| row.html.as_str()).unwrap_or("");
                return Err(ParseError::shape(
                    "name rowspan exceeds description rowspan but no scenario rows follow",
                    html,
                ));
            }
            action.scenarios = Some(scenarios);
            Ok(action)
        }
    }
}

/// Header row plus its continuation rows. At most one row may leave the
/// resource type empty; its keys and dependent actions belong to the action.
fn decode_rows(rows: &[Row]) -> ParseResult<Action> {
    let Some(header) = rows.first() else {
        return Err(ParseError::shape("empty action row group", ""));
    };

    let (name, is_permission_only) = parse_name(header.text_at(0));
    let mut resource_types = Vec::new();
    let mut unscoped: Option<RowFragment> = None;

    for (position, row) in rows.iter().enumerate() {
        let fragment = if position == 0 {
            RowFragment::read(row, HEADER_RESOURCE_OFFSET)?
        } else if row.column_count() == CONTINUATION_ROW_COLUMNS {
            RowFragment::read(row, 0)?
        } else {
            return Err(ParseError::shape(
                format!(
                    "continuation row has {} columns, expected {CONTINUATION_ROW_COLUMNS}",
                    row.column_count()
                ),
                &row.html,
            ));
        };

        match fragment.resource_type {
            Some(reference) => resource_types.push(ActionResourceType {
                name: reference.name,
                required: reference.required,
                condition_keys: fragment.condition_keys,
                dependent_actions: fragment.dependent_actions,
            }),
            None if unscoped.is_some() => {
                return Err(ParseError::shape(
                    "more than one row without a resource type",
                    &row.html,
                ));
            }
            None => unscoped = Some(fragment),
        }
    }

    let (condition_keys, dependent_actions) = unscoped
        .map(|fragment| (fragment.condition_keys, fragment.dependent_actions))
        .unwrap_or_default();

    Ok(Action {
        name,
        is_permission_only,
        description: header.text_at(1).to_string(),
        access_level: header.text_at(2).to_string(),
        resource_types,
        condition_keys,
        dependent_actions,
        scenarios: None,
    })
}

#[derive(Debug, Clone)]
struct RowFragment {
    resource_type: Option<ResourceTypeRef>,
    condition_keys: Vec<String>,
    dependent_actions: Vec<String>,
}

impl RowFragment {
    fn read(row: &Row, offset: usize) -> ParseResult<Self> {
        if row.links_at(offset).len() > 1 {
            return Err(ParseError::shape(
                "multiple resource types in a single row",
                &row.html,
            ));
        }

        Ok(Self {
            resource_type: parse_resource_type_ref(row.text_at(offset)),
            condition_keys: row.links_at(offset + 1).to_vec(),
            dependent_actions: row.paragraphs_at(offset + 2).to_vec(),
        })
    }
}

pub fn parse_scenario_row(row: &Row) -> ParseResult<Scenario> {
    if row.column_count() != SCENARIO_ROW_COLUMNS {
        return Err(ParseError::shape(
            format!(
                "scenario row has {} columns, expected {SCENARIO_ROW_COLUMNS}",
                row.column_count()
            ),
            &row.html,
        ));
    }
    if !row.text_at(3).is_empty() {
        return Err(ParseError::shape(
            "found condition keys where unexpected in scenario row",
            &row.html,
        ));
    }
    if !row.text_at(4).is_empty() {
        return Err(ParseError::shape(
            "found dependent actions where unexpected in scenario row",
            &row.html,
        ));
    }

    Ok(Scenario {
        name: scenario_name(row.text_at(0)),
        resource_types: row
            .links_at(2)
            .iter()
            .filter_map(|link| parse_resource_type_ref(link))
            .collect(),
    })
}

pub fn scenario_name(label: &str) -> String {
    label
        .trim()
        .chars()
        .skip(SCENARIO_LABEL_PREFIX_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Returns the action name and whether it is flagged permission-only.
pub fn parse_name(text: &str) -> (String, bool) {
    let text = text.trim();
    let (text, is_permission_only) = match text.strip_suffix(PERMISSION_ONLY_SUFFIX) {
        Some(stripped) => (stripped, true),
        None => (text, false),
    };
    let name = text.split_whitespace().next().unwrap_or("").to_string();
    (name, is_permission_only)
}

pub fn parse_resource_type_ref(text: &str) -> Option<ResourceTypeRef> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(match text.strip_suffix(REQUIRED_MARKER) {
        Some(name) => ResourceTypeRef {
            name: name.to_string(),
            required: true,
        },
        None => ResourceTypeRef {
            name: text.to_string(),
            required: false,
        },
    })
}
