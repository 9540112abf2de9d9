use tracing::debug;

use super::document::{Row, Table};
use crate::model::ConditionKey;

pub fn parse_condition_keys(table: &Table) -> Vec<ConditionKey> {
    let condition_keys = table
        .body
        .iter()
        .map(parse_condition_key_row)
        .collect::<Vec<ConditionKey>>();
    debug!(condition_keys = condition_keys.len(), "decoded condition keys table");
    condition_keys
}

fn parse_condition_key_row(row: &Row) -> ConditionKey {
    ConditionKey {
        key: row.text_at(0).to_string(),
        description: row.text_at(1).to_string(),
        value_type: row.text_at(2).to_string(),
    }
}
