use tracing::debug;

use super::document::{Row, Table};
use crate::model::ResourceType;

pub fn parse_resource_types(table: &Table) -> Vec<ResourceType> {
    let resource_types = table
        .body
        .iter()
        .map(parse_resource_type_row)
        .collect::<Vec<ResourceType>>();
    debug!(resource_types = resource_types.len(), "decoded resource types table");
    resource_types
}

/// `[resource type, ARN, condition keys]`. An empty keys cell is recorded as
/// absent rather than as an empty list.
fn parse_resource_type_row(row: &Row) -> ResourceType {
    let condition_keys = if row.text_at(2).is_empty() {
        None
    } else {
        Some(row.links_at(2).to_vec())
    };

    ResourceType {
        key: row.text_at(0).to_string(),
        arn: row.text_at(1).to_string(),
        condition_keys,
    }
}
