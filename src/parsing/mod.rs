//! Decoding of service authorization pages into [`ServiceDefinition`]s.

mod actions;
mod classify;
mod condition_keys;
mod consts;
mod document;
mod error;
mod resource_types;
mod verify;

use tracing::debug;

use crate::model::ServiceDefinition;

use actions::parse_actions;
use condition_keys::parse_condition_keys;
use error::ParseResult;
use resource_types::parse_resource_types;
use verify::ensure_verified;

pub use document::ServicePage;
pub use verify::verify_page;

/// Verifies the page and, only when it is clean, decodes all three tables.
/// Returns either a complete definition or an error, never a partial one.
pub fn parse_service(service: &str, page: &ServicePage) -> ParseResult<ServiceDefinition> {
    ensure_verified(service, page)?;
    decode_service(service, page)
}

fn decode_service(service: &str, page: &ServicePage) -> ParseResult<ServiceDefinition> {
    let actions = match page.actions_table() {
        Some(table) => parse_actions(&table)?,
        None => Vec::new(),
    };
    let resource_types = page
        .resource_types_table()
        .map(|table| parse_resource_types(&table));
    let condition_keys = page
        .condition_keys_table()
        .map(|table| parse_condition_keys(&table));

    let definition = ServiceDefinition {
        name: service.to_string(),
        prefix: page.service_prefix(),
        actions,
        resource_types,
        condition_keys,
    };
    debug!(
        service = %definition.name,
        prefix = %definition.prefix,
        actions = definition.actions.len(),
        "assembled service definition"
    );
    Ok(definition)
}
