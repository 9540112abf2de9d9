//! Text fingerprints used to find the tables on a service authorization page.
//! These follow the wording of the published documentation and are the first
//! thing to revisit when a page stops parsing.

pub const ACTIONS_HEADER: &str = "Actions";

pub const RESOURCE_TYPES_HEADER: &str = "Resource types";
pub const RESOURCE_TYPES_ARN_HEADER: &str = "ARN";
pub const NO_RESOURCE_TYPES_SENTENCE: &str = "does not support specifying a resource ARN";

pub const CONDITION_KEYS_HEADER: &str = "Condition keys";
pub const CONDITION_KEYS_DESCRIPTION_HEADER: &str = "Description";
pub const CONDITION_KEYS_TYPE_HEADER: &str = "Type";
pub const NO_CONDITION_KEYS_SENTENCE: &str =
    "has no service-specific context keys that can be used";

pub const SERVICE_PREFIX_SENTENCE: &str = "service prefix:";

pub const PERMISSION_ONLY_SUFFIX: &str = "[permission only]";
pub const REQUIRED_MARKER: char = '*';

/// Scenario labels read "SCENARIO: <name>"; the first ten characters are
/// dropped before trimming.
pub const SCENARIO_LABEL_PREFIX_LEN: usize = 10;

pub const ACTION_HEADER_COLUMNS: usize = 6;
pub const SCENARIO_ROW_COLUMNS: usize = 5;
pub const CONTINUATION_ROW_COLUMNS: usize = 3;
pub const SIMPLE_TABLE_COLUMNS: usize = 3;

/// Upper bounds browsers apply to `rowspan` and `colspan`.
pub const MAX_ROWSPAN: usize = 65534;
pub const MAX_COLSPAN: usize = 1000;
