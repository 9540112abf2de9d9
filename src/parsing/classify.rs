use super::consts::{ACTION_HEADER_COLUMNS, SCENARIO_ROW_COLUMNS};
use super::document::Row;
use super::error::{ParseError, ParseResult};

/// What the decoder and the verifier both need to know about a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowShape {
    pub columns: usize,
    /// Declared rowspans of the name, description and access-level columns.
    pub lead_spans: [Option<usize>; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    ActionHeader,
    ScenarioDetail,
    Other,
}

impl RowShape {
    pub fn of(row: &Row) -> Self {
        Self {
            columns: row.column_count(),
            lead_spans: [row.rowspan_at(0), row.rowspan_at(1), row.rowspan_at(2)],
        }
    }

    pub fn kind(&self) -> RowKind {
        match self.columns {
            ACTION_HEADER_COLUMNS => RowKind::ActionHeader,
            SCENARIO_ROW_COLUMNS => RowKind::ScenarioDetail,
            _ => RowKind::Other,
        }
    }
}

/// How many physical rows an action header row owns, and how they split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLayout {
    SingleRow,
    SimpleMultiRow { rows: usize },
    ScenarioMultiRow { base_rows: usize, spanned_rows: usize },
}

impl ActionLayout {
    pub fn of(row: &Row) -> ParseResult<Self> {
        let shape = RowShape::of(row);
        let Some(name_span) = shape.lead_spans[0] else {
            return Ok(Self::SingleRow);
        };
        let Some(description_span) = shape.lead_spans[1] else {
            return Err(ParseError::shape(
                "name column declares a rowspan but description does not",
                &row.html,
            ));
        };
        if name_span == 0 || description_span == 0 {
            return Err(ParseError::shape("zero rowspan in lead columns", &row.html));
        }

        if name_span == description_span {
            Ok(Self::SimpleMultiRow { rows: name_span })
        } else if name_span > description_span {
            Ok(Self::ScenarioMultiRow {
                base_rows: description_span,
                spanned_rows: name_span,
            })
        } else {
            Err(ParseError::shape(
                "name rowspan is smaller than description rowspan",
                &row.html,
            ))
        }
    }

    /// Number of physical rows consumed, header row included.
    pub fn row_count(&self) -> usize {
        match *self {
            Self::SingleRow => 1,
            Self::SimpleMultiRow { rows } => rows,
            Self::ScenarioMultiRow { spanned_rows, .. } => spanned_rows,
        }
    }
}
