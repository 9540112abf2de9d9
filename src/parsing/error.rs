use thiserror::Error;

use crate::model::ProblemRow;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The verifier found rows that break what the decoders assume. Carries
    /// every finding for the page, not just the first.
    #[error("{service}: {} structural violation(s), first: {}", .problems.len(), first_description(.problems))]
    StructuralViolation {
        service: String,
        problems: Vec<ProblemRow>,
    },

    /// The decoder met a row grouping it has no rule for.
    #[error("unrecoverable table shape: {reason}: {html}")]
    UnrecoverableShape { reason: String, html: String },
}

impl ParseError {
    pub fn shape(reason: impl Into<String>, html: impl Into<String>) -> Self {
        Self::UnrecoverableShape {
            reason: reason.into(),
            html: html.into(),
        }
    }
}

fn first_description(problems: &[ProblemRow]) -> &str {
    problems
        .first()
        .map(|problem| problem.problem_description.as_str())
        .unwrap_or("none")
}

pub type ParseResult<T> = Result<T, ParseError>;
