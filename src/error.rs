use thiserror::Error;

use crate::hitman::coords::Coord;

/// Domain failure kinds. These travel inside `anyhow::Error` and can be
/// recovered by downcast where a caller wants to react to one specifically.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HitmanError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation requires a started phase")]
    StateUninitialized,

    #[error("no path between {from} and {to}")]
    Unreachable { from: Coord, to: Coord },

    #[error("knowledge base became contradictory")]
    LogicalContradiction,

    #[error("board submission rejected by the referee")]
    SubmissionRejected,
}
