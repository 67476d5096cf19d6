use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid weight matrix: {reason}")]
    InvalidInput { reason: String },
    #[error("no feasible perfect matching: search from left vertex {row} failed")]
    Infeasible { row: usize },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }
}
