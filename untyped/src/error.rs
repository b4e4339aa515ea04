use thiserror::Error;

use crate::{ast::Term, parser::SyntaxError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid symbol `{name}`: {reason}")]
    InvalidSymbol { name: String, reason: &'static str },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The bound ran out before a normal form was reached. `last` is the term
    /// obtained after `max_steps` reductions, from which reduction may resume.
    #[error("No normal form within {max_steps} steps")]
    StepLimitExceeded { max_steps: usize, last: Term },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
