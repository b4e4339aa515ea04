//! An untyped lambda-calculus engine: parsing, printing, capture-avoiding
//! substitution and normal-order reduction.
//!
//! ```text
//! text --parse--> Term --reduce_to_normal_form--> Term --to_text--> text
//! ```

use std::collections::BTreeSet;

pub mod ast;
mod error;
pub mod eval;
mod lexer;
pub mod parser;
mod prelude;
pub mod subst;

pub use ast::{to_text, Symbol, Term, TermRef};
pub use error::{Error, Result};
pub use eval::{
    beta, normalize, reduce_counted, reduce_to_normal_form, steps, Steps, DEFAULT_MAX_STEPS,
};
pub use parser::{parse, SyntaxError};
pub use prelude::Span;
pub use subst::{fresh_symbol, substitute};

pub fn free_variables(term: &Term) -> BTreeSet<Symbol> {
    term.free_variables()
}

/// A single normal-order step; `None` once `term` is in normal form.
pub fn step_reduce(term: &Term) -> Option<Term> {
    eval::reduce(term)
}
