use std::{collections::BTreeSet, fmt, sync::Arc};

use crate::error::{Error, Result};

pub type TermRef = Arc<Term>;

/// Characters that may never appear in a variable name.
pub const RESERVED: [char; 5] = ['.', '(', ')', 'λ', '\\'];

pub fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !RESERVED.contains(&c)
}

/// A variable name: non-empty, free of whitespace and of [`RESERVED`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, derive_more::Display, Debug)]
#[display(fmt = "{_0}")]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidSymbol {
                name: name.to_string(),
                reason: "a name must not be empty",
            });
        }
        if !name.chars().all(is_symbol_char) {
            return Err(Error::InvalidSymbol {
                name: name.to_string(),
                reason: "a name must not contain whitespace, `.`, `(`, `)`, `λ` or `\\`",
            });
        }
        Ok(Self(name.into()))
    }

    /// Callers guarantee `name` is already valid (the lexer and the fresh-name
    /// allocator only produce symbol characters).
    pub(crate) fn new_unchecked(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        debug_assert!(!name.is_empty() && name.chars().all(is_symbol_char));
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Symbol {
    type Error = Error;
    fn try_from(name: &str) -> Result<Self> {
        Self::new(name)
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub enum Term {
    /// `x`
    Var(Symbol),
    /// `λx. t`
    Abs(Symbol, TermRef),
    /// `t t`
    Apply(TermRef, TermRef),
}

impl Term {
    pub fn var(name: &str) -> Result<Self> {
        Ok(Term::Var(Symbol::new(name)?))
    }

    pub fn abs(var: Symbol, body: impl Into<TermRef>) -> Self {
        Term::Abs(var, body.into())
    }

    pub fn apply(lhs: impl Into<TermRef>, rhs: impl Into<TermRef>) -> Self {
        Term::Apply(lhs.into(), rhs.into())
    }

    pub fn free_variables(&self) -> BTreeSet<Symbol> {
        match self {
            Term::Var(x) => BTreeSet::from([x.clone()]),
            Term::Abs(x, body) => {
                let mut ret = body.free_variables();
                ret.remove(x);
                ret
            }
            Term::Apply(lhs, rhs) => {
                let mut ret = lhs.free_variables();
                ret.extend(rhs.free_variables());
                ret
            }
        }
    }

    /// Same as `self.free_variables().contains(name)` without building the set.
    pub fn has_free(&self, name: &Symbol) -> bool {
        match self {
            Term::Var(x) => x == name,
            Term::Abs(x, body) => x != name && body.has_free(name),
            Term::Apply(lhs, rhs) => lhs.has_free(name) || rhs.has_free(name),
        }
    }

    /// Whether some subterm has the shape `(λx. t) u`.
    pub fn has_redex(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Abs(_, body) => body.has_redex(),
            Term::Apply(lhs, rhs) => {
                matches!(lhs.as_ref(), Term::Abs(_, _)) || lhs.has_redex() || rhs.has_redex()
            }
        }
    }

    /// Equality up to renaming of bound variables.
    ///
    /// Bound occurrences are compared by the distance to their binder, free
    /// occurrences by name.
    pub fn alpha_eq(&self, other: &Term) -> bool {
        fn alpha_eq_rec<'a>(
            lhs: &'a Term,
            rhs: &'a Term,
            lhs_table: &mut Vec<&'a Symbol>,
            rhs_table: &mut Vec<&'a Symbol>,
        ) -> bool {
            match (lhs, rhs) {
                (Term::Var(x), Term::Var(y)) => {
                    let i = lhs_table.iter().rev().position(|v| *v == x);
                    let j = rhs_table.iter().rev().position(|v| *v == y);
                    match (i, j) {
                        (None, None) => x == y,
                        (i, j) => i == j,
                    }
                }
                (Term::Abs(x, lhs_body), Term::Abs(y, rhs_body)) => {
                    lhs_table.push(x);
                    rhs_table.push(y);
                    let ret = alpha_eq_rec(lhs_body, rhs_body, lhs_table, rhs_table);
                    assert_eq!(Some(x), lhs_table.pop());
                    assert_eq!(Some(y), rhs_table.pop());
                    ret
                }
                (Term::Apply(lhs_fun, lhs_arg), Term::Apply(rhs_fun, rhs_arg)) => {
                    alpha_eq_rec(lhs_fun, rhs_fun, lhs_table, rhs_table)
                        && alpha_eq_rec(lhs_arg, rhs_arg, lhs_table, rhs_table)
                }
                _ => false,
            }
        }
        alpha_eq_rec(self, other, &mut vec![], &mut vec![])
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // An abstraction extends as far right as possible, so it needs parentheses
        // on either side of an application.
        fn fmt_operand(term: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if let Term::Abs(_, _) = term {
                f.write_str("(")?;
                fmt_rec(term, f)?;
                f.write_str(")")
            } else {
                fmt_rec(term, f)
            }
        }
        fn fmt_rec(term: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match term {
                Term::Var(x) => f.write_str(x.as_str()),
                // An application body prints its own parentheses: `λx.(M N)`.
                Term::Abs(x, body) => {
                    f.write_str("λ")?;
                    f.write_str(x.as_str())?;
                    f.write_str(".")?;
                    fmt_rec(body, f)
                }
                Term::Apply(lhs, rhs) => {
                    f.write_str("(")?;
                    fmt_operand(lhs, f)?;
                    f.write_str(" ")?;
                    fmt_operand(rhs, f)?;
                    f.write_str(")")
                }
            }
        }
        fmt_rec(self, f)
    }
}

pub fn to_text(term: &Term) -> String {
    term.to_string()
}
