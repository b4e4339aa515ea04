use crate::{
    ast::Term,
    error::{Error, Result},
    subst::substitute,
};

/// Step bound used by [`normalize`].
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Contracts `(λx. body) arg` to `body[x := arg]`. `None` if `fun` is not an
/// abstraction.
pub fn beta(fun: &Term, arg: &Term) -> Option<Term> {
    if let Term::Abs(x, body) = fun {
        Some(substitute(body, x, arg))
    } else {
        None
    }
}

/// One normal-order step: contracts the leftmost-outermost redex. `None` when
/// `term` is already in normal form.
pub fn reduce(term: &Term) -> Option<Term> {
    use Term::*;
    match term {
        Var(_) => None,
        Abs(x, body) => reduce(body).map(|body| Abs(x.clone(), body.into())),
        Apply(lhs, rhs) => {
            if let Some(contracted) = beta(lhs, rhs) {
                return Some(contracted);
            }
            if let Some(lhs) = reduce(lhs) {
                return Some(Apply(lhs.into(), rhs.clone()));
            }
            reduce(rhs).map(|rhs| Apply(lhs.clone(), rhs.into()))
        }
    }
}

/// Reduces until a normal form, returning it with the number of steps taken.
pub fn reduce_counted(term: &Term, max_steps: usize) -> Result<(Term, usize)> {
    let mut term = term.clone();
    let mut steps = 0;
    while steps < max_steps {
        match reduce(&term) {
            Some(next) => {
                steps += 1;
                log::trace!("step {steps}: {next}");
                term = next;
            }
            None => return Ok((term, steps)),
        }
    }
    if term.has_redex() {
        log::debug!("Gave up after {max_steps} steps at {term}");
        return Err(Error::StepLimitExceeded {
            max_steps,
            last: term,
        });
    }
    Ok((term, steps))
}

/// Fails with [`Error::StepLimitExceeded`] unless a normal form is reached
/// within `max_steps` beta-reductions.
pub fn reduce_to_normal_form(term: &Term, max_steps: usize) -> Result<Term> {
    reduce_counted(term, max_steps).map(|(term, _)| term)
}

pub fn normalize(term: &Term) -> Result<Term> {
    reduce_to_normal_form(term, DEFAULT_MAX_STEPS)
}

/// The successive terms of normal-order reduction, ending at the normal form.
/// Does not end for terms without one.
#[derive(Clone, Debug)]
pub struct Steps {
    current: Term,
}

impl Iterator for Steps {
    type Item = Term;
    fn next(&mut self) -> Option<Term> {
        let next = reduce(&self.current)?;
        self.current = next.clone();
        Some(next)
    }
}

pub fn steps(term: &Term) -> Steps {
    Steps {
        current: term.clone(),
    }
}
