use std::{collections::BTreeSet, sync::Arc};

use crate::ast::{Symbol, Term, TermRef};

/// Picks a variant of `base` (`x` -> `x1`, `x2`, ...) that is neither `base`
/// itself nor in `avoid`. A numeric suffix already on `base` is replaced.
pub fn fresh_symbol(base: &Symbol, avoid: &BTreeSet<Symbol>) -> Symbol {
    let stem = base
        .as_str()
        .trim_end_matches(|c: char| c.is_ascii_digit());
    let stem = if stem.is_empty() { base.as_str() } else { stem };
    let mut suffix = 1usize;
    loop {
        let candidate = Symbol::new_unchecked(format!("{stem}{suffix}"));
        if &candidate != base && !avoid.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

struct Substitution<'a> {
    name: &'a Symbol,
    replacement: TermRef,
    replacement_free: BTreeSet<Symbol>,
}

impl Substitution<'_> {
    /// Subterms without a free `name` come back as the same `Arc`.
    fn apply_ref(&self, term: &TermRef) -> TermRef {
        if !term.has_free(self.name) {
            return term.clone();
        }
        match term.as_ref() {
            Term::Var(_) => self.replacement.clone(),
            _ => self.apply(term).into(),
        }
    }

    fn apply(&self, term: &Term) -> Term {
        match term {
            Term::Var(x) if x == self.name => self.replacement.as_ref().clone(),
            Term::Var(_) => term.clone(),
            Term::Apply(lhs, rhs) => Term::Apply(self.apply_ref(lhs), self.apply_ref(rhs)),
            // `name` is shadowed below this binder.
            Term::Abs(x, _) if x == self.name => term.clone(),
            Term::Abs(x, body) if !self.replacement_free.contains(x) => {
                Term::Abs(x.clone(), self.apply_ref(body))
            }
            Term::Abs(x, body) => {
                let mut avoid = body.free_variables();
                avoid.extend(self.replacement_free.iter().cloned());
                avoid.insert(self.name.clone());
                let fresh = fresh_symbol(x, &avoid);
                log::debug!("Renaming binder {x} to {fresh}, {x} is free in {}", self.replacement);
                let renamed: TermRef = substitute(body, x, &Term::Var(fresh.clone())).into();
                Term::Abs(fresh, self.apply_ref(&renamed))
            }
        }
    }
}

/// Replaces every free occurrence of `name` in `term` by `replacement`,
/// renaming binders of `term` that would capture a free variable of
/// `replacement`. When `name` is not free in `term` the result equals `term`.
pub fn substitute(term: &Term, name: &Symbol, replacement: &Term) -> Term {
    if !term.has_free(name) {
        return term.clone();
    }
    Substitution {
        name,
        replacement: Arc::new(replacement.clone()),
        replacement_free: replacement.free_variables(),
    }
    .apply(term)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::test::{apply, lambda, var};

    fn sym(name: &str) -> Symbol {
        Symbol::new(name).unwrap()
    }

    #[test]
    fn test_fresh_symbol() {
        let avoid = |names: &[&str]| names.iter().map(|n| sym(n)).collect::<BTreeSet<_>>();
        assert_eq!(fresh_symbol(&sym("x"), &avoid(&[])), sym("x1"));
        assert_eq!(fresh_symbol(&sym("x"), &avoid(&["x1", "x2"])), sym("x3"));
        assert_eq!(fresh_symbol(&sym("x1"), &avoid(&[])), sym("x2"));
        assert_eq!(fresh_symbol(&sym("x1"), &avoid(&["x2"])), sym("x3"));
        assert_eq!(fresh_symbol(&sym("42"), &avoid(&[])), sym("421"));
    }

    #[test]
    fn test_replace_variable() {
        assert_eq!(
            substitute(&var!("x"), &sym("x"), &lambda!("z", var!("z"))),
            lambda!("z", var!("z"))
        );
        assert_eq!(
            substitute(&var!("y"), &sym("x"), &var!("z")),
            var!("y")
        );
        assert_eq!(
            substitute(
                &apply!(var!("x"), apply!(var!("y"), var!("x"))),
                &sym("x"),
                &var!("a")
            ),
            apply!(var!("a"), apply!(var!("y"), var!("a")))
        );
    }

    #[test]
    fn test_shadowed() {
        let t = lambda!("x", apply!(var!("x"), var!("y")));
        assert_eq!(substitute(&t, &sym("x"), &var!("z")), t);
        let t = apply!(var!("x"), lambda!("x", var!("x")));
        assert_eq!(
            substitute(&t, &sym("x"), &var!("z")),
            apply!(var!("z"), lambda!("x", var!("x")))
        );
    }

    #[test]
    fn test_capture_avoiding() {
        // λy.x [x := y] must not become λy.y
        let result = substitute(&lambda!("y", var!("x")), &sym("x"), &var!("y"));
        assert_ne!(result, lambda!("y", var!("y")));
        assert_eq!(result, lambda!("y1", var!("y")));
        assert!(result.alpha_eq(&lambda!("w", var!("y"))));
        assert_eq!(result.free_variables(), BTreeSet::from([sym("y")]));
    }

    #[test]
    fn test_fresh_binder_avoids_body() {
        // y1 is already free in the body, so the binder becomes y2
        let result = substitute(
            &lambda!("y", apply!(apply!(var!("x"), var!("y")), var!("y1"))),
            &sym("x"),
            &var!("y"),
        );
        assert_eq!(
            result,
            lambda!("y2", apply!(apply!(var!("y"), var!("y2")), var!("y1")))
        );
    }

    #[test]
    fn test_fresh_binder_avoids_name() {
        let result = substitute(&lambda!("y", var!("y1")), &sym("y1"), &var!("y"));
        assert_eq!(result, lambda!("y2", var!("y")));
    }

    #[test]
    fn test_nested_binders_renamed() {
        // λy.λy1.(x y y1) [x := (y y1)]
        let t = lambda!(
            "y",
            lambda!(
                "y1",
                apply!(apply!(var!("x"), var!("y")), var!("y1"))
            )
        );
        let replacement = apply!(var!("y"), var!("y1"));
        let result = substitute(&t, &sym("x"), &replacement);
        assert!(result.alpha_eq(&lambda!(
            "a",
            lambda!("b", apply!(apply!(replacement.clone(), var!("a")), var!("b")))
        )));
        assert_eq!(result.free_variables(), replacement.free_variables());
    }

    #[test]
    fn test_not_free_is_noop() {
        let t = lambda!("y", apply!(var!("z"), var!("y")));
        assert_eq!(substitute(&t, &sym("x"), &var!("y")), t);
        assert_eq!(substitute(&t, &sym("y"), &var!("q")), t);
    }

    #[test]
    fn test_untouched_subterms_are_shared() {
        let untouched: TermRef = lambda!("a", var!("a")).into();
        let t = Term::Apply(untouched.clone(), Arc::new(var!("x")));
        match substitute(&t, &sym("x"), &var!("y")) {
            Term::Apply(lhs, rhs) => {
                assert!(Arc::ptr_eq(&lhs, &untouched));
                assert_eq!(*rhs, var!("y"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
