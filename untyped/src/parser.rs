use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use chumsky::prelude::*;
use thiserror::Error;

use crate::{
    ast::Term,
    error::Result,
    lexer::{lexer, SimpleParser, Token},
    prelude::*,
};

/// A parse failure. `position` is a character offset into the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Syntax error at {position}: {reason}")]
pub struct SyntaxError {
    pub position: usize,
    pub span: Span,
    pub reason: String,
}

impl SyntaxError {
    fn new(span: Span, reason: impl Into<String>) -> Self {
        Self {
            position: span.start,
            span,
            reason: reason.into(),
        }
    }

    fn from_simple(e: ParseError<String>) -> Self {
        use chumsky::error::SimpleReason;
        let reason = match e.reason() {
            SimpleReason::Unexpected => {
                let found = e.found().map(String::as_str).unwrap_or("end of input");
                let mut expected = e
                    .expected()
                    .map(|t| t.as_ref().map(String::as_str).unwrap_or("end of input"))
                    .collect::<Vec<_>>();
                expected.sort_unstable();
                let expected = match (e.label(), expected.is_empty()) {
                    (_, false) => expected.join(", "),
                    (Some(label), true) => label.to_string(),
                    (None, true) => "something else".to_string(),
                };
                format!("Unexpected {found}, expected {expected}")
            }
            SimpleReason::Unclosed { delimiter, .. } => format!("Unclosed delimiter {delimiter}"),
            SimpleReason::Custom(msg) => msg.clone(),
        };
        Self::new(e.span(), reason)
    }

    /// Keeps the leftmost of the errors chumsky reports.
    fn from_errors(es: impl IntoIterator<Item = ParseError<String>>) -> Self {
        es.into_iter()
            .map(Self::from_simple)
            .min_by_key(|e| e.position)
            .unwrap_or_else(|| Self::new(0..0, "Malformed term"))
    }

    /// Builds a diagnostic for `source`, the text that failed to parse.
    pub fn report(&self, source: &str) -> Report {
        // The end of input is reported one past the last character; pull it back
        // onto the source so the label has something to point at.
        let len = source.chars().count();
        let start = self.span.start.min(len.saturating_sub(1));
        let end = self.span.end.clamp(start, len).max(start + usize::from(len > 0));
        Report::build(ReportKind::Error, (), start)
            .with_message(&self.reason)
            .with_label(
                Label::new(start..end)
                    .with_message(format!("{}", self.reason.as_str().fg(Color::Red)))
                    .with_color(Color::Red),
            )
            .finish()
    }

    pub fn write_report(&self, source: &str, w: impl std::io::Write) -> std::io::Result<()> {
        self.report(source).write(Source::from(source), w)
    }
}

fn term_parser() -> impl SimpleParser<Token, Term> {
    recursive(|term: Recursive<_, Term, _>| {
        let name = select! { Token::Identifier(name) => name }.labelled("name");

        // x | ( t )
        let atom = choice((
            name.clone().map(Term::Var),
            term.clone()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        ))
        .labelled("atom");

        // t t t == ((t t) t)
        let application = atom
            .clone()
            .then(atom.repeated())
            .foldl(|lhs, rhs| Term::apply(lhs, rhs));

        // λx y. t == λx. λy. t
        let abstraction = just(Token::Lambda)
            .ignore_then(name.repeated().at_least(1))
            .then_ignore(just(Token::Dot))
            .then(term)
            .map(|(vars, body)| {
                vars.into_iter()
                    .rev()
                    .fold(body, |body, var| Term::abs(var, body))
            })
            .labelled("abstraction");

        choice((abstraction, application))
    })
    .labelled("term")
}

/// Parses `s` as a single term. `\` may be written for `λ`.
pub fn parse(s: &str) -> Result<Term> {
    let len = s.chars().count();
    let eoi = len..len + 1;
    let tokens = lexer().parse(s).map_err(|es| {
        SyntaxError::from_errors(es.into_iter().map(|e| e.map(|c| c.to_string())))
    })?;
    if tokens.is_empty() {
        return Err(SyntaxError::new(0..len, "Empty term").into());
    }
    let term = term_parser()
        .then_ignore(end())
        .parse(chumsky::Stream::from_iter(
            eoi,
            tokens.into_iter().map(<(Token, Span)>::from),
        ))
        .map_err(|es| SyntaxError::from_errors(es.into_iter().map(|e| e.map(|t| t.to_string()))))?;
    Ok(term)
}
