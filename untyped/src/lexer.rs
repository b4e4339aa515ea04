use chumsky::prelude::*;

use crate::{
    ast::{is_symbol_char, Symbol},
    prelude::*,
};

#[derive(Clone, PartialEq, Eq, Hash, derive_more::Display, Debug)]
pub enum Token {
    #[display(fmt = "(")]
    LParen,
    #[display(fmt = ")")]
    RParen,
    #[display(fmt = "λ")]
    Lambda,
    #[display(fmt = ".")]
    Dot,
    #[display(fmt = "{_0}")]
    Identifier(Symbol),
}

pub trait SimpleParser<I: Clone + std::hash::Hash + Eq, O>:
    Parser<I, O, Error = ParseError<I>> + Clone
{
}
impl<I: Clone + std::hash::Hash + Eq, O, T> SimpleParser<I, O> for T where
    T: Parser<I, O, Error = ParseError<I>> + Clone
{
}

fn identifier() -> impl SimpleParser<char, Token> {
    filter(|c: &char| is_symbol_char(*c))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(|name| Token::Identifier(Symbol::new_unchecked(name)))
        .labelled("name")
}

/// `\` is accepted as an ASCII spelling of `λ`.
pub fn lexer() -> impl SimpleParser<char, Vec<Spanned<Token>>> {
    let token = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('.').to(Token::Dot),
        one_of("λ\\").to(Token::Lambda),
        identifier(),
    ));
    // Leading whitespace is consumed up front so blank input lexes to no tokens.
    text::whitespace()
        .ignore_then(
            token
                .map_with_span(|value, span| Spanned { span, value })
                .padded()
                .repeated(),
        )
        .then_ignore(end())
}
