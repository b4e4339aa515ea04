pub type Span = std::ops::Range<usize>;

#[derive(derive_more::AsRef, Clone, derive_more::Display, Debug)]
#[display(bound = "T: std::fmt::Display")]
#[display(fmt = "{value}")]
pub struct Spanned<T> {
    pub span: Span,
    #[as_ref]
    pub value: T,
}
impl<T> From<Spanned<T>> for (T, Span) {
    fn from(Spanned { span, value }: Spanned<T>) -> Self {
        (value, span)
    }
}

pub type ParseError<I = String> = chumsky::error::Simple<I, Span>;
