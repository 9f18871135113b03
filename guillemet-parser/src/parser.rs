
//! Template text splitting
//!
//! The source is cut at every delimiter character into runs that alternate between literal
//! text and placeholder names, starting with a literal run:
//!
//! ```text
//! "Hello «Name»!"  ->  "Hello " | "Name" | "!"
//!                      literal    name     literal
//! ```
//!
//! Either delimiter ends the current run; which one was seen does not matter. A name run only
//! counts as a placeholder when another delimiter closes it, so text after an unterminated
//! delimiter stays literal.

use std::{convert::Infallible, str::FromStr};

use crate::segment::{ParsedTemplate, SegmentsBuilder};

/// The pair of characters marking the start and end of a placeholder name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

impl Delimiters {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    #[inline]
    pub fn is_delimiter(&self, c: char) -> bool {
        c == self.open || c == self.close
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new('«', '»')
    }
}

/// Parses template text using the default `«` and `»` delimiters
pub fn parse(src: &str) -> ParsedTemplate {
    parse_with(src, Delimiters::default())
}

/// Parses template text using custom delimiters
///
/// Never fails: an empty name (`«»`) is dropped, and the fragment after an unterminated
/// delimiter is kept as literal text.
pub fn parse_with(src: &str, delimiters: Delimiters) -> ParsedTemplate {
    let mut builder = SegmentsBuilder::default();
    let mut runs = src.split(|c: char| delimiters.is_delimiter(c)).peekable();
    while let Some(literal) = runs.next() {
        builder.push_literal(literal);
        match runs.next() {
            Some(name) if runs.peek().is_some() => builder.push_placeholder(name),
            Some(tail) => builder.push_literal(tail),
            None => break,
        }
    }
    builder.build(delimiters)
}

impl FromStr for ParsedTemplate {
    type Err = Infallible;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(parse(src))
    }
}

impl From<&str> for ParsedTemplate {
    fn from(src: &str) -> Self {
        parse(src)
    }
}

impl From<String> for ParsedTemplate {
    fn from(src: String) -> Self {
        parse(&src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Segment;

    fn segments(src: &str) -> Vec<Segment> {
        parse(src).into_segments()
    }

    #[test]
    fn empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(segments("just text"), vec![Segment::literal("just text")]);
    }

    #[test]
    fn it_works() {
        assert_eq!(
            segments("Hello «Name»!"),
            vec![
                Segment::literal("Hello "),
                Segment::placeholder("Name"),
                Segment::literal("!"),
            ]
        );
    }

    #[test]
    fn leading_placeholder() {
        assert_eq!(
            segments("«Greeting» «Name»!"),
            vec![
                Segment::placeholder("Greeting"),
                Segment::literal(" "),
                Segment::placeholder("Name"),
                Segment::literal("!"),
            ]
        );
    }

    #[test]
    fn adjacent_placeholders() {
        assert_eq!(
            segments("«BIG»«little»"),
            vec![Segment::placeholder("BIG"), Segment::placeholder("little")]
        );
    }

    #[test]
    fn names_are_taken_literally() {
        assert_eq!(
            segments("« first name »"),
            vec![Segment::placeholder(" first name ")]
        );
    }

    #[test]
    fn empty_name_collapses() {
        assert!(segments("«»").is_empty());
        assert_eq!(segments("a«»b"), vec![Segment::literal("ab")]);
    }

    #[test]
    fn unterminated_is_literal() {
        assert_eq!(segments("Hello «Name"), vec![Segment::literal("Hello Name")]);
        assert_eq!(
            segments("«a» and «b"),
            vec![Segment::placeholder("a"), Segment::literal(" and b")]
        );
    }

    #[test]
    fn either_delimiter_ends_a_run() {
        assert_eq!(
            segments("x»y«z"),
            vec![Segment::literal("x"), Segment::placeholder("y"), Segment::literal("z")]
        );
        assert_eq!(
            segments("a«b«c»d"),
            vec![
                Segment::literal("a"),
                Segment::placeholder("b"),
                Segment::literal("cd"),
            ]
        );
    }

    #[test]
    fn custom_delimiters() {
        let template = parse_with("Hi {who}, «kept»", Delimiters::new('{', '}'));
        assert_eq!(
            template.segments(),
            &[
                Segment::literal("Hi "),
                Segment::placeholder("who"),
                Segment::literal(", «kept»"),
            ]
        );
        assert_eq!(template.to_string(), "Hi {who}, «kept»");
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(
            segments("¡Hola «nombre»! 👋"),
            vec![
                Segment::literal("¡Hola "),
                Segment::placeholder("nombre"),
                Segment::literal("! 👋"),
            ]
        );
    }

    #[test]
    fn from_str() {
        let template: ParsedTemplate = "«x»".parse().unwrap();
        assert_eq!(template, ParsedTemplate::from("«x»"));
        assert_eq!(template, ParsedTemplate::from(String::from("«x»")));
    }
}
