
//! Parsed template representation
//!
//! A template is stored as a flat list of [`Segment`]s. The list is normalized on construction:
//! no empty literals, no empty placeholder names, and no two literals next to each other.

use std::{
    fmt::{Display, Write},
    slice,
    sync::Arc,
};

use crate::parser::Delimiters;

/// One unit of a parsed template
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text copied to the output verbatim
    Literal(String),
    /// A named slot filled in at expansion time
    Placeholder(String),
}

impl Segment {
    pub fn literal(text: impl Into<String>) -> Self {
        Segment::Literal(text.into())
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Segment::Placeholder(name.into())
    }

    /// Returns the text of a literal segment
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(text) => Some(text),
            Segment::Placeholder(_) => None,
        }
    }

    /// Returns the name of a placeholder segment
    pub fn as_placeholder(&self) -> Option<&str> {
        match self {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }
}

/// Accumulates segments while keeping the list normalized
#[derive(Default)]
pub(crate) struct SegmentsBuilder {
    segments: Vec<Segment>,
}

impl SegmentsBuilder {
    pub(crate) fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Literal(last)) => last.push_str(text),
            _ => self.segments.push(Segment::Literal(text.to_string())),
        }
    }

    pub(crate) fn push_placeholder(&mut self, name: &str) {
        if !name.is_empty() {
            self.segments.push(Segment::Placeholder(name.to_string()));
        }
    }

    pub(crate) fn push(&mut self, segment: &Segment) {
        match segment {
            Segment::Literal(text) => self.push_literal(text),
            Segment::Placeholder(name) => self.push_placeholder(name),
        }
    }

    pub(crate) fn build(self, delimiters: Delimiters) -> ParsedTemplate {
        ParsedTemplate {
            segments: self.segments.into(),
            delimiters,
        }
    }
}

/// An immutable, normalized sequence of segments
///
/// Cloning is cheap: the segments are shared behind an `Arc`, so a parsed template can be handed
/// to several threads or cached next to an expansion plan without copying the text.
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    segments: Arc<[Segment]>,
    delimiters: Delimiters,
}

impl ParsedTemplate {
    /// Builds a template from hand-made segments
    ///
    /// Empty segments are dropped and adjacent literals merged, so the result upholds the same
    /// invariants as a parsed template.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let mut builder = SegmentsBuilder::default();
        for segment in segments {
            builder.push(&segment);
        }
        builder.build(Delimiters::default())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments.to_vec()
    }

    /// The delimiters used when the template is displayed
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Placeholder names in order of occurrence, repeats included
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::as_placeholder)
    }

    pub fn iter(&self) -> slice::Iter<'_, Segment> {
        self.segments.iter()
    }
}

impl Default for ParsedTemplate {
    fn default() -> Self {
        SegmentsBuilder::default().build(Delimiters::default())
    }
}

impl PartialEq for ParsedTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for ParsedTemplate {}

impl<'a> IntoIterator for &'a ParsedTemplate {
    type Item = &'a Segment;
    type IntoIter = slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Writes the template back out in source form
///
/// Literals built by hand through [`ParsedTemplate::from_segments`] may contain delimiter
/// characters; those are written as-is and will not survive a second parse unchanged.
impl Display for ParsedTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in self.segments.iter() {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Placeholder(name) => {
                    f.write_char(self.delimiters.open)?;
                    f.write_str(name)?;
                    f.write_char(self.delimiters.close)?;
                }
            }
        }
        Ok(())
    }
}
