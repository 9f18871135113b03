//! Straightforward expansion
//!
//! Walks the segments once, appending literals and resolved values to a growing buffer. Use an
//! [`ExpansionPlan`](crate::ExpansionPlan) when the same template is expanded repeatedly.

use std::borrow::Cow;

use guillemet_parser::{ParsedTemplate, Segment};
use tracing::trace;

use crate::{
    error::{ExpandError, Result},
    resolver::ParameterResolver,
};

/// Expands `template`, resolving every placeholder occurrence through `resolver`
///
/// Stops at the first placeholder the resolver has no value for; nothing is returned for the
/// segments already processed.
pub fn expand<R>(template: &ParsedTemplate, resolver: &R) -> Result<String>
where
    R: ParameterResolver + ?Sized,
{
    trace!(segments = template.len(), "expanding template");
    let mut out = String::new();
    for segment in template {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Placeholder(name) => out.push_str(&resolve(resolver, name)?),
        }
    }
    Ok(out)
}

/// Resolves one placeholder occurrence, turning a missing value into an error
pub(crate) fn resolve<'r, R>(resolver: &'r R, name: &str) -> Result<Cow<'r, str>>
where
    R: ParameterResolver + ?Sized,
{
    resolver.resolve(name).ok_or_else(|| ExpandError::MissingParameter {
        name: name.to_string(),
        resolver: resolver.describe(),
    })
}
