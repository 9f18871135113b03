//! Precomputed expansion plans
//!
//! An [`ExpansionPlan`] is built once from a parsed template and records everything about the
//! output size that does not depend on the resolver: the total length of the literal text and how
//! often each distinct placeholder occurs. Expanding through the plan presizes the output buffer
//! to exactly
//!
//! ```text
//! literal_len + Σ occurrences(name) × len(value(name))
//! ```
//!
//! so the buffer never grows while segments are appended. Each occurrence is resolved on its
//! own and the size is summed from the values actually returned, so it stays exact even when a
//! resolver answers differently for the same name. Output, resolver calls and failures are the
//! same as for [`expand`](crate::expand).
//!
//! # Examples
//!
//! Compile once, expand many:
//! ```rust
//! use guillemet::ExpansionPlan;
//!
//! let plan = ExpansionPlan::compile("«Greeting» «Name»!");
//! for name in ["Ben", "Ann"] {
//!     let params = [("Greeting", "Hello"), ("Name", name)];
//!     println!("{}", plan.expand(&params).unwrap());
//! }
//! ```

use std::{borrow::Cow, collections::HashMap, fmt::Display};

use guillemet_parser::{Delimiters, ParsedTemplate, Segment, parse, parse_with};
use tracing::{debug, trace};

use crate::{
    error::{Result, SourceUnavailable},
    expander::resolve,
    loader::{Loader, Source},
    resolver::ParameterResolver,
};

/// A parsed template together with its precomputed size information
#[derive(Debug, Clone)]
pub struct ExpansionPlan {
    template: ParsedTemplate,
    literal_len: usize,
    /// Distinct placeholder names and their occurrence counts, in order of first appearance
    distinct: Vec<(String, usize)>,
    /// Index into `distinct` for every placeholder occurrence
    slots: Vec<usize>,
}

/// Analyzes `template` for repeated expansion
pub fn build_plan(template: ParsedTemplate) -> ExpansionPlan {
    let mut literal_len = 0;
    let mut distinct: Vec<(String, usize)> = Vec::new();
    let mut slots = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for segment in &template {
        match segment {
            Segment::Literal(text) => literal_len += text.len(),
            Segment::Placeholder(name) => {
                let slot = *index.entry(name.as_str()).or_insert_with(|| {
                    distinct.push((name.clone(), 0));
                    distinct.len() - 1
                });
                distinct[slot].1 += 1;
                slots.push(slot);
            }
        }
    }
    debug!(
        literal_len,
        placeholders = slots.len(),
        distinct = distinct.len(),
        "built expansion plan"
    );
    ExpansionPlan {
        template,
        literal_len,
        distinct,
        slots,
    }
}

impl ExpansionPlan {
    pub fn new(template: ParsedTemplate) -> Self {
        build_plan(template)
    }

    /// Parses `src` with the default delimiters and builds its plan
    pub fn compile(src: &str) -> Self {
        build_plan(parse(src))
    }

    pub fn compile_with(src: &str, delimiters: Delimiters) -> Self {
        build_plan(parse_with(src, delimiters))
    }

    /// Fetches template text through `loader` and builds its plan
    pub fn load<L>(loader: &L, source: &Source<'_>) -> std::result::Result<Self, SourceUnavailable>
    where
        L: Loader + ?Sized,
    {
        let text = loader.load(source)?;
        Ok(Self::compile(&text))
    }

    pub fn template(&self) -> &ParsedTemplate {
        &self.template
    }

    /// Total byte length of all literal segments
    pub fn literal_len(&self) -> usize {
        self.literal_len
    }

    /// How often `name` occurs in the template
    pub fn occurrences(&self, name: &str) -> usize {
        self.distinct
            .iter()
            .find(|(distinct, _)| distinct == name)
            .map_or(0, |(_, count)| *count)
    }

    /// Each placeholder name once, with its occurrence count, in order of first appearance
    pub fn distinct_placeholders(&self) -> impl Iterator<Item = (&str, usize)> {
        self.distinct.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Expands the template into a buffer sized up front
    pub fn expand<R>(&self, resolver: &R) -> Result<String>
    where
        R: ParameterResolver + ?Sized,
    {
        let (values, capacity) = self.resolve_all(resolver)?;
        trace!(capacity, "expanding through plan");
        debug_assert_eq!(values.len(), self.slots.len());
        let mut out = String::with_capacity(capacity);
        let mut occurrence = 0;
        for segment in &self.template {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(_) => {
                    out.push_str(&values[occurrence]);
                    occurrence += 1;
                }
            }
        }
        Ok(out)
    }

    /// Resolves every placeholder occurrence in template order and computes the output size
    ///
    /// Returns one value per occurrence. The size is the exact length of the expansion.
    fn resolve_all<'r, R>(&self, resolver: &'r R) -> Result<(Vec<Cow<'r, str>>, usize)>
    where
        R: ParameterResolver + ?Sized,
    {
        let values = self
            .slots
            .iter()
            .map(|&slot| resolve(resolver, &self.distinct[slot].0))
            .collect::<Result<Vec<_>>>()?;
        let placeholder_len: usize = values.iter().map(|value| value.len()).sum();
        Ok((values, self.literal_len + placeholder_len))
    }
}

impl From<ParsedTemplate> for ExpansionPlan {
    fn from(template: ParsedTemplate) -> Self {
        build_plan(template)
    }
}

impl Display for ExpansionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.template, f)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::BTreeMap};

    use proptest::prelude::*;

    use super::*;
    use crate::{expander::expand, resolver::from_fn};

    #[test]
    fn counts() {
        let plan = ExpansionPlan::compile("«a», «b» and «a» again");
        assert_eq!(plan.literal_len(), ", ".len() + " and ".len() + " again".len());
        assert_eq!(plan.occurrences("a"), 2);
        assert_eq!(plan.occurrences("b"), 1);
        assert_eq!(plan.occurrences("c"), 0);
        assert_eq!(
            plan.distinct_placeholders().collect::<Vec<_>>(),
            vec![("a", 2), ("b", 1)]
        );
    }

    #[test]
    fn literal_len_counts_bytes() {
        let plan = ExpansionPlan::compile("é«x»ü");
        assert_eq!(plan.literal_len(), 4);
    }

    #[test]
    fn it_works() {
        let plan = ExpansionPlan::compile("Hello «Name»!");
        assert_eq!(plan.expand(&[("Name", "Ben")]).unwrap(), "Hello Ben!");
        assert_eq!(plan.expand(&[("Name", "Ann")]).unwrap(), "Hello Ann!");
    }

    #[test]
    fn empty() {
        let plan = ExpansionPlan::compile("");
        assert_eq!(plan.expand(&from_fn(|_| None)).unwrap(), "");
    }

    #[test]
    fn missing_parameter() {
        let plan = ExpansionPlan::compile("«BIG»«little»");
        let err = plan.expand(&[("BIG", "big")]).unwrap_err();
        assert_eq!(err.name(), "little");
    }

    #[test]
    fn repeated_name_resolved_per_occurrence() {
        let calls = RefCell::new(0);
        let resolver = from_fn(|_| {
            *calls.borrow_mut() += 1;
            Some("v".to_string())
        });
        let plan = ExpansionPlan::compile("«x»-«x»");
        assert_eq!(plan.expand(&resolver).unwrap(), "v-v");
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn capacity_is_exact() {
        let plan = ExpansionPlan::compile("«a», «b» and «a»!");
        let params = [("a", "alpha"), ("b", "β")];
        let (_, capacity) = plan.resolve_all(&params).unwrap();
        assert_eq!(capacity, plan.expand(&params).unwrap().len());
    }

    #[test]
    fn capacity_follows_each_resolved_value() {
        let calls = RefCell::new(0);
        let resolver = from_fn(|_| {
            *calls.borrow_mut() += 1;
            Some(if *calls.borrow() == 1 { "x".repeat(1000) } else { String::new() })
        });
        let plan = ExpansionPlan::compile(&"«a»".repeat(1000));
        let (_, capacity) = plan.resolve_all(&resolver).unwrap();
        assert_eq!(capacity, 1000);
        *calls.borrow_mut() = 0;
        assert_eq!(plan.expand(&resolver).unwrap().len(), 1000);
    }

    #[test]
    fn every_occurrence_gets_its_own_value() {
        let calls = RefCell::new(0);
        let resolver = from_fn(|_| {
            *calls.borrow_mut() += 1;
            Some(calls.borrow().to_string())
        });
        let plan = ExpansionPlan::compile("[«a»-«b»«a»] «c»");
        assert_eq!(plan.expand(&resolver).unwrap(), "[1-23] 4");
    }

    #[test]
    fn display() {
        let plan = ExpansionPlan::compile_with("Hi {who}", Delimiters::new('{', '}'));
        assert_eq!(plan.to_string(), "Hi {who}");
        assert_eq!(plan.occurrences("who"), 1);
    }

    const NAMES: [&str; 4] = ["a", "b", "c", "d"];

    fn arb_segment() -> impl Strategy<Value = Segment> {
        prop_oneof![
            "[a-z é]{0,8}".prop_map(Segment::Literal),
            prop::sample::select(NAMES.to_vec()).prop_map(|name: &str| Segment::Placeholder(name.to_string())),
        ]
    }

    fn arb_template() -> impl Strategy<Value = ParsedTemplate> {
        prop::collection::vec(arb_segment(), 0..12).prop_map(ParsedTemplate::from_segments)
    }

    fn arb_params() -> impl Strategy<Value = BTreeMap<&'static str, String>> {
        prop::collection::btree_map(prop::sample::select(NAMES.to_vec()), "[A-Z ü]{0,6}", 0..4)
    }

    proptest! {
        #[test]
        fn plan_matches_naive(template in arb_template(), params in arb_params()) {
            let naive = expand(&template, &params);
            let plan = build_plan(template);
            prop_assert_eq!(plan.expand(&params), naive);
        }

        #[test]
        fn plan_matches_naive_on_raw_text(src in "[a-d«» x]{0,24}") {
            let template = parse(&src);
            let resolver = from_fn(|name| Some(name.repeat(2)));
            let naive = expand(&template, &resolver);
            prop_assert!(naive.is_ok());
            let plan = build_plan(template);
            prop_assert_eq!(plan.expand(&resolver), naive);
        }

        #[test]
        fn capacity_matches_output(template in arb_template(), values in prop::collection::vec("[a-zß]{0,6}", 4)) {
            let params: Vec<(&str, String)> = NAMES.iter().copied().zip(values).collect();
            let plan = build_plan(template);
            let (_, capacity) = plan.resolve_all(&params[..]).unwrap();
            prop_assert_eq!(capacity, plan.expand(&params[..]).unwrap().len());
        }
    }
}
