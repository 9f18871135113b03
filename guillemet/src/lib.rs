//! Placeholder templates
//!
//! Templates are plain text with named placeholders between `«` and `»`. A template is parsed
//! once and expanded any number of times against a [`ParameterResolver`]:
//!
//! ```rust
//! use std::collections::HashMap;
//! use guillemet::{ExpansionPlan, expand, parse};
//!
//! let template = parse("Hello «Name»!");
//! let params = HashMap::from([("Name", "Ben")]);
//! assert_eq!(expand(&template, &params).unwrap(), "Hello Ben!");
//!
//! // Precompute sizes for templates expanded often
//! let plan = ExpansionPlan::new(template);
//! assert_eq!(plan.expand(&params).unwrap(), "Hello Ben!");
//! ```
//!
//! Templates known ahead of time can be parsed at build time with [`str!`], [`file!`] and
//! [`directory!`], which generate accessors returning a `&'static ExpansionPlan`.

extern crate self as guillemet;

pub mod error;
pub mod expander;
pub mod loader;
pub mod plan;
pub mod resolver;

pub use guillemet_macros::guillemet_directory as directory;
pub use guillemet_macros::guillemet_file as file;
pub use guillemet_macros::guillemet_str as str;
pub use guillemet_parser::{Delimiters, ParsedTemplate, Segment, parse, parse_with};

pub use error::{ExpandError, SourceUnavailable, UnavailableCause};
pub use expander::expand;
pub use loader::{DefaultLoader, Loader, LoaderConfig, Resources, Source, SourceKind};
pub use plan::{ExpansionPlan, build_plan};
pub use resolver::{FnResolver, ParameterResolver, from_fn};

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    #[test]
    fn basic_usage() {
        mod template {
            crate::str!("test", "<p>«firstname» «lastname»</p>");
        }
        let params = HashMap::from([("firstname", "King"), ("lastname", "Tubby")]);
        assert_eq!(template::test().expand(&params).unwrap(), "<p>King Tubby</p>");
    }

    #[test]
    fn parsed_at_build_time() {
        mod template {
            crate::str!("greeting-card", "«Greeting» «Name»!");
        }
        let plan = template::greeting_card();
        assert_eq!(plan.occurrences("Greeting"), 1);
        assert_eq!(plan.literal_len(), 2);
        assert_eq!(
            plan.template(),
            &crate::parse("«Greeting» «Name»!")
        );
    }

    #[test]
    fn same_plan_every_call() {
        mod template {
            crate::str!("test", "«x»");
        }
        assert!(std::ptr::eq(template::test(), template::test()));
    }

    #[test]
    fn missing_parameter() {
        mod template {
            crate::str!("test", "«BIG»«little»");
        }
        let err = template::test().expand(&[("BIG", "big")]).unwrap_err();
        assert_eq!(err.name(), "little");
    }

    #[test]
    fn unterminated_delimiter() {
        mod template {
            crate::str!("test", "Hello «Name");
        }
        assert_eq!(template::test().expand(&crate::from_fn(|_| None)).unwrap(), "Hello Name");
    }
}
