
//! Placeholder syntax parser
//!
//! This crate turns template text into an ordered list of segments: runs of literal text and
//! named placeholders. It is used by the `guillemet` crate at runtime and by `guillemet-macros`
//! at compile time, so both paths split template text the same way.
//!
//! # Syntax
//!
//! A placeholder is a name between an open and a close delimiter, `«` and `»` by default:
//!
//! ```text
//! Hello «Name»!
//! ```
//!
//! Parsing never fails. Unterminated delimiters degrade to literal text and `«»` collapses to
//! nothing. Delimiter characters cannot be escaped.
//!
//! # Example
//!
//! ```rust
//! use guillemet_parser::{parse, Segment};
//!
//! let template = parse("Hello «Name»!");
//! assert_eq!(template.segments(), &[
//!     Segment::literal("Hello "),
//!     Segment::placeholder("Name"),
//!     Segment::literal("!"),
//! ]);
//! ```
//!
//! # Module Structure
//!
//! - `segment.rs`: `Segment` and `ParsedTemplate`
//! - `parser.rs`: `Delimiters` and the splitting algorithm

pub mod parser;
pub mod segment;

pub use parser::{Delimiters, parse, parse_with};
pub use segment::{ParsedTemplate, Segment};
