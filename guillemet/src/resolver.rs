//! Parameter resolvers
//!
//! A resolver maps a placeholder name to the text substituted for it. Returning `None` is not the
//! same as returning an empty string: it means the parameter is missing and fails the expansion.
//!
//! Resolvers are provided for the standard maps, for slices of pairs and, through [`from_fn`],
//! for closures:
//!
//! ```rust
//! use std::collections::HashMap;
//! use guillemet::{expand, from_fn, parse};
//!
//! let template = parse("Hello «Name»!");
//!
//! let params = HashMap::from([("Name", "Ben")]);
//! assert_eq!(expand(&template, &params).unwrap(), "Hello Ben!");
//!
//! let upper = from_fn(|name| Some(name.to_uppercase()));
//! assert_eq!(expand(&template, &upper).unwrap(), "Hello NAME!");
//! ```

use std::{
    any::type_name,
    borrow::{Borrow, Cow},
    collections::{BTreeMap, HashMap},
    fmt,
    hash::{BuildHasher, Hash},
};

/// Supplies values for placeholder names
///
/// Expansion calls [`resolve`](ParameterResolver::resolve) once per placeholder occurrence, in
/// template order, and never caches the result. Implementations that are expensive to query
/// should memoize internally.
pub trait ParameterResolver {
    /// Returns the value for `name`, or `None` when the parameter is missing
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>>;

    /// Identifies the resolver in error messages
    fn describe(&self) -> String {
        type_name::<Self>().to_string()
    }
}

impl<R: ParameterResolver + ?Sized> ParameterResolver for &R {
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).resolve(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<R: ParameterResolver + ?Sized> ParameterResolver for Box<R> {
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).resolve(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<K, V, S> ParameterResolver for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|value| Cow::Borrowed(value.as_ref()))
    }
}

impl<K, V> ParameterResolver for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|value| Cow::Borrowed(value.as_ref()))
    }
}

/// Linear lookup; the first pair with a matching name wins
impl<K, V> ParameterResolver for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.iter()
            .find(|(key, _)| key.as_ref() == name)
            .map(|(_, value)| Cow::Borrowed(value.as_ref()))
    }
}

impl<K, V, const N: usize> ParameterResolver for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        self.as_slice().resolve(name)
    }
}

/// Resolver backed by a closure, see [`from_fn`]
#[derive(Clone, Copy)]
pub struct FnResolver<F> {
    f: F,
}

/// Wraps a closure as a [`ParameterResolver`]
pub fn from_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnResolver { f }
}

impl<F> ParameterResolver for FnResolver<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Option<Cow<'_, str>> {
        (self.f)(name).map(Cow::Owned)
    }

    fn describe(&self) -> String {
        format!("from_fn({})", type_name::<F>())
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}
