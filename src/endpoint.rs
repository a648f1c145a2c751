//! Endpoint templates and query string building.
//!
//! Every resource path is relative to the client's base URL. Templates use
//! positional `{}` placeholders, e.g. `employees/{}/costcenter`.

use std::collections::BTreeMap;
use std::fmt;

/// Query parameters, kept sorted by key so generated URLs are reproducible.
pub type QueryValues = BTreeMap<String, String>;

const PLACEHOLDER: &str = "{}";

/// A path template relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint(&'static str);

impl Endpoint {
    /// Create an endpoint from a static template.
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// The raw template.
    pub fn template(&self) -> &'static str {
        self.0
    }

    /// Number of `{}` placeholders in the template.
    pub fn arity(&self) -> usize {
        self.0.matches(PLACEHOLDER).count()
    }

    /// Substitute the placeholders in order.
    ///
    /// Each argument is percent-encoded as a single path segment.
    ///
    /// # Panics
    ///
    /// Panics if the number of arguments does not match the number of
    /// placeholders. Templates are static, so a mismatch is a bug at the
    /// call site.
    pub fn format(&self, args: &[&dyn fmt::Display]) -> String {
        let arity = self.arity();
        assert!(
            arity == args.len(),
            "endpoint '{}' expects {} argument(s), got {}",
            self.0,
            arity,
            args.len()
        );

        let mut parts = self.0.split(PLACEHOLDER);
        let mut path = String::with_capacity(self.0.len());
        path.push_str(parts.next().unwrap_or_default());
        for (arg, rest) in args.iter().zip(parts) {
            path.push_str(&urlencoding::encode(&arg.to_string()));
            path.push_str(rest);
        }
        path
    }

    /// The path of a template without placeholders.
    ///
    /// # Panics
    ///
    /// Panics if the template has placeholders.
    pub fn path(&self) -> String {
        self.format(&[])
    }

    /// The path of a template without placeholders with `values` appended as
    /// the query string.
    pub fn query(&self, values: &QueryValues) -> String {
        with_query(&self.path(), values)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Append `values` to `path` as an `application/x-www-form-urlencoded` query.
///
/// An empty value set returns `path` unchanged, without a trailing `?`.
pub fn with_query(path: &str, values: &QueryValues) -> String {
    if values.is_empty() {
        return path.to_string();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(values.iter())
        .finish();
    let separator = if path.contains('?') { '&' } else { '?' };

    format!("{path}{separator}{query}")
}
