//! Named, compiled text-matching rules.

use regex::Regex;

use crate::registry::RegistryError;

/// A label paired with the compiled regular expression that produces its matches.
///
/// A `Pattern` can only be obtained through [`Pattern::compile`], so every
/// instance holds a non-empty name and a matcher that compiled successfully.
#[derive(Debug, Clone)]
pub struct Pattern {
    name: String,
    matcher: Regex,
}

impl Pattern {
    /// Compiles `source` into a pattern reported under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] for an empty name, and
    /// [`RegistryError::Compile`] carrying the untouched `regex::Error` when
    /// `source` is not a valid expression.
    pub fn compile(name: impl Into<String>, source: &str) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let matcher = Regex::new(source).map_err(|source| RegistryError::Compile {
            name: name.clone(),
            source,
        })?;

        Ok(Self { name, matcher })
    }

    /// Label under which matches are reported.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expression text this pattern was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        self.matcher.as_str()
    }

    /// The compiled expression, for callers that need more than `find_all`.
    #[must_use]
    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }

    /// All non-overlapping, leftmost-first matches in `text`, in input order.
    ///
    /// Zero-width matches are reported exactly as `regex` yields them.
    #[must_use]
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.matcher.find_iter(text).map(|m| m.as_str()).collect()
    }
}
