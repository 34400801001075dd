//! Registry of named patterns.
//!
//! The registry is populated once at startup and then frozen inside an
//! [`Extractor`](crate::Extractor). Mutating operations only exist for the
//! construction phase; nothing in the request path writes to it.

use std::collections::BTreeMap;

use tracing::debug;

use crate::pattern::Pattern;
use crate::source::PatternEntry;

/// Errors from adding or removing registry entries.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("pattern name must not be empty")]
    EmptyName,
    /// The expression failed to compile. `source` is the `regex::Error`
    /// exactly as the regex crate produced it; the display text only adds
    /// the offending name in front.
    #[error("invalid pattern for {name:?}: {source}")]
    Compile {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("missing named pattern: {name}")]
    NotFound { name: String },
}

/// Mapping from label to compiled pattern. At most one pattern per name.
///
/// Backed by a `BTreeMap` so iteration, and therefore extraction output,
/// follows label order.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: BTreeMap<String, Pattern>,
}

impl PatternRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry by adding each entry in order.
    ///
    /// Later entries with an already-seen name replace earlier ones.
    ///
    /// # Errors
    ///
    /// Stops at the first entry whose pattern fails to compile.
    pub fn from_entries<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = PatternEntry>,
    {
        let mut registry = Self::new();
        for entry in entries {
            registry.add(entry.name, &entry.source)?;
        }
        Ok(registry)
    }

    /// Compiles `source` and stores it under `name`, replacing any previous
    /// pattern with that name.
    ///
    /// # Errors
    ///
    /// Returns the compile error unchanged; the registry is not modified.
    pub fn add(&mut self, name: impl Into<String>, source: &str) -> Result<(), RegistryError> {
        let pattern = Pattern::compile(name, source)?;
        let name = pattern.name().to_owned();
        if self.patterns.insert(name.clone(), pattern).is_some() {
            debug!(name = %name, "replaced existing pattern");
        } else {
            debug!(name = %name, "registered pattern");
        }
        Ok(())
    }

    /// Removes the pattern stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no pattern has that name.
    pub fn remove(&mut self, name: &str) -> Result<(), RegistryError> {
        match self.patterns.remove(name) {
            Some(_) => {
                debug!(name = %name, "removed pattern");
                Ok(())
            }
            None => Err(RegistryError::NotFound {
                name: name.to_owned(),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.patterns.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Registered labels in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Registered patterns in label order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.values()
    }
}
