//! Regex extractor core: named pattern registry, extraction engine, and the
//! CSV loader for the startup pattern set.

pub mod engine;
pub mod pattern;
pub mod registry;
pub mod source;

pub use engine::{extract_all, Extraction, Extractor};
pub use pattern::Pattern;
pub use registry::{PatternRegistry, RegistryError};
pub use source::{load_entries, load_file, load_registry, PatternEntry, SourceError};
