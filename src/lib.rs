//! sampleseek: multi-token sample search.
//!
//! Facade over the workspace crates so that integration tests, benches and
//! the `sampleseek` binary can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! tokens + project ──► QueryResolver ──► TokenResolver × N ──► AttributeMatcher × M
//!                                                                     │
//!                                     SampleStore (MemoryStore, …) ◄──┘
//! ```

use std::path::Path;
use std::sync::Arc;

pub use sampleseek_core::config::{Config, LoggingConfig, ResolverConfig};
pub use sampleseek_core::*;
pub use sampleseek_store::{Dataset, DatasetError, MemoryStore};

/// Split raw query arguments into tokens on whitespace, dropping blanks.
pub fn tokenize<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Load a JSON dataset into a [`MemoryStore`] and build a resolver over it.
pub fn open(dataset: &Path, config: &ResolverConfig) -> anyhow::Result<QueryResolver> {
    let store = MemoryStore::from_dataset(Dataset::load(dataset)?)?;
    Ok(QueryResolver::from_config(Arc::new(store), config)?)
}
