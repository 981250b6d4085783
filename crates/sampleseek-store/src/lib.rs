//! sampleseek-store: in-memory backing for [`sampleseek_core::SampleStore`].
//!
//! [`MemoryStore`] holds projects, samples, stages and methods in plain
//! vectors and answers the store queries by scanning them. It can be filled
//! programmatically (each insert "persists" the record and assigns its ids)
//! or loaded from a JSON [`Dataset`].

pub mod dataset;
pub mod error;
pub mod memory;

pub use dataset::Dataset;
pub use error::DatasetError;
pub use memory::MemoryStore;
