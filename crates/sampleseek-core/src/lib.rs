//! sampleseek-core: multi-token sample search.
//!
//! Resolves a list of free-text tokens to the samples of one project that
//! match *every* token through *at least one* attribute.
//!
//! # Architecture
//!
//! ```text
//! QueryResolver ──► TokenResolver ──► AttributeMatcher ──► SampleStore
//!      │                  │
//!      └─ intersection    └─ union by IdentityKey
//! ```
//!
//! Matcher jobs run under an [`Execution`] strategy: sequentially on the
//! caller's task, or on a bounded worker pool when the store declares
//! [`Concurrency::Shared`].

pub mod config;
pub mod error;
pub mod execution;
pub mod identity;
pub mod matcher;
pub mod pattern;
pub mod resolver;
pub mod store;
pub mod types;

pub use error::{MatcherFailure, ResolveError};
pub use execution::{Execution, ExecutionMode};
pub use identity::{IdentityKey, MatchedSample, TransientSample};
pub use matcher::{AttributeMatcher, BuiltinMatcher, MatcherSet};
pub use pattern::LikePattern;
pub use resolver::{QueryResolver, TokenResolver};
pub use store::{Concurrency, SampleStore, StoreError};
pub use types::{Method, MethodId, Project, ProjectId, Sample, SampleId, Stage, StageId};
