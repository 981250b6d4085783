//! Core types for sampleseek-core.
//!
//! This module defines the records the resolver reads: the [`Project`] that
//! scopes every search, the [`Sample`] being searched for, and the related
//! [`Stage`] and [`Method`] rows a sample can be reached through.
//!
//! The resolver never creates or mutates these; they are owned by whatever
//! [`SampleStore`](crate::store::SampleStore) returned them.

use serde::{Deserialize, Serialize};

/// Internal project key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

/// Internal sample key, assigned when the sample is first persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(pub i64);

/// Internal stage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(pub i64);

/// Internal method key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(pub i64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SampleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The boundary within which all matching happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Externally-facing identifier; callers address projects by this value.
    pub obfuscated_id: String,
    #[serde(default)]
    pub name: String,
}

/// A searchable sample record.
///
/// `id` and `obfuscated_id` are `None` until the sample has been written by
/// the store. Only persisted samples can take part in resolution; see
/// [`IdentityKey::of`](crate::identity::IdentityKey::of).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub id: Option<SampleId>,
    #[serde(default)]
    pub obfuscated_id: Option<String>,
    pub project_id: ProjectId,
    pub name: String,
}

impl Sample {
    /// A sample that has not been written yet.
    pub fn transient(project_id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id: None,
            obfuscated_id: None,
            project_id,
            name: name.into(),
        }
    }

    /// True once the store has assigned both identifiers.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some() && self.obfuscated_id.is_some()
    }
}

/// One processing step applied to a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub sample_id: SampleId,
    #[serde(default)]
    pub method_id: Option<MethodId>,
    /// Free-text note recorded against the stage.
    #[serde(default)]
    pub annotation: Option<String>,
}

/// The method a stage was carried out with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: MethodId,
    pub name: String,
}
