//! Identity of a persisted sample, used for every union and intersection.
//!
//! The same sample can come back from several matchers, or several times from
//! one matcher when it is reached through more than one related stage. Folding
//! those copies together needs an identity that only exists after the sample
//! has been persisted, so it lives here as a separately-constructed value
//! rather than on [`Sample`] itself.

use std::hash::{Hash, Hasher};

use crate::types::{ProjectId, Sample, SampleId};

/// Composite identity `(id, obfuscated_id, project_id)` of a persisted sample.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityKey {
    id: SampleId,
    obfuscated_id: String,
    project_id: ProjectId,
}

/// Returned when an identity is requested for a sample that was never written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sample {name:?} in project {project_id} has not been persisted")]
pub struct TransientSample {
    pub name: String,
    pub project_id: ProjectId,
}

impl IdentityKey {
    /// Derive the identity of `sample`, or fail if it is not persisted.
    pub fn of(sample: &Sample) -> Result<Self, TransientSample> {
        match (sample.id, sample.obfuscated_id.as_ref()) {
            (Some(id), Some(obfuscated_id)) => Ok(Self {
                id,
                obfuscated_id: obfuscated_id.clone(),
                project_id: sample.project_id,
            }),
            _ => Err(TransientSample {
                name: sample.name.clone(),
                project_id: sample.project_id,
            }),
        }
    }

    pub fn id(&self) -> SampleId {
        self.id
    }

    pub fn obfuscated_id(&self) -> &str {
        &self.obfuscated_id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

// ---------------------------------------------------------------------------
// MatchedSample
// ---------------------------------------------------------------------------

/// A sample paired with its [`IdentityKey`].
///
/// Equality and hashing look at the key only, so a `HashSet<MatchedSample>`
/// holds each logical sample once no matter how it was reached.
#[derive(Clone)]
pub struct MatchedSample {
    key: IdentityKey,
    sample: Sample,
}

impl MatchedSample {
    pub fn new(sample: Sample) -> Result<Self, TransientSample> {
        let key = IdentityKey::of(&sample)?;
        Ok(Self { key, sample })
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn into_sample(self) -> Sample {
        self.sample
    }
}

impl PartialEq for MatchedSample {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for MatchedSample {}

impl Hash for MatchedSample {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl std::fmt::Debug for MatchedSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.sample.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
