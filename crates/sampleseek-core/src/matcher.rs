//! Attribute matchers: one per searchable attribute of a sample.
//!
//! A matcher takes a raw token and a project, wraps the token into a
//! [`LikePattern`], and asks the store for every sample whose attribute
//! contains it. The built-in table covers the sample's own name, the
//! annotations on its stages, and the names of the methods those stages used.
//! Further matchers are added by implementing [`AttributeMatcher`] and
//! registering them with [`MatcherSet::with`].

use std::str::FromStr;
use std::sync::Arc;

use crate::pattern::LikePattern;
use crate::store::{SampleStore, StoreError};
use crate::types::{ProjectId, Sample};

/// Finds samples whose attribute contains a token.
pub trait AttributeMatcher: Send + Sync {
    /// Stable name used in logs and configuration.
    fn name(&self) -> &str;

    /// Samples in `project` whose attribute contains `token`, ignoring case.
    /// The same sample may be returned more than once.
    fn find(
        &self,
        store: &dyn SampleStore,
        token: &str,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError>;
}

// ---------------------------------------------------------------------------
// Built-in matchers
// ---------------------------------------------------------------------------

/// The matcher kinds registered at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMatcher {
    /// `Sample.name`.
    SampleName,
    /// `Stage.annotation` of any stage of the sample.
    StageAnnotation,
    /// `Method.name` of any stage of the sample, via the stage's method.
    StageMethod,
}

impl BuiltinMatcher {
    pub const ALL: [BuiltinMatcher; 3] = [
        BuiltinMatcher::SampleName,
        BuiltinMatcher::StageAnnotation,
        BuiltinMatcher::StageMethod,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuiltinMatcher::SampleName => "sample-name",
            BuiltinMatcher::StageAnnotation => "stage-annotation",
            BuiltinMatcher::StageMethod => "stage-method",
        }
    }
}

impl std::fmt::Display for BuiltinMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a matcher name does not name a built-in matcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown matcher {0:?} (expected one of: sample-name, stage-annotation, stage-method)")]
pub struct UnknownMatcher(pub String);

impl FromStr for BuiltinMatcher {
    type Err = UnknownMatcher;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinMatcher::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| UnknownMatcher(s.to_string()))
    }
}

impl AttributeMatcher for BuiltinMatcher {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn find(
        &self,
        store: &dyn SampleStore,
        token: &str,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        let pattern = LikePattern::containing(token);
        match self {
            BuiltinMatcher::SampleName => store.samples_by_name(&pattern, project),
            BuiltinMatcher::StageAnnotation => store.samples_by_stage_annotation(&pattern, project),
            BuiltinMatcher::StageMethod => store.samples_by_stage_method(&pattern, project),
        }
    }
}

// ---------------------------------------------------------------------------
// MatcherSet
// ---------------------------------------------------------------------------

/// The registered matchers every token is run against.
#[derive(Clone)]
pub struct MatcherSet {
    matchers: Vec<Arc<dyn AttributeMatcher>>,
}

impl MatcherSet {
    /// No matchers at all. Every token resolves to the empty set.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// All built-in matchers, in [`BuiltinMatcher::ALL`] order.
    pub fn builtin() -> Self {
        Self::empty().with_builtins(BuiltinMatcher::ALL)
    }

    /// Built-in matchers selected by name. An empty list selects all of them.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, UnknownMatcher> {
        if names.is_empty() {
            return Ok(Self::builtin());
        }
        let kinds = names
            .iter()
            .map(|n| n.as_ref().parse::<BuiltinMatcher>())
            .collect::<Result<Vec<_>, _>>()?;
        let mut set = Self::empty();
        for kind in kinds {
            if !set.contains(kind.as_str()) {
                set = set.with(Arc::new(kind));
            }
        }
        Ok(set)
    }

    fn with_builtins(self, kinds: impl IntoIterator<Item = BuiltinMatcher>) -> Self {
        kinds
            .into_iter()
            .fold(self, |set, kind| set.with(Arc::new(kind)))
    }

    /// Register another matcher.
    pub fn with(mut self, matcher: Arc<dyn AttributeMatcher>) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matchers.iter().any(|m| m.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn AttributeMatcher>> {
        self.matchers.iter()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl Default for MatcherSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for MatcherSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
