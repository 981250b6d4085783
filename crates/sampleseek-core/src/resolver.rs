//! Token and query resolution.
//!
//! ```text
//! QueryResolver ──► N × token ──► M × AttributeMatcher ──► SampleStore
//!       ▲                 │
//!       └── intersection ◄┴── union per token (by IdentityKey)
//! ```
//!
//! A token resolves to the union of every matcher's hits, folded by
//! [`IdentityKey`](crate::identity::IdentityKey). A query resolves to the
//! intersection of its tokens' sets: a sample survives only if every token
//! matched it through at least one attribute. A token with no hits empties the
//! whole query, and a query with no tokens is empty.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::error::{ResolveError, Result};
use crate::execution::{Execution, Job, JobOutcome};
use crate::identity::MatchedSample;
use crate::matcher::{MatcherSet, UnknownMatcher};
use crate::store::SampleStore;
use crate::types::{Project, Sample};

// ---------------------------------------------------------------------------
// TokenResolver
// ---------------------------------------------------------------------------

/// Resolves one token to the de-duplicated union of all matcher results.
#[derive(Clone)]
pub struct TokenResolver {
    store: Arc<dyn SampleStore>,
    matchers: MatcherSet,
    execution: Execution,
}

impl TokenResolver {
    pub fn new(store: Arc<dyn SampleStore>, matchers: MatcherSet, execution: Execution) -> Self {
        Self {
            store,
            matchers,
            execution,
        }
    }

    pub fn matchers(&self) -> &MatcherSet {
        &self.matchers
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    /// Every sample in `project` with at least one attribute containing
    /// `token`, each present once. Failing matchers contribute nothing.
    pub async fn resolve_token(&self, token: &str, project: &Project) -> HashSet<MatchedSample> {
        let token: Arc<str> = Arc::from(token);
        let jobs = self.jobs(0, &token).collect();
        let outcomes = self.execution.run(&self.store, project.id, jobs).await;
        union(outcomes)
    }

    fn jobs<'a>(&'a self, token_slot: usize, token: &'a Arc<str>) -> impl Iterator<Item = Job> + 'a {
        self.matchers.iter().map(move |matcher| Job {
            token_slot,
            token: Arc::clone(token),
            matcher: Arc::clone(matcher),
        })
    }
}

impl std::fmt::Debug for TokenResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResolver")
            .field("matchers", &self.matchers)
            .field("execution", &self.execution)
            .finish_non_exhaustive()
    }
}

/// Fold one token's matcher outcomes into a set, logging failures.
fn union(outcomes: impl IntoIterator<Item = JobOutcome>) -> HashSet<MatchedSample> {
    let mut found = HashSet::new();
    for outcome in outcomes {
        let samples = match outcome.result {
            Ok(samples) => samples,
            Err(err) => {
                tracing::error!(
                    matcher = %outcome.matcher,
                    token = %outcome.token,
                    error = %err,
                    "unhandled failure in matcher; treating as no matches"
                );
                continue;
            }
        };
        tracing::debug!(
            matcher = %outcome.matcher,
            token = %outcome.token,
            hits = samples.len(),
            "matcher finished"
        );
        for sample in samples {
            match MatchedSample::new(sample) {
                Ok(matched) => {
                    found.insert(matched);
                }
                Err(err) => tracing::error!(
                    matcher = %outcome.matcher,
                    token = %outcome.token,
                    error = %err,
                    "store returned an unpersisted sample; skipping it"
                ),
            }
        }
    }
    found
}

// ---------------------------------------------------------------------------
// QueryResolver
// ---------------------------------------------------------------------------

/// Resolves a multi-token query to the samples every token matched.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    tokens: TokenResolver,
}

impl QueryResolver {
    pub fn new(store: Arc<dyn SampleStore>, matchers: MatcherSet, execution: Execution) -> Self {
        Self {
            tokens: TokenResolver::new(store, matchers, execution),
        }
    }

    /// Build a resolver from the `[resolver]` config section, choosing the
    /// execution strategy from the store's declared concurrency.
    pub fn from_config(
        store: Arc<dyn SampleStore>,
        config: &ResolverConfig,
    ) -> std::result::Result<Self, UnknownMatcher> {
        let matchers = MatcherSet::from_names(&config.matchers)?;
        let execution = Execution::select(config.execution, store.concurrency(), config.max_workers);
        tracing::debug!(matchers = ?matchers, execution = ?execution, "query resolver configured");
        Ok(Self::new(store, matchers, execution))
    }

    pub fn token_resolver(&self) -> &TokenResolver {
        &self.tokens
    }

    /// Samples in the project addressed by `project_id` that match every
    /// token. The order of the returned samples is unspecified.
    pub async fn resolve<S: AsRef<str>>(&self, tokens: &[S], project_id: &str) -> Result<Vec<Sample>> {
        let project = self
            .tokens
            .store
            .project_by_obfuscated_id(project_id)?
            .ok_or_else(|| ResolveError::ProjectNotFound(project_id.to_string()))?;

        if tokens.is_empty() {
            tracing::debug!(project = %project.obfuscated_id, "empty query");
            return Ok(Vec::new());
        }

        let per_token = self.resolve_tokens(tokens, &project).await;
        let matched = intersect(per_token);
        tracing::debug!(
            project = %project.obfuscated_id,
            tokens = tokens.len(),
            hits = matched.len(),
            "query resolved"
        );
        Ok(matched.into_iter().map(MatchedSample::into_sample).collect())
    }

    /// Run the whole `(token × matcher)` grid in one batch and split the
    /// outcomes back into one set per token, in token order.
    async fn resolve_tokens<S: AsRef<str>>(
        &self,
        tokens: &[S],
        project: &Project,
    ) -> Vec<HashSet<MatchedSample>> {
        let tokens: Vec<Arc<str>> = tokens.iter().map(|t| Arc::from(t.as_ref())).collect();
        let jobs = tokens
            .iter()
            .enumerate()
            .flat_map(|(slot, token)| self.tokens.jobs(slot, token))
            .collect();
        let outcomes = self
            .tokens
            .execution
            .run(&self.tokens.store, project.id, jobs)
            .await;

        let mut grouped: Vec<Vec<JobOutcome>> = tokens.iter().map(|_| Vec::new()).collect();
        for outcome in outcomes {
            grouped[outcome.token_slot].push(outcome);
        }
        grouped
            .into_iter()
            .zip(&tokens)
            .map(|(outcomes, token)| {
                let set = union(outcomes);
                tracing::debug!(token = %token, hits = set.len(), "token resolved");
                set
            })
            .collect()
    }
}

/// Identity-based intersection of every set. No sets, or any empty set,
/// gives the empty set.
pub fn intersect(sets: Vec<HashSet<MatchedSample>>) -> HashSet<MatchedSample> {
    let mut sets = sets.into_iter();
    let Some(first) = sets.next() else {
        return HashSet::new();
    };
    sets.fold(first, |acc, next| {
        if acc.is_empty() {
            return acc;
        }
        acc.into_iter().filter(|m| next.contains(m)).collect()
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
