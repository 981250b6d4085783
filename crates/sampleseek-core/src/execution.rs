//! Execution strategies for matcher jobs.
//!
//! One job is one `(token, matcher)` pair. Jobs never depend on each other, so
//! they can run on a worker pool, but only when the store says it can be
//! queried from several threads at once. A store that must be used from the
//! caller's own context forces [`Execution::Sequential`].
//!
//! Either way every job finishes before [`Execution::run`] returns; callers
//! never see a partially-filled grid.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::MatcherFailure;
use crate::matcher::AttributeMatcher;
use crate::store::{Concurrency, SampleStore};
use crate::types::{ProjectId, Sample};

/// Strategy requested by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Pool if the store allows it, sequential otherwise.
    #[default]
    Auto,
    Sequential,
    Pool,
}

/// Strategy actually used for a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution {
    /// Run every job in order on the caller's task.
    Sequential,
    /// Run jobs on tokio's blocking pool, at most `max_workers` at a time.
    Pool { max_workers: usize },
}

impl Execution {
    /// Pick the strategy for a store, downgrading to sequential when the
    /// store cannot be shared between threads. `max_workers` is clamped to
    /// `1..=Semaphore::MAX_PERMITS`.
    pub fn select(mode: ExecutionMode, concurrency: Concurrency, max_workers: usize) -> Self {
        let max_workers = max_workers.clamp(1, Semaphore::MAX_PERMITS);
        match (mode, concurrency) {
            (ExecutionMode::Sequential, _) => Execution::Sequential,
            (ExecutionMode::Auto, Concurrency::Shared) => Execution::Pool { max_workers },
            (ExecutionMode::Auto, Concurrency::SingleContext) => Execution::Sequential,
            (ExecutionMode::Pool, Concurrency::Shared) => Execution::Pool { max_workers },
            (ExecutionMode::Pool, Concurrency::SingleContext) => {
                tracing::warn!(
                    "worker pool requested but the store only allows single-context access; running matchers sequentially"
                );
                Execution::Sequential
            }
        }
    }

    /// Run every job and return one outcome per job, in job order.
    pub(crate) async fn run(
        &self,
        store: &Arc<dyn SampleStore>,
        project: ProjectId,
        jobs: Vec<Job>,
    ) -> Vec<JobOutcome> {
        match *self {
            Execution::Sequential => run_sequential(store.as_ref(), project, jobs),
            Execution::Pool { max_workers } => run_pool(store, project, jobs, max_workers).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// One matcher invocation for one token.
pub(crate) struct Job {
    /// Position of the token in the query.
    pub token_slot: usize,
    pub token: Arc<str>,
    pub matcher: Arc<dyn AttributeMatcher>,
}

pub(crate) struct JobOutcome {
    pub token_slot: usize,
    pub token: Arc<str>,
    pub matcher: String,
    pub result: Result<Vec<Sample>, MatcherFailure>,
}

impl Job {
    fn outcome(self, result: Result<Vec<Sample>, MatcherFailure>) -> JobOutcome {
        JobOutcome {
            token_slot: self.token_slot,
            matcher: self.matcher.name().to_string(),
            token: self.token,
            result,
        }
    }
}

fn invoke(
    store: &dyn SampleStore,
    matcher: &dyn AttributeMatcher,
    token: &str,
    project: ProjectId,
) -> Result<Vec<Sample>, MatcherFailure> {
    match catch_unwind(AssertUnwindSafe(|| matcher.find(store, token, project))) {
        Ok(found) => found.map_err(MatcherFailure::from),
        Err(payload) => Err(MatcherFailure::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn run_sequential(store: &dyn SampleStore, project: ProjectId, jobs: Vec<Job>) -> Vec<JobOutcome> {
    jobs.into_iter()
        .map(|job| {
            let result = invoke(store, job.matcher.as_ref(), &job.token, project);
            job.outcome(result)
        })
        .collect()
}

async fn run_pool(
    store: &Arc<dyn SampleStore>,
    project: ProjectId,
    jobs: Vec<Job>,
    max_workers: usize,
) -> Vec<JobOutcome> {
    let permits = Arc::new(Semaphore::new(max_workers));
    let mut workers = JoinSet::new();
    let mut slots = HashMap::with_capacity(jobs.len());

    for (index, job) in jobs.into_iter().enumerate() {
        // The semaphore is never closed; a failed acquire runs the job
        // without a permit.
        let permit = Arc::clone(&permits).acquire_owned().await.ok();
        let store = Arc::clone(store);
        let handle = workers.spawn_blocking(move || {
            let _permit = permit;
            let result = invoke(store.as_ref(), job.matcher.as_ref(), &job.token, project);
            (index, job.outcome(result))
        });
        slots.insert(handle.id(), index);
    }

    let mut outcomes: Vec<(usize, JobOutcome)> = Vec::with_capacity(slots.len());
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(done) => outcomes.push(done),
            Err(err) => {
                // `invoke` already catches matcher panics; this only fires if
                // the worker itself was cancelled or panicked outside it.
                tracing::error!(
                    slot = ?slots.get(&err.id()),
                    error = %err,
                    "matcher worker did not complete"
                );
            }
        }
    }

    outcomes.sort_by_key(|(index, _)| *index);
    outcomes.into_iter().map(|(_, outcome)| outcome).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
