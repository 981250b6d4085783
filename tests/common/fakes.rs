//! Fake stores and matchers for failure and concurrency tests.
//!
//! - [`FlakyStore`] wraps a [`MemoryStore`] and fails chosen queries.
//! - [`RecordingStore`] wraps a [`MemoryStore`] and records which thread
//!   served each query and how many ran at once.
//! - [`PanickingMatcher`] and [`FixedMatcher`] are custom [`AttributeMatcher`]s.

use sampleseek::{
    AttributeMatcher, Concurrency, LikePattern, MemoryStore, Project, ProjectId, Sample,
    SampleStore, StoreError,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::ThreadId;
use std::time::Duration;

// ---------------------------------------------------------------------------
// FlakyStore
// ---------------------------------------------------------------------------

/// Store query kinds, for choosing which ones a [`FlakyStore`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Project,
    Name,
    Annotation,
    Method,
}

pub struct FlakyStore {
    inner: MemoryStore,
    failing: HashSet<Query>,
    /// Only fail for patterns containing this token, if set.
    only_token: Option<String>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore, failing: &[Query]) -> Self {
        Self {
            inner,
            failing: failing.iter().copied().collect(),
            only_token: None,
        }
    }

    pub fn only_for_token(mut self, token: &str) -> Self {
        self.only_token = Some(token.to_string());
        self
    }

    fn check(&self, query: Query, pattern: Option<&LikePattern>) -> Result<(), StoreError> {
        let token_hit = match (&self.only_token, pattern) {
            (Some(only), Some(p)) => p.token() == only,
            _ => true,
        };
        if self.failing.contains(&query) && token_hit {
            return Err(StoreError::Query {
                query: "flaky",
                reason: format!("{query:?} query broken on purpose"),
            });
        }
        Ok(())
    }
}

impl SampleStore for FlakyStore {
    fn concurrency(&self) -> Concurrency {
        self.inner.concurrency()
    }

    fn project_by_obfuscated_id(&self, obfuscated_id: &str) -> Result<Option<Project>, StoreError> {
        self.check(Query::Project, None)?;
        self.inner.project_by_obfuscated_id(obfuscated_id)
    }

    fn samples_by_name(&self, pattern: &LikePattern, project: ProjectId) -> Result<Vec<Sample>, StoreError> {
        self.check(Query::Name, Some(pattern))?;
        self.inner.samples_by_name(pattern, project)
    }

    fn samples_by_stage_annotation(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        self.check(Query::Annotation, Some(pattern))?;
        self.inner.samples_by_stage_annotation(pattern, project)
    }

    fn samples_by_stage_method(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        self.check(Query::Method, Some(pattern))?;
        self.inner.samples_by_stage_method(pattern, project)
    }
}

// ---------------------------------------------------------------------------
// RecordingStore
// ---------------------------------------------------------------------------

/// Records the thread of every sample query and the peak number of queries
/// in flight. Each query sleeps briefly so overlapping calls are observable.
pub struct RecordingStore {
    inner: MemoryStore,
    concurrency: Concurrency,
    delay: Duration,
    threads: Mutex<Vec<ThreadId>>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore, concurrency: Concurrency) -> Self {
        Self {
            inner,
            concurrency,
            delay: Duration::from_millis(20),
            threads: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.threads.lock().unwrap().len()
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn record<T>(&self, query: impl FnOnce() -> T) -> T {
        self.threads.lock().unwrap().push(std::thread::current().id());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        let out = query();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

impl SampleStore for RecordingStore {
    fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    fn project_by_obfuscated_id(&self, obfuscated_id: &str) -> Result<Option<Project>, StoreError> {
        self.inner.project_by_obfuscated_id(obfuscated_id)
    }

    fn samples_by_name(&self, pattern: &LikePattern, project: ProjectId) -> Result<Vec<Sample>, StoreError> {
        self.record(|| self.inner.samples_by_name(pattern, project))
    }

    fn samples_by_stage_annotation(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        self.record(|| self.inner.samples_by_stage_annotation(pattern, project))
    }

    fn samples_by_stage_method(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        self.record(|| self.inner.samples_by_stage_method(pattern, project))
    }
}

// ---------------------------------------------------------------------------
// Custom matchers
// ---------------------------------------------------------------------------

/// A matcher that panics on every call.
pub struct PanickingMatcher;

impl AttributeMatcher for PanickingMatcher {
    fn name(&self) -> &str {
        "panicking"
    }

    fn find(&self, _: &dyn SampleStore, token: &str, _: ProjectId) -> Result<Vec<Sample>, StoreError> {
        panic!("matcher exploded on {token:?}")
    }
}

/// A matcher that returns a fixed list for one token and nothing otherwise,
/// ignoring the store.
pub struct FixedMatcher {
    pub name: &'static str,
    pub token: String,
    pub samples: Vec<Sample>,
}

impl AttributeMatcher for FixedMatcher {
    fn name(&self) -> &str {
        self.name
    }

    fn find(&self, _: &dyn SampleStore, token: &str, _: ProjectId) -> Result<Vec<Sample>, StoreError> {
        if token == self.token {
            Ok(self.samples.clone())
        } else {
            Ok(Vec::new())
        }
    }
}
