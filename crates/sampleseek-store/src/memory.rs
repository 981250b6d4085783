//! MemoryStore: vectors of records plus id indexes.
//!
//! Queries scan every record, so this is meant for fixtures, demos and small
//! datasets. Stage-based queries yield one sample per matching stage, as a
//! relational join would.

use std::collections::{HashMap, HashSet};

use sampleseek_core::{
    Concurrency, LikePattern, Method, MethodId, Project, ProjectId, Sample, SampleId,
    SampleStore, Stage, StageId, StoreError,
};

use crate::dataset::Dataset;
use crate::error::DatasetError;

#[derive(Debug, Clone)]
pub struct MemoryStore {
    projects: Vec<Project>,
    samples: Vec<Sample>,
    methods: Vec<Method>,
    stages: Vec<Stage>,
    sample_index: HashMap<SampleId, usize>,
    method_index: HashMap<MethodId, usize>,
    last_ids: LastIds,
    concurrency: Concurrency,
}

/// Highest id handed out or loaded so far, per record kind.
#[derive(Debug, Clone, Copy, Default)]
struct LastIds {
    project: i64,
    sample: i64,
    method: i64,
    stage: i64,
}

fn bump(last: &mut i64, seen: i64) {
    *last = (*last).max(seen);
}

fn duplicate(kind: &'static str, id: impl ToString) -> DatasetError {
    DatasetError::Duplicate { kind, id: id.to_string() }
}

fn next(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            samples: Vec::new(),
            methods: Vec::new(),
            stages: Vec::new(),
            sample_index: HashMap::new(),
            method_index: HashMap::new(),
            last_ids: LastIds::default(),
            concurrency: Concurrency::Shared,
        }
    }

    /// Declare a different concurrency level, e.g. to exercise the
    /// sequential fallback.
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Build a store from a dataset, checking that every sample is persisted,
    /// every reference resolves, and no id (internal or obfuscated) repeats.
    pub fn from_dataset(dataset: Dataset) -> Result<Self, DatasetError> {
        let mut store = Self::new();

        let mut obfuscated = HashSet::new();
        for project in dataset.projects {
            if store.projects.iter().any(|p| p.id == project.id) {
                return Err(duplicate("project id", project.id.0));
            }
            if !obfuscated.insert(project.obfuscated_id.clone()) {
                return Err(duplicate("project obfuscated id", &project.obfuscated_id));
            }
            bump(&mut store.last_ids.project, project.id.0);
            store.projects.push(project);
        }
        for method in dataset.methods {
            if store.method_index.contains_key(&method.id) {
                return Err(duplicate("method id", method.id.0));
            }
            bump(&mut store.last_ids.method, method.id.0);
            store.method_index.insert(method.id, store.methods.len());
            store.methods.push(method);
        }
        for sample in dataset.samples {
            let Some(id) = sample.id.filter(|_| sample.is_persisted()) else {
                return Err(DatasetError::Unpersisted { name: sample.name });
            };
            if store.sample_index.contains_key(&id) {
                return Err(duplicate("sample id", id.0));
            }
            if store.project(sample.project_id).is_none() {
                return Err(DatasetError::UnknownProject { sample: id, project: sample.project_id });
            }
            bump(&mut store.last_ids.sample, id.0);
            store.sample_index.insert(id, store.samples.len());
            store.samples.push(sample);
        }
        let mut stage_ids = HashSet::new();
        for stage in dataset.stages {
            if !stage_ids.insert(stage.id) {
                return Err(duplicate("stage id", stage.id.0));
            }
            if !store.sample_index.contains_key(&stage.sample_id) {
                return Err(DatasetError::UnknownSample(stage.sample_id));
            }
            if let Some(method_id) = stage.method_id {
                if !store.method_index.contains_key(&method_id) {
                    return Err(DatasetError::UnknownMethod(method_id));
                }
            }
            bump(&mut store.last_ids.stage, stage.id.0);
            store.stages.push(stage);
        }

        tracing::debug!(
            projects = store.projects.len(),
            samples = store.samples.len(),
            methods = store.methods.len(),
            stages = store.stages.len(),
            "memory store loaded"
        );
        Ok(store)
    }

    // -----------------------------------------------------------------------
    // Inserts: each assigns the next id, as persisting would
    // -----------------------------------------------------------------------

    pub fn insert_project(&mut self, name: impl Into<String>) -> Project {
        let id = ProjectId(next(&mut self.last_ids.project));
        let project = Project {
            id,
            obfuscated_id: format!("P-{:04}", id.0),
            name: name.into(),
        };
        self.projects.push(project.clone());
        project
    }

    pub fn insert_sample(&mut self, project: ProjectId, name: impl Into<String>) -> Sample {
        let id = SampleId(next(&mut self.last_ids.sample));
        let sample = Sample {
            id: Some(id),
            obfuscated_id: Some(format!("S-{:04}", id.0)),
            project_id: project,
            name: name.into(),
        };
        self.sample_index.insert(id, self.samples.len());
        self.samples.push(sample.clone());
        sample
    }

    pub fn insert_method(&mut self, name: impl Into<String>) -> Method {
        let id = MethodId(next(&mut self.last_ids.method));
        let method = Method { id, name: name.into() };
        self.method_index.insert(id, self.methods.len());
        self.methods.push(method.clone());
        method
    }

    pub fn insert_stage(
        &mut self,
        sample: SampleId,
        method: Option<MethodId>,
        annotation: Option<&str>,
    ) -> Stage {
        let stage = Stage {
            id: StageId(next(&mut self.last_ids.stage)),
            sample_id: sample,
            method_id: method,
            annotation: annotation.map(str::to_string),
        };
        self.stages.push(stage.clone());
        stage
    }

    pub fn dataset(&self) -> Dataset {
        Dataset {
            projects: self.projects.clone(),
            samples: self.samples.clone(),
            methods: self.methods.clone(),
            stages: self.stages.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.sample_index.get(&id).map(|&i| &self.samples[i])
    }

    fn method(&self, id: MethodId) -> Option<&Method> {
        self.method_index.get(&id).map(|&i| &self.methods[i])
    }

    /// The sample behind each stage accepted by `keep`, restricted to `project`.
    fn samples_via_stages(
        &self,
        project: ProjectId,
        keep: impl Fn(&Stage) -> bool,
    ) -> Vec<Sample> {
        self.stages
            .iter()
            .filter(|stage| keep(*stage))
            .filter_map(|stage| self.sample(stage.sample_id))
            .filter(|sample| sample.project_id == project)
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SampleStore
// ---------------------------------------------------------------------------

impl SampleStore for MemoryStore {
    fn concurrency(&self) -> Concurrency {
        self.concurrency
    }

    fn project_by_obfuscated_id(&self, obfuscated_id: &str) -> Result<Option<Project>, StoreError> {
        Ok(self
            .projects
            .iter()
            .find(|p| p.obfuscated_id == obfuscated_id)
            .cloned())
    }

    fn samples_by_name(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        Ok(self
            .samples
            .iter()
            .filter(|s| s.project_id == project && pattern.matches(&s.name))
            .cloned()
            .collect())
    }

    fn samples_by_stage_annotation(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        Ok(self.samples_via_stages(project, |stage| {
            stage
                .annotation
                .as_deref()
                .is_some_and(|annotation| pattern.matches(annotation))
        }))
    }

    fn samples_by_stage_method(
        &self,
        pattern: &LikePattern,
        project: ProjectId,
    ) -> Result<Vec<Sample>, StoreError> {
        Ok(self.samples_via_stages(project, |stage| {
            stage
                .method_id
                .and_then(|id| self.method(id))
                .is_some_and(|method| pattern.matches(&method.name))
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
