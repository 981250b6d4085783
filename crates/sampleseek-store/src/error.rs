use sampleseek_core::{MethodId, ProjectId, SampleId};

/// Why a [`Dataset`](crate::Dataset) could not become a store.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sample {name:?} has no id or obfuscated id")]
    Unpersisted { name: String },
    #[error("sample {sample} belongs to unknown project {project}")]
    UnknownProject { sample: SampleId, project: ProjectId },
    #[error("stage references unknown sample {0}")]
    UnknownSample(SampleId),
    #[error("stage references unknown method {0:?}")]
    UnknownMethod(MethodId),
    #[error("duplicate {kind} {id}")]
    Duplicate { kind: &'static str, id: String },
}
