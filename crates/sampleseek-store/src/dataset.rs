//! JSON dataset format.
//!
//! ```json
//! {
//!   "projects": [{ "id": 1, "obfuscated_id": "P-1", "name": "soil" }],
//!   "samples":  [{ "id": 1, "obfuscated_id": "S-1", "project_id": 1, "name": "alpha" }],
//!   "methods":  [{ "id": 1, "name": "centrifuge" }],
//!   "stages":   [{ "id": 1, "sample_id": 1, "method_id": 1, "annotation": "spun twice" }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use sampleseek_core::{Method, Project, Sample, Stage};

use crate::error::DatasetError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub samples: Vec<Sample>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
