//! Static lab corpora used across harnesses.
//!
//! [`soil_lab`] is the hand-written corpus most scenario tests run against.
//! [`DATASET_JSON`] is the same shape in the on-disk format read by the
//! `sampleseek` binary.

use super::builders::Lab;

/// Primary-project samples:
///
/// | sample | stages (method / annotation) |
/// |--------|------------------------------|
/// | `alpha` | Centrifuge / "spun at 4C", Centrifuge / "spun again" |
/// | `beta-alpha` | Freeze-dry / (none) |
/// | `gamma` | Sieve / "fine grain, alpha site" |
/// | `delta` | (none) |
///
/// The other project holds `alpha-foreign` with a Centrifuge stage.
pub fn soil_lab() -> Lab {
    let mut lab = Lab::new();
    lab.sample("alpha");
    lab.sample("beta-alpha");
    lab.sample("gamma");
    lab.sample("delta");
    lab.foreign_sample("alpha-foreign");

    lab.stage("alpha", Some("Centrifuge"), Some("spun at 4C"))
        .stage("alpha", Some("Centrifuge"), Some("spun again"))
        .stage("beta-alpha", Some("Freeze-dry"), None)
        .stage("gamma", Some("Sieve"), Some("fine grain, alpha site"))
        .stage("alpha-foreign", Some("Centrifuge"), Some("spun"));
    lab
}

/// A small dataset in the JSON format accepted by `Dataset::from_json`.
pub const DATASET_JSON: &str = r#"{
  "projects": [
    { "id": 1, "obfuscated_id": "P-soil", "name": "soil" },
    { "id": 2, "obfuscated_id": "P-water", "name": "water" }
  ],
  "samples": [
    { "id": 10, "obfuscated_id": "S-a", "project_id": 1, "name": "alpha" },
    { "id": 11, "obfuscated_id": "S-b", "project_id": 1, "name": "beta-alpha" },
    { "id": 12, "obfuscated_id": "S-c", "project_id": 2, "name": "alpha" }
  ],
  "methods": [
    { "id": 1, "name": "Centrifuge" }
  ],
  "stages": [
    { "id": 100, "sample_id": 10, "method_id": 1, "annotation": "spun" },
    { "id": 101, "sample_id": 12, "method_id": 1, "annotation": "spun" }
  ]
}"#;
