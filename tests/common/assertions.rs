//! Domain-specific assertion macros for sampleseek harnesses.
//!
//! These wrap `pretty_assertions` and compare result sets by sample name,
//! since resolution order is unspecified.

use sampleseek::{MatchedSample, Sample};
use std::collections::HashSet;

/// Sorted names of a result list.
pub fn sorted_names(samples: &[Sample]) -> Vec<String> {
    let mut names: Vec<String> = samples.iter().map(|s| s.name.clone()).collect();
    names.sort();
    names
}

/// Sorted names of a token result set.
pub fn set_names(set: &HashSet<MatchedSample>) -> Vec<String> {
    let mut names: Vec<String> = set.iter().map(|m| m.sample().name.clone()).collect();
    names.sort();
    names
}

/// Assert that a result list holds exactly the named samples, in any order.
///
/// ```rust
/// assert_names!(results, ["alpha", "beta-alpha"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($results:expr, [$($name:expr),* $(,)?]) => {{
        let results: &[sampleseek::Sample] = &$results;
        let mut expected: Vec<String> = vec![$($name.to_string()),*];
        expected.sort();
        pretty_assertions::assert_eq!(
            $crate::common::sorted_names(results),
            expected,
            "assert_names! failed: result set differs"
        );
    }};
}

/// Assert that no sample appears twice in a result list.
#[macro_export]
macro_rules! assert_unique {
    ($results:expr) => {{
        let results: &[sampleseek::Sample] = &$results;
        let mut seen = std::collections::HashSet::new();
        for sample in results {
            if !seen.insert(sampleseek::IdentityKey::of(sample).expect("persisted sample")) {
                panic!("assert_unique! failed: {:?} appears more than once", sample);
            }
        }
    }};
}
