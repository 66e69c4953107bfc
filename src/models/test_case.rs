//! Test case model

use serde::{Deserialize, Serialize};

use crate::utils::null_as_default;

/// Sample test case shown with a problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_data: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_output: String,
}

impl TestCase {
    pub fn new(input_data: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input_data: input_data.into(),
            expected_output: expected_output.into(),
        }
    }
}
