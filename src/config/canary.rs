//! Canary configuration

use serde::Deserialize;

use crate::domain::canary::CanaryValue;

/// Canary endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CanaryConfig {
    /// Known marker value. Absence is reported per request, not at startup.
    #[serde(default)]
    pub value: Option<String>,

    /// Body returned by a successful issue
    #[serde(default)]
    pub response_body: ResponseBody,

    /// Version string reported in the JSON body
    #[serde(default = "default_version")]
    pub version: String,
}

/// Body of a successful canary response
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBody {
    /// `200 OK` with no body
    Empty,
    /// `200 OK` with `{"version": "..."}`
    #[default]
    VersionJson,
}

impl CanaryConfig {
    /// The configured canary, if any.
    pub fn canary_value(&self) -> Option<CanaryValue> {
        self.value.clone().map(CanaryValue::from)
    }
}

impl Default for CanaryConfig {
    fn default() -> Self {
        Self {
            value: None,
            response_body: ResponseBody::default(),
            version: default_version(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
