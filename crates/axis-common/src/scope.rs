use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The (service_name, environment, key) triple identifying one config value.
///
/// Matching is exact: no case folding, no trimming, no prefix semantics.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeKey {
    pub service_name: String,
    pub environment: String,
    pub key: String,
}

impl ScopeKey {
    pub fn new(
        service_name: impl Into<String>,
        environment: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            environment: environment.into(),
            key: key.into(),
        }
    }
}

impl Display for ScopeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.service_name, self.environment, self.key)
    }
}

impl From<(String, String, String)> for ScopeKey {
    fn from((service_name, environment, key): (String, String, String)) -> Self {
        Self {
            service_name,
            environment,
            key,
        }
    }
}
