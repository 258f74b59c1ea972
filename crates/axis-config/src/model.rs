//! Request and response models for the config store

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use axis_common::{AxisError, ScopeKey};
use axis_persistence::ConfigRecord;

/// Upsert request body as received
///
/// Every field is optional here so that a missing field becomes a
/// validation error with a stable message rather than a decode error.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpsertConfigForm {
    pub service_name: Option<String>,
    pub environment: Option<String>,
    pub key: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub value: Option<String>,
}

/// Accept any scalar for an opaque value and keep its textual form.
///
/// `null` reads as absent. Arrays and objects are rejected.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

/// Validated upsert request
///
/// Only obtainable through [`ConfigUpsert::new`] or
/// [`UpsertConfigForm::validate`], so the scope is never blank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigUpsert {
    scope: ScopeKey,
    value: String,
}

impl ConfigUpsert {
    /// Scope fields must be non-empty; `value` may be any string.
    pub fn new(scope: ScopeKey, value: impl Into<String>) -> Result<Self, AxisError> {
        if scope.service_name.is_empty() || scope.environment.is_empty() || scope.key.is_empty() {
            return Err(AxisError::missing_fields());
        }
        Ok(Self {
            scope,
            value: value.into(),
        })
    }

    pub fn scope(&self) -> &ScopeKey {
        &self.scope
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl UpsertConfigForm {
    /// All four fields must be present. Scope fields must also be non-empty;
    /// `value` may be any string, including `""` and `"0"`.
    pub fn validate(self) -> Result<ConfigUpsert, AxisError> {
        let (Some(service_name), Some(environment), Some(key), Some(value)) =
            (self.service_name, self.environment, self.key, self.value)
        else {
            return Err(AxisError::missing_fields());
        };

        ConfigUpsert::new(ScopeKey::new(service_name, environment, key), value)
    }
}

/// Lookup response: the four semantic fields only
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigView {
    pub key: String,
    pub value: String,
    pub environment: String,
    pub service_name: String,
}

impl From<ConfigRecord> for ConfigView {
    fn from(record: ConfigRecord) -> Self {
        Self {
            key: record.key,
            value: record.value,
            environment: record.environment,
            service_name: record.service_name,
        }
    }
}
