//! # Parameter Sets
//!
//! Nested, label-aware configuration blocks. A `ParameterSet` is a JSON-like
//! object tree; typed getters deserialize individual keys and report missing
//! or mistyped keys as [`ConfigurationError`]s naming the block they came from.
//!
//! Sub-blocks keep a dotted label (`standalone_muon_producer.sta_traj_builder_parameters`)
//! so errors point at the exact place in the configuration file.

use super::error::{ConfigResult, ConfigurationError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterSet {
    label: String,
    values: Map<String, Value>,
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: Map::new(),
        }
    }

    /// Wrap a JSON object; any other JSON value is rejected
    pub fn from_value(label: impl Into<String>, value: Value) -> ConfigResult<Self> {
        let label = label.into();
        match value {
            Value::Object(values) => Ok(Self { label, values }),
            other => Err(ConfigurationError::invalid_value(
                label,
                other.to_string(),
                "parameter set must be an object",
            )),
        }
    }

    /// Builder-style insertion, mostly used by tests and embedded defaults
    pub fn with<T: Serialize>(mut self, key: &str, value: T) -> ConfigResult<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn insert<T: Serialize>(&mut self, key: &str, value: T) -> ConfigResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| ConfigurationError::invalid_type(&self.label, key, e.to_string()))?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Required parameter; missing or mistyped keys are configuration errors
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ConfigResult<T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigurationError::missing_parameter(&self.label, key))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigurationError::invalid_type(&self.label, key, e.to_string()))
    }

    /// Optional parameter with a default; a present but mistyped key is still an error
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> ConfigResult<T> {
        if self.contains(key) {
            self.get(key)
        } else {
            Ok(default)
        }
    }

    /// Required nested block
    pub fn get_parameter_set(&self, key: &str) -> ConfigResult<ParameterSet> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigurationError::missing_parameter(&self.label, key))?;

        let label = if self.label.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.label, key)
        };

        match value {
            Value::Object(values) => Ok(Self {
                label,
                values: values.clone(),
            }),
            _ => Err(ConfigurationError::invalid_type(
                &self.label,
                key,
                "expected a nested parameter set",
            )),
        }
    }

    /// Deserialize the whole block into a typed configuration struct
    pub fn deserialize<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_value(self.to_value()).map_err(|e| {
            ConfigurationError::invalid_value(&self.label, "<block>", e.to_string())
        })
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn producer_pset() -> ParameterSet {
        ParameterSet::from_value(
            "standalone_muon_producer",
            json!({
                "muon_seed_collection_label": "MuonSeed",
                "sta_traj_builder_parameters": { "min_valid_hits": 2 }
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_get_required_string() {
        let pset = producer_pset();
        let label: String = pset.get("muon_seed_collection_label").unwrap();
        assert_eq!(label, "MuonSeed");
    }

    #[test]
    fn test_missing_key_names_block() {
        let pset = producer_pset();
        let err = pset.get::<String>("nope").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::missing_parameter("standalone_muon_producer", "nope")
        );
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let pset = producer_pset();
        let err = pset.get::<u32>("muon_seed_collection_label").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidType { .. }));
    }

    #[test]
    fn test_nested_block_label_is_dotted() {
        let nested = producer_pset()
            .get_parameter_set("sta_traj_builder_parameters")
            .unwrap();
        assert_eq!(
            nested.label(),
            "standalone_muon_producer.sta_traj_builder_parameters"
        );
        assert_eq!(nested.get::<usize>("min_valid_hits").unwrap(), 2);
        assert_eq!(nested.get_or("hit_resolution_cm", 0.1).unwrap(), 0.1);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(ParameterSet::from_value("x", json!([1, 2])).is_err());
    }

    #[test]
    fn test_scalar_is_not_a_nested_block() {
        let pset = producer_pset();
        assert!(pset
            .get_parameter_set("muon_seed_collection_label")
            .is_err());
    }
}
