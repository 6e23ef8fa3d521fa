//! Configuration layers and the on-disk file shape.
//!
//! A [`ConfigLayer`] is a validated, partial build record kept as a JSON
//! value so it can be merged structurally. A [`ConfigFile`] is what a
//! `packrat.toml` holds: build fields, an optional `extends` base file and
//! named override profiles.

use figment::Figment;
use figment::error::Kind;
use figment::providers::Serialized;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::build::BuildConfig;
use crate::error::{ConfigError, Result, SchemaViolation};
use crate::merge::{MergeRules, merge_values, strip_nulls};

/// Deserialize `value` strictly, reporting every problem with its key path.
///
/// `null` members are treated as absent. Figment reports the key paths, but
/// its dictionaries are sorted, so the record itself is read straight from
/// the JSON value to keep named maps in declaration order.
pub(crate) fn extract<T: DeserializeOwned>(value: &Value, origin: &str) -> Result<T> {
    let value = strip_nulls(value);
    if !value.is_object() {
        return Err(ConfigError::Schema {
            origin: origin.to_string(),
            violations: vec![SchemaViolation {
                path: String::new(),
                message: format!("expected a table of build options, found {}", kind_of(&value)),
            }],
        });
    }

    let checked = Figment::from(Serialized::defaults(&value))
        .extract::<T>()
        .map_err(|err| ConfigError::Schema {
            origin: origin.to_string(),
            violations: err.into_iter().map(violation).collect(),
        })?;
    Ok(serde_json::from_value(value).unwrap_or(checked))
}

fn violation(err: figment::Error) -> SchemaViolation {
    let mut path = err.path.clone();
    if let Kind::UnknownField(field, _) = &err.kind {
        if path.last() != Some(field) {
            path.push(field.clone());
        }
    }
    SchemaViolation {
        path: path.join("."),
        message: err.kind.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// A validated partial build configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigLayer {
    origin: String,
    value: Value,
}

impl ConfigLayer {
    /// Validate `value` as a (possibly partial) build record.
    ///
    /// `origin` names the layer in error messages (a file path, a preset
    /// name, `env`).
    ///
    /// Keys the layer sets keep their meaning, but values are stored in
    /// canonical form: array elements and scalars carry every default, so an
    /// element repeated by a later layer is recognised as already present.
    pub fn new(origin: impl Into<String>, value: Value) -> Result<Self> {
        let origin = origin.into();
        let resolved = extract::<BuildConfig>(&value, &origin)?;
        let full = resolved.to_value()?;
        Ok(Self {
            value: canonicalize(&value, &full),
            origin,
        })
    }

    /// Wrap a value known to satisfy the schema, such as a built-in preset.
    pub(crate) fn trusted(origin: impl Into<String>, value: Value) -> Self {
        let origin = origin.into();
        match Self::new(origin.clone(), value.clone()) {
            Ok(layer) => layer,
            Err(err) => {
                warn!(origin = %origin, error = %err, "built-in layer does not satisfy the schema");
                Self { origin, value }
            }
        }
    }

    /// A layer that changes nothing.
    pub fn empty(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            value: Value::Object(Map::new()),
        }
    }

    pub fn from_config(origin: impl Into<String>, config: &BuildConfig) -> Result<Self> {
        Ok(Self {
            origin: origin.into(),
            value: config.to_value()?,
        })
    }

    pub fn from_json_str(origin: impl Into<String>, source: &str) -> Result<Self> {
        let origin = origin.into();
        let value = serde_json::from_str(source).map_err(|e| ConfigError::Parse {
            origin: origin.clone(),
            message: e.to_string(),
        })?;
        Self::new(origin, value)
    }

    pub fn from_toml_str(origin: impl Into<String>, source: &str) -> Result<Self> {
        let origin = origin.into();
        let value = toml_to_json(&origin, source)?;
        Self::new(origin, value)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.as_object().is_some_and(Map::is_empty)
    }

    /// This layer with `overlay` merged on top. Pure: neither input changes.
    pub fn merged(&self, overlay: &ConfigLayer, rules: &MergeRules) -> ConfigLayer {
        debug!(base = %self.origin, overlay = %overlay.origin, "merging configuration layer");
        ConfigLayer {
            origin: format!("{} + {}", self.origin, overlay.origin),
            value: merge_values(&self.value, &overlay.value, rules),
        }
    }

    /// Fold `layers` left to right on top of this one.
    pub fn merged_all<'a>(
        &self,
        layers: impl IntoIterator<Item = &'a ConfigLayer>,
        rules: &MergeRules,
    ) -> ConfigLayer {
        layers
            .into_iter()
            .fold(self.clone(), |acc, layer| acc.merged(layer, rules))
    }

    /// Resolve into the typed record, filling defaults for absent fields.
    pub fn resolve(&self) -> Result<BuildConfig> {
        extract(&self.value, &self.origin)
    }
}

/// Restrict the fully resolved `full` to the keys present in `partial`.
///
/// Objects recurse so unset keys stay unset; arrays and scalars take the
/// resolved form. `null` members are kept since they remove keys on merge.
fn canonicalize(partial: &Value, full: &Value) -> Value {
    match (partial, full) {
        (Value::Object(partial), Value::Object(full)) => Value::Object(
            partial
                .iter()
                .map(|(key, value)| {
                    let value = match full.get(key) {
                        Some(resolved) if !value.is_null() => canonicalize(value, resolved),
                        _ => value.clone(),
                    };
                    (key.clone(), value)
                })
                .collect(),
        ),
        (_, full) => full.clone(),
    }
}

pub(crate) fn toml_to_json(origin: &str, source: &str) -> Result<Value> {
    let parsed: toml::Value = toml::from_str(source).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        message: format!("invalid TOML: {e}"),
    })?;
    serde_json::to_value(parsed).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        message: format!("TOML to JSON conversion failed: {e}"),
    })
}

/// Contents of one configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Base file this one builds on, relative to this file
    pub extends: Option<String>,
    /// The build fields of this file
    pub layer: ConfigLayer,
    /// Named override layers, applied on demand
    pub profiles: IndexMap<String, ConfigLayer>,
}

impl ConfigFile {
    /// Split a parsed file into its `extends`, build fields and profiles.
    ///
    /// # Example
    ///
    /// ```
    /// use packrat_config::ConfigFile;
    /// use serde_json::json;
    ///
    /// let file = ConfigFile::from_value("packrat.json", json!({
    ///     "extends": "./packrat.base.json",
    ///     "mode": "development",
    ///     "profiles": { "production": { "mode": "production" } }
    /// }))
    /// .unwrap();
    /// assert_eq!(file.extends.as_deref(), Some("./packrat.base.json"));
    /// assert!(file.profiles.contains_key("production"));
    /// ```
    pub fn from_value(origin: &str, value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(ConfigError::Schema {
                origin: origin.to_string(),
                violations: vec![SchemaViolation {
                    path: String::new(),
                    message: format!("expected a table of build options, found {}", kind_of(&value)),
                }],
            });
        };

        let extends = match map.remove("extends") {
            None | Some(Value::Null) => None,
            Some(Value::String(path)) => Some(path),
            Some(other) => {
                return Err(ConfigError::Schema {
                    origin: origin.to_string(),
                    violations: vec![SchemaViolation {
                        path: "extends".to_string(),
                        message: format!("expected a file path string, found {}", kind_of(&other)),
                    }],
                });
            }
        };

        let mut profiles = IndexMap::new();
        match map.remove("profiles") {
            None | Some(Value::Null) => {}
            Some(Value::Object(entries)) => {
                for (name, overrides) in entries {
                    let layer = ConfigLayer::new(format!("{origin}#profiles.{name}"), overrides)
                        .map_err(|err| prefix_paths(err, &format!("profiles.{name}")))?;
                    profiles.insert(name, layer);
                }
            }
            Some(other) => {
                return Err(ConfigError::Schema {
                    origin: origin.to_string(),
                    violations: vec![SchemaViolation {
                        path: "profiles".to_string(),
                        message: format!("expected a table of profiles, found {}", kind_of(&other)),
                    }],
                });
            }
        }

        Ok(Self {
            extends,
            layer: ConfigLayer::new(origin, Value::Object(map))?,
            profiles,
        })
    }

    pub fn from_toml_str(origin: &str, source: &str) -> Result<Self> {
        Self::from_value(origin, toml_to_json(origin, source)?)
    }

    pub fn from_json_str(origin: &str, source: &str) -> Result<Self> {
        let value = serde_json::from_str(source).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        Self::from_value(origin, value)
    }

    pub fn profile(&self, name: &str) -> Result<&ConfigLayer> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }
}

fn prefix_paths(err: ConfigError, prefix: &str) -> ConfigError {
    match err {
        ConfigError::Schema { origin, violations } => ConfigError::Schema {
            origin,
            violations: violations
                .into_iter()
                .map(|v| SchemaViolation {
                    path: if v.path.is_empty() {
                        prefix.to_string()
                    } else {
                        format!("{prefix}.{}", v.path)
                    },
                    message: v.message,
                })
                .collect(),
        },
        other => other,
    }
}
