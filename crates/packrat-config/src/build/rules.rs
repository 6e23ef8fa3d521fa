use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A resource pattern (regular expression source, without slashes).
///
/// `/\.css$/` in an engine config becomes `"\\.css$"` here. Equality compares
/// the source text.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&source)?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test a resource path. Backslashes are normalized to `/` first so
    /// patterns like `[\\/]node_modules[\\/]` behave the same on every platform.
    pub fn is_match(&self, resource: &str) -> bool {
        self.regex.is_match(resource) || self.regex.is_match(&resource.replace('\\', "/"))
    }
}

impl TryFrom<String> for Pattern {
    type Error = String;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Pattern::new(source).map_err(|err| format!("invalid pattern: {err}"))
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.source)
    }
}

/// Module transformation rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModuleOptions {
    /// Ordered rules; every matching rule contributes its loaders
    #[serde(default)]
    pub rules: Vec<RuleSetRule>,
}

impl ModuleOptions {
    /// Loaders applied to `resource`, in execution order.
    ///
    /// Rules are visited in declaration order and each rule's `use` list runs
    /// last-to-first, so `["style-loader", "css-loader"]` executes
    /// `css-loader` before `style-loader`.
    pub fn pipeline_for(&self, resource: &str) -> Vec<&UseEntry> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(resource))
            .flat_map(|rule| rule.use_entries.iter().rev())
            .collect()
    }

    /// Rules that match `resource`, in declaration order.
    pub fn matching_rules<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a RuleSetRule> + 'a {
        self.rules.iter().filter(move |rule| rule.matches(resource))
    }
}

/// One `(pattern, pipeline)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleSetRule {
    /// Resource pattern the rule applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Pattern>,

    /// Path prefixes the resource must live under (any of)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Patterns that exclude a resource even when `test` matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Pattern>,

    /// Loaders, written in the engine's right-to-left order
    #[serde(default, rename = "use")]
    pub use_entries: Vec<UseEntry>,

    /// Built-in module type instead of loaders (e.g. `asset/resource`)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
}

impl RuleSetRule {
    pub fn matches(&self, resource: &str) -> bool {
        if self.test.is_none() && self.include.is_empty() {
            return false;
        }
        if let Some(test) = &self.test {
            if !test.is_match(resource) {
                return false;
            }
        }
        let normalized = resource.replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");
        if !self.include.is_empty()
            && !self
                .include
                .iter()
                .any(|prefix| normalized.starts_with(prefix.trim_start_matches("./")))
        {
            return false;
        }
        !self.exclude.iter().any(|pattern| pattern.is_match(resource))
    }

    pub fn loader_names(&self) -> impl Iterator<Item = &str> {
        self.use_entries.iter().map(UseEntry::loader)
    }
}

/// A loader reference: a bare name or `{ loader, options }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UseEntry {
    Name(String),
    Detailed(LoaderSpec),
}

impl UseEntry {
    pub fn loader(&self) -> &str {
        match self {
            UseEntry::Name(name) => name,
            UseEntry::Detailed(spec) => &spec.loader,
        }
    }
}

impl From<&str> for UseEntry {
    fn from(name: &str) -> Self {
        UseEntry::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoaderSpec {
    pub loader: String,

    /// Loader-specific options, forwarded untouched
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(value: Value) -> RuleSetRule {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn pattern_round_trips_as_source_text() {
        let pattern = Pattern::new(r"\.css$").unwrap();
        assert_eq!(serde_json::to_value(&pattern).unwrap(), json!(r"\.css$"));
        assert!(pattern.is_match("src/app.css"));
        assert!(!pattern.is_match("src/app.css.map"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(serde_json::from_value::<Pattern>(json!("(unclosed")).is_err());
    }

    #[test]
    fn vendor_pattern_matches_both_separators() {
        let pattern = Pattern::new(r"[\\/]node_modules[\\/]").unwrap();
        assert!(pattern.is_match("/app/node_modules/react/index.js"));
        assert!(pattern.is_match(r"C:\app\node_modules\react\index.js"));
    }

    #[test]
    fn pipeline_runs_loaders_right_to_left() {
        let module = ModuleOptions {
            rules: vec![
                rule(json!({"test": r"\.css$", "use": ["style-loader", {"loader": "css-loader", "options": {"modules": true}}]})),
                rule(json!({"test": r"\.js$", "use": ["babel-loader"]})),
            ],
        };
        let loaders: Vec<_> = module.pipeline_for("src/app.css").into_iter().map(UseEntry::loader).collect();
        assert_eq!(loaders, vec!["css-loader", "style-loader"]);
        assert!(module.pipeline_for("src/logo.svg").is_empty());
    }

    #[test]
    fn exclude_and_include_narrow_a_rule() {
        let r = rule(json!({
            "test": r"\.js$",
            "include": ["src/"],
            "exclude": ["legacy"],
            "use": ["babel-loader"]
        }));
        assert!(r.matches("src/index.js"));
        assert!(!r.matches("src/legacy/old.js"));
        assert!(!r.matches("vendor/index.js"));
    }

    #[test]
    fn rule_rejects_unknown_keys() {
        let result = serde_json::from_value::<RuleSetRule>(json!({"test": r"\.css$", "loaders": []}));
        assert!(result.is_err());
    }
}
