use std::fmt;

use serde::{Deserialize, Serialize};

/// Build profile; controls the engine's optimization defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Optimized output (default)
    #[default]
    Production,
    /// Fast rebuilds, readable output
    Development,
    /// No mode-dependent defaults
    None,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Production => "production",
            Mode::Development => "development",
            Mode::None => "none",
        })
    }
}

/// Accepts `eval` or `[inline-|hidden-|eval-][nosources-][cheap-[module-]]source-map`.
fn is_devtool_style(style: &str) -> bool {
    if style == "eval" {
        return true;
    }
    let mut rest = style;
    for prefix in ["inline-", "hidden-", "eval-"] {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped;
            break;
        }
    }
    rest = rest.strip_prefix("nosources-").unwrap_or(rest);
    if let Some(stripped) = rest.strip_prefix("cheap-") {
        rest = stripped.strip_prefix("module-").unwrap_or(stripped);
    }
    rest == "source-map"
}

/// Source map policy.
///
/// Serialized as `false` (no source maps) or a style such as
/// `"cheap-module-source-map"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DevtoolRepr", into = "DevtoolRepr")]
pub enum Devtool {
    #[default]
    Off,
    Style(String),
}

impl Devtool {
    pub fn emits_source_maps(&self) -> bool {
        matches!(self, Devtool::Style(_))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DevtoolRepr {
    Flag(bool),
    Style(String),
}

impl TryFrom<DevtoolRepr> for Devtool {
    type Error = String;

    fn try_from(repr: DevtoolRepr) -> Result<Self, Self::Error> {
        match repr {
            DevtoolRepr::Flag(false) => Ok(Devtool::Off),
            DevtoolRepr::Flag(true) => {
                Err("`true` is not a devtool; use false or a source map style".to_string())
            }
            DevtoolRepr::Style(style) if is_devtool_style(&style) => Ok(Devtool::Style(style)),
            DevtoolRepr::Style(style) => Err(format!(
                "unknown devtool `{style}` (expected e.g. `source-map`, `eval-cheap-module-source-map`)"
            )),
        }
    }
}

impl From<Devtool> for DevtoolRepr {
    fn from(devtool: Devtool) -> Self {
        match devtool {
            Devtool::Off => DevtoolRepr::Flag(false),
            Devtool::Style(style) => DevtoolRepr::Style(style),
        }
    }
}

/// What to do when an asset or entrypoint exceeds its budget.
///
/// Serialized as `false`, `"warning"` or `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "HintsRepr", into = "HintsRepr")]
pub enum PerformanceHints {
    Off,
    #[default]
    Warning,
    Error,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum HintsRepr {
    Flag(bool),
    Level(String),
}

impl TryFrom<HintsRepr> for PerformanceHints {
    type Error = String;

    fn try_from(repr: HintsRepr) -> Result<Self, String> {
        match repr {
            HintsRepr::Flag(false) => Ok(PerformanceHints::Off),
            HintsRepr::Flag(true) => {
                Err("`true` is not a hint level; use false, \"warning\" or \"error\"".to_string())
            }
            HintsRepr::Level(level) => match level.as_str() {
                "warning" => Ok(PerformanceHints::Warning),
                "error" => Ok(PerformanceHints::Error),
                other => Err(format!(
                    "unknown hint level `{other}` (expected false, \"warning\" or \"error\")"
                )),
            },
        }
    }
}

impl From<PerformanceHints> for HintsRepr {
    fn from(hints: PerformanceHints) -> Self {
        match hints {
            PerformanceHints::Off => HintsRepr::Flag(false),
            PerformanceHints::Warning => HintsRepr::Level("warning".to_string()),
            PerformanceHints::Error => HintsRepr::Level("error".to_string()),
        }
    }
}

/// Which chunks a split-chunks group may select from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkFilter {
    /// Only on-demand chunks (engine default)
    #[default]
    Async,
    /// Only entry chunks
    Initial,
    /// Both
    All,
}

impl fmt::Display for ChunkFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChunkFilter::Async => "async",
            ChunkFilter::Initial => "initial",
            ChunkFilter::All => "all",
        })
    }
}
