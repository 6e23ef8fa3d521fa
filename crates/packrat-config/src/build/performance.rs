use serde::{Deserialize, Serialize};
use std::fmt;

use crate::build::helpers::default_size_budget;
use crate::build::types::PerformanceHints;

/// Size budget for emitted artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Performance {
    #[serde(default)]
    pub hints: PerformanceHints,

    /// Budget for the combined initial assets of one entrypoint (bytes)
    #[serde(default = "default_size_budget")]
    pub max_entrypoint_size: u64,

    /// Budget for any single emitted asset (bytes)
    #[serde(default = "default_size_budget")]
    pub max_asset_size: u64,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            hints: PerformanceHints::default(),
            max_entrypoint_size: default_size_budget(),
            max_asset_size: default_size_budget(),
        }
    }
}

/// An emitted file and its size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSize {
    pub name: String,
    pub size: u64,
}

/// An entrypoint and the assets it loads up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrypointAssets {
    pub name: String,
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetSubject {
    Asset(String),
    Entrypoint(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetViolation {
    pub subject: BudgetSubject,
    pub size: u64,
    pub limit: u64,
}

impl fmt::Display for BudgetViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, name) = match &self.subject {
            BudgetSubject::Asset(name) => ("asset", name),
            BudgetSubject::Entrypoint(name) => ("entrypoint", name),
        };
        write!(
            f,
            "{kind} `{name}` is {} bytes, over the {} byte limit",
            self.size, self.limit
        )
    }
}

/// Outcome of checking a build against [`Performance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetReport {
    /// `Off` means the budget was not checked and `violations` is empty
    pub severity: PerformanceHints,
    pub violations: Vec<BudgetViolation>,
}

impl BudgetReport {
    pub fn is_failure(&self) -> bool {
        self.severity == PerformanceHints::Error && !self.violations.is_empty()
    }
}

impl Performance {
    /// Assets the budget never applies to (source maps, extracted licenses)
    pub fn is_budgeted(asset: &str) -> bool {
        !(asset.ends_with(".map") || asset.ends_with(".LICENSE.txt"))
    }

    pub fn evaluate(&self, assets: &[AssetSize], entrypoints: &[EntrypointAssets]) -> BudgetReport {
        if self.hints == PerformanceHints::Off {
            return BudgetReport {
                severity: PerformanceHints::Off,
                violations: Vec::new(),
            };
        }

        let mut violations: Vec<BudgetViolation> = assets
            .iter()
            .filter(|asset| Self::is_budgeted(&asset.name) && asset.size > self.max_asset_size)
            .map(|asset| BudgetViolation {
                subject: BudgetSubject::Asset(asset.name.clone()),
                size: asset.size,
                limit: self.max_asset_size,
            })
            .collect();

        for entry in entrypoints {
            let size: u64 = entry
                .assets
                .iter()
                .filter(|name| Self::is_budgeted(name))
                .filter_map(|name| assets.iter().find(|asset| &asset.name == name))
                .map(|asset| asset.size)
                .sum();
            if size > self.max_entrypoint_size {
                violations.push(BudgetViolation {
                    subject: BudgetSubject::Entrypoint(entry.name.clone()),
                    size,
                    limit: self.max_entrypoint_size,
                });
            }
        }

        BudgetReport {
            severity: self.hints,
            violations,
        }
    }
}
