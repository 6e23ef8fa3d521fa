use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::build::helpers::{default_max_requests, default_min_size, default_passes, default_true};
use crate::build::rules::Pattern;
use crate::build::types::ChunkFilter;

/// Optimization policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Optimization {
    /// Minify output. Unset means "follow the mode" (on in production).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,

    /// Minifiers to run when minimizing
    #[serde(default)]
    pub minimizer: Vec<MinimizerSpec>,

    /// Chunk splitting policy
    #[serde(default)]
    pub split_chunks: SplitChunks,
}

/// A minifier plugin instance, tagged by `plugin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum MinimizerSpec {
    /// JavaScript minifier
    Terser(TerserPluginOptions),
    /// CSS minifier
    CssMinimizer(CssMinimizerOptions),
}

impl MinimizerSpec {
    pub fn name(&self) -> &'static str {
        match self {
            MinimizerSpec::Terser(_) => "terser",
            MinimizerSpec::CssMinimizer(_) => "css-minimizer",
        }
    }

    pub fn parallel(&self) -> WorkerParallelism {
        match self {
            MinimizerSpec::Terser(options) => options.parallel,
            MinimizerSpec::CssMinimizer(options) => options.parallel,
        }
    }
}

/// Minifier worker usage: `true` (engine decides), `false` (single worker)
/// or an explicit worker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WorkerParallelism {
    Enabled(bool),
    Workers(u32),
}

impl Default for WorkerParallelism {
    fn default() -> Self {
        WorkerParallelism::Enabled(true)
    }
}

impl WorkerParallelism {
    /// Worker count given the number of available CPUs.
    pub fn worker_count(&self, available: u32) -> u32 {
        match *self {
            WorkerParallelism::Enabled(false) => 1,
            WorkerParallelism::Enabled(true) => available.saturating_sub(1).max(1),
            WorkerParallelism::Workers(count) => count,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TerserPluginOptions {
    #[serde(default)]
    pub parallel: WorkerParallelism,

    /// Move license comments into a separate `.LICENSE.txt` file
    #[serde(default = "default_true")]
    pub extract_comments: bool,

    #[serde(default)]
    pub terser_options: TerserOptions,
}

/// Options forwarded to the minifier itself (snake_case, as the minifier spells them)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TerserOptions {
    #[serde(default)]
    pub compress: CompressOptions,

    /// Shorten local names
    #[serde(default = "default_true")]
    pub mangle: bool,
}

impl Default for TerserOptions {
    fn default() -> Self {
        Self {
            compress: CompressOptions::default(),
            mangle: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompressOptions {
    #[serde(default)]
    pub drop_console: bool,

    #[serde(default = "default_true")]
    pub drop_debugger: bool,

    #[serde(default = "default_passes")]
    pub passes: u32,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            drop_console: false,
            drop_debugger: true,
            passes: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CssMinimizerOptions {
    #[serde(default)]
    pub parallel: WorkerParallelism,
}

/// Chunk splitting policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SplitChunks {
    #[serde(default)]
    pub chunks: ChunkFilter,

    /// Smallest chunk (bytes) worth splitting out
    #[serde(default = "default_min_size")]
    pub min_size: u64,

    /// Chunks larger than this are split further (bytes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,

    #[serde(default = "default_max_requests")]
    pub max_async_requests: u32,

    #[serde(default = "default_max_requests")]
    pub max_initial_requests: u32,

    /// Named output groups
    #[serde(default)]
    pub cache_groups: IndexMap<String, CacheGroup>,
}

impl Default for SplitChunks {
    fn default() -> Self {
        Self {
            chunks: ChunkFilter::default(),
            min_size: default_min_size(),
            max_size: None,
            max_async_requests: default_max_requests(),
            max_initial_requests: default_max_requests(),
            cache_groups: IndexMap::new(),
        }
    }
}

impl SplitChunks {
    /// The cache group a module lands in: the highest-priority group whose
    /// `test` matches, earliest declared on ties. Groups without `test`
    /// match every module.
    pub fn group_for(&self, module: &str) -> Option<(&str, &CacheGroup)> {
        let mut selected: Option<(&str, &CacheGroup)> = None;
        for (key, group) in &self.cache_groups {
            let matches = group.test.as_ref().is_none_or(|test| test.is_match(module));
            if !matches {
                continue;
            }
            match selected {
                Some((_, current)) if current.priority >= group.priority => {}
                _ => selected = Some((key.as_str(), group)),
            }
        }
        selected
    }

    /// Chunk filter a group effectively uses.
    pub fn chunks_for(&self, group: &CacheGroup) -> ChunkFilter {
        group.chunks.unwrap_or(self.chunks)
    }
}

/// One named output group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CacheGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Pattern>,

    /// Output chunk name; the group key is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub priority: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_chunks: Option<u32>,

    #[serde(default)]
    pub reuse_existing_chunk: bool,

    /// Ignore size and request limits for this group
    #[serde(default)]
    pub enforce: bool,
}
