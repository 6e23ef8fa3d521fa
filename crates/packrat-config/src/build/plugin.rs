use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::build::helpers::{default_css_filename, default_html_filename};
use crate::build::output::FilenameTemplate;

/// Loader that pairs with [`PluginSpec::MiniCssExtract`]
pub const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";

/// An output plugin, tagged by `plugin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginSpec {
    /// Extract imported styles into separate, content-hashed CSS files
    MiniCssExtract(CssExtractOptions),
    /// Emit an HTML page that references the entry chunks
    Html(HtmlOptions),
    /// Compile-time constant replacements
    Define(DefineOptions),
}

impl PluginSpec {
    pub fn name(&self) -> &'static str {
        match self {
            PluginSpec::MiniCssExtract(_) => "mini-css-extract",
            PluginSpec::Html(_) => "html",
            PluginSpec::Define(_) => "define",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CssExtractOptions {
    /// Template for stylesheets of entry chunks
    #[serde(default = "default_css_filename")]
    pub filename: String,

    /// Template for stylesheets of on-demand chunks; defaults to `filename`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,

    /// Silence import-order conflict warnings
    #[serde(default)]
    pub ignore_order: bool,
}

impl Default for CssExtractOptions {
    fn default() -> Self {
        Self {
            filename: default_css_filename(),
            chunk_filename: None,
            ignore_order: false,
        }
    }
}

impl CssExtractOptions {
    pub fn filename_template(&self) -> FilenameTemplate {
        FilenameTemplate::new(&self.filename)
    }

    pub fn chunk_filename_template(&self) -> FilenameTemplate {
        FilenameTemplate::new(self.chunk_filename.as_deref().unwrap_or(&self.filename))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HtmlOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    #[serde(default = "default_html_filename")]
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            template: None,
            filename: default_html_filename(),
            title: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DefineOptions {
    /// Identifier → replacement source text, e.g.
    /// `"process.env.NODE_ENV" = "\"production\""`
    #[serde(default)]
    pub definitions: IndexMap<String, String>,
}
