use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::build::helpers::{default_filename, default_output_path};

/// Digest length used when a hash placeholder carries no explicit length
pub const DEFAULT_HASH_LENGTH: usize = 20;

/// Where and how emitted files are named
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputOptions {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default = "default_filename")]
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Empty the output directory before emitting
    #[serde(default)]
    pub clean: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            filename: default_filename(),
            chunk_filename: None,
            public_path: None,
            clean: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResolveOptions {
    /// Extensions tried, in order, for extension-less imports
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Import prefix → replacement path
    #[serde(default)]
    pub alias: IndexMap<String, String>,
}

/// A `[placeholder]` inside a filename template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Name,
    Id,
    Ext,
    /// Digest of the file contents, optionally truncated
    ContentHash(Option<usize>),
    ChunkHash(Option<usize>),
    FullHash(Option<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    Unclosed { template: String },
    Unknown { template: String, placeholder: String },
    BadLength { template: String, placeholder: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Unclosed { template } => {
                write!(f, "unclosed `[` in filename template `{template}`")
            }
            TemplateError::Unknown {
                template,
                placeholder,
            } => write!(
                f,
                "unknown placeholder `[{placeholder}]` in `{template}` (known: name, id, ext, contenthash, chunkhash, fullhash)"
            ),
            TemplateError::BadLength {
                template,
                placeholder,
            } => write!(
                f,
                "hash length in `[{placeholder}]` of `{template}` must be between 1 and 64"
            ),
        }
    }
}

impl std::error::Error for TemplateError {}

enum Segment<'a> {
    Literal(&'a str),
    Token(Placeholder),
}

/// What a template is rendered against
#[derive(Debug, Clone, Copy)]
pub struct AssetSource<'a> {
    pub name: &'a str,
    pub id: &'a str,
    /// Extension including the leading dot
    pub ext: &'a str,
    pub contents: &'a [u8],
}

/// An output filename template such as `styles/[name].[contenthash:8].css`.
///
/// There is no compilation here, so chunk and full hashes are derived from
/// the same contents digest as `[contenthash]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    raw: String,
}

impl FilenameTemplate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn placeholders(&self) -> Result<Vec<Placeholder>, TemplateError> {
        Ok(self
            .segments()?
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Token(placeholder) => Some(placeholder),
                Segment::Literal(_) => None,
            })
            .collect())
    }

    /// Whether the rendered name changes when the contents change.
    pub fn is_content_addressed(&self) -> bool {
        self.placeholders().is_ok_and(|placeholders| {
            placeholders.iter().any(|p| {
                matches!(
                    p,
                    Placeholder::ContentHash(_) | Placeholder::ChunkHash(_) | Placeholder::FullHash(_)
                )
            })
        })
    }

    pub fn render(&self, asset: &AssetSource<'_>) -> Result<String, TemplateError> {
        let segments = self.segments()?;
        let digest = blake3::hash(asset.contents).to_hex();
        let hash = |len: Option<usize>| {
            let len = len.unwrap_or(DEFAULT_HASH_LENGTH);
            digest.as_str()[..len].to_string()
        };

        let mut rendered = String::with_capacity(self.raw.len() + DEFAULT_HASH_LENGTH);
        for segment in segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Token(Placeholder::Name) => rendered.push_str(asset.name),
                Segment::Token(Placeholder::Id) => rendered.push_str(asset.id),
                Segment::Token(Placeholder::Ext) => rendered.push_str(asset.ext),
                Segment::Token(
                    Placeholder::ContentHash(len)
                    | Placeholder::ChunkHash(len)
                    | Placeholder::FullHash(len),
                ) => rendered.push_str(&hash(len)),
            }
        }
        Ok(rendered)
    }

    /// A regex matching the file names this template produces for chunk
    /// `name`, whatever the id, extension or hash.
    pub fn matcher(&self, name: &str) -> Result<Regex, TemplateError> {
        let mut pattern = String::from("^");
        for segment in self.segments()? {
            match segment {
                Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
                Segment::Token(Placeholder::Name) => pattern.push_str(&regex::escape(name)),
                Segment::Token(Placeholder::Id) => pattern.push_str("[^/]+"),
                Segment::Token(Placeholder::Ext) => pattern.push_str(r"\.[^/.]+"),
                Segment::Token(
                    Placeholder::ContentHash(len)
                    | Placeholder::ChunkHash(len)
                    | Placeholder::FullHash(len),
                ) => match len {
                    Some(len) => pattern.push_str(&format!("[0-9a-f]{{{len}}}")),
                    None => pattern.push_str("[0-9a-f]+"),
                },
            }
        }
        pattern.push('$');
        Regex::new(&pattern).map_err(|_| TemplateError::Unknown {
            template: self.raw.clone(),
            placeholder: name.to_string(),
        })
    }

    fn segments(&self) -> Result<Vec<Segment<'_>>, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = self.raw.as_str();
        while let Some(start) = rest.find('[') {
            if start > 0 {
                segments.push(Segment::Literal(&rest[..start]));
            }
            let after = &rest[start + 1..];
            let end = after.find(']').ok_or_else(|| TemplateError::Unclosed {
                template: self.raw.clone(),
            })?;
            segments.push(Segment::Token(self.parse_placeholder(&after[..end])?));
            rest = &after[end + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        Ok(segments)
    }

    fn parse_placeholder(&self, token: &str) -> Result<Placeholder, TemplateError> {
        let (name, length) = match token.split_once(':') {
            Some((name, length)) => {
                let parsed = length
                    .parse::<usize>()
                    .ok()
                    .filter(|len| (1..=64).contains(len))
                    .ok_or_else(|| TemplateError::BadLength {
                        template: self.raw.clone(),
                        placeholder: token.to_string(),
                    })?;
                (name, Some(parsed))
            }
            None => (token, None),
        };

        let placeholder = match (name, length) {
            ("name", None) => Placeholder::Name,
            ("id", None) => Placeholder::Id,
            ("ext", None) => Placeholder::Ext,
            ("contenthash", len) => Placeholder::ContentHash(len),
            ("chunkhash", len) => Placeholder::ChunkHash(len),
            ("fullhash" | "hash", len) => Placeholder::FullHash(len),
            _ => {
                return Err(TemplateError::Unknown {
                    template: self.raw.clone(),
                    placeholder: token.to_string(),
                });
            }
        };
        Ok(placeholder)
    }
}

impl fmt::Display for FilenameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
