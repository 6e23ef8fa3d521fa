use clap::ValueEnum;

/// Serialization format for the resolved configuration
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON, the engine's native schema
    #[default]
    #[value(name = "json")]
    Json,

    /// TOML, the same shape as `packrat.toml`
    #[value(name = "toml")]
    Toml,
}
