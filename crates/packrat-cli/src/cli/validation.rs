use packrat_config::presets::PRESETS;

/// Parse a `--preset` value.
///
/// Accepts the built-in preset names and `none`, which disables the preset
/// layer.
///
/// # Errors
///
/// Returns an error message listing the accepted names.
pub fn parse_preset(s: &str) -> Result<String, String> {
    let name = s.trim().to_ascii_lowercase();
    if name == "none" || PRESETS.contains(&name.as_str()) {
        Ok(name)
    } else {
        Err(format!(
            "unknown preset '{s}' (expected one of: {}, none)",
            PRESETS.join(", ")
        ))
    }
}
