use std::path::PathBuf;

// Helper defaults
pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_output_path() -> PathBuf {
    PathBuf::from("dist")
}

pub(crate) fn default_filename() -> String {
    "[name].js".to_string()
}

pub(crate) fn default_parallelism() -> u32 {
    100
}

pub(crate) fn default_size_budget() -> u64 {
    250_000
}

pub(crate) fn default_min_size() -> u64 {
    20_000
}

pub(crate) fn default_max_requests() -> u32 {
    30
}

pub(crate) fn default_passes() -> u32 {
    1
}

pub(crate) fn default_css_filename() -> String {
    "[name].css".to_string()
}

pub(crate) fn default_html_filename() -> String {
    "index.html".to_string()
}
