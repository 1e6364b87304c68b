use serde::Deserialize;

/// What to do with an NDJSON record that is not valid JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Fail the whole response, citing the offending line
    #[default]
    Abort,
    /// Drop the line and keep decoding the rest
    Skip,
}
