use serde::{Deserialize, Serialize};

/// Template-echo settings: the zones this handler answers for, the TTL
/// stamped on every synthesized record, and the verbose decode-log toggle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EchoConfig {
    /// Domain suffixes handled by the echo pipeline. Lower-case, no leading
    /// or trailing dot; a query matches when everything after its first
    /// label equals one of these exactly.
    #[serde(default)]
    pub zones: Vec<String>,

    #[serde(default = "default_ttl")]
    pub ttl: u32,

    /// Log every decode outcome at debug level.
    #[serde(default)]
    pub debug: bool,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            ttl: default_ttl(),
            debug: false,
        }
    }
}

fn default_ttl() -> u32 {
    60
}
