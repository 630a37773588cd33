use serde::{Deserialize, Serialize};

/// Settings shared by every sink unless overridden per sink.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    /// Space-separated field directives for text-mode output.
    #[serde(default = "default_text_format")]
    pub text_format: String,

    #[serde(default = "default_text_delimiter")]
    pub text_format_delimiter: String,

    #[serde(default = "default_text_boundary")]
    pub text_format_boundary: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            text_format: default_text_format(),
            text_format_delimiter: default_text_delimiter(),
            text_format_boundary: default_text_boundary(),
        }
    }
}

fn default_text_format() -> String {
    "timestamp-rfc3339 operation family protocol query-ip query-port qname qtype rcode latency"
        .to_string()
}

fn default_text_delimiter() -> String {
    " ".to_string()
}

fn default_text_boundary() -> String {
    "\"".to_string()
}
