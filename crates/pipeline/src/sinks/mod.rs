pub mod syslog;
pub mod tcp;

use dnstail_domain::{Config, DnsMessage, SinkMode};

/// Turns messages into wire frames for a sink, honoring its mode and
/// per-sink text-format override.
pub(crate) struct MessageEncoder {
    mode: SinkMode,
    fields: Vec<String>,
    delimiter: String,
    boundary: String,
}

impl MessageEncoder {
    pub fn new(config: &Config, mode: SinkMode, text_format: &Option<String>) -> Self {
        let format = text_format
            .as_deref()
            .unwrap_or(&config.global.text_format);
        Self {
            mode,
            fields: format.split_whitespace().map(str::to_string).collect(),
            delimiter: config.global.text_format_delimiter.clone(),
            boundary: config.global.text_format_boundary.clone(),
        }
    }

    pub fn encode(&self, dm: &DnsMessage) -> Vec<u8> {
        match self.mode {
            SinkMode::Text => dm
                .text_line(&self.fields, &self.delimiter, &self.boundary)
                .into_bytes(),
            SinkMode::Json => serde_json::to_vec(dm).unwrap_or_default(),
        }
    }
}
