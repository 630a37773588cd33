use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::record::RecordSections;

/// Whether the message travelled client → server or back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Query,
    Reply,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Query => "query",
            MessageKind::Reply => "reply",
        }
    }
}

/// Transport-level context stamped by the ingest layer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworkInfo {
    pub family: String,
    pub protocol: String,
    #[serde(rename = "query-ip")]
    pub query_ip: String,
    #[serde(rename = "query-port")]
    pub query_port: u16,
    #[serde(rename = "response-ip")]
    pub response_ip: String,
    #[serde(rename = "response-port")]
    pub response_port: u16,
}

/// The header flag bits downstream consumers care about.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DnsFlags {
    pub qr: bool,
    pub tc: bool,
    pub aa: bool,
    pub ra: bool,
    pub ad: bool,
}

/// Decoded DNS portion of a message.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DnsSection {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub id: u16,
    pub opcode: u8,
    pub rcode: String,
    pub qname: String,
    pub qtype: String,
    pub length: usize,
    pub flags: DnsFlags,
    #[serde(rename = "malformed-packet")]
    pub malformed_packet: bool,
    #[serde(rename = "resource-records")]
    pub resource_records: RecordSections,
    /// Raw wire bytes; kept out of the serialized form.
    #[serde(skip)]
    pub payload: Vec<u8>,
}

/// One EDNS option, with its data already rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdnsOption {
    pub code: u16,
    pub name: String,
    pub data: String,
}

/// The EDNS(0) side channel extracted from an OPT pseudo-record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtendedDns {
    #[serde(rename = "udp-size")]
    pub udp_size: u16,
    #[serde(rename = "extended-rcode")]
    pub extended_rcode: u8,
    pub version: u8,
    #[serde(rename = "dnssec")]
    pub do_flag: bool,
    pub options: Vec<EdnsOption>,
}

/// Capture metadata: when the message was seen and what it was doing.
#[derive(Debug, Clone, Serialize)]
pub struct EventMeta {
    pub operation: String,
    #[serde(rename = "timestamp-rfc3339")]
    pub timestamp: DateTime<Utc>,
    /// Query/response round-trip in seconds, when known.
    pub latency: f64,
}

impl Default for EventMeta {
    fn default() -> Self {
        Self {
            operation: String::new(),
            timestamp: Utc::now(),
            latency: 0.0,
        }
    }
}

/// Flags set by the suspicious-traffic transformer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuspiciousInfo {
    pub score: f32,
    #[serde(rename = "malformed-pkt")]
    pub malformed_packet: bool,
    #[serde(rename = "large-pkt")]
    pub large_packet: bool,
    #[serde(rename = "long-domain")]
    pub long_domain: bool,
    #[serde(rename = "slow-domain")]
    pub slow_domain: bool,
    #[serde(rename = "unallowed-chars")]
    pub unallowed_chars: bool,
    #[serde(rename = "uncommon-qtypes")]
    pub uncommon_qtypes: bool,
    #[serde(rename = "excessive-number-labels")]
    pub excessive_number_labels: bool,
}

/// One observed DNS message as it flows through the pipeline.
///
/// The ingest layer fills `network` and `event`, the decoder populates `dns`
/// and `edns`, and transformers may attach `suspicious`. Sinks serialize the
/// whole thing as JSON or render a text line via [`DnsMessage::text_line`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DnsMessage {
    pub network: NetworkInfo,
    pub dns: DnsSection,
    pub edns: ExtendedDns,
    pub event: EventMeta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspicious: Option<SuspiciousInfo>,
}

impl DnsMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the message as one delimited text line.
    ///
    /// `fields` selects and orders the directives; unknown directives render
    /// as `"-"`. A value containing the delimiter is wrapped in `boundary`.
    pub fn text_line(&self, fields: &[String], delimiter: &str, boundary: &str) -> String {
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self.render_field(field);
            if !delimiter.is_empty() && value.contains(delimiter) {
                parts.push(format!("{boundary}{value}{boundary}"));
            } else {
                parts.push(value);
            }
        }
        parts.join(delimiter)
    }

    fn render_field(&self, field: &str) -> String {
        let value = match field {
            "timestamp-rfc3339" => self.event.timestamp.to_rfc3339(),
            "operation" => self.event.operation.clone(),
            "latency" => format!("{:.6}", self.event.latency),
            "family" => self.network.family.clone(),
            "protocol" => self.network.protocol.clone(),
            "query-ip" => self.network.query_ip.clone(),
            "query-port" => self.network.query_port.to_string(),
            "response-ip" => self.network.response_ip.clone(),
            "response-port" => self.network.response_port.to_string(),
            "type" => self.dns.kind.as_str().to_string(),
            "id" => self.dns.id.to_string(),
            "opcode" => self.dns.opcode.to_string(),
            "rcode" => self.dns.rcode.clone(),
            "qname" => self.dns.qname.clone(),
            "qtype" => self.dns.qtype.clone(),
            "length" => self.dns.length.to_string(),
            "malformed" => self.dns.malformed_packet.to_string(),
            "qr" => flag_str(self.dns.flags.qr),
            "tc" => flag_str(self.dns.flags.tc),
            "aa" => flag_str(self.dns.flags.aa),
            "ra" => flag_str(self.dns.flags.ra),
            "ad" => flag_str(self.dns.flags.ad),
            _ => String::new(),
        };
        if value.is_empty() {
            "-".to_string()
        } else {
            value
        }
    }
}

fn flag_str(set: bool) -> String {
    if set { "1" } else { "0" }.to_string()
}
