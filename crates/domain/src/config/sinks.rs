use serde::{Deserialize, Serialize};

/// Output encoding of a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkMode {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SinksConfig {
    #[serde(default)]
    pub tcp_client: TcpClientSinkConfig,

    #[serde(default)]
    pub syslog: SyslogSinkConfig,
}

/// Remote TCP log shipper.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TcpClientSinkConfig {
    #[serde(default)]
    pub enable: bool,

    #[serde(default = "default_remote_address")]
    pub remote_address: String,

    #[serde(default = "default_remote_port")]
    pub remote_port: u16,

    /// Seconds to wait for a connection attempt.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Seconds between reconnection attempts.
    #[serde(default = "default_retry_interval")]
    pub retry_interval: u64,

    /// Seconds between forced buffer flushes.
    #[serde(default = "default_flush_interval")]
    pub flush_interval: u64,

    /// Messages buffered before an early flush.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    #[serde(default)]
    pub mode: SinkMode,

    #[serde(default = "default_payload_delimiter")]
    pub payload_delimiter: String,

    /// Overrides the global text format when set.
    #[serde(default)]
    pub text_format: Option<String>,
}

impl Default for TcpClientSinkConfig {
    fn default() -> Self {
        Self {
            enable: false,
            remote_address: default_remote_address(),
            remote_port: default_remote_port(),
            connect_timeout: default_connect_timeout(),
            retry_interval: default_retry_interval(),
            flush_interval: default_flush_interval(),
            buffer_size: default_buffer_size(),
            mode: SinkMode::Text,
            payload_delimiter: default_payload_delimiter(),
            text_format: None,
        }
    }
}

/// Syslog shipper, local daemon or remote collector.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyslogSinkConfig {
    #[serde(default)]
    pub enable: bool,

    /// "local", "udp" or "tcp".
    #[serde(default = "default_syslog_transport")]
    pub transport: String,

    /// host:port for the udp/tcp transports.
    #[serde(default = "default_syslog_remote")]
    pub remote_address: String,

    /// Datagram socket path for the local transport.
    #[serde(default = "default_syslog_socket")]
    pub socket_path: String,

    /// "rfc3164" or "rfc5424".
    #[serde(default = "default_syslog_format")]
    pub format: String,

    #[serde(default = "default_syslog_severity")]
    pub severity: String,

    #[serde(default = "default_syslog_facility")]
    pub facility: String,

    #[serde(default)]
    pub mode: SinkMode,

    #[serde(default)]
    pub text_format: Option<String>,
}

impl Default for SyslogSinkConfig {
    fn default() -> Self {
        Self {
            enable: false,
            transport: default_syslog_transport(),
            remote_address: default_syslog_remote(),
            socket_path: default_syslog_socket(),
            format: default_syslog_format(),
            severity: default_syslog_severity(),
            facility: default_syslog_facility(),
            mode: SinkMode::Text,
            text_format: None,
        }
    }
}

fn default_remote_address() -> String {
    "127.0.0.1".to_string()
}

fn default_remote_port() -> u16 {
    9999
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_retry_interval() -> u64 {
    10
}

fn default_flush_interval() -> u64 {
    30
}

fn default_buffer_size() -> usize {
    100
}

fn default_payload_delimiter() -> String {
    "\n".to_string()
}

fn default_syslog_transport() -> String {
    "local".to_string()
}

fn default_syslog_remote() -> String {
    "127.0.0.1:514".to_string()
}

fn default_syslog_socket() -> String {
    "/dev/log".to_string()
}

fn default_syslog_format() -> String {
    "rfc3164".to_string()
}

fn default_syslog_severity() -> String {
    "INFO".to_string()
}

fn default_syslog_facility() -> String {
    "DAEMON".to_string()
}
