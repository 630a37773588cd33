pub mod config;
pub mod errors;
pub mod message;
pub mod rcode;
pub mod record;
pub mod record_type;

pub use config::{
    CliOverrides, Config, ConfigError, FilteringConfig, GlobalConfig, IngestConfig, LoggingConfig,
    SinkMode, SinksConfig, SuspiciousConfig, SyslogSinkConfig, TcpClientSinkConfig,
    TransformersConfig,
};
pub use errors::{DecodeError, PayloadDecodeError};
pub use message::{
    DnsFlags, DnsMessage, DnsSection, EdnsOption, EventMeta, ExtendedDns, MessageKind, NetworkInfo,
    SuspiciousInfo,
};
pub use rcode::rcode_name;
pub use record::{DnsRecord, RecordSections};
pub use record_type::{rdatatype_name, RecordType};
