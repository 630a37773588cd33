mod errors;
mod global;
mod ingest;
mod logging;
mod root;
mod sinks;
mod transformers;

pub use errors::ConfigError;
pub use global::GlobalConfig;
pub use ingest::IngestConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use sinks::{SinkMode, SinksConfig, SyslogSinkConfig, TcpClientSinkConfig};
pub use transformers::{FilteringConfig, SuspiciousConfig, TransformersConfig};
