//! The pipeline around the decoder: ingest, transformer chain, log sinks.
//!
//! Each sink is a channel-fed tokio worker that applies its own transformer
//! chain before shipping; the ingest listener decodes raw payloads and fans
//! the resulting messages out to every sink channel.

pub mod errors;
pub mod ingest;
pub mod sinks;
pub mod transformers;

pub use errors::PipelineError;
pub use sinks::syslog::SyslogSink;
pub use sinks::tcp::TcpClientSink;
pub use transformers::{Transforms, Verdict};
