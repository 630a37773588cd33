use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket, UnixDatagram};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use dnstail_domain::{Config, DnsMessage, SyslogSinkConfig};

use crate::errors::PipelineError;
use crate::sinks::MessageEncoder;
use crate::transformers::{Transforms, Verdict};

const APP_NAME: &str = "dnstail";

/// Syslog severity (low 3 bits of the priority value).
fn parse_severity(severity: &str) -> Result<u8, PipelineError> {
    match severity.to_uppercase().as_str() {
        "WARNING" => Ok(4),
        "NOTICE" => Ok(5),
        "INFO" => Ok(6),
        "DEBUG" => Ok(7),
        _ => Err(PipelineError::InvalidSeverity(severity.to_string())),
    }
}

/// Syslog facility (priority value divided by 8).
fn parse_facility(facility: &str) -> Result<u8, PipelineError> {
    match facility.to_uppercase().as_str() {
        "DAEMON" => Ok(3),
        "LOCAL0" => Ok(16),
        "LOCAL1" => Ok(17),
        "LOCAL2" => Ok(18),
        "LOCAL3" => Ok(19),
        "LOCAL4" => Ok(20),
        "LOCAL5" => Ok(21),
        "LOCAL6" => Ok(22),
        "LOCAL7" => Ok(23),
        _ => Err(PipelineError::InvalidFacility(facility.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyslogFormat {
    Rfc3164,
    Rfc5424,
}

enum Transport {
    Local(UnixDatagram),
    Udp(UdpSocket),
    Tcp(TcpStream),
}

impl Transport {
    async fn connect(config: &SyslogSinkConfig) -> std::io::Result<Self> {
        match config.transport.as_str() {
            "udp" => {
                let socket = UdpSocket::bind("0.0.0.0:0").await?;
                socket.connect(&config.remote_address).await?;
                Ok(Transport::Udp(socket))
            }
            "tcp" => Ok(Transport::Tcp(
                TcpStream::connect(&config.remote_address).await?,
            )),
            // validated at construction; anything else behaves like local
            _ => {
                let socket = UnixDatagram::unbound()?;
                socket.connect(&config.socket_path)?;
                Ok(Transport::Local(socket))
            }
        }
    }

    async fn send(&mut self, frame: &[u8]) -> std::io::Result<()> {
        match self {
            Transport::Local(socket) => socket.send(frame).await.map(|_| ()),
            Transport::Udp(socket) => socket.send(frame).await.map(|_| ()),
            Transport::Tcp(stream) => {
                stream.write_all(frame).await?;
                stream.write_all(b"\n").await
            }
        }
    }
}

/// Channel-fed worker writing messages to a syslog daemon or collector.
pub struct SyslogSink {
    config: SyslogSinkConfig,
    format: SyslogFormat,
    priority: u8,
    encoder: MessageEncoder,
    transforms: Transforms,
    rx: mpsc::Receiver<DnsMessage>,
}

impl SyslogSink {
    pub fn new(config: &Config) -> Result<(mpsc::Sender<DnsMessage>, Self), PipelineError> {
        let sink_config = &config.sinks.syslog;

        if !matches!(sink_config.transport.as_str(), "local" | "udp" | "tcp") {
            return Err(PipelineError::InvalidTransport(
                sink_config.transport.clone(),
            ));
        }
        let format = match sink_config.format.as_str() {
            "rfc5424" => SyslogFormat::Rfc5424,
            _ => SyslogFormat::Rfc3164,
        };
        let severity = parse_severity(&sink_config.severity)?;
        let facility = parse_facility(&sink_config.facility)?;

        let (tx, rx) = mpsc::channel(config.ingest.channel_buffer_size);
        let sink = Self {
            config: sink_config.clone(),
            format,
            priority: facility * 8 + severity,
            encoder: MessageEncoder::new(config, sink_config.mode, &sink_config.text_format),
            transforms: Transforms::new(&config.transformers)?,
            rx,
        };
        Ok((tx, sink))
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        let SyslogSink {
            config,
            format,
            priority,
            encoder,
            mut transforms,
            mut rx,
        } = self;
        let framer = Framer { format, priority };

        info!(transport = %config.transport, "syslog sink running");
        let mut transport: Option<Transport> = None;

        while let Some(mut dm) = rx.recv().await {
            if transforms.process(&mut dm) == Verdict::Drop {
                continue;
            }

            if transport.is_none() {
                match Transport::connect(&config).await {
                    Ok(connected) => {
                        info!(transport = %config.transport, "syslog connected");
                        transport = Some(connected);
                    }
                    Err(error) => {
                        debug!(%error, "syslog connect failed, message dropped");
                        continue;
                    }
                }
            }

            let frame = framer.frame(&encoder.encode(&dm));
            if let Some(conn) = transport.as_mut() {
                if let Err(error) = conn.send(&frame).await {
                    warn!(%error, "syslog send failed");
                    transport = None;
                }
            }
        }

        info!("syslog sink terminated");
    }
}

struct Framer {
    format: SyslogFormat,
    priority: u8,
}

impl Framer {
    fn frame(&self, body: &[u8]) -> Vec<u8> {
        let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
        let header = match self.format {
            SyslogFormat::Rfc3164 => format!(
                "<{}>{} {} {}: ",
                self.priority,
                Utc::now().format("%b %e %H:%M:%S"),
                hostname,
                APP_NAME,
            ),
            SyslogFormat::Rfc5424 => format!(
                "<{}>1 {} {} {} - - - ",
                self.priority,
                Utc::now().to_rfc3339(),
                hostname,
                APP_NAME,
            ),
        };
        let mut frame = header.into_bytes();
        frame.extend_from_slice(body);
        frame
    }
}
