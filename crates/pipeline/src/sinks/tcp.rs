use std::time::Duration;

use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

use dnstail_domain::{Config, DnsMessage, TcpClientSinkConfig};

use crate::errors::PipelineError;
use crate::sinks::MessageEncoder;
use crate::transformers::{Transforms, Verdict};

/// Channel-fed worker shipping messages to a remote TCP collector.
///
/// Messages are dropped while the transport is down (a dead collector must
/// not back the pipeline up), buffered while it is up, and flushed when the
/// buffer fills or the flush timer fires.
pub struct TcpClientSink {
    config: TcpClientSinkConfig,
    encoder: MessageEncoder,
    transforms: Transforms,
    rx: mpsc::Receiver<DnsMessage>,
}

impl TcpClientSink {
    /// Builds the worker and the channel that feeds it.
    pub fn new(config: &Config) -> Result<(mpsc::Sender<DnsMessage>, Self), PipelineError> {
        let sink_config = &config.sinks.tcp_client;
        let (tx, rx) = mpsc::channel(config.ingest.channel_buffer_size);
        let sink = Self {
            config: sink_config.clone(),
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
        let TcpClientSink {
            config,
            encoder,
            mut transforms,
            mut rx,
        } = self;

        let address = format!("{}:{}", config.remote_address, config.remote_port);
        info!(address = %address, "tcp client sink running");

        let mut writer: Option<BufWriter<TcpStream>> = None;
        let mut buffer: Vec<DnsMessage> = Vec::with_capacity(config.buffer_size);

        let mut flush_timer = interval(Duration::from_secs(config.flush_interval.max(1)));
        flush_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut retry_timer = interval(Duration::from_secs(config.retry_interval.max(1)));
        retry_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = retry_timer.tick(), if writer.is_none() => {
                    match timeout(
                        Duration::from_secs(config.connect_timeout.max(1)),
                        TcpStream::connect(&address),
                    )
                    .await
                    {
                        Ok(Ok(stream)) => {
                            info!(address = %address, "transport connected");
                            writer = Some(BufWriter::new(stream));
                        }
                        Ok(Err(error)) => {
                            warn!(address = %address, %error, retry_in = config.retry_interval, "connect failed");
                        }
                        Err(_) => {
                            warn!(address = %address, retry_in = config.retry_interval, "connect timed out");
                        }
                    }
                }

                message = rx.recv() => {
                    let Some(mut dm) = message else {
                        debug!("input channel closed");
                        break;
                    };
                    if transforms.process(&mut dm) == Verdict::Drop {
                        continue;
                    }
                    // transport down: drop instead of buffering without bound
                    if writer.is_none() {
                        continue;
                    }
                    buffer.push(dm);
                    if buffer.len() >= config.buffer_size {
                        flush_buffer(&mut writer, &mut buffer, &encoder, &config.payload_delimiter)
                            .await;
                    }
                }

                _ = flush_timer.tick() => {
                    if writer.is_none() {
                        if !buffer.is_empty() {
                            debug!(dropped = buffer.len(), "buffer cleared while disconnected");
                            buffer.clear();
                        }
                        continue;
                    }
                    if !buffer.is_empty() {
                        flush_buffer(&mut writer, &mut buffer, &encoder, &config.payload_delimiter)
                            .await;
                    }
                }
            }
        }

        if let Some(mut writer) = writer {
            let _ = writer.shutdown().await;
        }
        info!("tcp client sink terminated");
    }
}

async fn flush_buffer(
    writer_slot: &mut Option<BufWriter<TcpStream>>,
    buffer: &mut Vec<DnsMessage>,
    encoder: &MessageEncoder,
    payload_delimiter: &str,
) {
    let Some(writer) = writer_slot.as_mut() else {
        buffer.clear();
        return;
    };

    let mut failed = false;
    for dm in buffer.iter() {
        let mut frame = encoder.encode(dm);
        frame.extend_from_slice(payload_delimiter.as_bytes());
        if let Err(error) = writer.write_all(&frame).await {
            warn!(%error, "send frame failed");
            failed = true;
            break;
        }
    }
    if !failed {
        if let Err(error) = writer.flush().await {
            warn!(%error, "flush failed");
            failed = true;
        }
    }

    buffer.clear();
    if failed {
        // reconnect on the retry timer
        *writer_slot = None;
    }
}
