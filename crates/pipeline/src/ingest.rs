use chrono::Utc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use dnstail_decoder::{decode_header, decode_payload};
use dnstail_domain::{Config, DnsMessage};

use crate::errors::PipelineError;

/// Largest DNS message the mirror will accept (a full TCP-sized message).
const MAX_PAYLOAD: usize = 64 * 1024;

/// UDP traffic-mirror listener: every received datagram is one raw DNS
/// payload.
///
/// Each datagram is stamped with its transport context, decoded, and fanned
/// out to every sink channel. Decode failures still ship the message with
/// `malformed_packet` set — the sinks decide what to do with it. A full
/// sink channel drops the message rather than stalling the receive loop.
pub async fn run(
    config: &Config,
    senders: Vec<mpsc::Sender<DnsMessage>>,
) -> Result<(), PipelineError> {
    let bind = format!("{}:{}", config.ingest.bind_address, config.ingest.port);
    let socket = UdpSocket::bind(&bind).await?;
    let local_addr = socket.local_addr()?;
    info!(bind = %local_addr, "udp ingest listening");

    let mut recv_buf = vec![0u8; MAX_PAYLOAD];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(err) => {
                error!(error = %err, "udp recv error");
                continue;
            }
        };

        let mut dm = DnsMessage::new();
        dm.network.family = if from.is_ipv4() { "INET" } else { "INET6" }.to_string();
        dm.network.protocol = "UDP".to_string();
        dm.network.query_ip = from.ip().to_string();
        dm.network.query_port = from.port();
        dm.network.response_ip = local_addr.ip().to_string();
        dm.network.response_port = local_addr.port();
        dm.event.timestamp = Utc::now();
        dm.dns.length = n;
        dm.dns.payload = recv_buf[..n].to_vec();

        match decode_header(&dm.dns.payload) {
            Ok(header) => {
                dm.event.operation = if header.qr {
                    "CLIENT_RESPONSE"
                } else {
                    "CLIENT_QUERY"
                }
                .to_string();
                if let Err(err) = decode_payload(&mut dm, &header, config) {
                    debug!(error = %err, %from, "payload decode failed");
                }
            }
            Err(err) => {
                dm.dns.malformed_packet = true;
                debug!(error = %err, %from, "header decode failed");
            }
        }

        for tx in &senders {
            if tx.try_send(dm.clone()).is_err() {
                debug!("sink channel unavailable, message dropped");
            }
        }
    }
}
