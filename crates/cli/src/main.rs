use clap::Parser;
use dnstail_domain::CliOverrides;
use dnstail_pipeline::{ingest, SyslogSink, TcpClientSink};
use tracing::{info, warn};

mod bootstrap;

#[derive(Parser)]
#[command(name = "dnstail")]
#[command(version)]
#[command(about = "dnstail - DNS traffic decoder and log shipper")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP ingest port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;

    bootstrap::init_logging(&config);
    info!("starting dnstail v{}", env!("CARGO_PKG_VERSION"));

    let mut senders = Vec::new();
    let mut workers = Vec::new();

    if config.sinks.tcp_client.enable {
        let (tx, sink) = TcpClientSink::new(&config)?;
        senders.push(tx);
        workers.push(sink.spawn());
        info!("sink enabled: tcp client");
    }
    if config.sinks.syslog.enable {
        let (tx, sink) = SyslogSink::new(&config)?;
        senders.push(tx);
        workers.push(sink.spawn());
        info!("sink enabled: syslog");
    }
    if senders.is_empty() {
        warn!("no sink enabled, decoded messages will be discarded");
    }

    tokio::select! {
        result = ingest::run(&config, senders) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
        }
    }

    // the ingest future (and the senders it owns) is dropped by now, so the
    // sink channels are closed and the workers drain and exit
    for worker in workers {
        let _ = worker.await;
    }

    info!("shutdown complete");
    Ok(())
}
