use clap::Parser;
use echo_dns_application::use_cases::HandleEchoQueryUseCase;
use echo_dns_domain::config::{CliOverrides, Config};
use echo_dns_infrastructure::dns::{EchoHandler, ForwardHandler, UdpUpstreamResolver};
use hickory_server::ServerFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "echo-dns")]
#[command(version)]
#[command(about = "DNS handler answering queries from templates embedded in the queried name")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (ip:port)
    #[arg(long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        upstream_server: cli.upstream,
        log_level: cli.log_level,
    };

    let config = Config::load(cli.config.as_deref(), cli_overrides)?;
    config.validate()?;

    init_logging(&config);

    info!("Starting echo-dns v{}", env!("CARGO_PKG_VERSION"));

    let upstream = Arc::new(UdpUpstreamResolver::new(&config.upstream));
    let use_case =
        Arc::new(HandleEchoQueryUseCase::new(config.echo.clone()).with_upstream(upstream));
    let handler = EchoHandler::new(use_case, ForwardHandler::new(&config.upstream));

    let addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let mut server = ServerFuture::new(handler);

    let udp_socket = UdpSocket::bind(&addr).await?;
    info!(addr = %addr, "DNS UDP listening");
    server.register_socket(udp_socket);

    let tcp_listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "DNS TCP listening");
    server.register_listener(tcp_listener, Duration::from_secs(30));

    info!(
        zones = ?config.echo.zones,
        ttl = config.echo.ttl,
        upstream = %config.upstream.server,
        "echo-dns ready to serve queries"
    );

    server.block_until_done().await?;

    info!("Server shutdown complete");
    Ok(())
}
