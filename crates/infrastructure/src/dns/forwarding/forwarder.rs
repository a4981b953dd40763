use super::message_builder::MessageBuilder;
use super::response_parser::{ResponseParser, UpstreamResponse};
use echo_dns_domain::{DomainError, RecordType};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;

/// DNS Forwarder for sending queries to specific servers
pub struct DnsForwarder;

impl DnsForwarder {
    pub fn new() -> Self {
        Self
    }

    /// Query a specific DNS server once over UDP. The timeout doubles as the
    /// cancellation point; there is no retry.
    pub async fn query(
        &self,
        server: &str,
        domain: &str,
        record_type: &RecordType,
        timeout_ms: u64,
    ) -> Result<UpstreamResponse, DomainError> {
        let server_addr: SocketAddr = server
            .parse()
            .map_err(|e| DomainError::IoError(format!("Invalid server address: {}", e)))?;

        let (id, request_bytes) = MessageBuilder::build_query(domain, record_type)?;

        let bind_addr = if server_addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind socket: {}", e)))?;

        socket
            .connect(server_addr)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to connect to server: {}", e)))?;

        socket
            .send(&request_bytes)
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to send query: {}", e)))?;

        let mut response_buf = vec![0u8; 4096];
        let timeout = Duration::from_millis(timeout_ms);

        let len = tokio::time::timeout(timeout, socket.recv(&mut response_buf))
            .await
            .map_err(|_| DomainError::QueryTimeout)?
            .map_err(|e| DomainError::IoError(format!("Failed to receive response: {}", e)))?;

        ResponseParser::parse(&response_buf[..len], id)
    }
}

impl Default for DnsForwarder {
    fn default() -> Self {
        Self::new()
    }
}
