//! UDP-backed implementation of the upstream resolver port.

use async_trait::async_trait;
use echo_dns_application::ports::{UpstreamAnswers, UpstreamResolver};
use echo_dns_domain::config::UpstreamConfig;
use echo_dns_domain::{DomainError, RecordType};

use super::forwarding::DnsForwarder;

pub struct UdpUpstreamResolver {
    forwarder: DnsForwarder,
    server: String,
    timeout_ms: u64,
}

impl UdpUpstreamResolver {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            forwarder: DnsForwarder::new(),
            server: config.server.clone(),
            timeout_ms: config.timeout_ms,
        }
    }
}

#[async_trait]
impl UpstreamResolver for UdpUpstreamResolver {
    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<UpstreamAnswers, DomainError> {
        let response = self
            .forwarder
            .query(&self.server, name, &record_type, self.timeout_ms)
            .await?;

        Ok(UpstreamAnswers {
            records: response.answers,
            truncated: response.truncated,
        })
    }
}
