use echo_dns_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::Record;
use tracing::debug;

/// Parsed view of an upstream response: the sections the handler relays plus
/// the header bits it propagates.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub answers: Vec<Record>,
    pub authority: Vec<Record>,
    pub rcode: ResponseCode,
    pub truncated: bool,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8], expected_id: u16) -> Result<UpstreamResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                message.id(),
                expected_id
            )));
        }

        let rcode = message.response_code();
        let truncated = message.truncated();
        let answers = message.answers().to_vec();
        let authority = message.name_servers().to_vec();

        debug!(
            rcode = ?rcode,
            answers = answers.len(),
            authority = authority.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(UpstreamResponse {
            answers,
            authority,
            rcode,
            truncated,
        })
    }
}
