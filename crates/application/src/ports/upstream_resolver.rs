use async_trait::async_trait;
use echo_dns_domain::{DomainError, RecordType};
use hickory_proto::rr::Record;

/// What the echo pipeline reads out of a delegate lookup: the answer records
/// to merge into its own reply and whether the delegate's response was
/// truncated.
#[derive(Debug, Clone)]
pub struct UpstreamAnswers {
    pub records: Vec<Record>,
    pub truncated: bool,
}

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Look up `name` at the delegate resolver. Single attempt, no retry;
    /// the caller treats any error as an absent result.
    async fn lookup(&self, name: &str, record_type: RecordType)
        -> Result<UpstreamAnswers, DomainError>;
}
