//! Turns a decoded template into resource records.

use echo_dns_domain::{RecordType, TemplateMatch};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record};
use std::net::IpAddr;
use tracing::debug;

/// Result of synthesizing one question.
#[derive(Debug, Default)]
pub struct Synthesis {
    /// Records to append to the answer accumulator, in emission order.
    pub records: Vec<Record>,
    /// The whole query must resolve to a single negative response,
    /// abandoning everything accumulated so far.
    pub terminate: bool,
    /// Alias target (with trailing root label) to chase at the delegate.
    pub delegate: Option<String>,
}

impl Synthesis {
    fn skip() -> Self {
        Self::default()
    }
}

/// Build records for `template` as an answer to `owner` queried at
/// `query_type`. Never fails: a question that cannot be answered synthesizes
/// nothing and the caller moves on.
pub fn synthesize(
    owner: &str,
    template: &TemplateMatch,
    query_type: RecordType,
    ttl: u32,
) -> Synthesis {
    let Ok(owner_name) = Name::from_utf8(owner) else {
        debug!(owner = %owner, "owner name failed to parse, skipping question");
        return Synthesis::skip();
    };

    match template {
        TemplateMatch::NoMatch => Synthesis::skip(),

        TemplateMatch::Address { addr, .. } => {
            // The address template only speaks IPv4; an AAAA query for it is
            // answered with NXDOMAIN rather than silence.
            if query_type == RecordType::AAAA {
                return Synthesis {
                    records: Vec::new(),
                    terminate: true,
                    delegate: None,
                };
            }

            let IpAddr::V4(v4) = addr else {
                debug!(owner = %owner, "decoded address is not IPv4, skipping question");
                return Synthesis::skip();
            };

            // `from_rdata` already initializes the record's DNS class to IN.
            let record = Record::from_rdata(owner_name, ttl, RData::A(A(*v4)));
            Synthesis {
                records: vec![record],
                terminate: false,
                delegate: None,
            }
        }

        TemplateMatch::Alias { target, .. } => {
            let target_fqdn = format!("{}.", target);
            let Ok(target_name) = Name::from_utf8(&target_fqdn) else {
                debug!(target = %target, "alias target failed to parse, skipping question");
                return Synthesis::skip();
            };

            // `from_rdata` already initializes the record's DNS class to IN.
            let record = Record::from_rdata(owner_name, ttl, RData::CNAME(CNAME(target_name)));

            let delegate = query_type.is_address_type().then_some(target_fqdn);
            Synthesis {
                records: vec![record],
                terminate: false,
                delegate,
            }
        }
    }
}
