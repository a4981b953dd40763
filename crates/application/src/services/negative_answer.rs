//! Fabricated SOA for negative answers.
//!
//! There is no real zone behind the echo pipeline, so NXDOMAIN replies carry
//! a template-filled SOA whose timers are fixed constants rather than zone
//! state.

use hickory_proto::rr::rdata::SOA;
use hickory_proto::rr::{Name, RData, Record};

const SOA_SERIAL: u32 = 1_524_370_381;
const SOA_REFRESH: i32 = 14_400;
const SOA_RETRY: i32 = 3_600;
const SOA_EXPIRE: i32 = 604_800;
const SOA_MINIMUM: u32 = 60;
const SOA_TTL: u32 = 60;

/// Build the authority-section SOA accompanying a negative answer for
/// `zone`. Returns `None` only if the zone does not form a valid name,
/// which a validated configuration rules out.
pub fn negative_soa(zone: &str) -> Option<Record> {
    let apex = Name::from_utf8(zone).ok()?;
    let mname = Name::from_utf8(&format!("ns1.{}", zone)).ok()?;
    let rname = Name::from_utf8(&format!("postmaster.{}", zone)).ok()?;

    let soa = SOA::new(
        mname,
        rname,
        SOA_SERIAL,
        SOA_REFRESH,
        SOA_RETRY,
        SOA_EXPIRE,
        SOA_MINIMUM,
    );

    // `from_rdata` already initializes the record's DNS class to IN.
    let record = Record::from_rdata(apex, SOA_TTL, RData::SOA(soa));
    Some(record)
}
