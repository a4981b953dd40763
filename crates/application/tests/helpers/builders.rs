use echo_dns_domain::{DnsQuestion, QueryClass, RecordType};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use std::net::Ipv4Addr;
use std::str::FromStr;

pub fn question(name: &str, record_type: RecordType) -> DnsQuestion {
    DnsQuestion::new(name, record_type, QueryClass::In)
}

pub fn a_record(owner: &str, ttl: u32, addr: Ipv4Addr) -> Record {
    let mut record = Record::from_rdata(
        Name::from_str(owner).unwrap(),
        ttl,
        RData::A(A(addr)),
    );
    record.set_dns_class(DNSClass::IN);
    record
}
