use super::RecordType;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    In,
    Ch,
    Hs,
    Any,
    Unknown,
}

impl QueryClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryClass::In => "IN",
            QueryClass::Ch => "CH",
            QueryClass::Hs => "HS",
            QueryClass::Any => "ANY",
            QueryClass::Unknown => "UNKNOWN",
        }
    }

    pub fn from_u16(value: u16) -> Self {
        match value {
            1 => QueryClass::In,
            3 => QueryClass::Ch,
            4 => QueryClass::Hs,
            255 => QueryClass::Any,
            _ => QueryClass::Unknown,
        }
    }

    pub fn is_internet(&self) -> bool {
        matches!(self, QueryClass::In)
    }
}

impl fmt::Display for QueryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One question of an incoming DNS message. `name` is kept exactly as
/// received (original casing, trailing dot and all) so synthesized records
/// echo the owner name back untouched.
#[derive(Debug, Clone)]
pub struct DnsQuestion {
    pub name: Arc<str>,
    pub record_type: RecordType,
    pub class: QueryClass,
}

impl DnsQuestion {
    pub fn new(name: impl Into<Arc<str>>, record_type: RecordType, class: QueryClass) -> Self {
        Self {
            name: name.into(),
            record_type,
            class,
        }
    }
}
