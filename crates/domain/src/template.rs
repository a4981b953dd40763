//! Subdomain template decoding.
//!
//! Queries handled by the echo pipeline carry their answer in the leftmost
//! label: `ip-93-184-216-34.example.com` encodes an IPv4 address,
//! `cname-foo-dexample-dnet.example.com` encodes the alias target
//! `foo.example.net`. Everything after the first label must equal one of the
//! configured zones exactly; a name with intermediate labels is not ours.

use std::net::IpAddr;

/// Label prefix for address templates.
pub const ADDRESS_PREFIX: &str = "ip-";

/// Label prefix for alias templates.
pub const ALIAS_PREFIX: &str = "cname-";

/// Stand-in for a literal dash while the dot escape is rewritten. Not a
/// character a hostname label can contain, so it cannot collide with alias
/// content.
const DASH_SENTINEL: &str = "_";

/// Outcome of decoding a queried name against the configured zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateMatch {
    /// Zone unmatched, label malformed, prefix unrecognized, or the embedded
    /// literal failed to parse. The question is simply not ours.
    NoMatch,
    /// `ip-` template with a successfully parsed IP literal.
    Address { addr: IpAddr, zone: String },
    /// `cname-` template; `target` has the escaping undone and no trailing dot.
    Alias { target: String, zone: String },
}

/// Decode the leftmost label of `queried_name` against `zones`.
///
/// The name is lower-cased and split once at the first label boundary; the
/// remainder must equal a configured zone exactly. Any failure along the way
/// yields [`TemplateMatch::NoMatch`]; decoding never errors.
pub fn decode_template(queried_name: &str, zones: &[String]) -> TemplateMatch {
    let name = queried_name.trim_end_matches('.').to_ascii_lowercase();

    let Some((label, rest)) = name.split_once('.') else {
        return TemplateMatch::NoMatch;
    };

    let Some(zone) = zones.iter().find(|zone| rest == zone.as_str()) else {
        return TemplateMatch::NoMatch;
    };

    if let Some(encoded) = label.strip_prefix(ADDRESS_PREFIX) {
        let literal = encoded.replace('-', ".");
        match literal.parse::<IpAddr>() {
            Ok(addr) => TemplateMatch::Address {
                addr,
                zone: zone.clone(),
            },
            Err(_) => TemplateMatch::NoMatch,
        }
    } else if let Some(encoded) = label.strip_prefix(ALIAS_PREFIX) {
        TemplateMatch::Alias {
            target: unescape_alias(encoded),
            zone: zone.clone(),
        }
    } else {
        TemplateMatch::NoMatch
    }
}

/// Undo the alias escaping: `--` is a literal dash, `-d` is a literal dot.
///
/// The three rewrites must run in exactly this order: doubled dashes are
/// parked on a sentinel before `-d` is interpreted, so a literal dash next to
/// a `d` is not misread as a dot escape, and the sentinel is restored only
/// after the dot rewrite so a recovered dash is never re-interpreted.
///
/// Inputs mixing the two escapes around a `d` (for instance a raw `--d` that
/// no encoder would produce) decode to whatever the rewrite order yields;
/// there is deliberately no validation of the round trip.
pub fn unescape_alias(encoded: &str) -> String {
    let parked = encoded.replace("--", DASH_SENTINEL);
    let dotted = parked.replace("-d", ".");
    dotted.replace(DASH_SENTINEL, "-")
}
