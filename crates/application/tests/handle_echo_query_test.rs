mod helpers;

use echo_dns_application::ports::UpstreamAnswers;
use echo_dns_application::use_cases::{EchoResponse, HandleEchoQueryUseCase};
use echo_dns_domain::config::EchoConfig;
use echo_dns_domain::{DnsQuestion, QueryClass, RecordType};
use helpers::{a_record, question, MockUpstreamResolver};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use std::sync::Arc;

fn echo_config() -> EchoConfig {
    EchoConfig {
        zones: vec!["example.com".to_string()],
        ttl: 60,
        debug: false,
    }
}

fn make_use_case(upstream: Arc<MockUpstreamResolver>) -> HandleEchoQueryUseCase {
    HandleEchoQueryUseCase::new(echo_config()).with_upstream(upstream)
}

// ── address path ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_execute_address_template_answers_one_a_record() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [question("ip-93-184-216-34.example.com.", RecordType::A)];

    let response = use_case.execute(&questions).await;

    let EchoResponse::Answer { records, truncated } = response else {
        panic!("expected Answer, got {:?}", response);
    };
    assert!(!truncated);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ttl(), 60);
    assert_eq!(
        records[0].name().to_utf8(),
        "ip-93-184-216-34.example.com."
    );
    match records[0].data() {
        RData::A(A(v4)) => assert_eq!(*v4, Ipv4Addr::new(93, 184, 216, 34)),
        other => panic!("expected A rdata, got {:?}", other),
    }
}

#[tokio::test]
async fn test_execute_address_template_under_aaaa_is_name_error() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [question("ip-93-184-216-34.example.com.", RecordType::AAAA)];

    let response = use_case.execute(&questions).await;

    let EchoResponse::NameError { zone } = response else {
        panic!("expected NameError, got {:?}", response);
    };
    assert_eq!(zone, "example.com");
}

#[tokio::test]
async fn test_execute_aaaa_abort_discards_accumulated_and_remaining_questions() {
    let upstream = Arc::new(MockUpstreamResolver::new());
    let use_case = make_use_case(upstream.clone());

    // A valid question before and after the aborting one: both discarded.
    let questions = [
        question("ip-1-2-3-4.example.com.", RecordType::A),
        question("ip-5-6-7-8.example.com.", RecordType::AAAA),
        question("cname-foo-dexample-dnet.example.com.", RecordType::A),
    ];

    let response = use_case.execute(&questions).await;

    assert!(matches!(response, EchoResponse::NameError { .. }));
    assert!(
        upstream.calls().is_empty(),
        "delegation must not run for questions after the abort"
    );
}

// ── fallthrough ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_execute_empty_question_list_is_unhandled() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));

    let response = use_case.execute(&[]).await;

    assert!(matches!(response, EchoResponse::Unhandled));
}

#[tokio::test]
async fn test_execute_unmatched_zone_is_unhandled() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [question("ip-1-2-3-4.example.org.", RecordType::A)];

    let response = use_case.execute(&questions).await;

    assert!(matches!(response, EchoResponse::Unhandled));
}

#[tokio::test]
async fn test_execute_plain_name_in_zone_is_unhandled() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [question("www.example.com.", RecordType::A)];

    let response = use_case.execute(&questions).await;

    assert!(matches!(response, EchoResponse::Unhandled));
}

#[tokio::test]
async fn test_execute_skips_non_internet_class() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [DnsQuestion::new(
        "ip-1-2-3-4.example.com.",
        RecordType::A,
        QueryClass::Ch,
    )];

    let response = use_case.execute(&questions).await;

    assert!(matches!(response, EchoResponse::Unhandled));
}

#[tokio::test]
async fn test_execute_skips_non_address_query_types() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [question("ip-1-2-3-4.example.com.", RecordType::TXT)];

    let response = use_case.execute(&questions).await;

    assert!(matches!(response, EchoResponse::Unhandled));
}

#[tokio::test]
async fn test_execute_unmatched_question_does_not_block_later_ones() {
    let use_case = make_use_case(Arc::new(MockUpstreamResolver::new()));
    let questions = [
        question("www.example.org.", RecordType::A),
        question("ip-10-0-0-1.example.com.", RecordType::A),
    ];

    let response = use_case.execute(&questions).await;

    let EchoResponse::Answer { records, .. } = response else {
        panic!("expected Answer, got {:?}", response);
    };
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name().to_utf8(), "ip-10-0-0-1.example.com.");
}

// ── alias path ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_execute_alias_emits_cname_then_delegated_records() {
    let upstream = Arc::new(MockUpstreamResolver::new());
    upstream.set_answers(
        "foo.example.net.",
        UpstreamAnswers {
            records: vec![a_record("foo.example.net.", 300, Ipv4Addr::new(203, 0, 113, 7))],
            truncated: false,
        },
    );
    let use_case = make_use_case(upstream.clone());
    let questions = [question(
        "cname-foo-dexample-dnet.example.com.",
        RecordType::A,
    )];

    let response = use_case.execute(&questions).await;

    let EchoResponse::Answer { records, truncated } = response else {
        panic!("expected Answer, got {:?}", response);
    };
    assert!(!truncated);
    assert_eq!(records.len(), 2);
    match records[0].data() {
        RData::CNAME(CNAME(name)) => assert_eq!(name.to_utf8(), "foo.example.net."),
        other => panic!("expected CNAME rdata first, got {:?}", other),
    }
    match records[1].data() {
        RData::A(A(v4)) => assert_eq!(*v4, Ipv4Addr::new(203, 0, 113, 7)),
        other => panic!("expected delegated A rdata second, got {:?}", other),
    }

    assert_eq!(
        upstream.calls(),
        vec![("foo.example.net.".to_string(), RecordType::A)]
    );
}

#[tokio::test]
async fn test_execute_alias_delegation_failure_keeps_cname() {
    let upstream = Arc::new(MockUpstreamResolver::new());
    // No answers configured: the mock fails the lookup.
    let use_case = make_use_case(upstream);
    let questions = [question(
        "cname-foo-dexample-dnet.example.com.",
        RecordType::A,
    )];

    let response = use_case.execute(&questions).await;

    let EchoResponse::Answer { records, truncated } = response else {
        panic!("expected Answer, got {:?}", response);
    };
    assert!(!truncated);
    assert_eq!(records.len(), 1);
    assert!(matches!(records[0].data(), RData::CNAME(_)));
}

#[tokio::test]
async fn test_execute_alias_without_upstream_keeps_cname() {
    let use_case = HandleEchoQueryUseCase::new(echo_config());
    let questions = [question(
        "cname-foo-dexample-dnet.example.com.",
        RecordType::A,
    )];

    let response = use_case.execute(&questions).await;

    let EchoResponse::Answer { records, .. } = response else {
        panic!("expected Answer, got {:?}", response);
    };
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_execute_latches_upstream_truncation() {
    let upstream = Arc::new(MockUpstreamResolver::new());
    upstream.set_answers(
        "first.example.net.",
        UpstreamAnswers {
            records: vec![a_record("first.example.net.", 60, Ipv4Addr::new(192, 0, 2, 1))],
            truncated: true,
        },
    );
    upstream.set_answers(
        "second.example.net.",
        UpstreamAnswers {
            records: vec![a_record("second.example.net.", 60, Ipv4Addr::new(192, 0, 2, 2))],
            truncated: false,
        },
    );
    let use_case = make_use_case(upstream);

    // Truncation observed on the first delegation must survive the second.
    let questions = [
        question("cname-first-dexample-dnet.example.com.", RecordType::A),
        question("cname-second-dexample-dnet.example.com.", RecordType::A),
    ];

    let response = use_case.execute(&questions).await;

    let EchoResponse::Answer { records, truncated } = response else {
        panic!("expected Answer, got {:?}", response);
    };
    assert!(truncated);
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_execute_alias_delegates_at_the_question_type() {
    let upstream = Arc::new(MockUpstreamResolver::new());
    let use_case = make_use_case(upstream.clone());
    let questions = [question(
        "cname-foo-dexample-dnet.example.com.",
        RecordType::AAAA,
    )];

    let _ = use_case.execute(&questions).await;

    assert_eq!(
        upstream.calls(),
        vec![("foo.example.net.".to_string(), RecordType::AAAA)]
    );
}
