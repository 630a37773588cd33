mod helpers;

use helpers::fake_dns_message;

use dnstail_domain::SuspiciousConfig;
use dnstail_pipeline::transformers::SuspiciousTransform;

fn transform(config: SuspiciousConfig) -> SuspiciousTransform {
    SuspiciousTransform::new(&config).expect("build suspicious transform")
}

#[test]
fn clean_message_scores_zero_and_serializes() {
    let suspicious = transform(SuspiciousConfig::default());
    let mut dm = fake_dns_message();
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 0.0);

    let json = serde_json::to_value(&dm).expect("serialize");
    let block = &json["suspicious"];
    assert_eq!(block["score"], 0.0);
    assert_eq!(block["malformed-pkt"], false);
    assert_eq!(block["large-pkt"], false);
    assert_eq!(block["long-domain"], false);
    assert_eq!(block["slow-domain"], false);
    assert_eq!(block["unallowed-chars"], false);
    assert_eq!(block["uncommon-qtypes"], false);
    assert_eq!(block["excessive-number-labels"], false);
}

#[test]
fn malformed_packet_flagged() {
    let suspicious = transform(SuspiciousConfig::default());
    let mut dm = fake_dns_message();
    dm.dns.malformed_packet = true;
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.malformed_packet);
}

#[test]
fn long_domain_flagged() {
    let suspicious = transform(SuspiciousConfig {
        threshold_qname_len: 4,
        ..Default::default()
    });
    let mut dm = fake_dns_message();
    dm.dns.qname = "longdomain.com".to_string();
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.long_domain);
}

#[test]
fn slow_answer_flagged() {
    let suspicious = transform(SuspiciousConfig {
        threshold_slow: 3.0,
        ..Default::default()
    });
    let mut dm = fake_dns_message();
    dm.event.latency = 4.0;
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.slow_domain);
}

#[test]
fn large_packet_flagged() {
    let suspicious = transform(SuspiciousConfig {
        threshold_packet_len: 4,
        ..Default::default()
    });
    let mut dm = fake_dns_message();
    dm.dns.length = 50;
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.large_packet);
}

#[test]
fn uncommon_qtype_flagged() {
    let suspicious = transform(SuspiciousConfig::default());
    let mut dm = fake_dns_message();
    dm.dns.qtype = "LOC".to_string();
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.uncommon_qtypes);
}

#[test]
fn excessive_labels_flagged() {
    let suspicious = transform(SuspiciousConfig {
        threshold_max_labels: 2,
        ..Default::default()
    });
    let mut dm = fake_dns_message();
    dm.dns.qname = "test.sub.collector.com".to_string();
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.excessive_number_labels);
}

#[test]
fn unallowed_chars_flagged() {
    let suspicious = transform(SuspiciousConfig::default());
    let mut dm = fake_dns_message();
    dm.dns.qname = "AAAAAA==.collector.com".to_string();
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 1.0);
    assert!(info.unallowed_chars);
}

#[test]
fn whitelisted_domains_score_zero() {
    let suspicious = transform(SuspiciousConfig::default());
    let mut dm = fake_dns_message();
    dm.dns.qname = "0.f.e.d.c.b.a.9.8.7.6.5.4.3.2.1.ip6.arpa".to_string();
    dm.dns.qtype = "PTR".to_string();
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 0.0);
    assert!(!info.excessive_number_labels);
}

#[test]
fn rules_accumulate() {
    let suspicious = transform(SuspiciousConfig {
        threshold_qname_len: 4,
        threshold_max_labels: 2,
        ..Default::default()
    });
    let mut dm = fake_dns_message();
    dm.dns.qname = "a.long.enough.name.net".to_string();
    dm.dns.malformed_packet = true;
    suspicious.score(&mut dm);

    let info = dm.suspicious.as_ref().expect("suspicious block");
    assert_eq!(info.score, 3.0);
    assert!(info.malformed_packet);
    assert!(info.long_domain);
    assert!(info.excessive_number_labels);
}
