mod helpers;

use helpers::{answer, fake_dns_message, list_file, path_of};

use dnstail_domain::{FilteringConfig, MessageKind};
use dnstail_pipeline::transformers::FilteringTransform;

fn transform(config: FilteringConfig) -> FilteringTransform {
    FilteringTransform::new(&config).expect("build filtering transform")
}

#[test]
fn drops_queries_and_replies_when_disabled() {
    let mut filtering = transform(FilteringConfig {
        log_queries: false,
        log_replies: false,
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    assert!(filtering.check_if_drop(&dm), "query should be ignored");

    dm.dns.kind = MessageKind::Reply;
    assert!(filtering.check_if_drop(&dm), "reply should be ignored");
}

#[test]
fn drops_by_rcode() {
    let mut filtering = transform(FilteringConfig {
        drop_rcodes: vec!["NOERROR".to_string()],
        ..Default::default()
    });
    assert!(filtering.check_if_drop(&fake_dns_message()));
}

#[test]
fn empty_rcode_list_keeps_everything() {
    let mut filtering = transform(FilteringConfig::default());
    assert!(!filtering.check_if_drop(&fake_dns_message()));
}

#[test]
fn keep_query_ip_acts_as_allowlist() {
    let file = list_file(&["192.168.1.10", "192.3.2.0/24"]);
    let mut filtering = transform(FilteringConfig {
        keep_query_ip_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.network.query_ip = "192.168.0.1".to_string();
    assert!(filtering.check_if_drop(&dm), "unlisted ip should drop");

    dm.network.query_ip = "192.168.1.10".to_string();
    assert!(!filtering.check_if_drop(&dm), "listed ip should pass");

    dm.network.query_ip = "192.3.2.1".to_string();
    assert!(!filtering.check_if_drop(&dm), "subnet member should pass");
}

#[test]
fn drop_query_ip_matches_exact_and_subnet() {
    let file = list_file(&["192.168.1.15", "192.0.2.0/24"]);
    let mut filtering = transform(FilteringConfig {
        drop_query_ip_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.network.query_ip = "192.168.0.1".to_string();
    assert!(!filtering.check_if_drop(&dm));

    dm.network.query_ip = "192.168.1.15".to_string();
    assert!(filtering.check_if_drop(&dm), "listed ip should drop");

    dm.network.query_ip = "192.0.2.3".to_string();
    assert!(filtering.check_if_drop(&dm), "subnet member should drop");
}

#[test]
fn keep_rdata_ip_filters_on_answers() {
    let file = list_file(&[
        "192.168.1.10",
        "192.168.1.8/30",
        "192.0.2.1",
        "2001:db8:85a3::/48",
        "2001:0dbd:85a3::0001",
    ]);
    let mut filtering = transform(FilteringConfig {
        keep_rdata_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.dns.resource_records.answers = vec![answer("A", "192.168.0.1")];
    assert!(filtering.check_if_drop(&dm), "unlisted rdata should drop");

    dm.dns.resource_records.answers = vec![answer("A", "192.168.1.10")];
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.resource_records.answers = vec![answer("A", "192.168.1.11")];
    assert!(!filtering.check_if_drop(&dm), "subnet member should pass");

    dm.dns.resource_records.answers = vec![answer("A", "192.0.2.3")];
    assert!(filtering.check_if_drop(&dm));

    dm.dns.resource_records.answers = vec![answer("A", "192.0.2.1")];
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.resource_records.answers = vec![answer("AAAA", "2001:db8:85a3::8a2e:370:7334")];
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.resource_records.answers = vec![answer("AAAA", "2041::7334")];
    assert!(filtering.check_if_drop(&dm));

    // same address, differently written
    dm.dns.resource_records.answers = vec![answer("AAAA", "2001:dbd:85a3::1")];
    assert!(!filtering.check_if_drop(&dm));
}

#[test]
fn drops_by_exact_fqdn() {
    let file = list_file(&["mail.google.com"]);
    let mut filtering = transform(FilteringConfig {
        drop_fqdn_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.dns.qname = "www.microsoft.com".to_string();
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.qname = "mail.google.com".to_string();
    assert!(filtering.check_if_drop(&dm));
}

#[test]
fn drops_by_domain_regex() {
    let file = list_file(&["google\\.com$", "github\\.com$"]);
    let mut filtering = transform(FilteringConfig {
        drop_domain_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.dns.qname = "mail.google.com".to_string();
    assert!(filtering.check_if_drop(&dm));

    dm.dns.qname = "test.github.com".to_string();
    assert!(filtering.check_if_drop(&dm));

    dm.dns.qname = "github.fr".to_string();
    assert!(!filtering.check_if_drop(&dm));
}

#[test]
fn keep_domain_acts_as_allowlist() {
    let file = list_file(&["google.fr", "test.github.com"]);
    let mut filtering = transform(FilteringConfig {
        keep_domain_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.dns.qname = "mail.google.com".to_string();
    assert!(filtering.check_if_drop(&dm));

    dm.dns.qname = "example.com".to_string();
    assert!(filtering.check_if_drop(&dm));

    dm.dns.qname = "test.github.com".to_string();
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.qname = "google.fr".to_string();
    assert!(!filtering.check_if_drop(&dm));
}

#[test]
fn keep_domain_regexes_must_be_anchored_to_be_strict() {
    let file = list_file(&[
        "(mail|sheets)\\.google\\.com$",
        "test\\.github\\.com$",
        ".+\\.google\\.com$",
    ]);
    let mut filtering = transform(FilteringConfig {
        keep_domain_file: Some(path_of(&file)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.dns.qname = "mail.google.com".to_string();
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.qname = "test.google.com.ru".to_string();
    assert!(filtering.check_if_drop(&dm));

    dm.dns.qname = "test.github.com".to_string();
    assert!(!filtering.check_if_drop(&dm));

    dm.dns.qname = "test.github.com.malware.ru".to_string();
    assert!(filtering.check_if_drop(&dm));
}

#[test]
fn downsample_keeps_one_in_n() {
    let mut filtering = transform(FilteringConfig {
        downsample: 2,
        ..Default::default()
    });
    let dm = fake_dns_message();

    assert!(filtering.check_if_drop(&dm), "first of each window drops");
    assert!(!filtering.check_if_drop(&dm), "second is kept");
    assert!(filtering.check_if_drop(&dm));
    assert!(!filtering.check_if_drop(&dm));

    let mut filtering = transform(FilteringConfig {
        downsample: 0,
        ..Default::default()
    });
    assert!(!filtering.check_if_drop(&dm), "0 disables downsampling");
    assert!(!filtering.check_if_drop(&dm));
}

#[test]
fn filters_compose() {
    let domains = list_file(&["google\\.com$", "github\\.com$"]);
    let ips = list_file(&["192.168.1.15", "192.0.2.0/24"]);
    let mut filtering = transform(FilteringConfig {
        drop_domain_file: Some(path_of(&domains)),
        drop_query_ip_file: Some(path_of(&ips)),
        ..Default::default()
    });

    let mut dm = fake_dns_message();
    dm.dns.qname = "mail.google.com".to_string();
    assert!(filtering.check_if_drop(&dm));

    dm.dns.qname = "github.fr".to_string();
    assert!(!filtering.check_if_drop(&dm));

    dm.network.query_ip = "192.168.1.15".to_string();
    assert!(filtering.check_if_drop(&dm), "ip filter still applies");

    dm.network.query_ip = "192.0.2.3".to_string();
    assert!(filtering.check_if_drop(&dm));
}

#[test]
fn missing_list_file_is_an_error() {
    let result = FilteringTransform::new(&FilteringConfig {
        drop_fqdn_file: Some("/nonexistent/dnstail-list.txt".to_string()),
        ..Default::default()
    });
    assert!(result.is_err());
}
