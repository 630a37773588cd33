#![allow(dead_code)]
use std::io::Write;

use tempfile::NamedTempFile;

use dnstail_domain::{DnsMessage, DnsRecord, MessageKind};

/// A plausible decoded query, the starting point of most transformer tests.
pub fn fake_dns_message() -> DnsMessage {
    let mut dm = DnsMessage::new();
    dm.network.family = "INET".to_string();
    dm.network.protocol = "UDP".to_string();
    dm.network.query_ip = "198.51.100.10".to_string();
    dm.network.query_port = 4321;
    dm.network.response_ip = "198.51.100.1".to_string();
    dm.network.response_port = 53;
    dm.dns.kind = MessageKind::Query;
    dm.dns.id = 1;
    dm.dns.qname = "dns.probe.example.com".to_string();
    dm.dns.qtype = "A".to_string();
    dm.dns.rcode = "NOERROR".to_string();
    dm.dns.length = 48;
    dm.event.operation = "CLIENT_QUERY".to_string();
    dm
}

pub fn answer(rdatatype: &str, rdata: &str) -> DnsRecord {
    DnsRecord {
        name: "dns.probe.example.com".to_string(),
        rdatatype: rdatatype.to_string(),
        class: 1,
        ttl: 300,
        rdata: rdata.to_string(),
    }
}

/// Writes a transformer list file; the handle keeps it alive for the test.
pub fn list_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write line");
    }
    file.flush().expect("flush");
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().expect("utf8 path").to_string()
}
