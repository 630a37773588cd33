use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TransformersConfig {
    #[serde(default)]
    pub filtering: FilteringConfig,

    #[serde(default)]
    pub suspicious: SuspiciousConfig,
}

/// Keep/drop rules applied by every sink worker before buffering.
///
/// The `*_file` entries point at line-oriented list files; keep-lists turn
/// the filter into an allowlist for their dimension.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilteringConfig {
    #[serde(default = "default_true")]
    pub log_queries: bool,

    #[serde(default = "default_true")]
    pub log_replies: bool,

    /// Messages whose rcode mnemonic is listed here are dropped.
    #[serde(default)]
    pub drop_rcodes: Vec<String>,

    /// Allowlist of client IPs / CIDRs.
    #[serde(default)]
    pub keep_query_ip_file: Option<String>,

    /// Denylist of client IPs / CIDRs.
    #[serde(default)]
    pub drop_query_ip_file: Option<String>,

    /// Allowlist matched against A/AAAA answer rdata.
    #[serde(default)]
    pub keep_rdata_file: Option<String>,

    /// Exact qname denylist.
    #[serde(default)]
    pub drop_fqdn_file: Option<String>,

    /// Regex qname denylist.
    #[serde(default)]
    pub drop_domain_file: Option<String>,

    /// Regex qname allowlist.
    #[serde(default)]
    pub keep_domain_file: Option<String>,

    /// Keep one message in N; 0 disables downsampling.
    #[serde(default)]
    pub downsample: u32,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            log_queries: true,
            log_replies: true,
            drop_rcodes: Vec::new(),
            keep_query_ip_file: None,
            drop_query_ip_file: None,
            keep_rdata_file: None,
            drop_fqdn_file: None,
            drop_domain_file: None,
            keep_domain_file: None,
            downsample: 0,
        }
    }
}

/// Thresholds for the suspicious-traffic scorer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SuspiciousConfig {
    #[serde(default)]
    pub enable: bool,

    #[serde(default = "default_threshold_qname_len")]
    pub threshold_qname_len: usize,

    #[serde(default = "default_threshold_packet_len")]
    pub threshold_packet_len: usize,

    /// Seconds; answers slower than this are flagged.
    #[serde(default = "default_threshold_slow")]
    pub threshold_slow: f64,

    #[serde(default = "default_threshold_max_labels")]
    pub threshold_max_labels: usize,

    #[serde(default = "default_common_qtypes")]
    pub common_qtypes: Vec<String>,

    /// Substrings that should never appear in a legitimate qname.
    #[serde(default = "default_unallowed_chars")]
    pub unallowed_chars: Vec<String>,

    /// Regexes for domains exempt from scoring.
    #[serde(default = "default_whitelist_domains")]
    pub whitelist_domains: Vec<String>,
}

impl Default for SuspiciousConfig {
    fn default() -> Self {
        Self {
            enable: false,
            threshold_qname_len: default_threshold_qname_len(),
            threshold_packet_len: default_threshold_packet_len(),
            threshold_slow: default_threshold_slow(),
            threshold_max_labels: default_threshold_max_labels(),
            common_qtypes: default_common_qtypes(),
            unallowed_chars: default_unallowed_chars(),
            whitelist_domains: default_whitelist_domains(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_threshold_qname_len() -> usize {
    100
}

fn default_threshold_packet_len() -> usize {
    1000
}

fn default_threshold_slow() -> f64 {
    1.0
}

fn default_threshold_max_labels() -> usize {
    10
}

fn default_common_qtypes() -> Vec<String> {
    [
        "A", "AAAA", "CNAME", "TXT", "PTR", "NAPTR", "DNSKEY", "SRV", "SOA", "NS", "MX", "DS",
        "HTTPS",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_unallowed_chars() -> Vec<String> {
    ["\"", "==", "/", ":"].iter().map(|s| s.to_string()).collect()
}

fn default_whitelist_domains() -> Vec<String> {
    vec!["\\.ip6\\.arpa".to_string()]
}
