use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;

use fancy_regex::Regex;
use ipnetwork::IpNetwork;

use dnstail_domain::{DnsMessage, FilteringConfig, MessageKind};

use crate::errors::PipelineError;

/// Matches an IP against a list of exact addresses and CIDR networks.
struct IpMatcher {
    exact: HashSet<IpAddr>,
    networks: Vec<IpNetwork>,
}

impl IpMatcher {
    fn from_file(path: &str) -> Result<Self, PipelineError> {
        let mut exact = HashSet::new();
        let mut networks = Vec::new();
        for line in read_list(path)? {
            if let Ok(ip) = line.parse::<IpAddr>() {
                exact.insert(ip);
            } else if let Ok(network) = line.parse::<IpNetwork>() {
                networks.push(network);
            } else {
                return Err(PipelineError::InvalidAddress(line));
            }
        }
        Ok(Self { exact, networks })
    }

    fn matches(&self, ip_text: &str) -> bool {
        match ip_text.parse::<IpAddr>() {
            Ok(ip) => {
                self.exact.contains(&ip) || self.networks.iter().any(|network| network.contains(ip))
            }
            Err(_) => false,
        }
    }
}

/// Keep/drop rules applied to every message before a sink buffers it.
///
/// Keep-lists are allowlists: when configured, anything not matching them
/// is dropped. Drop-lists remove matches on top of that.
pub struct FilteringTransform {
    log_queries: bool,
    log_replies: bool,
    drop_rcodes: HashSet<String>,
    keep_query_ip: Option<IpMatcher>,
    drop_query_ip: Option<IpMatcher>,
    keep_rdata_ip: Option<IpMatcher>,
    drop_fqdn: HashSet<String>,
    drop_domain: Vec<Regex>,
    keep_domain: Vec<Regex>,
    downsample: u32,
    downsample_count: u32,
}

impl FilteringTransform {
    pub fn new(config: &FilteringConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            log_queries: config.log_queries,
            log_replies: config.log_replies,
            drop_rcodes: config.drop_rcodes.iter().cloned().collect(),
            keep_query_ip: load_ip_matcher(&config.keep_query_ip_file)?,
            drop_query_ip: load_ip_matcher(&config.drop_query_ip_file)?,
            keep_rdata_ip: load_ip_matcher(&config.keep_rdata_file)?,
            drop_fqdn: match &config.drop_fqdn_file {
                Some(path) => read_list(path)?.into_iter().collect(),
                None => HashSet::new(),
            },
            drop_domain: load_regex_list(&config.drop_domain_file)?,
            keep_domain: load_regex_list(&config.keep_domain_file)?,
            downsample: config.downsample,
            downsample_count: 0,
        })
    }

    /// True when the message must not reach the sink.
    pub fn check_if_drop(&mut self, dm: &DnsMessage) -> bool {
        if !self.log_queries && dm.dns.kind == MessageKind::Query {
            return true;
        }
        if !self.log_replies && dm.dns.kind == MessageKind::Reply {
            return true;
        }

        if self.drop_rcodes.contains(&dm.dns.rcode) {
            return true;
        }

        if let Some(keep) = &self.keep_query_ip {
            if !keep.matches(&dm.network.query_ip) {
                return true;
            }
        }
        if let Some(drop) = &self.drop_query_ip {
            if drop.matches(&dm.network.query_ip) {
                return true;
            }
        }

        if let Some(keep) = &self.keep_rdata_ip {
            let any_kept = dm
                .dns
                .resource_records
                .answers
                .iter()
                .filter(|record| record.rdatatype == "A" || record.rdatatype == "AAAA")
                .any(|record| keep.matches(&record.rdata));
            if !any_kept {
                return true;
            }
        }

        if self.drop_fqdn.contains(&dm.dns.qname) {
            return true;
        }

        if self
            .drop_domain
            .iter()
            .any(|re| re.is_match(&dm.dns.qname).unwrap_or(false))
        {
            return true;
        }

        if !self.keep_domain.is_empty()
            && !self
                .keep_domain
                .iter()
                .any(|re| re.is_match(&dm.dns.qname).unwrap_or(false))
        {
            return true;
        }

        if self.downsample > 0 {
            self.downsample_count += 1;
            if self.downsample_count % self.downsample != 0 {
                return true;
            }
            self.downsample_count = 0;
        }

        false
    }
}

fn load_ip_matcher(path: &Option<String>) -> Result<Option<IpMatcher>, PipelineError> {
    match path {
        Some(path) => Ok(Some(IpMatcher::from_file(path)?)),
        None => Ok(None),
    }
}

fn load_regex_list(path: &Option<String>) -> Result<Vec<Regex>, PipelineError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    read_list(path)?
        .into_iter()
        .map(|pattern| {
            Regex::new(&pattern).map_err(|e| PipelineError::InvalidRegex {
                pattern,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Non-empty, non-comment lines of a list file.
fn read_list(path: &str) -> Result<Vec<String>, PipelineError> {
    let contents = std::fs::read_to_string(Path::new(path)).map_err(|source| {
        PipelineError::ListFile {
            path: path.to_string(),
            source,
        }
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
