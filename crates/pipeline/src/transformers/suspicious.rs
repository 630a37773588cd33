use std::collections::HashSet;

use fancy_regex::Regex;

use dnstail_domain::{DnsMessage, SuspiciousConfig, SuspiciousInfo};

use crate::errors::PipelineError;

/// Rule-based suspicious-traffic scorer.
///
/// Each triggered rule sets its flag and adds one point to the score.
/// Whitelisted domains are exempt but still get the (zeroed) score block so
/// the serialized shape stays stable.
pub struct SuspiciousTransform {
    threshold_qname_len: usize,
    threshold_packet_len: usize,
    threshold_slow: f64,
    threshold_max_labels: usize,
    common_qtypes: HashSet<String>,
    unallowed_chars: Vec<String>,
    whitelist: Vec<Regex>,
}

impl SuspiciousTransform {
    pub fn new(config: &SuspiciousConfig) -> Result<Self, PipelineError> {
        let whitelist = config
            .whitelist_domains
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| PipelineError::InvalidRegex {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            threshold_qname_len: config.threshold_qname_len,
            threshold_packet_len: config.threshold_packet_len,
            threshold_slow: config.threshold_slow,
            threshold_max_labels: config.threshold_max_labels,
            common_qtypes: config.common_qtypes.iter().cloned().collect(),
            unallowed_chars: config.unallowed_chars.clone(),
            whitelist,
        })
    }

    pub fn score(&self, dm: &mut DnsMessage) {
        let mut info = SuspiciousInfo::default();

        let whitelisted = self
            .whitelist
            .iter()
            .any(|re| re.is_match(&dm.dns.qname).unwrap_or(false));
        if whitelisted {
            dm.suspicious = Some(info);
            return;
        }

        if dm.dns.malformed_packet {
            info.malformed_packet = true;
            info.score += 1.0;
        }

        if dm.dns.length > self.threshold_packet_len {
            info.large_packet = true;
            info.score += 1.0;
        }

        if dm.dns.qname.len() > self.threshold_qname_len {
            info.long_domain = true;
            info.score += 1.0;
        }

        if dm.event.latency > self.threshold_slow {
            info.slow_domain = true;
            info.score += 1.0;
        }

        if !self.common_qtypes.contains(&dm.dns.qtype) {
            info.uncommon_qtypes = true;
            info.score += 1.0;
        }

        if self
            .unallowed_chars
            .iter()
            .any(|chars| dm.dns.qname.contains(chars))
        {
            info.unallowed_chars = true;
            info.score += 1.0;
        }

        if dm.dns.qname.split('.').count() > self.threshold_max_labels {
            info.excessive_number_labels = true;
            info.score += 1.0;
        }

        dm.suspicious = Some(info);
    }
}
