use serde::Serialize;

/// One decoded resource record, immutable after construction.
///
/// `rdata` is the rendered textual form; unsupported types carry `"-"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecord {
    pub name: String,
    pub rdatatype: String,
    pub class: u16,
    pub ttl: u32,
    pub rdata: String,
}

/// The three record sections of a decoded message.
///
/// OPT pseudo-records never land here; they belong to the EDNS view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordSections {
    #[serde(rename = "an")]
    pub answers: Vec<DnsRecord>,
    #[serde(rename = "ns")]
    pub nameservers: Vec<DnsRecord>,
    #[serde(rename = "ar")]
    pub records: Vec<DnsRecord>,
}
