use std::fmt;

/// Record types the decoder can render to a textual form.
///
/// Every other type still gets a symbolic name through [`rdatatype_name`],
/// but its RDATA surfaces as the opaque `"-"` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    NS,
    PTR,
    MX,
    SRV,
    TXT,
    SOA,
    SVCB,
    HTTPS,
    RRSIG,
    OPT,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::NS => "NS",
            RecordType::PTR => "PTR",
            RecordType::MX => "MX",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
            RecordType::SOA => "SOA",
            RecordType::SVCB => "SVCB",
            RecordType::HTTPS => "HTTPS",
            RecordType::RRSIG => "RRSIG",
            RecordType::OPT => "OPT",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::NS => 2,
            RecordType::CNAME => 5,
            RecordType::SOA => 6,
            RecordType::PTR => 12,
            RecordType::MX => 15,
            RecordType::TXT => 16,
            RecordType::AAAA => 28,
            RecordType::SRV => 33,
            RecordType::OPT => 41,
            RecordType::RRSIG => 46,
            RecordType::SVCB => 64,
            RecordType::HTTPS => 65,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordType::A),
            2 => Some(RecordType::NS),
            5 => Some(RecordType::CNAME),
            6 => Some(RecordType::SOA),
            12 => Some(RecordType::PTR),
            15 => Some(RecordType::MX),
            16 => Some(RecordType::TXT),
            28 => Some(RecordType::AAAA),
            33 => Some(RecordType::SRV),
            41 => Some(RecordType::OPT),
            46 => Some(RecordType::RRSIG),
            64 => Some(RecordType::SVCB),
            65 => Some(RecordType::HTTPS),
            _ => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// IANA mnemonic for a wire RR type code, `"UNKNOWN"` outside the table.
pub fn rdatatype_name(code: u16) -> &'static str {
    match code {
        0 => "NONE",
        1 => "A",
        2 => "NS",
        3 => "MD",
        4 => "MF",
        5 => "CNAME",
        6 => "SOA",
        7 => "MB",
        8 => "MG",
        9 => "MR",
        10 => "NULL",
        11 => "WKS",
        12 => "PTR",
        13 => "HINFO",
        14 => "MINFO",
        15 => "MX",
        16 => "TXT",
        17 => "RP",
        18 => "AFSDB",
        19 => "X25",
        20 => "ISDN",
        21 => "RT",
        22 => "NSAP",
        23 => "NSAP_PTR",
        24 => "SIG",
        25 => "KEY",
        26 => "PX",
        27 => "GPOS",
        28 => "AAAA",
        29 => "LOC",
        30 => "NXT",
        33 => "SRV",
        35 => "NAPTR",
        36 => "KX",
        37 => "CERT",
        38 => "A6",
        39 => "DNAME",
        41 => "OPT",
        42 => "APL",
        43 => "DS",
        44 => "SSHFP",
        45 => "IPSECKEY",
        46 => "RRSIG",
        47 => "NSEC",
        48 => "DNSKEY",
        49 => "DHCID",
        50 => "NSEC3",
        51 => "NSEC3PARAM",
        52 => "TLSA",
        53 => "SMIMEA",
        55 => "HIP",
        56 => "NINFO",
        59 => "CDS",
        60 => "CDNSKEY",
        61 => "OPENPGPKEY",
        62 => "CSYNC",
        64 => "SVCB",
        65 => "HTTPS",
        99 => "SPF",
        103 => "UNSPEC",
        108 => "EUI48",
        109 => "EUI64",
        249 => "TKEY",
        250 => "TSIG",
        251 => "IXFR",
        252 => "AXFR",
        253 => "MAILB",
        254 => "MAILA",
        255 => "ANY",
        256 => "URI",
        257 => "CAA",
        258 => "AVC",
        259 => "AMTRELAY",
        32768 => "TA",
        32769 => "DLV",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_wire_codes() {
        for rt in [
            RecordType::A,
            RecordType::AAAA,
            RecordType::CNAME,
            RecordType::NS,
            RecordType::PTR,
            RecordType::MX,
            RecordType::SRV,
            RecordType::TXT,
            RecordType::SOA,
            RecordType::SVCB,
            RecordType::HTTPS,
            RecordType::RRSIG,
            RecordType::OPT,
        ] {
            assert_eq!(RecordType::from_u16(rt.to_u16()), Some(rt));
            assert_eq!(rdatatype_name(rt.to_u16()), rt.as_str());
        }
    }

    #[test]
    fn name_table_fallback() {
        assert_eq!(rdatatype_name(48), "DNSKEY");
        assert_eq!(rdatatype_name(32769), "DLV");
        assert_eq!(rdatatype_name(1234), "UNKNOWN");
    }

    #[test]
    fn unsupported_types_have_no_variant() {
        assert_eq!(RecordType::from_u16(48), None);
        assert_eq!(RecordType::from_u16(255), None);
    }
}
