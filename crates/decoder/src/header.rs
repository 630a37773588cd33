use dnstail_domain::DecodeError;

/// Size of the fixed DNS header.
pub const DNS_HEADER_LEN: usize = 12;

/// Decoded 12-byte DNS header.
///
/// The section counts are advisory: they bound how many records the decoder
/// attempts to parse, never how far it reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub qr: bool,
    pub opcode: u8,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    pub z: bool,
    pub ad: bool,
    pub cd: bool,
    pub rcode: u8,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

/*
                                1  1  1  1  1  1
  0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                      ID                       |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|QR|   Opcode  |AA|TC|RD|RA| Z|AD|CD|   RCODE   |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    QDCOUNT                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    ANCOUNT                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    NSCOUNT                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    ARCOUNT                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/

pub fn decode_header(payload: &[u8]) -> Result<DnsHeader, DecodeError> {
    if payload.len() < DNS_HEADER_LEN {
        return Err(DecodeError::HeaderTooShort);
    }

    let flags = u16::from_be_bytes([payload[2], payload[3]]);

    Ok(DnsHeader {
        id: u16::from_be_bytes([payload[0], payload[1]]),
        qr: flags >> 15 == 1,
        opcode: ((flags >> 11) & 0xf) as u8,
        aa: (flags >> 10) & 1 == 1,
        tc: (flags >> 9) & 1 == 1,
        rd: (flags >> 8) & 1 == 1,
        ra: (flags >> 7) & 1 == 1,
        z: (flags >> 6) & 1 == 1,
        ad: (flags >> 5) & 1 == 1,
        cd: (flags >> 4) & 1 == 1,
        rcode: (flags & 0xf) as u8,
        qdcount: u16::from_be_bytes([payload[4], payload[5]]),
        ancount: u16::from_be_bytes([payload[6], payload[7]]),
        nscount: u16::from_be_bytes([payload[8], payload[9]]),
        arcount: u16::from_be_bytes([payload[10], payload[11]]),
    })
}
