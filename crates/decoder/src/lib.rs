//! DNS wire-format decoder.
//!
//! A stack of pure, stateless functions: header → labels → question →
//! answer sections → EDNS, tied together by [`decode_payload`]. Every slice
//! access is bounds-checked, every counter is advisory, and every
//! compression-pointer chase terminates; adversarial payloads come back as
//! errors, never as panics or unbounded work.

pub mod answer;
pub mod edns;
mod escape;
pub mod header;
pub mod labels;
pub mod question;
pub mod rdata;

pub use answer::{decode_answer, DecodedSection, SectionError};
pub use edns::{decode_edns, EdnsError};
pub use header::{decode_header, DnsHeader, DNS_HEADER_LEN};
pub use labels::parse_labels;
pub use question::{decode_question, Question};

use dnstail_domain::{
    rcode_name, rdatatype_name, Config, DecodeError, DnsMessage, MessageKind, PayloadDecodeError,
};

const OPCODE_UPDATE: u8 = 5;

/// Errors an answer/authority/additional walk may produce when the message
/// was cut off by the transport rather than corrupted.
fn is_tail_truncation(kind: DecodeError) -> bool {
    matches!(
        kind,
        DecodeError::AnswerTooShort | DecodeError::AnswerRdataTooShort | DecodeError::LabelTooShort
    )
}

/// Same, extended with the EDNS-specific kinds for the EDNS pass.
fn is_edns_tail_truncation(kind: DecodeError) -> bool {
    is_tail_truncation(kind)
        || matches!(
            kind,
            DecodeError::EdnsDataTooShort | DecodeError::EdnsOptionTooShort
        )
}

/// Decodes `dm.dns.payload` according to the already-decoded header,
/// populating the structured fields of `dm`.
///
/// If the message is already marked malformed the payload is not touched —
/// the header cannot be trusted. Failures mark the message malformed; under
/// the TC flag, tail-truncation failures in the record sections additionally
/// keep the partial records and count as success. A question-section failure
/// is always fatal.
///
/// The config handle is part of the call contract for the pipeline; the
/// decoder itself has no tunables.
pub fn decode_payload(
    dm: &mut DnsMessage,
    header: &DnsHeader,
    _config: &Config,
) -> Result<(), PayloadDecodeError> {
    if dm.dns.malformed_packet {
        return Ok(());
    }

    dm.dns.id = header.id;
    dm.dns.rcode = rcode_name(header.rcode as u16).to_string();
    dm.dns.opcode = header.opcode;
    dm.dns.kind = if header.qr {
        MessageKind::Reply
    } else {
        MessageKind::Query
    };

    if header.opcode == OPCODE_UPDATE {
        dm.event.operation = if header.qr {
            "UPDATE_QUERY"
        } else {
            "UPDATE_RESPONSE"
        }
        .to_string();
    }

    dm.dns.flags.qr = header.qr;
    dm.dns.flags.tc = header.tc;
    dm.dns.flags.aa = header.aa;
    dm.dns.flags.ra = header.ra;
    dm.dns.flags.ad = header.ad;

    let mut offset = DNS_HEADER_LEN;

    if header.qdcount > 0 {
        match decode_question(header.qdcount, &dm.dns.payload) {
            Ok(question) => {
                dm.dns.qname = question.qname;
                dm.dns.qtype = rdatatype_name(question.qtype).to_string();
                offset = question.end_offset;
            }
            Err(source) => {
                dm.dns.malformed_packet = true;
                return Err(PayloadDecodeError {
                    section: "query",
                    source,
                });
            }
        }
    }

    if header.ancount > 0 {
        match decode_answer(header.ancount, offset, &dm.dns.payload) {
            Ok(section) => {
                dm.dns.resource_records.answers = section.records;
                offset = section.end_offset;
            }
            Err(err) if dm.dns.flags.tc && is_tail_truncation(err.kind) => {
                dm.dns.malformed_packet = true;
                dm.dns.resource_records.answers = err.partial;
                offset = err.offset;
            }
            Err(err) => {
                dm.dns.malformed_packet = true;
                return Err(PayloadDecodeError {
                    section: "answer records",
                    source: err.kind,
                });
            }
        }
    }

    if header.nscount > 0 {
        match decode_answer(header.nscount, offset, &dm.dns.payload) {
            Ok(section) => {
                dm.dns.resource_records.nameservers = section.records;
                offset = section.end_offset;
            }
            Err(err) if dm.dns.flags.tc && is_tail_truncation(err.kind) => {
                dm.dns.malformed_packet = true;
                dm.dns.resource_records.nameservers = err.partial;
                offset = err.offset;
            }
            Err(err) => {
                dm.dns.malformed_packet = true;
                return Err(PayloadDecodeError {
                    section: "authority records",
                    source: err.kind,
                });
            }
        }
    }

    if header.arcount > 0 {
        match decode_answer(header.arcount, offset, &dm.dns.payload) {
            Ok(section) => {
                dm.dns.resource_records.records = section.records;
            }
            Err(err) if dm.dns.flags.tc && is_tail_truncation(err.kind) => {
                dm.dns.malformed_packet = true;
                dm.dns.resource_records.records = err.partial;
            }
            Err(err) => {
                dm.dns.malformed_packet = true;
                return Err(PayloadDecodeError {
                    section: "additional records",
                    source: err.kind,
                });
            }
        }

        // separate pass over the same section for the OPT pseudo-record
        match decode_edns(header.arcount, offset, &dm.dns.payload) {
            Ok((edns, _)) => {
                dm.edns = edns;
            }
            Err(err) if dm.dns.flags.tc && is_edns_tail_truncation(err.kind) => {
                dm.dns.malformed_packet = true;
                dm.edns = err.partial;
            }
            Err(err) => {
                dm.dns.malformed_packet = true;
                return Err(PayloadDecodeError {
                    section: "edns options",
                    source: err.kind,
                });
            }
        }
    }

    Ok(())
}
