use dnstail_domain::{rdatatype_name, DecodeError, DnsRecord};

use crate::labels::parse_labels;
use crate::rdata::render_rdata;

/// TYPE + CLASS + TTL + RDLENGTH.
const RR_FIXED_LEN: usize = 10;

const TYPE_OPT: u16 = 41;

/// A fully decoded record section and the offset just past its last record.
#[derive(Debug, Clone, Default)]
pub struct DecodedSection {
    pub records: Vec<DnsRecord>,
    pub end_offset: usize,
}

/// Section decode failure.
///
/// Carries the records decoded before the failure and the offset at the
/// START of the failing record, so the orchestrator can keep the partial
/// results when the truncation-downgrade rule applies.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}")]
pub struct SectionError {
    pub partial: Vec<DnsRecord>,
    pub offset: usize,
    pub kind: DecodeError,
}

/*
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                                               |
/                      NAME                     /
|                                               |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                      TYPE                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     CLASS                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                      TTL                      |
|                                               |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                   RDLENGTH                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--|
/                     RDATA                     /
/                                               /
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/

/// Walks `count` resource records starting at `start_offset`.
///
/// OPT pseudo-records are skipped here — the EDNS pass owns them. Name-
/// bearing RDATA parsers receive the message prefix ending at the RDATA
/// boundary, so compression pointers resolve while overruns past the
/// declared RDLENGTH cannot.
pub fn decode_answer(
    count: u16,
    start_offset: usize,
    payload: &[u8],
) -> Result<DecodedSection, SectionError> {
    let mut offset = start_offset;
    let mut records: Vec<DnsRecord> = Vec::new();

    for _ in 0..count {
        let (name, after_name) = match parse_labels(offset, payload) {
            Ok(decoded) => decoded,
            Err(kind) => {
                return Err(SectionError {
                    partial: records,
                    offset,
                    kind,
                })
            }
        };

        if payload.len() - after_name < RR_FIXED_LEN {
            return Err(SectionError {
                partial: records,
                offset,
                kind: DecodeError::AnswerTooShort,
            });
        }

        let rtype = u16::from_be_bytes([payload[after_name], payload[after_name + 1]]);
        let class = u16::from_be_bytes([payload[after_name + 2], payload[after_name + 3]]);
        let ttl = u32::from_be_bytes([
            payload[after_name + 4],
            payload[after_name + 5],
            payload[after_name + 6],
            payload[after_name + 7],
        ]);
        let rdlength = u16::from_be_bytes([payload[after_name + 8], payload[after_name + 9]]) as usize;

        let rdata_start = after_name + RR_FIXED_LEN;
        if payload.len() - rdata_start < rdlength {
            return Err(SectionError {
                partial: records,
                offset,
                kind: DecodeError::AnswerRdataTooShort,
            });
        }
        let rdata_end = rdata_start + rdlength;

        // OPT carries the EDNS header fields and is decoded in the EDNS pass.
        if rtype == TYPE_OPT {
            offset = rdata_end;
            continue;
        }

        let rdata = &payload[rdata_start..rdata_end];
        let rendered = match render_rdata(rtype, rdata, &payload[..rdata_end], rdata_start) {
            Ok(rendered) => rendered,
            Err(kind) => {
                return Err(SectionError {
                    partial: records,
                    offset,
                    kind,
                })
            }
        };

        records.push(DnsRecord {
            name,
            rdatatype: rdatatype_name(rtype).to_string(),
            class,
            ttl,
            rdata: rendered,
        });
        offset = rdata_end;
    }

    Ok(DecodedSection {
        records,
        end_offset: offset,
    })
}
