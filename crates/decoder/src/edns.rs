use dnstail_domain::{DecodeError, EdnsOption, ExtendedDns};

use crate::escape::escape_bytes;
use crate::labels::parse_labels;

/// TYPE + CLASS + TTL + RDLENGTH, shared with the answer walk.
const RR_FIXED_LEN: usize = 10;

const TYPE_OPT: u16 = 41;

/// EDNS decode failure carrying whatever view was built before it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}")]
pub struct EdnsError {
    pub partial: ExtendedDns,
    pub kind: DecodeError,
}

fn option_code_name(code: u16) -> String {
    match code {
        3 => "NSID".to_string(),
        8 => "CSUBNET".to_string(),
        9 => "EXPIRE".to_string(),
        10 => "COOKIE".to_string(),
        11 => "KEEPALIVE".to_string(),
        12 => "PADDING".to_string(),
        14 => "KEYTAG".to_string(),
        15 => "ERRORS".to_string(),
        _ => code.to_string(),
    }
}

/// Walks the additional section looking for the OPT pseudo-record (type 41)
/// and decodes the EDNS(0) header fields plus its options.
///
/// The walk mirrors the answer decoder's bounds checks for non-OPT records;
/// the first OPT found provides the view, later ones are skipped.
pub fn decode_edns(
    count: u16,
    start_offset: usize,
    payload: &[u8],
) -> Result<(ExtendedDns, usize), EdnsError> {
    let mut offset = start_offset;
    let mut edns: Option<ExtendedDns> = None;

    for _ in 0..count {
        let after_name = match parse_labels(offset, payload) {
            Ok((_, after_name)) => after_name,
            Err(kind) => {
                return Err(EdnsError {
                    partial: edns.unwrap_or_default(),
                    kind,
                })
            }
        };

        if payload.len() - after_name < RR_FIXED_LEN {
            return Err(EdnsError {
                partial: edns.unwrap_or_default(),
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

        if rtype != TYPE_OPT {
            if payload.len() - rdata_start < rdlength {
                return Err(EdnsError {
                    partial: edns.unwrap_or_default(),
                    kind: DecodeError::AnswerRdataTooShort,
                });
            }
            offset = rdata_start + rdlength;
            continue;
        }

        if payload.len() - rdata_start < rdlength {
            return Err(EdnsError {
                partial: edns.unwrap_or_default(),
                kind: DecodeError::EdnsDataTooShort,
            });
        }

        if edns.is_none() {
            let mut view = ExtendedDns {
                udp_size: class,
                extended_rcode: (ttl >> 24) as u8,
                version: (ttl >> 16) as u8,
                do_flag: (ttl >> 15) & 1 == 1,
                options: Vec::new(),
            };

            let rdata_end = rdata_start + rdlength;
            let mut opt_offset = rdata_start;
            while opt_offset < rdata_end {
                if rdata_end - opt_offset < 4 {
                    return Err(EdnsError {
                        partial: view,
                        kind: DecodeError::EdnsOptionTooShort,
                    });
                }
                let code = u16::from_be_bytes([payload[opt_offset], payload[opt_offset + 1]]);
                let opt_len =
                    u16::from_be_bytes([payload[opt_offset + 2], payload[opt_offset + 3]]) as usize;
                opt_offset += 4;
                if rdata_end - opt_offset < opt_len {
                    return Err(EdnsError {
                        partial: view,
                        kind: DecodeError::EdnsOptionTooShort,
                    });
                }
                view.options.push(EdnsOption {
                    code,
                    name: option_code_name(code),
                    data: escape_bytes(&payload[opt_offset..opt_offset + opt_len]),
                });
                opt_offset += opt_len;
            }

            edns = Some(view);
        }

        offset = rdata_start + rdlength;
    }

    Ok((edns.unwrap_or_default(), offset))
}
