use dnstail_domain::DecodeError;

/// Dotted-name length cap: label bytes plus separator dots plus one
/// dangling dot.
const MAX_NAME_LENGTH: usize = 254;

/// Decodes a possibly-compressed domain name starting at `offset`.
///
/// Returns the dotted name (empty for a bare root) and the resume offset:
/// the position just past the terminating zero byte, or just past the first
/// compression pointer encountered. Later pointer jumps never move it.
///
/// Pointers must target strictly prior data — strictly before the offset
/// where the current decoding run began. Together with the shrinking
/// `run_max` bound this makes every pointer chase terminate: each jump
/// strictly decreases the range the parser may touch.
pub fn parse_labels(offset: usize, payload: &[u8]) -> Result<(String, usize), DecodeError> {
    // a start beyond the buffer is a caller bug, not a truncated name
    if offset > payload.len() {
        return Err(DecodeError::LabelInvalidOffset);
    }

    let mut labels: Vec<String> = Vec::with_capacity(8);
    let mut offset = offset;
    // Where the current decoding run started. Reset on every pointer jump.
    let mut run_start = offset;
    // Upper bound the current run may touch. Shrinks on every pointer jump.
    let mut run_max = payload.len();
    // Resume offset for the caller. Fixed by the first pointer or the final
    // zero byte, whichever comes first.
    let mut end_offset: Option<usize> = None;
    let mut total_length = 0usize;

    loop {
        if offset >= payload.len() {
            return Err(DecodeError::LabelTooShort);
        } else if offset >= run_max {
            return Err(DecodeError::LabelInvalidPointer);
        }

        let length = payload[offset] as usize;
        if length == 0 {
            if end_offset.is_none() {
                end_offset = Some(offset + 1);
            }
            break;
        } else if length & 0xc0 == 0xc0 {
            if offset + 2 > payload.len() {
                return Err(DecodeError::LabelTooShort);
            } else if offset + 2 > run_max {
                return Err(DecodeError::LabelInvalidPointer);
            }

            let ptr = (u16::from_be_bytes([payload[offset], payload[offset + 1]]) & 0x3fff) as usize;
            if ptr >= run_start {
                // RFC 1035 §4.1.4 read strictly: only prior data.
                return Err(DecodeError::LabelInvalidPointer);
            }

            if end_offset.is_none() {
                end_offset = Some(offset + 2);
            }
            run_max = run_start;
            run_start = ptr;
            offset = ptr;
        } else if length & 0xc0 == 0x00 {
            if offset + length + 1 > payload.len() {
                return Err(DecodeError::LabelTooShort);
            } else if offset + length + 1 > run_max {
                return Err(DecodeError::LabelInvalidPointer);
            }

            total_length += length + 1;
            if total_length > MAX_NAME_LENGTH {
                return Err(DecodeError::LabelTooLong);
            }

            let label = &payload[offset + 1..offset + length + 1];
            labels.push(String::from_utf8_lossy(label).into_owned());
            offset += length + 1;
        } else {
            // 0x40 and 0x80 are reserved label types.
            return Err(DecodeError::LabelInvalidData);
        }
    }

    let end = end_offset.unwrap_or(offset + 1);
    Ok((labels.join("."), end))
}
