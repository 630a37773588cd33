use dnstail_domain::DecodeError;

use crate::header::DNS_HEADER_LEN;
use crate::labels::parse_labels;

/// Result of walking the question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: String,
    pub qtype: u16,
    /// Offset just past the question section.
    pub end_offset: usize,
}

/*
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                                               |
/                     QNAME                     /
/                                               /
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     QTYPE                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     QCLASS                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/

/// Walks `qdcount` questions starting right after the header.
///
/// More than one question is legal but rarely supported by resolvers; all
/// are parsed to keep the offset right, only the last qname/qtype is kept.
pub fn decode_question(qdcount: u16, payload: &[u8]) -> Result<Question, DecodeError> {
    let mut offset = DNS_HEADER_LEN;
    let mut qname = String::new();
    let mut qtype = 0u16;

    for _ in 0..qdcount {
        let (name, next) = parse_labels(offset, payload)?;
        qname = name;
        offset = next;

        if payload.len() - offset < 4 {
            return Err(DecodeError::QuestionQtypeTooShort);
        }
        qtype = u16::from_be_bytes([payload[offset], payload[offset + 1]]);
        offset += 4;
    }

    Ok(Question {
        qname,
        qtype,
        end_offset: offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qname: &str, qtype: u16) -> Vec<u8> {
        let mut buf = vec![0u8; DNS_HEADER_LEN];
        for label in qname.split('.') {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0);
        buf.extend_from_slice(&qtype.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01]);
        buf
    }

    #[test]
    fn single_question() {
        let payload = query("www.example.com", 1);
        let q = decode_question(1, &payload).expect("decode");
        assert_eq!(q.qname, "www.example.com");
        assert_eq!(q.qtype, 1);
        assert_eq!(q.end_offset, payload.len());
    }

    #[test]
    fn keeps_last_of_multiple_questions() {
        let mut payload = query("first.example.com", 1);
        payload.push(5);
        payload.extend_from_slice(b"other");
        payload.push(3);
        payload.extend_from_slice(b"net");
        payload.push(0);
        payload.extend_from_slice(&28u16.to_be_bytes());
        payload.extend_from_slice(&[0x00, 0x01]);
        let q = decode_question(2, &payload).expect("decode");
        assert_eq!(q.qname, "other.net");
        assert_eq!(q.qtype, 28);
        assert_eq!(q.end_offset, payload.len());
    }

    #[test]
    fn missing_qtype_rejected() {
        let mut payload = query("www.example.com", 1);
        payload.truncate(payload.len() - 2);
        assert_eq!(
            decode_question(1, &payload),
            Err(DecodeError::QuestionQtypeTooShort)
        );
    }

    #[test]
    fn label_errors_propagate() {
        let mut payload = vec![0u8; DNS_HEADER_LEN];
        payload.extend_from_slice(&[0xc0, 0xff]); // forward pointer
        payload.extend_from_slice(&[0u8; 16]);
        assert_eq!(
            decode_question(1, &payload),
            Err(DecodeError::LabelInvalidPointer)
        );
    }
}
