//! Per-type RDATA rendering.
//!
//! Name-bearing types (CNAME, NS, PTR, MX, SRV, SOA) take the message
//! prefix ending at the RDATA boundary plus the absolute RDATA offset, so
//! compression pointers resolve against prior message bytes while the label
//! parser's forward-pointer rejection keeps them inside the boundary.
//! Self-contained types (A, AAAA, TXT, SVCB/HTTPS, RRSIG) only see the
//! RDATA slice.

mod svcb;

pub use svcb::parse_svcb;

use std::net::{Ipv4Addr, Ipv6Addr};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use dnstail_domain::{DecodeError, RecordType};

use crate::labels::parse_labels;

/// Renders one record's RDATA to its textual form, `"-"` for types without
/// a renderer.
pub fn render_rdata(
    rtype: u16,
    rdata: &[u8],
    message: &[u8],
    rdata_offset: usize,
) -> Result<String, DecodeError> {
    match RecordType::from_u16(rtype) {
        Some(RecordType::A) => parse_a(rdata),
        Some(RecordType::AAAA) => parse_aaaa(rdata),
        Some(RecordType::CNAME) | Some(RecordType::NS) | Some(RecordType::PTR) => {
            parse_domain(rdata_offset, message)
        }
        Some(RecordType::MX) => parse_mx(rdata_offset, message),
        Some(RecordType::SRV) => parse_srv(rdata_offset, message),
        Some(RecordType::TXT) => parse_txt(rdata),
        Some(RecordType::SOA) => parse_soa(rdata_offset, message),
        Some(RecordType::SVCB) | Some(RecordType::HTTPS) => parse_svcb(rdata),
        Some(RecordType::RRSIG) => parse_rrsig(rdata),
        Some(RecordType::OPT) | None => Ok("-".to_string()),
    }
}

fn parse_a(rdata: &[u8]) -> Result<String, DecodeError> {
    if rdata.len() < 4 {
        return Err(DecodeError::AnswerRdataTooShort);
    }
    Ok(Ipv4Addr::new(rdata[0], rdata[1], rdata[2], rdata[3]).to_string())
}

fn parse_aaaa(rdata: &[u8]) -> Result<String, DecodeError> {
    let octets: [u8; 16] = rdata
        .get(..16)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(DecodeError::AnswerRdataTooShort)?;
    Ok(Ipv6Addr::from(octets).to_string())
}

fn parse_domain(rdata_offset: usize, message: &[u8]) -> Result<String, DecodeError> {
    let (name, _) = parse_labels(rdata_offset, message)?;
    Ok(name)
}

/*
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                  PREFERENCE                   |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/                   EXCHANGE                    /
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/
fn parse_mx(rdata_offset: usize, message: &[u8]) -> Result<String, DecodeError> {
    // preference plus at least one byte of exchange
    if message.len() < rdata_offset + 3 {
        return Err(DecodeError::AnswerRdataTooShort);
    }
    let preference = u16::from_be_bytes([message[rdata_offset], message[rdata_offset + 1]]);
    let (exchange, _) = parse_labels(rdata_offset + 2, message)?;
    Ok(format!("{preference} {exchange}"))
}

/*
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                   PRIORITY                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    WEIGHT                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     PORT                      |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    TARGET                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/
fn parse_srv(rdata_offset: usize, message: &[u8]) -> Result<String, DecodeError> {
    if message.len() < rdata_offset + 7 {
        return Err(DecodeError::AnswerRdataTooShort);
    }
    let priority = u16::from_be_bytes([message[rdata_offset], message[rdata_offset + 1]]);
    let weight = u16::from_be_bytes([message[rdata_offset + 2], message[rdata_offset + 3]]);
    let port = u16::from_be_bytes([message[rdata_offset + 4], message[rdata_offset + 5]]);
    let (target, _) = parse_labels(rdata_offset + 6, message)?;
    Ok(format!("{priority} {weight} {port} {target}"))
}

/// Only the first character-string is rendered; multi-string TXT records
/// are truncated on purpose to keep the downstream textual contract stable.
fn parse_txt(rdata: &[u8]) -> Result<String, DecodeError> {
    if rdata.is_empty() {
        return Err(DecodeError::AnswerRdataTooShort);
    }
    let length = rdata[0] as usize;
    if rdata.len() - 1 < length {
        return Err(DecodeError::AnswerRdataTooShort);
    }
    Ok(String::from_utf8_lossy(&rdata[1..1 + length]).into_owned())
}

/*
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/                     MNAME                     /
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
/                     RNAME                     /
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    SERIAL                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    REFRESH                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                     RETRY                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    EXPIRE                     |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
|                    MINIMUM                    |
+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
*/
fn parse_soa(rdata_offset: usize, message: &[u8]) -> Result<String, DecodeError> {
    let (mname, offset) = parse_labels(rdata_offset, message)?;
    let (rname, offset) = parse_labels(offset, message)?;

    if offset + 20 > message.len() {
        return Err(DecodeError::AnswerRdataTooShort);
    }
    let fields = &message[offset..offset + 20];

    let serial = u32::from_be_bytes([fields[0], fields[1], fields[2], fields[3]]);
    let refresh = i32::from_be_bytes([fields[4], fields[5], fields[6], fields[7]]);
    let retry = i32::from_be_bytes([fields[8], fields[9], fields[10], fields[11]]);
    let expire = i32::from_be_bytes([fields[12], fields[13], fields[14], fields[15]]);
    let minimum = u32::from_be_bytes([fields[16], fields[17], fields[18], fields[19]]);

    Ok(format!(
        "{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}"
    ))
}

/*
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|        Type Covered           |  Algorithm    |     Labels    |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                         Original TTL                          |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                      Signature Expiration                     |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|                      Signature Inception                      |
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
|            Key Tag            |                               /
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+         Signer's Name         /
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/                            Signature                          /
+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
*/
/// RFC 4034 presentation. The signer's name is always uncompressed in the
/// wire form, so it is parsed rooted in the RDATA slice; the signature is
/// the base64 of everything after it.
fn parse_rrsig(rdata: &[u8]) -> Result<String, DecodeError> {
    if rdata.len() < 18 {
        return Err(DecodeError::AnswerRdataTooShort);
    }

    let type_covered = u16::from_be_bytes([rdata[0], rdata[1]]);
    let algorithm = rdata[2];
    let labels = rdata[3];
    let original_ttl = u32::from_be_bytes([rdata[4], rdata[5], rdata[6], rdata[7]]);
    let expiration = u32::from_be_bytes([rdata[8], rdata[9], rdata[10], rdata[11]]);
    let inception = u32::from_be_bytes([rdata[12], rdata[13], rdata[14], rdata[15]]);
    let key_tag = u16::from_be_bytes([rdata[16], rdata[17]]);

    let (signer, signature_start) = parse_labels(18, rdata)?;
    let signer = if signer.is_empty() {
        ".".to_string()
    } else {
        signer
    };
    let signature = BASE64.encode(&rdata[signature_start..]);

    Ok(format!(
        "{type_covered} {algorithm} {labels} {original_ttl} {expiration} {inception} {key_tag} {signer} {signature}"
    ))
}
