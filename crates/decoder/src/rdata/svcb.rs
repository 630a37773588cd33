use std::net::{Ipv4Addr, Ipv6Addr};

use dnstail_domain::DecodeError;

use crate::escape::escape_bytes;
use crate::labels::parse_labels;

/*
+--+--+
| PRIO|
+--+--+--+
/ Target /
+--+--+--+
/ Params /
+--+--+--+
*/

/// Renders SVCB/HTTPS RDATA as `"<prio> <target> <key>=<value>…"`.
///
/// The target name is parsed rooted in the RDATA slice itself, not the
/// whole message; SVCB targets are never compressed.
pub fn parse_svcb(rdata: &[u8]) -> Result<String, DecodeError> {
    // priority, root target, no params
    if rdata.len() < 3 {
        return Err(DecodeError::AnswerRdataTooShort);
    }

    let priority = u16::from_be_bytes([rdata[0], rdata[1]]);
    let (target, mut offset) = parse_labels(2, rdata)?;
    let target = if target.is_empty() {
        ".".to_string()
    } else {
        target
    };

    let mut out = format!("{priority} {target}");
    while offset < rdata.len() {
        // a param is at least key and length
        if rdata.len() - offset < 4 {
            return Err(DecodeError::AnswerRdataTooShort);
        }
        let key = u16::from_be_bytes([rdata[offset], rdata[offset + 1]]);
        let length = u16::from_be_bytes([rdata[offset + 2], rdata[offset + 3]]) as usize;
        offset += 4;
        if rdata.len() - offset < length {
            return Err(DecodeError::AnswerRdataTooShort);
        }

        let mut value = render_param_value(key, &rdata[offset..offset + length])?;
        if value.contains('\\') {
            value = format!("\"{value}\"");
        }
        out.push(' ');
        out.push_str(&param_key_name(key));
        out.push('=');
        out.push_str(&value);
        offset += length;
    }

    Ok(out)
}

fn param_key_name(key: u16) -> String {
    match key {
        0 => "mandatory".to_string(),
        1 => "alpn".to_string(),
        2 => "no-default-alpn".to_string(),
        3 => "port".to_string(),
        4 => "ipv4hint".to_string(),
        5 => "ech".to_string(),
        6 => "ipv6hint".to_string(),
        _ => format!("key{key}"),
    }
}

fn render_param_value(key: u16, data: &[u8]) -> Result<String, DecodeError> {
    match key {
        // mandatory: list of 16-bit keys
        0 => {
            if data.len() % 2 != 0 {
                return Err(DecodeError::AnswerRdataTooShort);
            }
            let keys: Vec<String> = data
                .chunks_exact(2)
                .map(|pair| param_key_name(u16::from_be_bytes([pair[0], pair[1]])))
                .collect();
            Ok(keys.join(","))
        }
        // alpn: length-prefixed identifiers
        1 => {
            if data.is_empty() {
                return Err(DecodeError::AnswerRdataTooShort);
            }
            let mut alpns = Vec::new();
            let mut offset = 0;
            while offset < data.len() {
                let length = data[offset] as usize;
                offset += 1;
                if data.len() - offset < length {
                    return Err(DecodeError::AnswerRdataTooShort);
                }
                alpns.push(escape_bytes(&data[offset..offset + length]));
                offset += length;
            }
            Ok(alpns.join(","))
        }
        // no-default-alpn: value must be empty
        2 => {
            if !data.is_empty() {
                return Err(DecodeError::AnswerRdataTooShort);
            }
            Ok(String::new())
        }
        3 => {
            if data.len() != 2 {
                return Err(DecodeError::AnswerRdataTooShort);
            }
            Ok(u16::from_be_bytes([data[0], data[1]]).to_string())
        }
        4 => {
            if data.len() % 4 != 0 {
                return Err(DecodeError::AnswerRdataTooShort);
            }
            let addresses: Vec<String> = data
                .chunks_exact(4)
                .map(|addr| Ipv4Addr::new(addr[0], addr[1], addr[2], addr[3]).to_string())
                .collect();
            Ok(addresses.join(","))
        }
        6 => {
            if data.len() % 16 != 0 {
                return Err(DecodeError::AnswerRdataTooShort);
            }
            let addresses: Vec<String> = data
                .chunks_exact(16)
                .map(|addr| {
                    let octets: [u8; 16] = addr.try_into().unwrap_or([0; 16]);
                    Ipv6Addr::from(octets).to_string()
                })
                .collect();
            Ok(addresses.join(","))
        }
        // ech has no defined presentation; unknown keys are raw too
        _ => Ok(escape_bytes(data)),
    }
}
