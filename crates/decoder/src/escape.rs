use std::fmt::Write as _;

/// Presentation-format byte escaping shared by SVCB values and EDNS option
/// data: printable ASCII passes through (with `"`, `;`, space and backslash
/// backslash-escaped), everything else becomes `\DDD`.
pub fn escape_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        if (b' '..=b'~').contains(&b) {
            match b {
                b'"' | b';' | b' ' | b'\\' => {
                    out.push('\\');
                    out.push(b as char);
                }
                _ => out.push(b as char),
            }
        } else {
            let _ = write!(out, "\\{b:03}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_passes_through() {
        assert_eq!(escape_bytes(b"h2"), "h2");
        assert_eq!(escape_bytes(b"example.com"), "example.com");
    }

    #[test]
    fn special_ascii_backslash_escaped() {
        assert_eq!(escape_bytes(b"a b"), "a\\ b");
        assert_eq!(escape_bytes(b"\"x\""), "\\\"x\\\"");
        assert_eq!(escape_bytes(b";"), "\\;");
        assert_eq!(escape_bytes(b"\\"), "\\\\");
    }

    #[test]
    fn non_printable_becomes_decimal_escape() {
        assert_eq!(escape_bytes(&[0x00]), "\\000");
        assert_eq!(escape_bytes(&[0x1f]), "\\031");
        assert_eq!(escape_bytes(&[0x7f]), "\\127");
        assert_eq!(escape_bytes(&[0xff]), "\\255");
    }
}
