// Copyright (c) 2026 glyphfall contributors

use std::char;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Charset {
    Printable,
    Binary,
    Hex,
    Digits,
    Letters,
    Katakana,
    Matrix,
    Symbols,
    Blocks,
}

pub fn charset_from_str(spec: &str) -> Result<Charset, String> {
    let spec = spec.trim().to_ascii_lowercase();
    match spec.as_str() {
        "printable" | "ascii" => Ok(Charset::Printable),
        "binary" | "bin" | "01" => Ok(Charset::Binary),
        "hex" | "hexadecimal" => Ok(Charset::Hex),
        "digits" | "dec" | "decimal" => Ok(Charset::Digits),
        "letters" | "english" => Ok(Charset::Letters),
        "katakana" => Ok(Charset::Katakana),
        "matrix" => Ok(Charset::Matrix),
        "symbols" => Ok(Charset::Symbols),
        "blocks" => Ok(Charset::Blocks),
        _ => Err(format!(
            "unsupported charset: {} (see --list-charsets)",
            spec
        )),
    }
}

/// Parse a `--chars` literal override. Control characters are rejected; the
/// terminal painter prints every pool member verbatim.
pub fn parse_user_chars(s: &str) -> Result<Vec<char>, String> {
    let out: Vec<char> = s.chars().collect();
    if out.is_empty() {
        return Err("--chars: empty character set".to_string());
    }
    if let Some(c) = out.iter().find(|c| c.is_control()) {
        return Err(format!("--chars: control character U+{:04X}", *c as u32));
    }
    Ok(out)
}

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

pub fn build_glyphs(charset: Charset) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();

    match charset {
        // Printable subset of the 7-bit range; control characters excluded.
        Charset::Printable => push_range(&mut out, 0x21, 0x7E),
        Charset::Binary => push_range(&mut out, 0x30, 0x31),
        Charset::Hex => {
            push_range(&mut out, 0x30, 0x39);
            push_range(&mut out, 0x41, 0x46);
        }
        Charset::Digits => push_range(&mut out, 0x30, 0x39),
        Charset::Letters => {
            push_range(&mut out, 0x41, 0x5A);
            push_range(&mut out, 0x61, 0x7A);
        }
        Charset::Katakana => push_range(&mut out, 0xFF66, 0xFF9D),
        Charset::Matrix => {
            push_range(&mut out, 0x30, 0x39);
            push_range(&mut out, 0x41, 0x5A);
            push_range(&mut out, 0x61, 0x7A);
            push_range(&mut out, 0xFF66, 0xFF9D);
        }
        Charset::Symbols => out.extend("∞∑∫√π∆Ωµλ≈≠≤≥×÷±∂∇∈∉∩∪⊕⊗".chars()),
        Charset::Blocks => push_range(&mut out, 0x2580, 0x259F),
    }

    if out.is_empty() {
        out.push('0');
        out.push('1');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_pool_has_no_control_chars() {
        let out = build_glyphs(Charset::Printable);
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| !c.is_control() && !c.is_whitespace()));
    }

    #[test]
    fn binary_has_only_0_and_1() {
        let out = build_glyphs(Charset::Binary);
        assert_eq!(out, vec!['0', '1']);
    }

    #[test]
    fn charset_aliases_resolve() {
        assert_eq!(charset_from_str("bin").unwrap(), Charset::Binary);
        assert_eq!(charset_from_str("ASCII").unwrap(), Charset::Printable);
        assert!(charset_from_str("klingon").is_err());
    }

    #[test]
    fn user_chars_reject_control_and_empty() {
        assert_eq!(parse_user_chars("01").unwrap(), vec!['0', '1']);
        assert!(parse_user_chars("").is_err());
        assert!(parse_user_chars("a\tb").is_err());
    }
}
