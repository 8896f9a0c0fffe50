//! Unpadded, lowercase *base32* ([RFC 4648] §6) for use inside labels.
//!
//! Encoding emits lowercase letters and digits `2`-`7` and drops the `=`
//! padding, so the output is a valid hostname label. Decoding is
//! case-insensitive and accepts input with or without padding.
//!
//! [RFC 4648]: https://tools.ietf.org/html/rfc4648

use thiserror::Error;

const ENCODE_ALPHABET: &[u8; 32] = b"abcdefghijklmnopqrstuvwxyz234567";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("illegal base32 character '{0}'")]
    IllegalChar(char),

    #[error("base32 input has an impossible length of {0} symbols")]
    ShortInput(usize),

    #[error("base32 input has non-zero trailing bits")]
    TrailingBits,
}

pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ENCODE_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
        buffer &= (1 << bits) - 1;
    }
    if bits > 0 {
        out.push(ENCODE_ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    let symbols = s.trim_end_matches('=');

    // 1, 3 and 6 trailing symbols cannot come out of a whole number of octets.
    if matches!(symbols.len() % 8, 1 | 3 | 6) {
        return Err(DecodeError::ShortInput(symbols.len()));
    }

    let mut out = Vec::with_capacity(symbols.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for ch in symbols.chars() {
        buffer = (buffer << 5) | u32::from(symbol_value(ch)?);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
        buffer &= (1 << bits) - 1;
    }
    if buffer != 0 {
        return Err(DecodeError::TrailingBits);
    }
    Ok(out)
}

fn symbol_value(ch: char) -> Result<u8, DecodeError> {
    match ch {
        'a'..='z' => Ok(ch as u8 - b'a'),
        'A'..='Z' => Ok(ch as u8 - b'A'),
        '2'..='7' => Ok(ch as u8 - b'2' + 26),
        _ => Err(DecodeError::IllegalChar(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc4648_vectors() {
        let vectors: &[(&[u8], &str)] = &[
            (b"", ""),
            (b"f", "my"),
            (b"fo", "mzxq"),
            (b"foo", "mzxw6"),
            (b"foob", "mzxw6yq"),
            (b"fooba", "mzxw6ytb"),
            (b"foobar", "mzxw6ytboi"),
        ];
        for (raw, encoded) in vectors {
            assert_eq!(encode(raw), *encoded);
            assert_eq!(decode(encoded).unwrap(), *raw);
        }
    }

    #[test]
    fn test_decode_accepts_padding_and_uppercase() {
        assert_eq!(decode("MZXW6YQ=").unwrap(), b"foob");
    }

    #[test]
    fn test_decode_rejects_bad_symbol() {
        assert_eq!(decode("mz1w"), Err(DecodeError::IllegalChar('1')));
    }

    #[test]
    fn test_decode_rejects_impossible_length() {
        assert_eq!(decode("mzx"), Err(DecodeError::ShortInput(3)));
    }

    #[test]
    fn test_decode_rejects_trailing_bits() {
        assert_eq!(decode("mz"), Err(DecodeError::TrailingBits));
    }
}
