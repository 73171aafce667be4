//! Hexadecimal text parsing for addresses, sizes and offsets.
//!
//! Trace tools store every address-like column as hex text, with or
//! without a `0x` prefix. Two forms are provided:
//! - [`parse_hex`] is strict and reports failures
//! - [`parse_hex_or_zero`] is used while reading rows: a malformed value
//!   becomes the sentinel `0` and a warning is logged, so one bad row never
//!   aborts a symbol load or an event stream

use crate::utils::error::ParseError;
use log::warn;

/// Parse a hex string (optional `0x`/`0X` prefix, surrounding whitespace ignored)
///
/// **Public** - used by the CLI for user-supplied addresses
pub fn parse_hex(value: &str) -> Result<u64, ParseError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(ParseError::InvalidHex(value.to_string()));
    }

    u64::from_str_radix(digits, 16).map_err(|_| ParseError::InvalidHex(value.to_string()))
}

/// Parse a hex column value, substituting `0` for missing or malformed text
///
/// **Public** - row-level parsing policy for the store readers
pub fn parse_hex_or_zero(column: &str, value: Option<&str>) -> u64 {
    let Some(text) = value else {
        warn!("Column '{}' is NULL, using 0", column);
        return 0;
    };

    match parse_hex(text) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Column '{}': {}, using 0", column, e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_plain_and_prefixed() {
        assert_eq!(parse_hex("1000").unwrap(), 0x1000);
        assert_eq!(parse_hex("0x7fff0010").unwrap(), 0x7fff_0010);
        assert_eq!(parse_hex("0XaBc").unwrap(), 0xabc);
        assert_eq!(parse_hex(" ff ").unwrap(), 0xff);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("").is_err());
        assert!(parse_hex("0x").is_err());
        assert!(parse_hex("xyz").is_err());
        // One nibble too many for u64
        assert!(parse_hex("10000000000000000").is_err());
    }

    #[test]
    fn test_parse_hex_or_zero() {
        assert_eq!(parse_hex_or_zero("addr", Some("20")), 0x20);
        assert_eq!(parse_hex_or_zero("addr", Some("not-hex")), 0);
        assert_eq!(parse_hex_or_zero("addr", None), 0);
    }
}
