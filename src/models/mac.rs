//! 48-bit MAC address.

use crate::error::{ConvertError, Grammar};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Matches every character that is not a hex digit; separators of any kind
/// are stripped before the remaining digits are reinterpreted.
static NON_HEX_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_non_hex_regex() -> &'static Regex {
    NON_HEX_REGEX.get_or_init(|| Regex::new(r"[^0-9A-Fa-f]").expect("Invalid Regex"))
}

/// MAC address as six raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Parse any textual MAC: `00:11:22:33:44:55`, `00-11-22-33-44-55`,
    /// `0011.2233.4455` and bare `001122334455` all yield the same value.
    pub fn parse(input: &str) -> Result<Self, ConvertError> {
        let digits = get_non_hex_regex().replace_all(input, "");
        log::trace!("mac digits after normalize: {digits}");
        if digits.len() != 12 {
            return Err(ConvertError::parse(
                Grammar::Mac,
                input,
                format!(
                    "MAC must be 48-bit (6 bytes), found {} hex digits",
                    digits.len()
                ),
            ));
        }

        let mut bytes = [0u8; 6];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &digits[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|e| ConvertError::parse(Grammar::Mac, input, e.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl FromStr for MacAddress {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MacAddress::parse(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators() {
        let expected = MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(MacAddress::parse("00:11:22:33:44:55").unwrap(), expected);
        assert_eq!(MacAddress::parse("00-11-22-33-44-55").unwrap(), expected);
        assert_eq!(MacAddress::parse("0011.2233.4455").unwrap(), expected);
        assert_eq!(MacAddress::parse("001122334455").unwrap(), expected);
    }

    #[test]
    fn test_parse_case_insensitive() {
        let mac = MacAddress::parse("AA:bb:CC:dd:EE:ff").unwrap();
        assert_eq!(mac.as_bytes(), &[0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_parse_wrong_length() {
        let err = MacAddress::parse("00:11:22:33:44").unwrap_err();
        assert!(err.is_parse());
        assert!(MacAddress::parse("00:11:22:33:44:55:66").is_err());
        assert!(MacAddress::parse("").is_err());
        // non-hex letters are separators, so this leaves only 10 digits
        assert!(MacAddress::parse("00:11:22:33:44:zz").is_err());
    }
}
