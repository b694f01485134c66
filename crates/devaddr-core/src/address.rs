//! Address values as typed, displayed and stored
//!
//! An [`AddressValue`] is the digit sequence shown in the input box. It is
//! kept in whatever byte order is currently displayed and may be partial
//! while the user is typing. A [`DevAddr`] is the complete 4-byte address in
//! canonical (MSB) order.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

use crate::byte_order::ByteOrder;

/// Number of bytes in a DevAddr
pub const DEVADDR_LEN: usize = 4;

/// Maximum number of hex digits kept by the normalizer
pub const MAX_DIGITS: usize = DEVADDR_LEN * 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid length: expected {expected} hex digits, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("incomplete address: {0:?}")]
    Incomplete(String),
    #[error("invalid byte order: {0} (expected msb or lsb)")]
    InvalidByteOrder(String),
}

/// Hex digit sequence as displayed in the input
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressValue(String);

impl AddressValue {
    /// Empty value
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Keep the hex digits of `raw` in order, clamped to [`MAX_DIGITS`].
    ///
    /// Everything else (separators, whitespace, stray letters) is dropped
    /// silently, as are digits past the eighth.
    pub fn normalize(raw: &str) -> Self {
        let mut digits = raw.chars().filter(char::is_ascii_hexdigit);
        let value: String = digits.by_ref().take(MAX_DIGITS).collect();

        let dropped = digits.count();
        if dropped > 0 {
            trace!(dropped, "Clamped DevAddr input");
        }

        Self(value)
    }

    /// Take a value from a trusted source without filtering
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters currently held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the value holds exactly [`MAX_DIGITS`] hex digits
    pub fn is_complete(&self) -> bool {
        self.0.len() == MAX_DIGITS && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Whole hex byte pairs, scanning left to right.
    ///
    /// A position that does not start a pair of two hex digits is skipped,
    /// so a trailing unpaired digit never shows up here.
    pub fn byte_pairs(&self) -> Vec<&str> {
        let bytes = self.0.as_bytes();
        let mut pairs = Vec::with_capacity(bytes.len() / 2);
        let mut i = 0;

        while i + 1 < bytes.len() {
            if bytes[i].is_ascii_hexdigit() && bytes[i + 1].is_ascii_hexdigit() {
                // Both bytes are ASCII, so i and i + 2 are char boundaries
                pairs.push(&self.0[i..i + 2]);
                i += 2;
            } else {
                i += 1;
            }
        }

        pairs
    }

    /// Reverse the order of the byte pairs.
    ///
    /// Applying this twice to an even-length hex value returns the original.
    pub fn reversed_bytes(&self) -> Self {
        let mut pairs = self.byte_pairs();
        pairs.reverse();
        Self(pairs.concat())
    }
}

impl std::fmt::Display for AddressValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AddressValue {
    fn from(value: &str) -> Self {
        Self::normalize(value)
    }
}

/// A complete device address in canonical (MSB) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DevAddr([u8; DEVADDR_LEN]);

impl DevAddr {
    pub fn from_be_bytes(bytes: [u8; DEVADDR_LEN]) -> Self {
        Self(bytes)
    }

    pub fn to_be_bytes(&self) -> [u8; DEVADDR_LEN] {
        self.0
    }

    pub fn to_le_bytes(&self) -> [u8; DEVADDR_LEN] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Upper-case hex in LSB order
    pub fn to_lsb_string(&self) -> String {
        hex::encode_upper(self.to_le_bytes())
    }

    /// Recover the canonical address from a value displayed in `order`
    pub fn from_value(value: &AddressValue, order: ByteOrder) -> Result<Self, AddressError> {
        if !value.is_complete() {
            return Err(AddressError::Incomplete(value.as_str().to_string()));
        }

        let addr: DevAddr = value.as_str().parse()?;
        Ok(match order {
            ByteOrder::Msb => addr,
            ByteOrder::Lsb => Self(addr.to_le_bytes()),
        })
    }

    /// Render as a displayed value in `order`
    pub fn to_value(&self, order: ByteOrder) -> AddressValue {
        match order {
            ByteOrder::Msb => AddressValue(self.to_string()),
            ByteOrder::Lsb => AddressValue(self.to_lsb_string()),
        }
    }
}

impl std::fmt::Display for DevAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl FromStr for DevAddr {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != MAX_DIGITS {
            return Err(AddressError::InvalidLength {
                expected: MAX_DIGITS,
                got: s.len(),
            });
        }

        let mut bytes = [0u8; DEVADDR_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for DevAddr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DevAddr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_filters_non_hex() {
        let value = AddressValue::normalize("01:02-zz3g 4");
        assert_eq!(value.as_str(), "0102034");
    }

    #[test]
    fn test_normalize_clamps_to_eight_digits() {
        let value = AddressValue::normalize("0123456789");
        assert_eq!(value.as_str(), "01234567");
        assert!(value.is_complete());
    }

    #[test]
    fn test_normalize_keeps_case() {
        let value = AddressValue::normalize("aBcD");
        assert_eq!(value.as_str(), "aBcD");
    }

    #[test]
    fn test_normalize_empty() {
        assert!(AddressValue::normalize("").is_empty());
        assert!(AddressValue::normalize("xyz-- ").is_empty());
    }

    #[test]
    fn test_byte_pairs_skip_trailing_digit() {
        let value = AddressValue::normalize("1A2B3");
        assert_eq!(value.byte_pairs(), vec!["1A", "2B"]);
    }

    #[test]
    fn test_byte_pairs_of_trusted_value_skip_separators() {
        let value = AddressValue::from_trusted("0a-0b:0c");
        assert_eq!(value.byte_pairs(), vec!["0a", "0b", "0c"]);
    }

    #[test]
    fn test_reversed_bytes() {
        let value = AddressValue::normalize("1A2B3C4D");
        assert_eq!(value.reversed_bytes().as_str(), "4D3C2B1A");
        assert_eq!(value.reversed_bytes().reversed_bytes(), value);
    }

    #[test]
    fn test_reversed_bytes_drops_unpaired_digit() {
        let value = AddressValue::normalize("1A2B3");
        assert_eq!(value.reversed_bytes().as_str(), "2B1A");
    }

    #[test]
    fn test_is_complete() {
        assert!(!AddressValue::normalize("1A2B3C4").is_complete());
        assert!(AddressValue::normalize("1a2b3c4d").is_complete());
        assert!(!AddressValue::from_trusted("1A2B3C4G").is_complete());
    }

    #[test]
    fn test_devaddr_parse_and_display() {
        let addr: DevAddr = "1a2b3c4d".parse().unwrap();
        assert_eq!(addr.to_be_bytes(), [0x1a, 0x2b, 0x3c, 0x4d]);
        assert_eq!(addr.to_string(), "1A2B3C4D");
        assert_eq!(addr.to_lsb_string(), "4D3C2B1A");
        assert_eq!(addr.to_u32(), 0x1a2b3c4d);
    }

    #[test]
    fn test_devaddr_parse_errors() {
        assert_eq!(
            "1A2B".parse::<DevAddr>(),
            Err(AddressError::InvalidLength {
                expected: 8,
                got: 4
            })
        );
        assert!(matches!(
            "1A2B3C4Z".parse::<DevAddr>(),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_devaddr_from_lsb_value() {
        let displayed = AddressValue::normalize("4D3C2B1A");
        let addr = DevAddr::from_value(&displayed, ByteOrder::Lsb).unwrap();
        assert_eq!(addr.to_string(), "1A2B3C4D");
        assert_eq!(addr.to_value(ByteOrder::Lsb), displayed);
    }

    #[test]
    fn test_devaddr_from_incomplete_value() {
        let partial = AddressValue::normalize("1A2B");
        assert!(matches!(
            DevAddr::from_value(&partial, ByteOrder::Msb),
            Err(AddressError::Incomplete(_))
        ));
    }

    #[test]
    fn test_devaddr_serde() {
        let addr: DevAddr = "01020304".parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"01020304\"");
        let back: DevAddr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<DevAddr>("\"0102\"").is_err());
    }

    fn arb_even_hex() -> impl Strategy<Value = String> {
        prop::collection::vec("[0-9A-Fa-f]{2}", 0..=4).prop_map(|pairs| pairs.concat())
    }

    proptest! {
        #[test]
        fn normalize_output_is_clamped_hex(raw in ".*") {
            let value = AddressValue::normalize(&raw);
            prop_assert!(value.len() <= MAX_DIGITS);
            prop_assert!(value.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
        }

        #[test]
        fn normalize_is_idempotent(raw in ".*") {
            let once = AddressValue::normalize(&raw);
            let twice = AddressValue::normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn reversed_bytes_is_involution(hex in arb_even_hex()) {
            let value = AddressValue::normalize(&hex);
            prop_assert_eq!(value.reversed_bytes().reversed_bytes(), value);
        }
    }
}
