//! MSB/LSB display order

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::address::{AddressError, AddressValue};

/// Order in which the bytes of an address are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Most significant byte first (canonical / wire order)
    #[default]
    Msb,
    /// Least significant byte first
    Lsb,
}

impl ByteOrder {
    /// The other order
    pub fn toggled(self) -> Self {
        match self {
            Self::Msb => Self::Lsb,
            Self::Lsb => Self::Msb,
        }
    }

    /// Re-express `value` displayed in `from` as displayed in `to`
    pub fn convert(value: &AddressValue, from: ByteOrder, to: ByteOrder) -> AddressValue {
        if from == to {
            value.clone()
        } else {
            value.reversed_bytes()
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msb => "msb",
            Self::Lsb => "lsb",
        }
    }
}

impl std::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Msb => write!(f, "MSB"),
            Self::Lsb => write!(f, "LSB"),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "msb" => Ok(Self::Msb),
            "lsb" => Ok(Self::Lsb),
            other => Err(AddressError::InvalidByteOrder(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_msb() {
        assert_eq!(ByteOrder::default(), ByteOrder::Msb);
    }

    #[test]
    fn test_convert_to_lsb_and_back() {
        let msb = AddressValue::normalize("1A2B3C4D");
        let lsb = ByteOrder::convert(&msb, ByteOrder::Msb, ByteOrder::Lsb);
        assert_eq!(lsb.as_str(), "4D3C2B1A");
        assert_eq!(ByteOrder::convert(&lsb, ByteOrder::Lsb, ByteOrder::Msb), msb);
    }

    #[test]
    fn test_convert_same_order_is_identity() {
        let value = AddressValue::normalize("1A2B3");
        assert_eq!(ByteOrder::convert(&value, ByteOrder::Lsb, ByteOrder::Lsb), value);
    }

    #[test]
    fn test_parse() {
        assert_eq!("MSB".parse::<ByteOrder>().unwrap(), ByteOrder::Msb);
        assert_eq!("lsb".parse::<ByteOrder>().unwrap(), ByteOrder::Lsb);
        assert!("mid".parse::<ByteOrder>().is_err());
        assert_eq!(ByteOrder::Msb.toggled(), ByteOrder::Lsb);
    }
}
