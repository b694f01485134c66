//! Clipboard renderings of an address value
//!
//! Both renderings work on whole bytes only and are upper-cased.

use serde::{Deserialize, Serialize};

use crate::address::AddressValue;

/// Clipboard export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// `1A2B3C4D`
    HexString,
    /// `0x1A, 0x2B, 0x3C, 0x4D`
    HexArray,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::HexString, ExportFormat::HexArray];

    /// Label shown in the export menu
    pub fn label(&self) -> &'static str {
        match self {
            Self::HexString => "HEX string",
            Self::HexArray => "HEX array",
        }
    }
}

/// Render `value` in `format`, or `None` when it holds no whole byte
pub fn render(value: &AddressValue, format: ExportFormat) -> Option<String> {
    if value.byte_pairs().is_empty() {
        return None;
    }

    Some(match format {
        ExportFormat::HexString => render_plain(value),
        ExportFormat::HexArray => render_array(value),
    })
}

pub fn render_plain(value: &AddressValue) -> String {
    value.byte_pairs().concat().to_uppercase()
}

pub fn render_array(value: &AddressValue) -> String {
    value
        .byte_pairs()
        .iter()
        .map(|pair| format!("0x{}", pair.to_uppercase()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let value = AddressValue::normalize("1a2b3c4d");
        assert_eq!(render_plain(&value), "1A2B3C4D");
    }

    #[test]
    fn test_render_array() {
        let value = AddressValue::normalize("1A2B3C4D");
        assert_eq!(render_array(&value), "0x1A, 0x2B, 0x3C, 0x4D");
    }

    #[test]
    fn test_render_whole_bytes_only() {
        let value = AddressValue::normalize("1a2b3");
        assert_eq!(
            render(&value, ExportFormat::HexString).as_deref(),
            Some("1A2B")
        );
        assert_eq!(
            render(&value, ExportFormat::HexArray).as_deref(),
            Some("0x1A, 0x2B")
        );
    }

    #[test]
    fn test_render_nothing_to_copy() {
        assert_eq!(render(&AddressValue::new(), ExportFormat::HexString), None);
        assert_eq!(render(&AddressValue::normalize("1"), ExportFormat::HexArray), None);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = ExportFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["HEX string", "HEX array"]);
    }
}
