//! Statically typed input configuration

use serde::{Deserialize, Serialize};

/// External form-state slot this input writes to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// Field name in the form-state bag
    pub name: String,
    /// Externally supplied current value, used to seed the display
    #[serde(default)]
    pub value: Option<String>,
}

impl FieldBinding {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Opaque device identifier passed through to the address service
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceIdentifier(pub String);

impl DeviceIdentifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which order is written into the form-state bag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncOrder {
    /// Whatever is currently displayed
    #[default]
    Displayed,
    /// Always MSB, re-reversing LSB displays before the write
    Canonical,
}

/// Configuration for one DevAddr input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field label, used in the validation message
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(flatten)]
    pub binding: FieldBinding,
    /// Device the random address is generated for
    #[serde(default)]
    pub dev_eui: DeviceIdentifier,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub sync_order: SyncOrder,
}

fn default_label() -> String {
    "Device address".to_string()
}

impl InputConfig {
    pub fn new(name: impl Into<String>, dev_eui: impl Into<String>) -> Self {
        Self {
            label: default_label(),
            binding: FieldBinding::new(name),
            dev_eui: DeviceIdentifier::new(dev_eui),
            required: false,
            disabled: false,
            sync_order: SyncOrder::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::new("devAddr", "")
    }
}
