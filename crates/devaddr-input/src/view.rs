//! Render model for a UI adapter
//!
//! Only describes what to draw; a UI layer maps it onto its own controls
//! and routes events back into [`crate::DevAddrInput`].

use devaddr_core::{ByteOrder, ExportFormat};
use serde::Serialize;

/// Controls next to the text box: byte order selector, regenerate, export menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonView {
    pub byte_orders: [ByteOrder; 2],
    pub selected: ByteOrder,
    pub export_menu: Vec<(ExportFormat, &'static str)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    /// Element id of the visible text box
    pub id: String,
    pub label: String,
    /// Displayed value in the selected byte order
    pub value: String,
    pub disabled: bool,
    /// Hidden while disabled
    pub addon: Option<AddonView>,
}

impl AddonView {
    pub fn new(selected: ByteOrder) -> Self {
        Self {
            byte_orders: [ByteOrder::Msb, ByteOrder::Lsb],
            selected,
            export_menu: ExportFormat::ALL.iter().map(|f| (*f, f.label())).collect(),
        }
    }
}
