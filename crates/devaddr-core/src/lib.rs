//! DevAddr Core - value types for the device address input
//!
//! This crate provides the pure parts of the DevAddr input:
//! - Keystroke normalization into a clamped hex digit sequence
//! - MSB/LSB byte order conversion
//! - Clipboard renderings (plain hex string and `0x..` byte array)
//! - The declarative validation rule handed to the host form

pub mod address;
pub mod byte_order;
pub mod export;
pub mod validation;

pub use address::{AddressError, AddressValue, DevAddr, DEVADDR_LEN, MAX_DIGITS};
pub use byte_order::ByteOrder;
pub use export::{render, render_array, render_plain, ExportFormat};
pub use validation::{ValidationError, ValidationRule};
