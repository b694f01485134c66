//! DevAddr Input - form field state machine for a 4-byte device address
//!
//! [`DevAddrInput`] owns the displayed value and byte order, pushes every
//! change into a host form-state bag, renders clipboard exports and applies
//! randomly generated addresses. Everything outside the state machine
//! (form container, address service, clipboard, notifications) sits behind
//! the traits in [`collab`].

pub mod collab;
pub mod config;
pub mod notification;
pub mod view;
pub mod widget;

pub use collab::{
    Clipboard, ClipboardError, FormState, MemoryForm, Notifier, RandomDevAddrService,
    ServiceError,
};
pub use config::{DeviceIdentifier, FieldBinding, InputConfig, SyncOrder};
pub use notification::{Notification, NotificationKind};
pub use view::{AddonView, InputView};
pub use widget::{DevAddrInput, RandomOutcome, RandomRequest, RandomResponse};
