//! Seams to the collaborators the input does not own

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::DeviceIdentifier;
use crate::notification::Notification;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Host form-state bag, written on every value change
pub trait FormState {
    fn set_field(&mut self, name: &str, value: &str);
}

impl<F: FormState + ?Sized> FormState for &mut F {
    fn set_field(&mut self, name: &str, value: &str) {
        (**self).set_field(name, value)
    }
}

/// Service handing out random DevAddrs for a device
#[async_trait]
pub trait RandomDevAddrService: Send + Sync {
    async fn get_random_dev_addr(&self, dev_eui: &DeviceIdentifier) -> Result<String, ServiceError>;
}

/// System clipboard sink
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Whether the host environment offers a clipboard at all
    fn is_available(&self) -> bool {
        true
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Toast sink
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// In-memory form-state bag that also records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    fields: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    /// Every `(name, value)` write in order
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }
}

impl FormState for MemoryForm {
    fn set_field(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
        self.writes.push((name.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_form_records_writes() {
        let mut form = MemoryForm::new();
        form.set_field("devAddr", "01");
        form.set_field("devAddr", "0102");
        assert_eq!(form.get("devAddr"), Some("0102"));
        assert_eq!(form.writes().len(), 2);
        assert_eq!(form.get("other"), None);
    }

    #[test]
    fn test_form_state_through_mut_ref() {
        fn write<F: FormState>(mut form: F) {
            form.set_field("devAddr", "AB");
        }

        let mut form = MemoryForm::new();
        write(&mut form);
        assert_eq!(form.get("devAddr"), Some("AB"));
    }
}
