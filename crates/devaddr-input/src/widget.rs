//! DevAddr input state machine
//!
//! Owns the displayed [`AddressValue`] and [`ByteOrder`]. Every change to the
//! displayed value is pushed into the host [`FormState`] straight away; the
//! bag is never read back, only the externally supplied value is watched.

use devaddr_core::{
    render, render_array, render_plain, AddressValue, ByteOrder, ExportFormat, ValidationRule,
};
use tracing::{debug, info, warn};

use crate::collab::{Clipboard, FormState, Notifier, RandomDevAddrService, ServiceError};
use crate::config::{DeviceIdentifier, InputConfig, SyncOrder};
use crate::notification::Notification;
use crate::view::{AddonView, InputView};

/// A pending random address request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomRequest {
    generation: u64,
    dev_eui: DeviceIdentifier,
}

impl RandomRequest {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dev_eui(&self) -> &DeviceIdentifier {
        &self.dev_eui
    }

    /// Ask `service` for an address. Does not touch the input, so other
    /// events can be handled while this is in flight.
    pub async fn send(self, service: &dyn RandomDevAddrService) -> RandomResponse {
        debug!(dev_eui = %self.dev_eui, generation = self.generation, "Requesting random DevAddr");
        let result = service.get_random_dev_addr(&self.dev_eui).await;
        RandomResponse {
            generation: self.generation,
            result,
        }
    }
}

/// Service answer tagged with the request it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomResponse {
    pub generation: u64,
    pub result: Result<String, ServiceError>,
}

/// What happened to a random address response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomOutcome {
    /// Address became the displayed value
    Applied(AddressValue),
    /// A newer request was issued after this one
    Stale,
    /// The input was unmounted before the response arrived
    Unmounted,
    /// The service failed
    Failed(ServiceError),
}

/// DevAddr form input
pub struct DevAddrInput<F: FormState> {
    config: InputConfig,
    form: F,
    value: AddressValue,
    byte_order: ByteOrder,
    /// Last externally supplied value, to re-seed only when it changes
    external: Option<String>,
    generation: u64,
    mounted: bool,
}

impl<F: FormState> DevAddrInput<F> {
    /// Mount an input, seeding the display from the binding's value
    pub fn new(config: InputConfig, form: F) -> Self {
        let initial = config.binding.value.clone();
        let mut input = Self {
            config,
            form,
            value: AddressValue::new(),
            byte_order: ByteOrder::default(),
            external: None,
            generation: 0,
            mounted: true,
        };
        input.on_external_value(initial.as_deref());
        input
    }

    pub fn value(&self) -> &AddressValue {
        &self.value
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Raw text from the input box
    pub fn on_raw_input(&mut self, raw: &str) -> &AddressValue {
        self.value = AddressValue::normalize(raw);
        self.sync();
        &self.value
    }

    /// Byte order selector changed. Returns false when nothing changed.
    pub fn on_byte_order_change(&mut self, order: ByteOrder) -> bool {
        if order == self.byte_order {
            return false;
        }

        self.value = ByteOrder::convert(&self.value, self.byte_order, order);
        self.byte_order = order;
        debug!(field = %self.config.binding.name, order = %order, value = %self.value, "Byte order changed");
        self.sync();
        true
    }

    /// The externally supplied value was (re-)rendered.
    ///
    /// Re-seeds the display only when the value differs from the last one
    /// seen; an absent or empty value never clears what is displayed. The
    /// value is in the bag's order and is shown in the selected one.
    pub fn on_external_value(&mut self, value: Option<&str>) -> bool {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return false;
        };

        if self.external.as_deref() == Some(value) {
            return false;
        }

        debug!(field = %self.config.binding.name, value = %value, "Seeding from external value");
        self.external = Some(value.to_string());
        self.value = self.display_value(AddressValue::from_trusted(value));
        true
    }

    pub fn export_plain(&self) -> String {
        render_plain(&self.value)
    }

    pub fn export_array(&self) -> String {
        render_array(&self.value)
    }

    /// Copy the value to `clipboard` in `format`.
    ///
    /// No-op when the clipboard is unavailable or there is no whole byte to
    /// copy. Failures end up as an error notification, never as an error.
    pub async fn copy_to_clipboard(
        &self,
        format: ExportFormat,
        clipboard: &dyn Clipboard,
        notifier: &dyn Notifier,
    ) -> bool {
        if !clipboard.is_available() {
            debug!("Clipboard not available, skipping copy");
            return false;
        }

        let Some(text) = render(&self.value, format) else {
            return false;
        };

        match clipboard.write_text(&text).await {
            Ok(()) => {
                debug!(format = ?format, text = %text, "Copied DevAddr");
                notifier.notify(Notification::copied());
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to copy DevAddr");
                notifier.notify(Notification::error(e.to_string()));
                false
            }
        }
    }

    /// Start a random address request, superseding any pending one
    pub fn begin_random_request(&mut self) -> RandomRequest {
        self.generation += 1;
        RandomRequest {
            generation: self.generation,
            dev_eui: self.config.dev_eui.clone(),
        }
    }

    /// Apply a service response if it is still the latest one
    pub fn apply_random(&mut self, response: RandomResponse) -> RandomOutcome {
        if !self.mounted {
            debug!(generation = response.generation, "Discarding random DevAddr, input unmounted");
            return RandomOutcome::Unmounted;
        }

        if response.generation != self.generation {
            debug!(
                generation = response.generation,
                latest = self.generation,
                "Discarding stale random DevAddr"
            );
            return RandomOutcome::Stale;
        }

        match response.result {
            Ok(dev_addr) => {
                info!(field = %self.config.binding.name, dev_addr = %dev_addr, "Applied random DevAddr");
                self.value = self.display_value(AddressValue::from_trusted(dev_addr));
                self.sync();
                RandomOutcome::Applied(self.value.clone())
            }
            Err(e) => {
                warn!(dev_eui = %self.config.dev_eui, error = %e, "Random DevAddr request failed");
                RandomOutcome::Failed(e)
            }
        }
    }

    /// Request, await and apply a random address in one go
    pub async fn request_random(&mut self, service: &dyn RandomDevAddrService) -> RandomOutcome {
        let request = self.begin_random_request();
        let response = request.send(service).await;
        self.apply_random(response)
    }

    /// Stop accepting async results
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Rule the host form evaluates on submit
    pub fn validation_rule(&self) -> ValidationRule {
        ValidationRule::devaddr(
            self.config.binding.name.clone(),
            &self.config.label,
            self.config.required,
        )
    }

    pub fn view(&self) -> InputView {
        InputView {
            id: format!("{}Render", self.config.binding.name),
            label: self.config.label.clone(),
            value: self.value.to_string(),
            disabled: self.config.disabled,
            addon: (!self.config.disabled).then(|| AddonView::new(self.byte_order)),
        }
    }

    /// Value as written into the form-state bag
    pub fn field_value(&self) -> AddressValue {
        match (self.config.sync_order, self.byte_order) {
            (SyncOrder::Canonical, ByteOrder::Lsb) => self.value.reversed_bytes(),
            _ => self.value.clone(),
        }
    }

    /// Inverse of [`Self::field_value`]
    fn display_value(&self, field: AddressValue) -> AddressValue {
        match (self.config.sync_order, self.byte_order) {
            (SyncOrder::Canonical, ByteOrder::Lsb) => field.reversed_bytes(),
            _ => field,
        }
    }

    fn sync(&mut self) {
        let value = self.field_value();
        debug!(field = %self.config.binding.name, value = %value, "Syncing form field");
        self.form.set_field(&self.config.binding.name, value.as_str());
    }
}
