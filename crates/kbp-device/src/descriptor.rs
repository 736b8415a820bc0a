//! Enumerated device descriptors.

use serde::{Deserialize, Serialize};

/// Snapshot of one HID interface, as reported by enumeration.
///
/// Names that the device does not report are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Platform path used to open the interface.
    pub path: String,
    /// USB vendor id.
    pub vendor_id: u16,
    /// USB product id.
    pub product_id: u16,
    /// HID usage id of the interface.
    pub usage_id: u16,
    /// HID usage page of the interface.
    pub usage_page: u16,
    /// Product string.
    pub product_name: String,
    /// Manufacturer string.
    pub vendor_name: String,
    /// Serial number string.
    pub serial_number: String,
    /// USB interface number, -1 when unknown.
    pub interface_number: i32,
    /// Device release number (bcdDevice).
    pub release_number: u16,
    /// Bus the device is attached through.
    pub bus_type: String,
}

impl DeviceDescriptor {
    /// One-line summary in the `ls` listing format.
    pub fn listing_line(&self) -> String {
        format!(
            "{}: ID {:04x}:{:04x}-{} {} mfr: \"{}\" prod: \"{}\" (s/n: {}) (iface no: {}, usage id: {:04x}, usage page: {:04x})",
            self.path,
            self.vendor_id,
            self.product_id,
            self.release_number,
            self.bus_type,
            self.vendor_name,
            self.product_name,
            self.serial_number,
            self.interface_number,
            self.usage_id,
            self.usage_page,
        )
    }
}

impl std::fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vendor: {}/{:04x}, Product: {}/{:04x}, Usage id/page: {:04x}/{:04x}, Path: {}",
            self.vendor_name,
            self.vendor_id,
            self.product_name,
            self.product_id,
            self.usage_id,
            self.usage_page,
            self.path
        )
    }
}
