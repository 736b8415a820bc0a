//! `hidapi` backend.
//!
//! [`HidContext`] owns the process-wide HID library state. Create it once at
//! start-up and drop it once at exit; every device handle is opened through it.

use std::ffi::CString;
use std::time::Duration;

use hidapi::{HidApi, HidDevice};
use tracing::{debug, info, trace};

use crate::descriptor::DeviceDescriptor;
use crate::error::{DeviceError, Result};
use crate::transport::{HidBackend, Transport};

/// Report id prepended to every write. The raw HID interface has a single
/// unnumbered report, which `hidapi` expects to be addressed as report 0.
pub const REPORT_ID: u8 = 0x00;

/// The initialized HID subsystem.
pub struct HidContext {
    api: HidApi,
}

impl HidContext {
    /// Initialize the HID library.
    pub fn new() -> Result<Self> {
        let api = HidApi::new()?;
        info!("Initialized HID subsystem");
        Ok(HidContext { api })
    }
}

impl std::fmt::Debug for HidContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HidContext").finish_non_exhaustive()
    }
}

impl Drop for HidContext {
    fn drop(&mut self) {
        info!("Shutting down HID subsystem");
    }
}

impl HidBackend for HidContext {
    type Handle = HidTransport;

    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceDescriptor>> {
        self.api.reset_devices()?;
        self.api.add_devices(vendor_id, product_id)?;
        let devices: Vec<DeviceDescriptor> = self.api.device_list().map(descriptor_from).collect();
        debug!(
            "Enumerated {} interfaces for {:04x}:{:04x}",
            devices.len(),
            vendor_id,
            product_id
        );
        Ok(devices)
    }

    fn open(&self, descriptor: &DeviceDescriptor) -> Result<HidTransport> {
        let path = CString::new(descriptor.path.as_str())
            .map_err(|_| DeviceError::InvalidPath(descriptor.path.clone()))?;
        let device = self.api.open_path(&path)?;
        Ok(HidTransport {
            device,
            path: descriptor.path.clone(),
        })
    }
}

fn descriptor_from(info: &hidapi::DeviceInfo) -> DeviceDescriptor {
    DeviceDescriptor {
        path: info.path().to_string_lossy().into_owned(),
        vendor_id: info.vendor_id(),
        product_id: info.product_id(),
        usage_id: info.usage(),
        usage_page: info.usage_page(),
        product_name: info.product_string().unwrap_or_default().to_string(),
        vendor_name: info.manufacturer_string().unwrap_or_default().to_string(),
        serial_number: info.serial_number().unwrap_or_default().to_string(),
        interface_number: info.interface_number(),
        release_number: info.release_number(),
        bus_type: format!("{:?}", info.bus_type()),
    }
}

/// An open raw HID interface. Closed when dropped.
pub struct HidTransport {
    device: HidDevice,
    path: String,
}

impl HidTransport {
    /// Path the handle was opened from.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for HidTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HidTransport").field("path", &self.path).finish()
    }
}

impl Transport for HidTransport {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut report = Vec::with_capacity(data.len() + 1);
        report.push(REPORT_ID);
        report.extend_from_slice(data);
        let written = self.device.write(&report)?;
        trace!("Sent {} bytes to {}", written, self.path);
        Ok(written.saturating_sub(1))
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        Ok(self.device.read_timeout(buf, millis)?)
    }
}

impl Drop for HidTransport {
    fn drop(&mut self) {
        debug!("Closing {}", self.path);
    }
}
