//! Transport seam between the protocol layers and the HID library.
//!
//! [`HidBackend`] enumerates and opens devices; the [`Transport`] handle it
//! returns owns the open device and releases it when dropped, so every
//! successful open is closed exactly once on every exit path.

use std::time::Duration;

use crate::descriptor::DeviceDescriptor;
use crate::error::Result;

/// An open device handle.
pub trait Transport {
    /// Write one report. Returns the number of report bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read one report, waiting at most `timeout`.
    ///
    /// Returns `Ok(0)` when nothing arrived in time.
    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

/// Source of device descriptors and handles.
pub trait HidBackend {
    /// Handle type returned by [`HidBackend::open`].
    type Handle: Transport;

    /// Enumerate attached interfaces, filtered by vendor and product id
    /// (zero means any).
    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceDescriptor>>;

    /// Open the interface at the descriptor's path.
    fn open(&self, descriptor: &DeviceDescriptor) -> Result<Self::Handle>;
}

impl<B: HidBackend + ?Sized> HidBackend for &mut B {
    type Handle = B::Handle;

    fn enumerate(&mut self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceDescriptor>> {
        (**self).enumerate(vendor_id, product_id)
    }

    fn open(&self, descriptor: &DeviceDescriptor) -> Result<Self::Handle> {
        (**self).open(descriptor)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        (**self).write(data)
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        (**self).read_timeout(buf, timeout)
    }
}
