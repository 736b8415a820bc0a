//! Device resolution: query → exactly one device.

use tracing::{debug, info};

use crate::descriptor::DeviceDescriptor;
use crate::error::{DeviceError, Result};
use crate::query::{DeviceQuery, ANY_ID};
use crate::transport::HidBackend;

/// Finds and opens devices through a [`HidBackend`].
#[derive(Debug)]
pub struct DeviceResolver<B> {
    backend: B,
}

impl<B: HidBackend> DeviceResolver<B> {
    /// Create a resolver over `backend`.
    pub fn new(backend: B) -> Self {
        DeviceResolver { backend }
    }

    /// Every attached interface, unfiltered.
    pub fn list_all(&mut self) -> Result<Vec<DeviceDescriptor>> {
        self.backend.enumerate(ANY_ID, ANY_ID)
    }

    /// Attached interfaces matching `query`, in enumeration order.
    pub fn query(&mut self, query: &DeviceQuery) -> Result<Vec<DeviceDescriptor>> {
        debug!("Querying with {}", query);
        let found: Vec<DeviceDescriptor> = self
            .backend
            .enumerate(query.vendor_id(), query.product_id())?
            .into_iter()
            .filter(|d| query.matches(d))
            .collect();
        for d in &found {
            debug!("Found device... {:04x}:{:04x} at {}", d.vendor_id, d.product_id, d.path);
        }
        Ok(found)
    }

    /// The single interface matching `query`.
    ///
    /// Fails with `NoDeviceFound` or `NoUniqueDeviceFound` rather than picking one.
    pub fn resolve_unique(&mut self, query: &DeviceQuery) -> Result<DeviceDescriptor> {
        let mut found = self.query(query)?;
        match found.len() {
            0 => Err(DeviceError::NoDeviceFound {
                query: query.to_string(),
            }),
            1 => {
                let device = found.remove(0);
                info!("Using device {}", device);
                Ok(device)
            }
            count => Err(DeviceError::NoUniqueDeviceFound {
                query: query.to_string(),
                count,
            }),
        }
    }

    /// Open `descriptor`. The handle closes the device when dropped.
    pub fn open(&self, descriptor: &DeviceDescriptor) -> Result<B::Handle> {
        debug!("Opening {}", descriptor.path);
        self.backend.open(descriptor)
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the resolver, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
