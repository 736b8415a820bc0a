//! # kbp-device
//!
//! Finds the keyboard among the attached HID interfaces and opens it.
//!
//! - [`DeviceQuery`] describes the wanted device; unset fields are wildcards
//! - [`matches`] is the pure predicate deciding whether a descriptor fits a query
//! - [`DeviceResolver`] enumerates, filters and insists on exactly one match
//! - [`HidBackend`] / [`Transport`] are the seam to the HID library, implemented
//!   for `hidapi` by [`HidContext`] and [`HidTransport`]
//!
//! ```no_run
//! use kbp_device::{DeviceQuery, DeviceResolver, HidContext};
//!
//! let context = HidContext::new()?;
//! let mut resolver = DeviceResolver::new(context);
//! let query: DeviceQuery = "::6d6c:3333::".parse()?;
//! let device = resolver.resolve_unique(&query)?;
//! let handle = resolver.open(&device)?;
//! # drop(handle);
//! # Ok::<(), kbp_device::DeviceError>(())
//! ```

mod descriptor;
mod error;
mod hid;
mod matcher;
mod query;
mod resolver;
mod transport;

pub use descriptor::DeviceDescriptor;
pub use error::{DeviceError, Result};
pub use hid::{HidContext, HidTransport, REPORT_ID};
pub use matcher::matches;
pub use query::{DeviceQuery, ANY_ID, DEFAULT_USAGE_ID, DEFAULT_USAGE_PAGE};
pub use resolver::DeviceResolver;
pub use transport::{HidBackend, Transport};
