//! Query matching.

use crate::descriptor::DeviceDescriptor;
use crate::query::{DeviceQuery, ANY_ID};

/// Whether `descriptor` satisfies every populated field of `query`.
///
/// Names compare case-sensitively; ids compare exactly. Wildcard fields
/// (zero ids, empty names) match anything.
pub fn matches(descriptor: &DeviceDescriptor, query: &DeviceQuery) -> bool {
    id_matches(query.vendor_id(), descriptor.vendor_id)
        && id_matches(query.product_id(), descriptor.product_id)
        && id_matches(query.usage_id(), descriptor.usage_id)
        && id_matches(query.usage_page(), descriptor.usage_page)
        && name_matches(query.product_name(), &descriptor.product_name)
        && name_matches(query.vendor_name(), &descriptor.vendor_name)
}

fn id_matches(wanted: u16, actual: u16) -> bool {
    wanted == ANY_ID || wanted == actual
}

fn name_matches(wanted: &str, actual: &str) -> bool {
    wanted.is_empty() || wanted == actual
}
