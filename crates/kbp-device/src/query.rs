//! Device queries.
//!
//! A query names the device to talk to. Any field may be left as a wildcard
//! (zero for ids, empty for names); populated fields must match exactly.
//!
//! Queries are written on the command line as six colon-separated fields:
//!
//! ```text
//! VENDOR_NAME:PRODUCT_NAME:VENDOR_ID:PRODUCT_ID:USAGE_ID:USAGE_PAGE
//! ```
//!
//! `::6d6c:3333::` selects by vendor and product id only, while
//! `Marion Lang:ml8_9:::61:` adds vendor and product names and a usage id.
//! Id fields are hexadecimal.

use std::str::FromStr;

use crate::descriptor::DeviceDescriptor;
use crate::error::DeviceError;
use crate::matcher;

/// Usage id of the QMK raw HID interface.
pub const DEFAULT_USAGE_ID: u16 = 0x0061;
/// Usage page of the QMK raw HID interface.
pub const DEFAULT_USAGE_PAGE: u16 = 0xFF60;

/// Wildcard value for id fields.
pub const ANY_ID: u16 = 0;

const QUERY_FIELDS: usize = 6;

/// Predicate over device descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceQuery {
    vendor_name: String,
    product_name: String,
    vendor_id: u16,
    product_id: u16,
    usage_id: u16,
    usage_page: u16,
}

impl DeviceQuery {
    /// A query that matches every device.
    pub fn any() -> Self {
        DeviceQuery::default()
    }

    /// The query used when the operator names no device: any vendor and
    /// product, restricted to the QMK raw HID interface.
    pub fn raw_hid_interface() -> Self {
        DeviceQuery::any()
            .with_usage_id(DEFAULT_USAGE_ID)
            .with_usage_page(DEFAULT_USAGE_PAGE)
    }

    /// Require this manufacturer string.
    pub fn with_vendor_name(mut self, name: impl Into<String>) -> Self {
        self.vendor_name = name.into();
        self
    }

    /// Require this product string.
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Require this vendor id.
    pub fn with_vendor_id(mut self, vid: u16) -> Self {
        self.vendor_id = vid;
        self
    }

    /// Require this product id.
    pub fn with_product_id(mut self, pid: u16) -> Self {
        self.product_id = pid;
        self
    }

    /// Require this usage id.
    pub fn with_usage_id(mut self, usage: u16) -> Self {
        self.usage_id = usage;
        self
    }

    /// Require this usage page.
    pub fn with_usage_page(mut self, page: u16) -> Self {
        self.usage_page = page;
        self
    }

    pub fn vendor_name(&self) -> &str {
        &self.vendor_name
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    pub fn product_id(&self) -> u16 {
        self.product_id
    }

    pub fn usage_id(&self) -> u16 {
        self.usage_id
    }

    pub fn usage_page(&self) -> u16 {
        self.usage_page
    }

    /// Whether `descriptor` satisfies this query.
    pub fn matches(&self, descriptor: &DeviceDescriptor) -> bool {
        matcher::matches(descriptor, self)
    }
}

impl std::fmt::Display for DeviceQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(vendor name/id: {}/{:04x}, product name/id: {}/{:04x}, usage id/page {:04x}/{:04x})",
            self.vendor_name,
            self.vendor_id,
            self.product_name,
            self.product_id,
            self.usage_id,
            self.usage_page
        )
    }
}

impl FromStr for DeviceQuery {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != QUERY_FIELDS {
            return Err(DeviceError::InvalidQuery(format!(
                "{:?} has {} fields, expected {} (VENDOR_NAME:PRODUCT_NAME:VENDOR_ID:PRODUCT_ID:USAGE_ID:USAGE_PAGE)",
                s,
                fields.len(),
                QUERY_FIELDS
            )));
        }

        Ok(DeviceQuery {
            vendor_name: fields[0].to_string(),
            product_name: fields[1].to_string(),
            vendor_id: parse_id("vendor id", fields[2])?,
            product_id: parse_id("product id", fields[3])?,
            usage_id: parse_id("usage id", fields[4])?,
            usage_page: parse_id("usage page", fields[5])?,
        })
    }
}

/// Parse a base-16 id field; empty means wildcard.
fn parse_id(name: &str, field: &str) -> Result<u16, DeviceError> {
    if field.is_empty() {
        return Ok(ANY_ID);
    }
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u16::from_str_radix(digits, 16).map_err(|e| {
        DeviceError::InvalidQuery(format!("{} {:?} is not a 16-bit hex value: {}", name, field, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_only() {
        let q: DeviceQuery = "::6d6c:3333::".parse().expect("should parse");
        assert_eq!(q, DeviceQuery::any().with_vendor_id(0x6d6c).with_product_id(0x3333));
    }

    #[test]
    fn test_parse_names_and_usage() {
        let q: DeviceQuery = "Marion Lang:ml8_9:::0061:ff60".parse().expect("should parse");
        assert_eq!(q.vendor_name(), "Marion Lang");
        assert_eq!(q.product_name(), "ml8_9");
        assert_eq!(q.vendor_id(), ANY_ID);
        assert_eq!(q.product_id(), ANY_ID);
        assert_eq!(q.usage_id(), 0x0061);
        assert_eq!(q.usage_page(), 0xff60);
    }

    #[test]
    fn test_parse_all_empty_is_wildcard() {
        let q: DeviceQuery = ":::::".parse().expect("should parse");
        assert_eq!(q, DeviceQuery::any());
    }

    #[test]
    fn test_parse_hex_prefix() {
        let q: DeviceQuery = "::0x6D6C:0X3333::".parse().expect("should parse");
        assert_eq!(q.vendor_id(), 0x6d6c);
        assert_eq!(q.product_id(), 0x3333);
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(matches!(
            "::6d6c:3333".parse::<DeviceQuery>(),
            Err(DeviceError::InvalidQuery(_))
        ));
        assert!(matches!(
            "::6d6c:3333:::".parse::<DeviceQuery>(),
            Err(DeviceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_hex() {
        assert!(matches!(
            "::zz:3333::".parse::<DeviceQuery>(),
            Err(DeviceError::InvalidQuery(_))
        ));
        assert!(matches!(
            "::10000:3333::".parse::<DeviceQuery>(),
            Err(DeviceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_builder_returns_updated_value() {
        let base = DeviceQuery::any();
        let narrowed = base.clone().with_product_id(0x3333);
        assert_eq!(base.product_id(), ANY_ID);
        assert_eq!(narrowed.product_id(), 0x3333);
        assert_eq!(narrowed.vendor_id(), ANY_ID);
    }

    #[test]
    fn test_raw_hid_interface_defaults() {
        let q = DeviceQuery::raw_hid_interface();
        assert_eq!(q.usage_id(), DEFAULT_USAGE_ID);
        assert_eq!(q.usage_page(), DEFAULT_USAGE_PAGE);
        assert_eq!(q.vendor_id(), ANY_ID);
        assert!(q.vendor_name().is_empty());
    }

    #[test]
    fn test_display() {
        let q = DeviceQuery::any().with_vendor_id(0x6d6c).with_product_name("ml8_9");
        assert_eq!(
            q.to_string(),
            "(vendor name/id: /6d6c, product name/id: ml8_9/0000, usage id/page 0000/0000)"
        );
    }
}
