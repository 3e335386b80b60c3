//! Vendor reference records
//!
//! Vendors are owned by the vendor service; the bill form only reads them to
//! populate the vendor selector.

use serde::{Deserialize, Serialize};

use core_kernel::VendorId;

/// Postal address of a vendor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAddress {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

/// A vendor that bills can be recorded against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub display_name: String,
    #[serde(default)]
    pub address: VendorAddress,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Vendor {
    pub fn new(id: VendorId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            address: VendorAddress::default(),
            email: None,
            phone: None,
        }
    }

    pub fn with_address(mut self, address: VendorAddress) -> Self {
        self.address = address;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
