//! Pre-built Test Fixtures
//!
//! Consistent, predictable data for bill entry tests.

use chrono::NaiveDate;
use core_kernel::{CompanyId, VendorId};
use domain_payables::{Vendor, VendorAddress};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Deterministic company ID
    pub fn company_id() -> CompanyId {
        CompanyId::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440001))
    }

    /// Deterministic ID of the first fixture vendor
    pub fn vendor_id() -> VendorId {
        VendorId::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440002))
    }

    /// Deterministic ID of the second fixture vendor
    pub fn other_vendor_id() -> VendorId {
        VendorId::from_uuid(Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440003))
    }
}

/// Fixture for vendor reference data
pub struct VendorFixtures;

impl VendorFixtures {
    /// Office supply vendor with a full contact record
    pub fn acme_paper() -> Vendor {
        Vendor::new(IdFixtures::vendor_id(), "Acme Paper Co")
            .with_address(VendorAddress {
                line1: Some("12 Market St".to_string()),
                line2: None,
                city: Some("Springfield".to_string()),
                state: Some("IL".to_string()),
                zip_code: Some("62701".to_string()),
                country: Some("US".to_string()),
            })
            .with_email("ap@acmepaper.test")
            .with_phone("555-0100")
    }

    /// Utility vendor with no contact details
    pub fn blue_ridge_power() -> Vendor {
        Vendor::new(IdFixtures::other_vendor_id(), "Blue Ridge Power")
    }

    /// Both fixture vendors
    pub fn all() -> Vec<Vendor> {
        vec![Self::acme_paper(), Self::blue_ridge_power()]
    }
}

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Standard bill date (Mar 1, 2024)
    pub fn bill_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// Bill date plus 30 days
    pub fn net30_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }
}

/// Fixture for amounts
pub struct AmountFixtures;

impl AmountFixtures {
    pub fn office_supplies() -> Decimal {
        dec!(100)
    }

    pub fn utilities() -> Decimal {
        dec!(245.67)
    }
}
