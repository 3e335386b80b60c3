//! Payables Domain - Vendor Bill Entry
//!
//! This crate holds the state behind the "enter a bill" screen of the
//! bookkeeping application: the draft bill with its expense lines, the vendor
//! and expense account lists shown in the selectors, the running total, the
//! checks run before saving, and the hand-off to the bill service.
//!
//! Rendering, the HTTP client and routing live elsewhere and are reached
//! through the port traits in [`ports`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_payables::{BillEntryForm, BillEntryConfig, ExpenseField};
//! use rust_decimal_macros::dec;
//!
//! let mut form = BillEntryForm::new(Some(company_id), collaborators, BillEntryConfig::default());
//! form.load_reference_data().await?;
//!
//! form.set_vendor(Some(vendor_id));
//! form.update_expense_field(0, ExpenseField::Account("Office Supplies".into()))?;
//! form.update_expense_field(0, ExpenseField::Amount(Some(dec!(100))))?;
//!
//! let ack = form.submit().await?;
//! ```

pub mod account;
pub mod adapters;
pub mod bill;
pub mod busy;
pub mod config;
pub mod error;
pub mod form;
pub mod loader;
pub mod ports;
pub mod validation;
pub mod vendor;

pub use account::{ExpenseAccount, ExpenseAccountType};
pub use adapters::StaticAccountCatalog;
pub use bill::{BillDraft, BillItem, ExpenseField, ExpenseLine, ExpenseLineId, PaymentTerms};
pub use config::BillEntryConfig;
pub use error::PayablesError;
pub use form::{BillEntryForm, Collaborators, PendingSubmission, SubmissionOutcome};
pub use loader::{ReferenceData, ReferenceDataLoader, ScopedLoad};
pub use ports::{
    AccountPort, BillAcknowledgement, BillLineRequest, BillPort, CreateBillRequest, FlashMessage,
    LineType, Navigator, Route, VendorPort,
};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{FailingAccountPort, MockBillPort, MockVendorPort, RecordingNavigator};
pub use validation::{BillValidationError, BillValidator, ValidatedBill};
pub use vendor::{Vendor, VendorAddress};
