//! Bill validation rules
//!
//! Checks run before a bill is handed to the bill service, in order, and the
//! first failure wins:
//!
//! 1. A company must be active
//! 2. A vendor must be selected
//! 3. At least one expense line must name an account and carry an amount
//!    greater than zero
//! 4. Header fields must fit the bill service's limits

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use core_kernel::{CompanyId, Currency, VendorId};

use crate::bill::BillDraft;
use crate::ports::CreateBillRequest;

/// Reasons a draft cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillValidationError {
    #[error("No company selected")]
    NoCompany,

    #[error("Please select a vendor")]
    MissingVendor,

    #[error("Please add at least one expense with an account and amount")]
    NoValidExpense,

    #[error("{0}")]
    InvalidField(String),
}

impl From<ValidationErrors> for BillValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field))
                })
            })
            .collect();
        messages.sort();
        BillValidationError::InvalidField(messages.join("; "))
    }
}

/// A draft that passed validation, with the request ready to send
#[derive(Debug, Clone)]
pub struct ValidatedBill {
    pub company: CompanyId,
    pub vendor_id: VendorId,
    pub request: CreateBillRequest,
}

/// Validator for bill drafts
pub struct BillValidator;

impl BillValidator {
    /// Runs all checks against a draft
    ///
    /// # Arguments
    ///
    /// * `company` - The active company, if any
    /// * `draft` - The draft to check
    /// * `currency` - Currency the bill is recorded in
    ///
    /// # Returns
    ///
    /// The request to send, or the first failed check
    pub fn validate(
        company: Option<CompanyId>,
        draft: &BillDraft,
        currency: Currency,
    ) -> Result<ValidatedBill, BillValidationError> {
        let company = company.ok_or(BillValidationError::NoCompany)?;
        let vendor_id = draft.vendor_id().ok_or(BillValidationError::MissingVendor)?;

        if !draft.has_complete_expense() {
            return Err(BillValidationError::NoValidExpense);
        }

        let request = CreateBillRequest::from_draft(draft, vendor_id, currency);
        request.validate()?;

        Ok(ValidatedBill {
            company,
            vendor_id,
            request,
        })
    }
}
