//! Bill entry form state
//!
//! [`BillEntryForm`] owns the bill draft, the loaded reference lists and the
//! inline error message. Every edit goes through it. The company is supplied
//! when the form is built rather than looked up from ambient context.
//!
//! Submission can be driven in one call with [`BillEntryForm::submit`], or in
//! three steps when the caller keeps handling events while the request is in
//! flight:
//!
//! ```rust,ignore
//! let pending = form.begin_submit()?;      // validates, marks the form saving
//! let outcome = pending.send().await;      // no borrow of the form held here
//! let ack = form.finish_submit(outcome)?;  // navigates or records the error
//! ```
//!
//! While a submission is outstanding a second submit and cancel are refused.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use core_kernel::{CompanyId, Money, OperationMetadata, PortError, VendorId};

use crate::account::ExpenseAccount;
use crate::bill::{BillDraft, ExpenseField, ExpenseLineId, PaymentTerms};
use crate::busy::{BusyFlag, BusyGuard};
use crate::config::BillEntryConfig;
use crate::error::PayablesError;
use crate::loader::{ReferenceData, ReferenceDataLoader, ScopedLoad};
use crate::ports::{
    AccountPort, BillAcknowledgement, BillPort, CreateBillRequest, FlashMessage, Navigator,
    Route, VendorPort,
};
use crate::validation::BillValidator;
use crate::vendor::Vendor;

/// The collaborators a form talks to
#[derive(Clone)]
pub struct Collaborators {
    pub vendors: Arc<dyn VendorPort>,
    pub accounts: Arc<dyn AccountPort>,
    pub bills: Arc<dyn BillPort>,
    pub navigator: Arc<dyn Navigator>,
}

/// State of one bill entry session
pub struct BillEntryForm {
    company: Option<CompanyId>,
    config: BillEntryConfig,
    draft: BillDraft,
    vendors: Vec<Vendor>,
    accounts: Vec<ExpenseAccount>,
    load_error: Option<String>,
    submit_error: Option<String>,
    loader: ReferenceDataLoader,
    bills: Arc<dyn BillPort>,
    navigator: Arc<dyn Navigator>,
    loading: BusyFlag,
    saving: BusyFlag,
}

impl BillEntryForm {
    /// Creates a form with an empty draft dated today
    pub fn new(
        company: Option<CompanyId>,
        collaborators: Collaborators,
        config: BillEntryConfig,
    ) -> Self {
        Self::new_dated(company, collaborators, config, Utc::now().date_naive())
    }

    /// Creates a form with an empty draft dated `date`
    pub fn new_dated(
        company: Option<CompanyId>,
        collaborators: Collaborators,
        config: BillEntryConfig,
        date: NaiveDate,
    ) -> Self {
        let loader = ReferenceDataLoader::new(
            collaborators.vendors,
            collaborators.accounts,
            config.load_error_message.clone(),
            config.account_load_error_message.clone(),
        );
        let draft = BillDraft::new(date, config.default_terms, config.apply_terms_to_due_date);

        Self {
            company,
            config,
            draft,
            vendors: Vec::new(),
            accounts: Vec::new(),
            load_error: None,
            submit_error: None,
            loader,
            bills: collaborators.bills,
            navigator: collaborators.navigator,
            loading: BusyFlag::new(),
            saving: BusyFlag::new(),
        }
    }

    pub fn company(&self) -> Option<CompanyId> {
        self.company
    }

    pub fn config(&self) -> &BillEntryConfig {
        &self.config
    }

    pub fn draft(&self) -> &BillDraft {
        &self.draft
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    pub fn accounts(&self) -> &[ExpenseAccount] {
        &self.accounts
    }

    /// Inline error message, if the last load or submit failed
    ///
    /// A submission error is shown in preference to a load error.
    pub fn error(&self) -> Option<&str> {
        self.submit_error.as_deref().or(self.load_error.as_deref())
    }

    pub fn clear_error(&mut self) {
        self.load_error = None;
        self.submit_error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.is_set()
    }

    /// The selected vendor's record, when it is among the loaded vendors
    pub fn selected_vendor(&self) -> Option<&Vendor> {
        let id = self.draft.vendor_id()?;
        self.vendors.iter().find(|v| v.id == id)
    }

    /// Loads vendors and accounts for the form's company
    ///
    /// Does nothing without a company. Failures are reported through
    /// [`error`](Self::error) and leave the affected list empty.
    pub async fn load_reference_data(&mut self) -> Result<(), PayablesError> {
        let Some(company) = self.company else {
            return Ok(());
        };
        let _guard = self
            .loading
            .try_acquire()
            .ok_or(PayablesError::Busy("reference data is already loading"))?;

        let data = self.loader.load(company).await;
        self.apply_reference_data(data);
        Ok(())
    }

    /// Starts loading reference data on a background task
    ///
    /// Returns `None` without a company or while a load is already running.
    /// Dropping the handle cancels the load.
    pub fn begin_reference_load(&self) -> Option<ScopedLoad> {
        let company = self.company?;
        let guard = self.loading.try_acquire()?;
        Some(self.loader.spawn_guarded(company, Some(guard)))
    }

    /// Installs lists produced by a background load
    ///
    /// Replaces any error left by an earlier load; submission errors are kept.
    pub fn apply_reference_data(&mut self, data: ReferenceData) {
        self.vendors = data.vendors;
        self.accounts = data.accounts;
        self.load_error = data.error;
    }

    pub fn set_vendor(&mut self, vendor_id: Option<VendorId>) {
        self.draft.set_vendor(vendor_id);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.set_date(date);
    }

    pub fn set_reference_number(&mut self, reference_number: impl Into<String>) {
        self.draft.set_reference_number(reference_number);
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.draft.set_due_date(due_date);
    }

    pub fn set_terms(&mut self, terms: PaymentTerms) {
        self.draft.set_terms(terms);
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.draft.set_memo(memo);
    }

    pub fn add_expense(&mut self) -> ExpenseLineId {
        self.draft.add_expense()
    }

    /// Removes a line; the last remaining line is kept
    pub fn remove_expense(&mut self, index: usize) -> Result<bool, PayablesError> {
        self.draft.remove_expense(index)
    }

    /// Replaces one field of a line
    ///
    /// Amounts are rounded to the currency's minor unit before they are
    /// stored, so [`total`](Self::total) and [`total_money`](Self::total_money)
    /// always agree.
    pub fn update_expense_field(
        &mut self,
        index: usize,
        field: ExpenseField,
    ) -> Result<(), PayablesError> {
        let field = match field {
            ExpenseField::Amount(Some(amount)) if amount >= Decimal::ZERO => {
                let scale = self.config.currency.decimal_places();
                ExpenseField::Amount(Some(amount.round_dp(scale)))
            }
            other => other,
        };
        self.draft.update_expense_field(index, field)
    }

    /// Running total of the expense lines
    pub fn total(&self) -> Decimal {
        self.draft.total()
    }

    pub fn total_money(&self) -> Money {
        self.draft.total_money(self.config.currency)
    }

    /// Validates and sends the bill, then navigates away on success
    pub async fn submit(&mut self) -> Result<BillAcknowledgement, PayablesError> {
        let pending = self.begin_submit()?;
        let outcome = pending.send().await;
        self.finish_submit(outcome)
    }

    /// Validates the draft and marks the form as saving
    ///
    /// A validation failure is recorded as the inline error and the bill
    /// service is not contacted.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, PayablesError> {
        let guard = self
            .saving
            .try_acquire()
            .ok_or(PayablesError::Busy("a bill is already being saved"))?;

        let validated = match BillValidator::validate(
            self.company,
            &self.draft,
            self.config.currency,
        ) {
            Ok(validated) => validated,
            Err(e) => {
                tracing::debug!(reason = %e, "Bill failed validation");
                self.submit_error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.submit_error = None;
        tracing::info!(
            company_id = %validated.company,
            vendor_id = %validated.vendor_id,
            lines = validated.request.lines.len(),
            "Submitting bill"
        );

        Ok(PendingSubmission {
            bills: Arc::clone(&self.bills),
            company: validated.company,
            request: validated.request,
            guard,
        })
    }

    /// Applies the bill service's answer to the form
    pub fn finish_submit(
        &mut self,
        outcome: SubmissionOutcome,
    ) -> Result<BillAcknowledgement, PayablesError> {
        let SubmissionOutcome { result, guard } = outcome;

        match result {
            Ok(ack) => {
                tracing::info!(bill_id = %ack.bill_id, total = %ack.total_amount, "Bill created");
                drop(guard);
                self.navigator.navigate(
                    Route::VendorList,
                    Some(FlashMessage::success(self.config.success_message.clone())),
                );
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create bill");
                let err = PayablesError::submission(e, &self.config.submit_failure_message);
                self.submit_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Leaves the form for the vendor list, discarding the draft
    ///
    /// Refused while a bill is being saved.
    pub fn cancel(&self) -> Result<(), PayablesError> {
        if self.is_saving() {
            return Err(PayablesError::Busy("cannot cancel while saving"));
        }
        self.navigator.navigate(Route::VendorList, None);
        Ok(())
    }
}

/// A validated bill waiting to be sent
///
/// Holds the form's saving flag until it is dropped or its outcome is
/// applied with [`BillEntryForm::finish_submit`].
pub struct PendingSubmission {
    bills: Arc<dyn BillPort>,
    company: CompanyId,
    request: CreateBillRequest,
    guard: BusyGuard,
}

impl PendingSubmission {
    pub fn request(&self) -> &CreateBillRequest {
        &self.request
    }

    /// Calls the bill service
    pub async fn send(self) -> SubmissionOutcome {
        let metadata = OperationMetadata::default()
            .with_context("company_id", self.company.to_string());
        let result = self
            .bills
            .create_bill(self.company, self.request, Some(metadata))
            .await;
        SubmissionOutcome {
            result,
            guard: self.guard,
        }
    }
}

/// The bill service's answer, not yet applied to the form
pub struct SubmissionOutcome {
    result: Result<BillAcknowledgement, PortError>,
    guard: BusyGuard,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
