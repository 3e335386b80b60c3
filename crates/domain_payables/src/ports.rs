//! Payables Domain Ports
//!
//! The bill entry form talks to three outside collaborators and one UI
//! collaborator, each behind a trait so the concrete transport can be swapped:
//!
//! - [`VendorPort`]: vendor lookup for the current company
//! - [`AccountPort`]: expense account lookup (currently the static catalog in
//!   [`crate::adapters`], ready to be replaced by an accounts service)
//! - [`BillPort`]: bill creation
//! - [`Navigator`]: moves the UI to another view with an optional flash message
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_payables::{BillEntryForm, BillEntryConfig, Collaborators};
//! use std::sync::Arc;
//!
//! let collaborators = Collaborators {
//!     vendors: Arc::new(HttpVendorAdapter::new(client.clone())),
//!     accounts: Arc::new(StaticAccountCatalog::standard()),
//!     bills: Arc::new(HttpBillAdapter::new(client)),
//!     navigator: Arc::new(router_handle),
//! };
//! let mut form = BillEntryForm::new(Some(company_id), collaborators, BillEntryConfig::default());
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{BillId, CompanyId, Currency, DomainPort, OperationMetadata, PortError, VendorId};

use crate::account::ExpenseAccount;
use crate::bill::{BillDraft, BillItem};
use crate::vendor::Vendor;

/// Vendor lookup
#[async_trait]
pub trait VendorPort: DomainPort {
    /// Lists the vendors of a company
    async fn list_vendors(
        &self,
        company: CompanyId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Vendor>, PortError>;
}

/// Expense account lookup
#[async_trait]
pub trait AccountPort: DomainPort {
    /// Lists the accounts bill lines may be allocated to
    async fn list_expense_accounts(
        &self,
        company: CompanyId,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ExpenseAccount>, PortError>;
}

/// Bill creation
#[async_trait]
pub trait BillPort: DomainPort {
    /// Persists a new bill for a company
    ///
    /// # Returns
    ///
    /// The acknowledgement of the created bill, or a `PortError` whose
    /// [`PortError::detail`] carries the service's explanation when it gave one
    async fn create_bill(
        &self,
        company: CompanyId,
        request: CreateBillRequest,
        metadata: Option<OperationMetadata>,
    ) -> Result<BillAcknowledgement, PortError>;
}

/// Views the form can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    VendorList,
}

/// A transient status message carried into the next view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    pub text: String,
}

impl FlashMessage {
    /// A confirmation shown after an action succeeded
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// UI navigation
pub trait Navigator: DomainPort {
    fn navigate(&self, route: Route, flash: Option<FlashMessage>);
}

/// Kind of bill line sent to the bill service; the form only records
/// account-based expense lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineType {
    Account,
}

/// One line of a create-bill request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLineRequest {
    /// 1-based position on the bill
    pub line_number: u32,
    pub line_type: LineType,
    pub account_name: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub billable: bool,
}

/// Payload for creating a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CreateBillRequest {
    pub transaction_type: String,
    #[validate(length(max = 50, message = "Reference number must be at most 50 characters"))]
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub vendor_id: VendorId,
    #[validate(length(max = 4000, message = "Memo must be at most 4000 characters"))]
    pub memo: Option<String>,
    pub currency_code: Currency,
    pub payment_terms: String,
    #[validate(length(min = 1, message = "A bill must have at least one line"))]
    pub lines: Vec<BillLineRequest>,
    pub items: Vec<BillItem>,
}

impl CreateBillRequest {
    /// Builds the request for a draft
    ///
    /// Expense lines with nothing entered on them are left out. Every other
    /// line is sent, even one holding only a memo, numbered in order starting
    /// at 1 with one unit at the line amount.
    pub fn from_draft(draft: &BillDraft, vendor_id: VendorId, currency: Currency) -> Self {
        let lines = draft
            .expenses()
            .iter()
            .filter(|line| !line.is_blank())
            .zip(1u32..)
            .map(|(line, line_number)| BillLineRequest {
                line_number,
                line_type: LineType::Account,
                account_name: line.account_name.trim().to_string(),
                description: non_empty(&line.memo),
                quantity: Decimal::ONE,
                unit_price: line.amount_or_zero(),
                billable: line.billable,
            })
            .collect();

        Self {
            transaction_type: "bill".to_string(),
            reference_number: non_empty(draft.reference_number()),
            transaction_date: draft.date(),
            due_date: draft.due_date(),
            vendor_id,
            memo: non_empty(draft.memo()),
            currency_code: currency,
            payment_terms: draft.terms().label().to_string(),
            lines,
            items: draft.items().to_vec(),
        }
    }

    /// Sum of `quantity * unit_price` over all lines
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|line| line.quantity * line.unit_price)
            .sum()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Acknowledgement returned by the bill service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAcknowledgement {
    pub bill_id: BillId,
    pub transaction_number: Option<String>,
    pub total_amount: Decimal,
    pub status: String,
}

/// Mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::RwLock;

    type ErrorFactory = Box<dyn Fn() -> PortError + Send + Sync>;

    /// In-memory vendor source
    #[derive(Default)]
    pub struct MockVendorPort {
        vendors: Vec<Vendor>,
        failure: Option<ErrorFactory>,
        /// Fail only this many calls before answering normally
        failure_limit: Option<usize>,
        latency: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockVendorPort {
        pub fn with_vendors(vendors: Vec<Vendor>) -> Self {
            Self {
                vendors,
                ..Default::default()
            }
        }

        /// A port whose every call fails with the error built by `factory`
        pub fn failing(factory: impl Fn() -> PortError + Send + Sync + 'static) -> Self {
            Self {
                failure: Some(Box::new(factory)),
                ..Default::default()
            }
        }

        /// A port whose first `count` calls fail, after which it returns `vendors`
        pub fn failing_first(
            count: usize,
            vendors: Vec<Vendor>,
            factory: impl Fn() -> PortError + Send + Sync + 'static,
        ) -> Self {
            Self {
                vendors,
                failure: Some(Box::new(factory)),
                failure_limit: Some(count),
                ..Default::default()
            }
        }

        /// Delays every answer
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockVendorPort {}

    #[async_trait]
    impl VendorPort for MockVendorPort {
        async fn list_vendors(
            &self,
            _company: CompanyId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Vendor>, PortError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            match &self.failure {
                Some(factory) if self.failure_limit.map_or(true, |limit| call < limit) => {
                    Err(factory())
                }
                _ => Ok(self.vendors.clone()),
            }
        }
    }

    /// Account source that always fails
    pub struct FailingAccountPort {
        factory: ErrorFactory,
    }

    impl FailingAccountPort {
        pub fn new(factory: impl Fn() -> PortError + Send + Sync + 'static) -> Self {
            Self {
                factory: Box::new(factory),
            }
        }
    }

    impl DomainPort for FailingAccountPort {}

    #[async_trait]
    impl AccountPort for FailingAccountPort {
        async fn list_expense_accounts(
            &self,
            _company: CompanyId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<ExpenseAccount>, PortError> {
            Err((self.factory)())
        }
    }

    /// Bill service that records every request it receives
    #[derive(Default)]
    pub struct MockBillPort {
        requests: RwLock<Vec<(CompanyId, CreateBillRequest)>>,
        failure: Option<ErrorFactory>,
        latency: Option<Duration>,
    }

    impl MockBillPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// A port whose every call fails with the error built by `factory`
        pub fn failing(factory: impl Fn() -> PortError + Send + Sync + 'static) -> Self {
            Self {
                failure: Some(Box::new(factory)),
                ..Default::default()
            }
        }

        /// Delays every answer
        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = Some(latency);
            self
        }

        /// Requests received so far, in order
        pub async fn requests(&self) -> Vec<(CompanyId, CreateBillRequest)> {
            self.requests.read().await.clone()
        }

        pub async fn call_count(&self) -> usize {
            self.requests.read().await.len()
        }
    }

    impl DomainPort for MockBillPort {}

    #[async_trait]
    impl BillPort for MockBillPort {
        async fn create_bill(
            &self,
            company: CompanyId,
            request: CreateBillRequest,
            _metadata: Option<OperationMetadata>,
        ) -> Result<BillAcknowledgement, PortError> {
            let total_amount = request.total();
            self.requests.write().await.push((company, request));
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }
            if let Some(factory) = &self.failure {
                return Err(factory());
            }

            let count = self.requests.read().await.len();
            Ok(BillAcknowledgement {
                bill_id: BillId::new_v7(),
                transaction_number: Some(format!("BILL-{:05}", count)),
                total_amount,
                status: "open".to_string(),
            })
        }
    }

    /// Navigator that remembers where it was sent
    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        visits: Mutex<Vec<(Route, Option<FlashMessage>)>>,
    }

    impl RecordingNavigator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn visits(&self) -> Vec<(Route, Option<FlashMessage>)> {
            self.visits
                .lock()
                .map(|visits| visits.clone())
                .unwrap_or_default()
        }

        pub fn last(&self) -> Option<(Route, Option<FlashMessage>)> {
            self.visits().pop()
        }
    }

    impl DomainPort for RecordingNavigator {}

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route, flash: Option<FlashMessage>) {
            if let Ok(mut visits) = self.visits.lock() {
                visits.push((route, flash));
            }
        }
    }
}
