//! Test Data Builders
//!
//! [`TestFormBuilder`] wires a [`BillEntryForm`] to in-memory collaborators
//! and keeps handles to them so tests can inspect what the form sent.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use core_kernel::{CompanyId, PortError};
use domain_payables::{
    BillEntryConfig, BillEntryForm, Collaborators, ExpenseField, MockBillPort, MockVendorPort,
    RecordingNavigator, StaticAccountCatalog, Vendor,
};

use crate::fixtures::{AmountFixtures, DateFixtures, IdFixtures, VendorFixtures};

type ErrorFactory = Box<dyn Fn() -> PortError + Send + Sync>;

/// Builder for a bill entry form backed by mocks
pub struct TestFormBuilder {
    company: Option<CompanyId>,
    vendors: Vec<Vendor>,
    vendor_failure: Option<ErrorFactory>,
    vendor_failure_limit: Option<usize>,
    bill_failure: Option<ErrorFactory>,
    bill_latency: Option<Duration>,
    date: NaiveDate,
    config: BillEntryConfig,
}

impl Default for TestFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFormBuilder {
    /// Creates a builder with the fixture company and vendors
    pub fn new() -> Self {
        Self {
            company: Some(IdFixtures::company_id()),
            vendors: VendorFixtures::all(),
            vendor_failure: None,
            vendor_failure_limit: None,
            bill_failure: None,
            bill_latency: None,
            date: DateFixtures::bill_date(),
            config: BillEntryConfig::default(),
        }
    }

    /// Builds the form without an active company
    pub fn without_company(mut self) -> Self {
        self.company = None;
        self
    }

    /// Sets the vendors the vendor port returns
    pub fn with_vendors(mut self, vendors: Vec<Vendor>) -> Self {
        self.vendors = vendors;
        self
    }

    /// Makes every vendor lookup fail
    pub fn with_vendor_failure(
        mut self,
        factory: impl Fn() -> PortError + Send + Sync + 'static,
    ) -> Self {
        self.vendor_failure = Some(Box::new(factory));
        self.vendor_failure_limit = None;
        self
    }

    /// Makes only the first `count` vendor lookups fail
    pub fn with_vendor_failures(
        mut self,
        count: usize,
        factory: impl Fn() -> PortError + Send + Sync + 'static,
    ) -> Self {
        self.vendor_failure = Some(Box::new(factory));
        self.vendor_failure_limit = Some(count);
        self
    }

    /// Makes every bill creation fail
    pub fn with_bill_failure(
        mut self,
        factory: impl Fn() -> PortError + Send + Sync + 'static,
    ) -> Self {
        self.bill_failure = Some(Box::new(factory));
        self
    }

    /// Delays bill creation answers
    pub fn with_bill_latency(mut self, latency: Duration) -> Self {
        self.bill_latency = Some(latency);
        self
    }

    /// Sets the draft date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Sets the form configuration
    pub fn with_config(mut self, config: BillEntryConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the form and returns it with its collaborators
    pub fn build(self) -> TestForm {
        let vendors = Arc::new(match (self.vendor_failure, self.vendor_failure_limit) {
            (Some(factory), Some(count)) => {
                MockVendorPort::failing_first(count, self.vendors, factory)
            }
            (Some(factory), None) => MockVendorPort::failing(factory),
            (None, _) => MockVendorPort::with_vendors(self.vendors),
        });
        let mut bill_port = match self.bill_failure {
            Some(factory) => MockBillPort::failing(factory),
            None => MockBillPort::new(),
        };
        if let Some(latency) = self.bill_latency {
            bill_port = bill_port.with_latency(latency);
        }
        let bills = Arc::new(bill_port);
        let navigator = Arc::new(RecordingNavigator::new());

        let collaborators = Collaborators {
            vendors: vendors.clone(),
            accounts: Arc::new(StaticAccountCatalog::standard()),
            bills: bills.clone(),
            navigator: navigator.clone(),
        };
        let form = BillEntryForm::new_dated(self.company, collaborators, self.config, self.date);

        TestForm {
            form,
            vendors,
            bills,
            navigator,
        }
    }
}

/// A form plus handles to the mocks behind it
pub struct TestForm {
    pub form: BillEntryForm,
    pub vendors: Arc<MockVendorPort>,
    pub bills: Arc<MockBillPort>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestForm {
    /// Selects the fixture vendor and fills the first line with an
    /// office supplies expense of 100
    pub fn fill_office_supplies(&mut self) {
        self.form.set_vendor(Some(IdFixtures::vendor_id()));
        self.form
            .update_expense_field(0, ExpenseField::Account("Office Supplies".to_string()))
            .unwrap();
        self.form
            .update_expense_field(0, ExpenseField::Amount(Some(AmountFixtures::office_supplies())))
            .unwrap();
    }
}
