//! Reference data loading
//!
//! Fetches the vendor and expense account lists a bill form needs for the
//! selectors. Each list is fetched once per call, without retry; a failed
//! list is left empty and reported with a generic message while the detail
//! goes to the log.

use std::sync::Arc;

use tokio::task::JoinHandle;

use core_kernel::{CompanyId, OperationMetadata};

use crate::account::ExpenseAccount;
use crate::busy::BusyGuard;
use crate::error::PayablesError;
use crate::ports::{AccountPort, VendorPort};
use crate::vendor::Vendor;

/// Lists fetched for one company
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub vendors: Vec<Vendor>,
    pub accounts: Vec<ExpenseAccount>,
    /// Generic message to show when a list failed to load
    pub error: Option<String>,
}

/// Loads vendors and expense accounts for a company
#[derive(Clone)]
pub struct ReferenceDataLoader {
    vendors: Arc<dyn VendorPort>,
    accounts: Arc<dyn AccountPort>,
    vendor_error_message: String,
    account_error_message: String,
}

impl ReferenceDataLoader {
    pub fn new(
        vendors: Arc<dyn VendorPort>,
        accounts: Arc<dyn AccountPort>,
        vendor_error_message: impl Into<String>,
        account_error_message: impl Into<String>,
    ) -> Self {
        Self {
            vendors,
            accounts,
            vendor_error_message: vendor_error_message.into(),
            account_error_message: account_error_message.into(),
        }
    }

    /// Fetches both lists concurrently
    ///
    /// Dropping the returned future abandons both fetches.
    pub async fn load(&self, company: CompanyId) -> ReferenceData {
        tracing::info!(company_id = %company, "Loading bill reference data");

        let metadata = OperationMetadata::default().with_context("company_id", company.to_string());
        let (vendors, accounts) = tokio::join!(
            self.vendors.list_vendors(company, Some(metadata.clone())),
            self.accounts.list_expense_accounts(company, Some(metadata)),
        );

        let mut data = ReferenceData::default();

        match vendors {
            Ok(vendors) => data.vendors = vendors,
            Err(e) => {
                tracing::error!(company_id = %company, error = %e, "Failed to load vendors");
                data.error = Some(self.vendor_error_message.clone());
            }
        }

        match accounts {
            Ok(accounts) => data.accounts = accounts,
            Err(e) => {
                tracing::error!(company_id = %company, error = %e, "Failed to load expense accounts");
                if data.error.is_none() {
                    data.error = Some(self.account_error_message.clone());
                }
            }
        }

        tracing::info!(
            company_id = %company,
            vendor_count = data.vendors.len(),
            account_count = data.accounts.len(),
            "Bill reference data loaded"
        );
        data
    }

    /// Runs [`load`](Self::load) on a background task
    ///
    /// The task lives only as long as the returned handle.
    pub fn spawn(&self, company: CompanyId) -> ScopedLoad {
        self.spawn_guarded(company, None)
    }

    pub(crate) fn spawn_guarded(&self, company: CompanyId, guard: Option<BusyGuard>) -> ScopedLoad {
        let loader = self.clone();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            loader.load(company).await
        });
        ScopedLoad {
            handle: Some(handle),
        }
    }
}

/// Handle to a background reference data load; aborts the load when dropped
#[derive(Debug)]
pub struct ScopedLoad {
    handle: Option<JoinHandle<ReferenceData>>,
}

impl ScopedLoad {
    /// Waits for the load to finish
    pub async fn join(mut self) -> Result<ReferenceData, PayablesError> {
        match self.handle.take() {
            Some(handle) => handle
                .await
                .map_err(|e| PayablesError::Load(format!("reference data task failed: {}", e))),
            None => Err(PayablesError::Load("reference data task already consumed".to_string())),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for ScopedLoad {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
