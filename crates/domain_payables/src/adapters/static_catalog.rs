//! Fixed chart of expense accounts

use async_trait::async_trait;

use core_kernel::{AccountId, CompanyId, DomainPort, OperationMetadata, PortError};

use crate::account::{ExpenseAccount, ExpenseAccountType};
use crate::ports::AccountPort;

/// Serves the same account list to every company
#[derive(Debug, Clone)]
pub struct StaticAccountCatalog {
    accounts: Vec<ExpenseAccount>,
}

impl StaticAccountCatalog {
    pub fn new(accounts: Vec<ExpenseAccount>) -> Self {
        Self { accounts }
    }

    /// The standard small-business expense chart
    pub fn standard() -> Self {
        Self::new(vec![
            ExpenseAccount::expense("Advertising"),
            ExpenseAccount::expense("Bank Fees"),
            ExpenseAccount::expense("Insurance"),
            ExpenseAccount::expense("Meals and Entertainment"),
            ExpenseAccount::expense("Office Supplies"),
            ExpenseAccount::expense("Professional Fees"),
            ExpenseAccount::expense("Rent"),
            ExpenseAccount::expense("Repairs and Maintenance"),
            ExpenseAccount::expense("Travel"),
            ExpenseAccount::expense("Utilities"),
            ExpenseAccount::new(
                AccountId::new(),
                "Cost of Goods Sold",
                ExpenseAccountType::CostOfGoodsSold,
            ),
            ExpenseAccount::new(
                AccountId::new(),
                "Equipment",
                ExpenseAccountType::FixedAsset,
            ),
        ])
    }

    pub fn accounts(&self) -> &[ExpenseAccount] {
        &self.accounts
    }
}

impl DomainPort for StaticAccountCatalog {}

#[async_trait]
impl AccountPort for StaticAccountCatalog {
    async fn list_expense_accounts(
        &self,
        _company: CompanyId,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ExpenseAccount>, PortError> {
        Ok(self.accounts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_standard_catalog_lists_office_supplies() {
        let catalog = StaticAccountCatalog::standard();
        let accounts = catalog
            .list_expense_accounts(CompanyId::new(), None)
            .await
            .unwrap();

        assert_eq!(accounts.len(), catalog.accounts().len());
        assert!(accounts.iter().any(|a| a.name == "Office Supplies"));
        assert!(accounts
            .iter()
            .any(|a| a.account_type == ExpenseAccountType::CostOfGoodsSold));
    }
}
