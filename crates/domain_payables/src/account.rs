//! Expense accounts offered on bill lines

use serde::{Deserialize, Serialize};

use core_kernel::AccountId;

/// Classification of accounts a bill line may be posted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseAccountType {
    /// Ordinary operating expense
    Expense,
    /// Direct cost of goods sold
    CostOfGoodsSold,
    /// Expense outside normal operations
    OtherExpense,
    /// Capitalised purchase
    FixedAsset,
}

/// An account a bill line can be allocated to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseAccount {
    pub id: AccountId,
    pub name: String,
    pub account_type: ExpenseAccountType,
}

impl ExpenseAccount {
    pub fn new(id: AccountId, name: impl Into<String>, account_type: ExpenseAccountType) -> Self {
        Self {
            id,
            name: name.into(),
            account_type,
        }
    }

    /// Creates an ordinary expense account with a fresh id
    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(AccountId::new(), name, ExpenseAccountType::Expense)
    }
}
