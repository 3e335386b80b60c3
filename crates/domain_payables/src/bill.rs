//! Bill drafts and expense lines
//!
//! A [`BillDraft`] is the in-progress vendor bill held by the entry form. It
//! is created with a single blank expense line and mutated in place until it
//! is submitted or discarded. The draft never holds fewer than one line.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Currency, Money, VendorId};

use crate::error::PayablesError;

/// Payment terms offered on the bill form
///
/// Serialized in snake_case (`net_30`). Deserializing goes through
/// [`FromStr`], so the display label (`"Net 30"`) is accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PaymentTerms {
    /// Payable immediately
    DueOnReceipt,
    /// Payable within 15 days of the bill date
    Net15,
    /// Payable within 30 days of the bill date
    Net30,
    /// Payable within 60 days of the bill date
    Net60,
}

impl PaymentTerms {
    /// All terms in the order they are offered
    pub const ALL: [PaymentTerms; 4] = [
        PaymentTerms::DueOnReceipt,
        PaymentTerms::Net15,
        PaymentTerms::Net30,
        PaymentTerms::Net60,
    ];

    /// Days between the bill date and the due date
    pub fn days(&self) -> u64 {
        match self {
            PaymentTerms::DueOnReceipt => 0,
            PaymentTerms::Net15 => 15,
            PaymentTerms::Net30 => 30,
            PaymentTerms::Net60 => 60,
        }
    }

    /// Label shown in the terms selector and sent as `payment_terms`
    pub fn label(&self) -> &'static str {
        match self {
            PaymentTerms::DueOnReceipt => "Due on receipt",
            PaymentTerms::Net15 => "Net 15",
            PaymentTerms::Net30 => "Net 30",
            PaymentTerms::Net60 => "Net 60",
        }
    }

    /// Due date implied by these terms for a bill dated `date`
    pub fn due_date_from(&self, date: NaiveDate) -> Option<NaiveDate> {
        date.checked_add_days(Days::new(self.days()))
    }
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms::Net30
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentTerms {
    type Err = PayablesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "dueonreceipt" => Ok(PaymentTerms::DueOnReceipt),
            "net15" => Ok(PaymentTerms::Net15),
            "net30" => Ok(PaymentTerms::Net30),
            "net60" => Ok(PaymentTerms::Net60),
            _ => Err(PayablesError::Configuration(format!(
                "unknown payment terms: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for PaymentTerms {
    type Error = PayablesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Draft-local identifier of an expense line
///
/// Issued from a per-draft monotonic counter; only meaningful within the
/// draft that issued it and never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExpenseLineId(u64);

impl ExpenseLineId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExpenseLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line-{}", self.0)
    }
}

/// One allocation of the bill's amount to an expense account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseLine {
    /// Draft-local identifier
    pub id: ExpenseLineId,
    /// Expense account name as picked in the account selector
    pub account_name: String,
    /// Amount; `None` until the user enters one
    pub amount: Option<Decimal>,
    /// Line description
    pub memo: String,
    /// Whether the expense is to be re-invoiced to a customer
    pub billable: bool,
}

impl ExpenseLine {
    fn blank(id: ExpenseLineId) -> Self {
        Self {
            id,
            account_name: String::new(),
            amount: None,
            memo: String::new(),
            billable: false,
        }
    }

    /// Amount with an absent value read as zero
    pub fn amount_or_zero(&self) -> Decimal {
        self.amount.unwrap_or(Decimal::ZERO)
    }

    /// True when the line names an account and carries a positive amount
    pub fn is_complete(&self) -> bool {
        !self.account_name.trim().is_empty() && self.amount_or_zero() > Decimal::ZERO
    }

    /// True when nothing has been entered on the line
    pub fn is_blank(&self) -> bool {
        self.account_name.trim().is_empty()
            && self.amount.is_none()
            && self.memo.trim().is_empty()
            && !self.billable
    }
}

/// A single-field edit applied to an expense line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseField {
    Account(String),
    Amount(Option<Decimal>),
    Memo(String),
    Billable(bool),
}

/// Item-based bill line. Reserved for item entry; drafts built by the form
/// never contain any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

/// The in-progress vendor bill
#[derive(Debug, Clone)]
pub struct BillDraft {
    vendor_id: Option<VendorId>,
    date: NaiveDate,
    reference_number: String,
    due_date: Option<NaiveDate>,
    due_date_is_manual: bool,
    derive_due_date: bool,
    terms: PaymentTerms,
    memo: String,
    expenses: Vec<ExpenseLine>,
    items: Vec<BillItem>,
    next_line_id: u64,
}

impl BillDraft {
    /// Creates an empty draft dated `date` with one blank expense line
    ///
    /// When `derive_due_date` is set the due date follows the terms until the
    /// user picks one explicitly.
    pub fn new(date: NaiveDate, terms: PaymentTerms, derive_due_date: bool) -> Self {
        let mut draft = Self {
            vendor_id: None,
            date,
            reference_number: String::new(),
            due_date: None,
            due_date_is_manual: false,
            derive_due_date,
            terms,
            memo: String::new(),
            expenses: Vec::new(),
            items: Vec::new(),
            next_line_id: 1,
        };
        draft.add_expense();
        draft.refresh_due_date();
        draft
    }

    pub fn vendor_id(&self) -> Option<VendorId> {
        self.vendor_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn reference_number(&self) -> &str {
        &self.reference_number
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn terms(&self) -> PaymentTerms {
        self.terms
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn expenses(&self) -> &[ExpenseLine] {
        &self.expenses
    }

    pub fn items(&self) -> &[BillItem] {
        &self.items
    }

    pub fn set_vendor(&mut self, vendor_id: Option<VendorId>) {
        self.vendor_id = vendor_id;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.refresh_due_date();
    }

    pub fn set_reference_number(&mut self, reference_number: impl Into<String>) {
        self.reference_number = reference_number.into();
    }

    /// Sets the due date explicitly; clearing it hands the due date back to the terms
    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date_is_manual = due_date.is_some();
        self.due_date = due_date;
        self.refresh_due_date();
    }

    pub fn set_terms(&mut self, terms: PaymentTerms) {
        self.terms = terms;
        self.refresh_due_date();
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
    }

    /// Appends a blank expense line and returns its identifier
    pub fn add_expense(&mut self) -> ExpenseLineId {
        let id = ExpenseLineId(self.next_line_id);
        self.next_line_id += 1;
        self.expenses.push(ExpenseLine::blank(id));
        id
    }

    /// Removes the line at `index`
    ///
    /// Returns `Ok(false)` without touching the draft when it is the only
    /// remaining line.
    pub fn remove_expense(&mut self, index: usize) -> Result<bool, PayablesError> {
        if index >= self.expenses.len() {
            return Err(PayablesError::LineNotFound(index));
        }
        if self.expenses.len() == 1 {
            return Ok(false);
        }
        self.expenses.remove(index);
        Ok(true)
    }

    /// Replaces one field of the line at `index`
    pub fn update_expense_field(
        &mut self,
        index: usize,
        field: ExpenseField,
    ) -> Result<(), PayablesError> {
        if let ExpenseField::Amount(Some(amount)) = &field {
            if *amount < Decimal::ZERO {
                return Err(PayablesError::NegativeAmount(*amount));
            }
        }

        let line = self
            .expenses
            .get_mut(index)
            .ok_or(PayablesError::LineNotFound(index))?;

        match field {
            ExpenseField::Account(account_name) => line.account_name = account_name,
            ExpenseField::Amount(amount) => line.amount = amount,
            ExpenseField::Memo(memo) => line.memo = memo,
            ExpenseField::Billable(billable) => line.billable = billable,
        }
        Ok(())
    }

    /// Sum of all line amounts, absent amounts counting as zero
    pub fn total(&self) -> Decimal {
        self.expenses.iter().map(ExpenseLine::amount_or_zero).sum()
    }

    /// The total as money in the given currency
    ///
    /// Rounded to 4 decimal places like every [`Money`] value; amounts
    /// entered through the form already carry no more than the currency's
    /// minor unit.
    pub fn total_money(&self, currency: Currency) -> Money {
        Money::sum(self.expenses.iter().map(ExpenseLine::amount_or_zero), currency)
    }

    /// True when at least one line has an account and a positive amount
    pub fn has_complete_expense(&self) -> bool {
        self.expenses.iter().any(ExpenseLine::is_complete)
    }

    fn refresh_due_date(&mut self) {
        if self.derive_due_date && !self.due_date_is_manual {
            self.due_date = self.terms.due_date_from(self.date);
        }
    }
}
