//! Property-Based Test Generators
//!
//! Proptest strategies for expense line edits.

use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for non-negative line amounts with two decimal places
pub fn line_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for an optional line amount (the user may leave it blank)
pub fn optional_line_amount_strategy() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of(line_amount_strategy())
}

/// Strategy for account names, including blank ones
pub fn account_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("Office Supplies".to_string()),
        Just("Rent".to_string()),
        Just("Utilities".to_string()),
    ]
}

/// One user action on the expense line list
#[derive(Debug, Clone)]
pub enum LineOp {
    Add,
    /// Remove at a position; taken modulo the current line count
    Remove(usize),
}

/// Strategy for a single add/remove action
pub fn line_op_strategy() -> impl Strategy<Value = LineOp> {
    prop_oneof![
        Just(LineOp::Add),
        (0usize..16usize).prop_map(LineOp::Remove),
    ]
}

/// Strategy for a sequence of add/remove actions
pub fn line_ops_strategy() -> impl Strategy<Value = Vec<LineOp>> {
    prop::collection::vec(line_op_strategy(), 0..64)
}
