//! Custom Test Assertions
//!
//! Assertion helpers for bill entry state with messages that show the
//! relevant part of the form.

use domain_payables::{BillEntryForm, RecordingNavigator, Route};
use rust_decimal::Decimal;

/// Asserts that the form's running total equals the expected amount
pub fn assert_total_eq(form: &BillEntryForm, expected: Decimal) {
    let lines: Vec<_> = form.draft().expenses().iter().map(|l| l.amount).collect();
    assert_eq!(
        form.total(),
        expected,
        "Unexpected total; line amounts were {:?}",
        lines
    );
}

/// Asserts that the form shows the given inline error
pub fn assert_inline_error(form: &BillEntryForm, expected: &str) {
    assert_eq!(
        form.error(),
        Some(expected),
        "Unexpected inline error"
    );
}

/// Asserts the navigator's last visit was the vendor list with the given flash
pub fn assert_navigated_with_success(navigator: &RecordingNavigator, expected_text: &str) {
    let (route, flash) = navigator
        .last()
        .expect("Expected a navigation, but none happened");
    assert_eq!(route, Route::VendorList);
    let flash = flash.expect("Expected a flash message with the navigation");
    assert_eq!(flash.text, expected_text);
}

/// Asserts the navigator was never used
pub fn assert_not_navigated(navigator: &RecordingNavigator) {
    let visits = navigator.visits();
    assert!(visits.is_empty(), "Expected no navigation, got {:?}", visits);
}
