//! End-to-end tests for the bill entry form against mock collaborators

use std::time::Duration;

use core_kernel::PortError;
use domain_payables::{
    BillEntryConfig, BillValidationError, ExpenseField, PayablesError, PaymentTerms, Route,
};
use rust_decimal_macros::dec;

use test_utils::{
    assert_inline_error, assert_navigated_with_success, assert_not_navigated, assert_total_eq,
    init_test_tracing, AmountFixtures, DateFixtures, IdFixtures, TestFormBuilder, VendorFixtures,
};

// ============================================================================
// Reference data
// ============================================================================

mod reference_data {
    use super::*;

    #[tokio::test]
    async fn test_load_populates_selectors() {
        init_test_tracing();
        let mut t = TestFormBuilder::new().build();

        t.form.load_reference_data().await.unwrap();

        assert_eq!(t.form.vendors(), VendorFixtures::all().as_slice());
        assert!(t.form.accounts().iter().any(|a| a.name == "Office Supplies"));
        assert!(t.form.error().is_none());
        assert!(!t.form.is_loading());
    }

    #[tokio::test]
    async fn test_vendor_failure_shows_generic_message() {
        init_test_tracing();
        let mut t = TestFormBuilder::new()
            .with_vendor_failure(|| PortError::connection("connection refused"))
            .build();

        t.form.load_reference_data().await.unwrap();

        assert!(t.form.vendors().is_empty());
        assert!(!t.form.accounts().is_empty());
        assert_inline_error(&t.form, "Failed to load vendors");
        assert_eq!(t.vendors.calls(), 1);
    }

    #[tokio::test]
    async fn test_successful_reload_clears_load_error() {
        let mut t = TestFormBuilder::new()
            .with_vendor_failures(1, || PortError::connection("connection refused"))
            .build();

        t.form.load_reference_data().await.unwrap();
        assert_inline_error(&t.form, "Failed to load vendors");

        t.form.load_reference_data().await.unwrap();

        assert_eq!(t.vendors.calls(), 2);
        assert_eq!(t.form.vendors().len(), 2);
        assert!(t.form.error().is_none());
    }

    #[tokio::test]
    async fn test_reload_keeps_submission_error() {
        let mut t = TestFormBuilder::new().build();
        t.form.submit().await.unwrap_err();
        assert_inline_error(&t.form, "Please select a vendor");

        t.form.load_reference_data().await.unwrap();

        assert_inline_error(&t.form, "Please select a vendor");
    }

    #[tokio::test]
    async fn test_no_company_skips_loading() {
        let mut t = TestFormBuilder::new().without_company().build();

        t.form.load_reference_data().await.unwrap();

        assert_eq!(t.vendors.calls(), 0);
        assert!(t.form.vendors().is_empty());
        assert!(t.form.begin_reference_load().is_none());
    }

    #[tokio::test]
    async fn test_background_load_applies_results() {
        let mut t = TestFormBuilder::new().build();

        let load = t.form.begin_reference_load().unwrap();
        assert!(t.form.is_loading());
        assert!(t.form.begin_reference_load().is_none());

        let data = load.join().await.unwrap();
        assert!(!t.form.is_loading());
        t.form.apply_reference_data(data);

        assert_eq!(t.form.vendors().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_vendor_list_is_not_an_error() {
        let mut t = TestFormBuilder::new().with_vendors(Vec::new()).build();

        t.form.load_reference_data().await.unwrap();

        assert!(t.form.vendors().is_empty());
        assert!(t.form.error().is_none());
    }

    #[tokio::test]
    async fn test_selected_vendor_resolves_from_loaded_list() {
        let mut t = TestFormBuilder::new().build();
        t.form.load_reference_data().await.unwrap();

        assert!(t.form.selected_vendor().is_none());
        t.form.set_vendor(Some(IdFixtures::vendor_id()));
        assert_eq!(
            t.form.selected_vendor().map(|v| v.display_name.as_str()),
            Some("Acme Paper Co")
        );
    }
}

// ============================================================================
// Line editing and totals
// ============================================================================

mod line_editing {
    use super::*;

    #[test]
    fn test_new_form_starts_with_one_line() {
        let t = TestFormBuilder::new().build();
        assert_eq!(t.form.draft().expenses().len(), 1);
        assert_total_eq(&t.form, dec!(0));
    }

    #[test]
    fn test_removing_only_line_is_noop() {
        let mut t = TestFormBuilder::new().build();
        let id = t.form.draft().expenses()[0].id;

        assert!(!t.form.remove_expense(0).unwrap());

        assert_eq!(t.form.draft().expenses().len(), 1);
        assert_eq!(t.form.draft().expenses()[0].id, id);
    }

    #[test]
    fn test_remove_middle_line_keeps_order() {
        let mut t = TestFormBuilder::new().build();
        let first = t.form.draft().expenses()[0].id;
        t.form.add_expense();
        let third = t.form.add_expense();

        assert!(t.form.remove_expense(1).unwrap());

        let ids: Vec<_> = t.form.draft().expenses().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn test_total_tracks_edits() {
        let mut t = TestFormBuilder::new().build();
        t.form.add_expense();
        t.form.add_expense();

        t.form
            .update_expense_field(0, ExpenseField::Amount(Some(dec!(100))))
            .unwrap();
        t.form
            .update_expense_field(1, ExpenseField::Amount(Some(AmountFixtures::utilities())))
            .unwrap();
        assert_total_eq(&t.form, dec!(345.67));

        t.form
            .update_expense_field(1, ExpenseField::Amount(None))
            .unwrap();
        assert_total_eq(&t.form, dec!(100));
        assert_eq!(t.form.total_money().to_string(), "$100.00");
    }

    #[test]
    fn test_amounts_rounded_to_currency_scale() {
        let mut t = TestFormBuilder::new().build();
        t.form
            .update_expense_field(0, ExpenseField::Amount(Some(dec!(10.00005))))
            .unwrap();

        assert_eq!(t.form.draft().expenses()[0].amount, Some(dec!(10.00)));
        assert_eq!(t.form.total(), t.form.total_money().amount());
    }

    #[test]
    fn test_small_negative_amount_still_rejected() {
        let mut t = TestFormBuilder::new().build();
        let result = t
            .form
            .update_expense_field(0, ExpenseField::Amount(Some(dec!(-0.001))));

        assert!(matches!(result, Err(PayablesError::NegativeAmount(_))));
        assert_eq!(t.form.draft().expenses()[0].amount, None);
    }

    #[test]
    fn test_update_out_of_range_line() {
        let mut t = TestFormBuilder::new().build();
        let result = t
            .form
            .update_expense_field(3, ExpenseField::Memo("x".to_string()));
        assert!(matches!(result, Err(PayablesError::LineNotFound(3))));
    }

    #[test]
    fn test_terms_drive_due_date() {
        let mut t = TestFormBuilder::new().build();
        assert_eq!(
            t.form.draft().due_date(),
            Some(DateFixtures::net30_due_date())
        );

        t.form.set_terms(PaymentTerms::DueOnReceipt);
        assert_eq!(t.form.draft().due_date(), Some(DateFixtures::bill_date()));
    }

    #[test]
    fn test_month_end_bill_date_rolls_into_next_month() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut t = TestFormBuilder::new().with_date(date).build();

        assert_eq!(
            t.form.draft().due_date(),
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );

        let manual = chrono::NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        t.form.set_due_date(Some(manual));
        t.form.set_terms(PaymentTerms::Net60);
        assert_eq!(t.form.draft().due_date(), Some(manual));
    }
}

// ============================================================================
// Validation and submission
// ============================================================================

mod submission {
    use super::*;

    #[tokio::test]
    async fn test_no_vendor_never_calls_bill_service() {
        init_test_tracing();
        let mut t = TestFormBuilder::new().build();
        t.form
            .update_expense_field(0, ExpenseField::Account("Office Supplies".to_string()))
            .unwrap();
        t.form
            .update_expense_field(0, ExpenseField::Amount(Some(dec!(100))))
            .unwrap();

        let result = t.form.submit().await;

        assert!(matches!(
            result,
            Err(PayablesError::Validation(BillValidationError::MissingVendor))
        ));
        assert_inline_error(&t.form, "Please select a vendor");
        assert_eq!(t.bills.call_count().await, 0);
        assert_not_navigated(&t.navigator);
        assert!(!t.form.is_saving());
    }

    #[tokio::test]
    async fn test_no_company_reported_first() {
        let mut t = TestFormBuilder::new().without_company().build();

        let result = t.form.submit().await;

        assert!(matches!(
            result,
            Err(PayablesError::Validation(BillValidationError::NoCompany))
        ));
        assert_inline_error(&t.form, "No company selected");
        assert_eq!(t.bills.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_vendor_without_valid_expense() {
        let mut t = TestFormBuilder::new().build();
        t.form.set_vendor(Some(IdFixtures::vendor_id()));
        t.form.add_expense();
        t.form
            .update_expense_field(0, ExpenseField::Account("Rent".to_string()))
            .unwrap();
        t.form
            .update_expense_field(0, ExpenseField::Amount(Some(dec!(0))))
            .unwrap();
        t.form
            .update_expense_field(1, ExpenseField::Amount(Some(dec!(50))))
            .unwrap();

        let result = t.form.submit().await;

        assert!(matches!(
            result,
            Err(PayablesError::Validation(BillValidationError::NoValidExpense))
        ));
        assert_inline_error(
            &t.form,
            "Please add at least one expense with an account and amount",
        );
        assert_eq!(t.bills.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_valid_bill_is_sent_and_navigates() {
        init_test_tracing();
        let mut t = TestFormBuilder::new().build();
        t.fill_office_supplies();
        t.form.set_reference_number("INV-2024-031");

        let ack = t.form.submit().await.unwrap();

        assert_eq!(ack.total_amount, dec!(100));
        assert_navigated_with_success(&t.navigator, "Bill created successfully");
        assert!(t.form.error().is_none());
        assert!(!t.form.is_saving());

        let requests = t.bills.requests().await;
        assert_eq!(requests.len(), 1);
        let (company, request) = &requests[0];
        assert_eq!(*company, IdFixtures::company_id());
        assert_eq!(request.vendor_id, IdFixtures::vendor_id());
        assert_eq!(request.reference_number.as_deref(), Some("INV-2024-031"));
        assert_eq!(request.payment_terms, "Net 30");
        assert_eq!(request.lines.len(), 1);
        assert_eq!(request.lines[0].account_name, "Office Supplies");
        assert_eq!(request.lines[0].unit_price, dec!(100));
    }

    #[tokio::test]
    async fn test_memo_only_line_reaches_bill_service() {
        let mut t = TestFormBuilder::new().build();
        t.fill_office_supplies();
        t.form.add_expense();
        t.form
            .update_expense_field(1, ExpenseField::Memo("ask Bob about freight".to_string()))
            .unwrap();
        t.form
            .update_expense_field(1, ExpenseField::Billable(true))
            .unwrap();

        t.form.submit().await.unwrap();

        let requests = t.bills.requests().await;
        let lines = &requests[0].1.lines;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].description.as_deref(), Some("ask Bob about freight"));
        assert!(lines[1].billable);
    }

    #[tokio::test]
    async fn test_service_detail_shown_and_draft_kept() {
        let mut t = TestFormBuilder::new()
            .with_bill_failure(|| PortError::rejected(400, "Vendor is inactive"))
            .build();
        t.fill_office_supplies();
        let before = t.form.draft().expenses().to_vec();

        let result = t.form.submit().await;

        assert!(matches!(result, Err(PayablesError::Submission { .. })));
        assert_inline_error(&t.form, "Vendor is inactive");
        assert_eq!(t.form.draft().expenses(), before.as_slice());
        assert_eq!(t.form.draft().vendor_id(), Some(IdFixtures::vendor_id()));
        assert_not_navigated(&t.navigator);
        assert!(!t.form.is_saving());
    }

    #[tokio::test]
    async fn test_service_failure_without_detail_uses_fallback() {
        let mut t = TestFormBuilder::new()
            .with_bill_failure(|| PortError::Timeout {
                operation: "create_bill".to_string(),
                duration_ms: 30_000,
            })
            .build();
        t.fill_office_supplies();

        assert!(t.form.submit().await.is_err());
        assert_inline_error(&t.form, "Failed to create bill");

        // The draft is intact, so a retry sends the same bill again
        assert!(t.form.submit().await.is_err());
        assert_eq!(t.bills.call_count().await, 2);
    }

    #[tokio::test]
    async fn test_custom_messages_from_config() {
        let config = BillEntryConfig {
            success_message: "Saved".to_string(),
            ..BillEntryConfig::default()
        };
        let mut t = TestFormBuilder::new().with_config(config).build();
        t.fill_office_supplies();

        t.form.submit().await.unwrap();

        assert_navigated_with_success(&t.navigator, "Saved");
    }

    #[tokio::test]
    async fn test_second_submit_refused_while_saving() {
        let mut t = TestFormBuilder::new()
            .with_bill_latency(Duration::from_millis(50))
            .build();
        t.fill_office_supplies();

        let pending = t.form.begin_submit().unwrap();
        assert!(t.form.is_saving());

        assert!(matches!(t.form.begin_submit(), Err(PayablesError::Busy(_))));
        assert!(matches!(t.form.cancel(), Err(PayablesError::Busy(_))));

        let outcome = pending.send().await;
        assert!(outcome.is_success());
        t.form.finish_submit(outcome).unwrap();

        assert!(!t.form.is_saving());
        assert_eq!(t.bills.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_abandoned_submission_releases_saving_flag() {
        let mut t = TestFormBuilder::new().build();
        t.fill_office_supplies();

        let pending = t.form.begin_submit().unwrap();
        assert!(t.form.is_saving());
        drop(pending);

        assert!(!t.form.is_saving());
        assert_eq!(t.bills.call_count().await, 0);
    }

    #[test]
    fn test_cancel_navigates_without_message() {
        let t = TestFormBuilder::new().build();

        t.form.cancel().unwrap();

        assert_eq!(t.navigator.last(), Some((Route::VendorList, None)));
    }
}
