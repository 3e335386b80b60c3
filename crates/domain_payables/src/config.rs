//! Bill entry configuration

use serde::Deserialize;

use core_kernel::Currency;

use crate::bill::PaymentTerms;
use crate::error::PayablesError;

/// Bill entry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BillEntryConfig {
    /// Currency bills are recorded in
    pub currency: Currency,
    /// Terms preselected on a new draft
    pub default_terms: PaymentTerms,
    /// Derive the due date from the terms until the user sets one
    pub apply_terms_to_due_date: bool,
    /// Flash message shown on the vendor list after a successful save
    pub success_message: String,
    /// Shown when the bill service fails without a detail of its own
    pub submit_failure_message: String,
    /// Shown when the vendor list fails to load
    pub load_error_message: String,
    /// Shown when the expense account list fails to load
    pub account_load_error_message: String,
}

impl Default for BillEntryConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            default_terms: PaymentTerms::Net30,
            apply_terms_to_due_date: true,
            success_message: "Bill created successfully".to_string(),
            submit_failure_message: "Failed to create bill".to_string(),
            load_error_message: "Failed to load vendors".to_string(),
            account_load_error_message: "Failed to load expense accounts".to_string(),
        }
    }
}

impl BillEntryConfig {
    /// Loads configuration from `BILLS_*` environment variables
    pub fn from_env() -> Result<Self, PayablesError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("BILLS"))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Loads a `.env` file if present, then reads the environment
    pub fn from_env_with_dotenv() -> Result<Self, PayablesError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BillEntryConfig::default();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.default_terms, PaymentTerms::Net30);
        assert!(config.apply_terms_to_due_date);
        assert_eq!(config.submit_failure_message, "Failed to create bill");
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: BillEntryConfig = config::Config::builder()
            .set_override("currency", "EUR")
            .unwrap()
            .set_override("default_terms", "net15")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.default_terms, PaymentTerms::Net15);
        assert_eq!(config.success_message, "Bill created successfully");
    }

    #[test]
    fn test_from_env_reads_prefixed_variables() {
        let vars = [
            ("BILLS_CURRENCY", "eur"),
            ("BILLS_DEFAULT_TERMS", "Net 60"),
            ("BILLS_APPLY_TERMS_TO_DUE_DATE", "false"),
            ("BILLS_SUCCESS_MESSAGE", "Bill saved"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }

        let result = BillEntryConfig::from_env();

        for (key, _) in vars {
            std::env::remove_var(key);
        }

        let config = result.unwrap();
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.default_terms, PaymentTerms::Net60);
        assert!(!config.apply_terms_to_due_date);
        assert_eq!(config.success_message, "Bill saved");
        assert_eq!(config.submit_failure_message, "Failed to create bill");
    }

    #[test]
    fn test_label_spelling_of_terms_accepted() {
        let config: BillEntryConfig = config::Config::builder()
            .set_override("default_terms", "Due on receipt")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.default_terms, PaymentTerms::DueOnReceipt);
    }

    #[test]
    fn test_unknown_terms_rejected() {
        let result = config::Config::builder()
            .set_override("default_terms", "net 90")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<BillEntryConfig>();

        assert!(result.is_err());
    }
}
