//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! bookkeeping test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for vendors, dates and identifiers
//! - `builders`: A builder wiring a bill entry form to mock collaborators
//! - `assertions`: Assertion helpers for form state
//! - `generators`: Property-based test data generators
//! - `tracing`: One-time log subscriber setup for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod tracing;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use self::tracing::init_test_tracing;
