//! Adapters for the payables ports
//!
//! # Available Adapters
//!
//! - **StaticAccountCatalog**: a fixed chart of expense accounts implementing
//!   `AccountPort`, used until an accounts service is wired in
//! - **Mock ports**: in-memory vendor/bill/navigation stand-ins, re-exported
//!   from the `ports::mock` module behind the `mock` feature

pub mod static_catalog;

pub use static_catalog::StaticAccountCatalog;
