//! Core Kernel - Foundational types shared by the bookkeeping domains
//!
//! This crate provides the building blocks used across the domain crates:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for companies, vendors, accounts and bills
//! - Port error and metadata types for the ports-and-adapters seams

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{CompanyId, VendorId, AccountId, BillId};
pub use ports::{PortError, DomainPort, OperationMetadata};
