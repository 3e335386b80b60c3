//! Ports and Adapters Infrastructure
//!
//! Foundational types for the hexagonal architecture used by the domain
//! crates. Each domain defines its own port traits that extend [`DomainPort`]
//! and return [`PortError`]; adapters (HTTP clients, in-memory mocks, static
//! catalogs) implement those traits.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait VendorPort: DomainPort {
//!     async fn list_vendors(
//!         &self,
//!         company: CompanyId,
//!         metadata: Option<OperationMetadata>,
//!     ) -> Result<Vec<Vendor>, PortError>;
//! }
//! ```

use std::collections::HashMap;
use thiserror::Error;

/// Error type for port operations
///
/// All adapters report failures through this type so the domain can decide
/// what to show without knowing whether the collaborator was a remote service
/// or an in-process stand-in.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The collaborator rejected the payload
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Authentication or authorization failed
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },

    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// The collaborator answered with an error status, optionally carrying
    /// a human-readable detail string
    #[error("Rejected with status {status}")]
    Rejected {
        status: u16,
        detail: Option<String>,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Rejected error with a detail message
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        PortError::Rejected {
            status,
            detail: Some(detail.into()),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns the human-readable detail reported by the collaborator, if any
    ///
    /// Transport-level failures (connection, timeout, internal) carry no
    /// detail meant for end users and return `None`.
    pub fn detail(&self) -> Option<&str> {
        match self {
            PortError::Validation { message, .. }
            | PortError::Conflict { message }
            | PortError::Unauthorized { message } => Some(message.as_str()),
            PortError::Rejected { detail, .. } => detail.as_deref(),
            PortError::NotFound { .. }
            | PortError::Connection { .. }
            | PortError::Timeout { .. }
            | PortError::ServiceUnavailable { .. }
            | PortError::Internal { .. } => None,
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can be shared behind
/// `Arc<dyn ...>` across async tasks.
pub trait DomainPort: Send + Sync + 'static {}

/// Metadata about a port operation for auditing and tracing
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Additional context as key-value pairs
    pub context: HashMap<String, String>,
}

impl OperationMetadata {
    /// Adds context to the metadata
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
