//! # Coachdesk Core
//!
//! Foundational types for the Coachdesk API.
//!
//! This crate provides the pieces shared across the application:
//!
//! - [`permissions`]: the permission catalog and the hierarchy engine that
//!   keeps per-module `read`/`write`/`delete` grants consistent
//! - [`pagination`]: pagination utilities for API responses
//! - [`serde`]: custom serde deserialization helpers
//!
//! # Example
//!
//! ```
//! use coachdesk_core::permissions::{PermissionKey, PermissionSet};
//!
//! let key: PermissionKey = "students:delete".parse().unwrap();
//! let granted = PermissionSet::new().toggle(&key);
//!
//! // Granting delete pulls in the whole hierarchy for the module.
//! assert!(granted.has("students:read"));
//! assert!(granted.has("students:write"));
//! assert!(granted.has("students:delete"));
//! ```

pub mod pagination;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use pagination::{PaginationMeta, PaginationParams};
pub use permissions::{Action, ParsePermissionError, PermissionKey, PermissionSet};
