//! Stratus - resource-provider (RP) validation core for managed OpenShift clusters
//!
//! Stratus is the control-plane validation layer of a multi-tenant resource
//! provider that manages OpenShift clusters across many concurrently-served
//! API versions and an administrative action surface.
//!
//! # Architecture
//!
//! Every PUT/PATCH against a versioned resource flows through the same
//! composed contract:
//! - The frontend deserializes the request body into a versioned external type
//! - The version's static validator checks the request shape on its own
//! - If a previously-persisted document exists (an update, never a create),
//!   the immutable-field engine diffs the desired resource against the
//!   current one and rejects the first change to a field not declared mutable
//!
//! # Modules
//!
//! - [`immutable`] - Generic structural-diff engine enforcing per-field
//!   mutability policies across all external API resources
//! - [`api`] - Versioned external API types, static validators, and the
//!   provider's wire error envelope
//! - [`error`] - Error types for the validation core
//!
//! # Stability
//!
//! The engine's output is a client-facing contract: the error target path and
//! message template must remain byte-identical across refactors, because
//! clients parse them to locate the offending field.

#![deny(missing_docs)]

pub mod api;
pub mod error;
pub mod immutable;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Provider Constants
// =============================================================================
// These constants define the provider identity used across all API versions.
// Centralizing them here keeps resource-type strings consistent between
// static validators and test fixtures.

/// Resource provider namespace under which all resource types are registered
pub const PROVIDER_NAMESPACE: &str = "Stratus.OpenShift";

/// Fully-qualified resource type for OpenShift clusters
pub const CLUSTER_RESOURCE_TYPE: &str = "Stratus.OpenShift/openShiftClusters";
