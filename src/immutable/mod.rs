//! Immutable-field enforcement engine
//!
//! A generic structural-diff validator that every versioned external API
//! resource passes through before an update is accepted. It recursively
//! compares a client-submitted desired resource against the last-persisted
//! current resource of the identical external type and rejects the first
//! change to a field not declared mutable, reporting the exact offending
//! field path in external (lower-camel) naming.
//!
//! # Design
//!
//! Rust has no runtime struct reflection, so the engine serializes both
//! values to their external JSON form and walks the two value trees in
//! lockstep, guided by a declarative per-type policy tree:
//!
//! - [`policy`] - mutability tags, the tag resolver, and the policy tree
//! - [`cache`] - process-wide populate-once cache of policy trees
//! - `walk` - the depth-first lockstep walker, collection reconciler, and
//!   leaf comparator
//!
//! Types opt in by implementing [`ImmutableConstraints`]; call sites use
//! [`validate_delta`] (shared cache) or a [`Validator`] holding an isolated
//! cache. The engine is pure: no I/O, no logging, no shared mutable state
//! beyond the write-once cache, and it is safe to call concurrently from
//! many request-handling threads.
//!
//! # Contract
//!
//! At most one violation is produced per call (first found, depth-first,
//! field-declaration order), and its target path and message are a durable
//! client-facing contract.

pub mod cache;
pub mod policy;
mod walk;

use serde::Serialize;

pub use cache::PolicyCache;
pub use policy::{field, FieldPolicy, MutabilityPolicy, PolicyNode};

/// An external API type with a declared per-field mutability table
///
/// `immutable_constraints` returns the policy tree mirroring the type's JSON
/// shape. It is invoked at most once per process per concrete type; the
/// result is cached. Fields absent from the tree are strictly immutable.
pub trait ImmutableConstraints: Serialize + 'static {
    /// Build the policy tree for this type
    fn immutable_constraints() -> PolicyNode;
}

/// A rejected change to a non-mutable field
///
/// `target` is the external (lower-camel) dotted path of the offending
/// field, with keyed-collection elements addressed as `['<key>']`. The
/// rendered message template is fixed; only the path varies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyChange {
    /// External path of the field whose change was rejected
    pub target: String,
}

impl PropertyChange {
    /// The client-facing message for this violation
    ///
    /// The template must remain byte-identical across refactors: clients
    /// parse it to locate the offending field.
    pub fn message(&self) -> String {
        format!("Changing property '{}' is not allowed.", self.target)
    }
}

impl std::fmt::Display for PropertyChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for PropertyChange {}

/// Immutability validator with an injectable policy cache
///
/// Production call sites use [`validate_delta`], which shares one
/// process-wide cache; tests construct a `Validator` to get an isolated
/// cache with a deterministic lifecycle.
#[derive(Debug, Default)]
pub struct Validator {
    cache: PolicyCache,
}

impl Validator {
    /// Create a validator with an empty isolated cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `desired` against `current`, rooted at `path`
    ///
    /// `path` is the prefix under which violations are reported; external
    /// resources pass `""` so that paths start at the top-level field name.
    /// Returns the first violation in depth-first declaration order.
    ///
    /// # Panics
    ///
    /// Panics if either value cannot be rendered to its external JSON form.
    /// That can only happen through a programming error in the type
    /// definition, and silently skipping validation would bypass the
    /// immutability guarantee, so the engine fails loudly instead.
    pub fn validate<T: ImmutableConstraints>(
        &self,
        path: &str,
        desired: &T,
        current: &T,
    ) -> Result<(), PropertyChange> {
        let constraints = self.cache.constraints_for::<T>();
        let desired = to_external_value(desired);
        let current = to_external_value(current);

        match walk::walk(
            path,
            MutabilityPolicy::ImmutableStrict,
            Some(&desired),
            Some(&current),
            &constraints,
        ) {
            Some(violation) => Err(PropertyChange {
                target: violation.target,
            }),
            None => Ok(()),
        }
    }
}

/// Compare `desired` against `current` using the process-wide policy cache
///
/// This is the entry point for every versioned static validator. See
/// [`Validator::validate`] for semantics and panics.
pub fn validate_delta<T: ImmutableConstraints>(
    path: &str,
    desired: &T,
    current: &T,
) -> Result<(), PropertyChange> {
    let constraints = cache::shared().constraints_for::<T>();
    let desired = to_external_value(desired);
    let current = to_external_value(current);

    match walk::walk(
        path,
        MutabilityPolicy::ImmutableStrict,
        Some(&desired),
        Some(&current),
        &constraints,
    ) {
        Some(violation) => Err(PropertyChange {
            target: violation.target,
        }),
        None => Ok(()),
    }
}

/// Render a value to its external JSON form, failing loudly on error
fn to_external_value<T: Serialize>(value: &T) -> serde_json::Value {
    match serde_json::to_value(value) {
        Ok(v) => v,
        Err(err) => panic!(
            "external representation of {} is not serializable: {err}",
            std::any::type_name::<T>()
        ),
    }
}
