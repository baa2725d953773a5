//! Process-wide policy tree cache
//!
//! Policy trees are built lazily the first time a concrete external type is
//! validated and are then immutable for the process lifetime. The cache is an
//! explicit, injectable object rather than a hidden global so tests can
//! construct isolated instances; production call sites share the
//! [`shared`] instance.

use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use super::policy::PolicyNode;
use super::ImmutableConstraints;

/// Thread-safe populate-once cache of policy trees keyed by concrete type
///
/// Entries are written at most once per type; concurrent first-time callers
/// for the same type are serialized on the map shard, so the tree is built
/// exactly once. There is no invalidation: a type's constraints are constants.
#[derive(Debug, Default)]
pub struct PolicyCache {
    trees: DashMap<TypeId, Arc<PolicyNode>>,
}

impl PolicyCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the policy tree for `T`, building and caching it on first use
    pub fn constraints_for<T: ImmutableConstraints>(&self) -> Arc<PolicyNode> {
        self.trees
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(T::immutable_constraints()))
            .clone()
    }

    /// Number of distinct types cached so far
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Returns true if no type has been cached yet
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

/// Process-wide cache shared by the convenience validation entry points
pub fn shared() -> &'static PolicyCache {
    static SHARED: OnceLock<PolicyCache> = OnceLock::new();
    SHARED.get_or_init(PolicyCache::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::immutable::policy::{field, PolicyNode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Widget {
        color: String,
    }

    impl ImmutableConstraints for Widget {
        fn immutable_constraints() -> PolicyNode {
            PolicyNode::object().field(field("color").tag("true"))
        }
    }

    /// Story: A tree is built once and reused on subsequent lookups
    #[test]
    fn story_tree_is_built_once_per_type() {
        let cache = PolicyCache::new();
        assert!(cache.is_empty());

        let first = cache.constraints_for::<Widget>();
        let second = cache.constraints_for::<Widget>();

        assert_eq!(cache.len(), 1);
        assert!(
            Arc::ptr_eq(&first, &second),
            "second lookup must reuse the cached tree"
        );
    }

    /// Story: Concurrent first-time callers never duplicate visible entries
    ///
    /// Many request-handling threads may validate the same type for the first
    /// time simultaneously; they must all observe a single cached tree.
    #[test]
    fn story_concurrent_population_yields_one_entry() {
        let cache = Arc::new(PolicyCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.constraints_for::<Widget>())
            })
            .collect();

        let trees: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 1);
        for tree in &trees[1..] {
            assert!(Arc::ptr_eq(&trees[0], tree));
        }
    }

    /// Story: Isolated caches do not observe each other's entries
    #[test]
    fn story_isolated_caches_are_independent() {
        let a = PolicyCache::new();
        let b = PolicyCache::new();

        let _ = a.constraints_for::<Widget>();

        assert_eq!(a.len(), 1);
        assert!(b.is_empty(), "cache b must not see cache a's entries");
    }
}
