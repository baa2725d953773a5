//! Per-field mutability policies and the declarative policy tree
//!
//! Every external API type attaches a [`PolicyNode`] tree mirroring its
//! structure. Each field carries a mutability tag; the resolver maps tag
//! strings to one of three policies. Fields absent from the tree default to
//! [`MutabilityPolicy::ImmutableStrict`], so new fields are protected until
//! they explicitly opt out.

/// How a field may change between the current and the desired resource
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MutabilityPolicy {
    /// The field and its entire subtree may change freely; the walker never
    /// descends into it
    Mutable,
    /// The field must not change, but string leaves compare ignoring letter
    /// case (ARM-normalized identifiers: resource IDs, names, types)
    ImmutableCaseInsensitive,
    /// The field must not change at all (the default)
    ImmutableStrict,
}

impl MutabilityPolicy {
    /// Resolve a mutability tag to a policy
    ///
    /// Recognized values:
    /// - `"true"` - mutable
    /// - `"case"` - immutable, case-insensitive string comparison
    /// - `""`, `"false"`, or anything else - strictly immutable
    ///
    /// Unknown tag values resolve to the strict default rather than failing:
    /// a typo in a tag must protect the field, not expose it.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "true" => Self::Mutable,
            "case" => Self::ImmutableCaseInsensitive,
            _ => Self::ImmutableStrict,
        }
    }

    /// Returns true if the field's subtree is exempt from comparison
    pub fn is_mutable(&self) -> bool {
        matches!(self, Self::Mutable)
    }

    /// Policy for a child field given its own tag and the enclosing policy
    ///
    /// Case-insensitivity is sticky: once a subtree is entered under the
    /// case-insensitive policy, untagged descendants inherit it. A `"true"`
    /// tag always wins regardless of the enclosing policy.
    pub(crate) fn descend(self, tag_policy: Self) -> Self {
        match tag_policy {
            Self::Mutable => Self::Mutable,
            Self::ImmutableCaseInsensitive => Self::ImmutableCaseInsensitive,
            Self::ImmutableStrict => {
                if self == Self::ImmutableCaseInsensitive {
                    Self::ImmutableCaseInsensitive
                } else {
                    Self::ImmutableStrict
                }
            }
        }
    }
}

/// Conventional key attribute for keyed collections
///
/// Slice elements that all expose a string field with this external name are
/// matched by that key instead of by position, so reordering elements never
/// registers as a change.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "name";

/// Mutability tag and subtree for a single named field
#[derive(Clone, Debug)]
pub struct FieldPolicy {
    pub(crate) name: &'static str,
    pub(crate) policy: MutabilityPolicy,
    pub(crate) node: PolicyNode,
}

/// Declare a field policy for the given external (JSON) field name
///
/// The field defaults to a strictly-immutable leaf; chain [`FieldPolicy::tag`]
/// and [`FieldPolicy::with`] to refine it.
pub fn field(name: &'static str) -> FieldPolicy {
    FieldPolicy {
        name,
        policy: MutabilityPolicy::ImmutableStrict,
        node: PolicyNode::leaf(),
    }
}

impl FieldPolicy {
    /// Attach a mutability tag (`"true"`, `"case"`, `"false"`, `""`)
    pub fn tag(mut self, tag: &str) -> Self {
        self.policy = MutabilityPolicy::from_tag(tag);
        self
    }

    /// Attach the policy subtree for a struct, list, or map field
    pub fn with(mut self, node: PolicyNode) -> Self {
        self.node = node;
        self
    }
}

/// Structural policy metadata for one node of an external type
///
/// The tree mirrors the type's JSON shape. Nodes are built once per concrete
/// type and cached process-wide; see [`super::cache::PolicyCache`].
#[derive(Clone, Debug, Default)]
pub struct PolicyNode {
    pub(crate) kind: NodeKind,
}

/// Structural kind of a policy node
#[derive(Clone, Debug, Default)]
pub(crate) enum NodeKind {
    /// Scalar leaf (also the default for fields absent from the tree)
    #[default]
    Leaf,
    /// Struct with declared per-field policies
    Object { fields: Vec<FieldPolicy> },
    /// Slice; elements are matched by `key` when they expose it, by position
    /// otherwise
    List {
        key: &'static str,
        element: Box<PolicyNode>,
    },
    /// String-keyed map; entries are matched by key like keyed slices
    Map { element: Box<PolicyNode> },
}

impl PolicyNode {
    /// A scalar leaf with no children
    pub fn leaf() -> Self {
        Self {
            kind: NodeKind::Leaf,
        }
    }

    /// An empty struct node; add fields with [`PolicyNode::field`]
    pub fn object() -> Self {
        Self {
            kind: NodeKind::Object { fields: Vec::new() },
        }
    }

    /// Add a field policy to a struct node
    ///
    /// # Panics
    ///
    /// Panics if called on a non-struct node or if the field name is already
    /// declared - policy trees are hand-written constants, and a duplicate
    /// declaration is a programming error that must not ship.
    pub fn field(mut self, f: FieldPolicy) -> Self {
        match &mut self.kind {
            NodeKind::Object { fields } => {
                if fields.iter().any(|existing| existing.name == f.name) {
                    panic!("duplicate field policy for '{}'", f.name);
                }
                fields.push(f);
            }
            _ => panic!("field() called on a non-struct policy node"),
        }
        self
    }

    /// A slice node keyed by the conventional `name` attribute
    pub fn list(element: PolicyNode) -> Self {
        Self::keyed_list(DEFAULT_KEY_ATTRIBUTE, element)
    }

    /// A slice node keyed by a custom attribute (e.g. `operatorName`)
    pub fn keyed_list(key: &'static str, element: PolicyNode) -> Self {
        Self {
            kind: NodeKind::List {
                key,
                element: Box::new(element),
            },
        }
    }

    /// A string-keyed map node
    pub fn map(element: PolicyNode) -> Self {
        Self {
            kind: NodeKind::Map {
                element: Box::new(element),
            },
        }
    }

    /// Look up the declared policy for a child field
    ///
    /// Fields absent from the tree resolve to the strict default with a leaf
    /// subtree, which makes the walker compare them (and anything below them)
    /// for exact equality.
    pub(crate) fn field_policy(&self, name: &str) -> (MutabilityPolicy, &PolicyNode) {
        if let NodeKind::Object { fields } = &self.kind {
            if let Some(f) = fields.iter().find(|f| f.name == name) {
                return (f.policy, &f.node);
            }
        }
        (MutabilityPolicy::ImmutableStrict, Self::default_leaf())
    }

    /// Key attribute for list nodes; the convention applies to undeclared
    /// lists as well
    pub(crate) fn key_attribute(&self) -> &'static str {
        match &self.kind {
            NodeKind::List { key, .. } => key,
            _ => DEFAULT_KEY_ATTRIBUTE,
        }
    }

    /// Element subtree for list and map nodes
    pub(crate) fn element(&self) -> &PolicyNode {
        match &self.kind {
            NodeKind::List { element, .. } | NodeKind::Map { element } => element,
            _ => Self::default_leaf(),
        }
    }

    /// Returns true if this node declares map semantics for a JSON object
    pub(crate) fn is_map(&self) -> bool {
        matches!(self.kind, NodeKind::Map { .. })
    }

    fn default_leaf() -> &'static PolicyNode {
        static LEAF: PolicyNode = PolicyNode {
            kind: NodeKind::Leaf,
        };
        &LEAF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Tag Resolution Stories
    // =========================================================================
    //
    // The resolver is the single place tag semantics live. Its mapping is part
    // of the engine's contract: fields must opt in to be mutable.

    /// Story: The "true" tag opts a field out of immutability enforcement
    #[test]
    fn story_true_tag_resolves_to_mutable() {
        assert_eq!(MutabilityPolicy::from_tag("true"), MutabilityPolicy::Mutable);
        assert!(MutabilityPolicy::from_tag("true").is_mutable());
    }

    /// Story: The "case" tag relaxes string comparison for ARM identifiers
    #[test]
    fn story_case_tag_resolves_to_case_insensitive() {
        assert_eq!(
            MutabilityPolicy::from_tag("case"),
            MutabilityPolicy::ImmutableCaseInsensitive
        );
    }

    /// Story: Absent, empty, and explicit "false" tags all mean immutable
    ///
    /// Immutability is the default. A field that says nothing is protected.
    #[test]
    fn story_default_is_strictly_immutable() {
        for tag in ["", "false"] {
            assert_eq!(
                MutabilityPolicy::from_tag(tag),
                MutabilityPolicy::ImmutableStrict,
                "tag {tag:?} must resolve to the strict default"
            );
        }
    }

    /// Story: A typo in a tag protects the field instead of exposing it
    ///
    /// The engine is fail-closed; an unrecognized tag value must never make
    /// a field silently mutable.
    #[test]
    fn story_unknown_tags_fail_closed() {
        for tag in ["True", "yes", "mutable", "TRUE", "1"] {
            assert_eq!(
                MutabilityPolicy::from_tag(tag),
                MutabilityPolicy::ImmutableStrict,
                "unrecognized tag {tag:?} must fail closed"
            );
        }
    }

    // =========================================================================
    // Policy Descent Stories
    // =========================================================================

    /// Story: Case-insensitivity propagates to untagged descendants
    ///
    /// A resource ID field tagged "case" contains segments that are not
    /// individually tagged; they still compare case-insensitively.
    #[test]
    fn story_case_insensitivity_is_sticky_downward() {
        let inherited = MutabilityPolicy::ImmutableCaseInsensitive
            .descend(MutabilityPolicy::ImmutableStrict);
        assert_eq!(inherited, MutabilityPolicy::ImmutableCaseInsensitive);
    }

    /// Story: A mutable tag always wins over the enclosing policy
    #[test]
    fn story_mutable_tag_overrides_enclosing_policy() {
        let resolved =
            MutabilityPolicy::ImmutableCaseInsensitive.descend(MutabilityPolicy::Mutable);
        assert_eq!(resolved, MutabilityPolicy::Mutable);
    }

    /// Story: Strict stays strict under a strict parent
    #[test]
    fn story_strict_parent_keeps_strict_children() {
        let resolved = MutabilityPolicy::ImmutableStrict.descend(MutabilityPolicy::ImmutableStrict);
        assert_eq!(resolved, MutabilityPolicy::ImmutableStrict);
    }

    // =========================================================================
    // Policy Tree Stories
    // =========================================================================

    /// Story: Undeclared fields resolve to the protected default
    ///
    /// New fields added to an external type in a later API version are
    /// immutable until someone deliberately tags them otherwise.
    #[test]
    fn story_undeclared_fields_default_to_strict_leaf() {
        let node = PolicyNode::object().field(field("tags").tag("true"));

        let (policy, _) = node.field_policy("location");
        assert_eq!(policy, MutabilityPolicy::ImmutableStrict);

        let (policy, _) = node.field_policy("tags");
        assert_eq!(policy, MutabilityPolicy::Mutable);
    }

    /// Story: Keyed lists default to the `name` convention
    #[test]
    fn story_list_key_defaults_to_name() {
        let node = PolicyNode::list(PolicyNode::object());
        assert_eq!(node.key_attribute(), "name");

        let node = PolicyNode::keyed_list("operatorName", PolicyNode::object());
        assert_eq!(node.key_attribute(), "operatorName");
    }

    /// Story: Duplicate field declarations are a programming error
    #[test]
    #[should_panic(expected = "duplicate field policy")]
    fn story_duplicate_field_declaration_panics() {
        let _ = PolicyNode::object()
            .field(field("tags").tag("true"))
            .field(field("tags"));
    }
}
