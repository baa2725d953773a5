//! PlatformWorkloadIdentityRoleSet external type, API version 2024-08-12-preview
//!
//! The set of Azure roles each OpenShift platform operator needs for a given
//! minor version on workload-identity clusters. Roles form a keyed
//! collection identified by `operatorName` rather than the conventional
//! `name` attribute.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::immutable::{field, ImmutableConstraints, PolicyNode};

/// Required platform workload identity roles for one OpenShift minor version
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformWorkloadIdentityRoleSet {
    /// Fully-qualified resource ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Resource name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resource type
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,

    /// Role set properties
    #[serde(default)]
    pub properties: PlatformWorkloadIdentityRoleSetProperties,
}

/// Properties of a platform workload identity role set
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformWorkloadIdentityRoleSetProperties {
    /// OpenShift minor version the role set applies to (e.g. `4.14`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub open_shift_version: String,

    /// Per-operator role requirements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platform_workload_identity_roles: Vec<PlatformWorkloadIdentityRole>,
}

/// Role requirement of one platform operator
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformWorkloadIdentityRole {
    /// Operator the requirement belongs to (collection key)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operator_name: String,

    /// Display name of the required role definition
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role_definition_name: String,

    /// Resource ID of the required role definition
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role_definition_id: String,

    /// Service accounts the operator uses
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_accounts: Vec<String>,
}

impl ImmutableConstraints for PlatformWorkloadIdentityRoleSet {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(
                field("properties").with(
                    PolicyNode::object().field(
                        field("platformWorkloadIdentityRoles").with(PolicyNode::keyed_list(
                            "operatorName",
                            PolicyNode::object()
                                .field(field("roleDefinitionName").tag("true"))
                                .field(field("roleDefinitionId").tag("case"))
                                .field(field("serviceAccounts").tag("true")),
                        )),
                    ),
                ),
            )
    }
}
