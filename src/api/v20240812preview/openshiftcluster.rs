//! OpenShiftCluster external type, API version 2024-08-12-preview
//!
//! Wire representation of a managed OpenShift cluster as exposed to API
//! clients in this version, together with its per-field mutability table.
//! Field names on the wire are lower-camel; identity fields (`id`, `name`,
//! `type`) compare case-insensitively because ARM normalizes their casing.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::immutable::{field, ImmutableConstraints, PolicyNode};

/// A managed OpenShift cluster resource
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftCluster {
    /// Fully-qualified resource ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Resource name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resource type (`Stratus.OpenShift/openShiftClusters`)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,

    /// Azure region the cluster lives in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,

    /// ARM system metadata (server-populated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_data: Option<SystemData>,

    /// Resource tags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    /// Managed service identity attached to the cluster resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,

    /// Cluster properties
    #[serde(default)]
    pub properties: OpenShiftClusterProperties,
}

/// ARM system metadata
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    /// Identity that created the resource
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by: String,
    /// Type of the creating identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_by_type: String,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Identity that last modified the resource
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_modified_by: String,
    /// Type of the modifying identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_modified_by_type: String,
    /// Last modification timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

/// Managed service identity
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedServiceIdentity {
    /// Identity type (`None`, `UserAssigned`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,
    /// Service principal of the system-assigned identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub principal_id: String,
    /// Tenant of the identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,
    /// User-assigned identities keyed by resource ID
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_assigned_identities: BTreeMap<String, UserAssignedIdentity>,
}

/// A user-assigned identity attached to the cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentity {
    /// Client ID of the identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Object ID of the identity's service principal
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub principal_id: String,
}

/// Cluster properties
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftClusterProperties {
    /// Provisioning state (server-driven)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,

    /// Cluster-wide configuration
    #[serde(default)]
    pub cluster_profile: ClusterProfile,

    /// Console configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_profile: Option<ConsoleProfile>,

    /// Service principal credentials (service-principal clusters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,

    /// Workload identity configuration (workload-identity clusters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_workload_identity_profile: Option<PlatformWorkloadIdentityProfile>,

    /// Network configuration
    #[serde(default)]
    pub network_profile: NetworkProfile,

    /// Control-plane node configuration
    #[serde(default)]
    pub master_profile: MasterProfile,

    /// Worker node pool configuration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_profiles: Vec<WorkerProfile>,

    /// Worker pool state as observed by the provider (server-populated)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_profiles_status: Vec<WorkerProfile>,

    /// API server configuration
    #[serde(default)]
    pub apiserver_profile: ApiserverProfile,

    /// Ingress configuration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress_profiles: Vec<IngressProfile>,
}

/// Cluster provisioning state
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ProvisioningState {
    /// An admin-initiated update is in flight
    AdminUpdating,
    /// Initial provisioning is in flight
    Creating,
    /// Deletion is in flight
    Deleting,
    /// The last operation failed
    Failed,
    /// The last operation succeeded
    Succeeded,
    /// A client-initiated update is in flight
    Updating,
}

impl std::fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::AdminUpdating => "AdminUpdating",
            Self::Creating => "Creating",
            Self::Deleting => "Deleting",
            Self::Failed => "Failed",
            Self::Succeeded => "Succeeded",
            Self::Updating => "Updating",
        };
        f.write_str(s)
    }
}

/// Cluster-wide configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProfile {
    /// Pull secret for cluster image registries (write-only)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pull_secret: String,
    /// DNS domain of the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// OpenShift version installed in the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Managed resource group the cluster nodes live in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_group_id: String,
    /// Whether FIPS-validated crypto modules are enforced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fips_validated_modules: Option<FipsValidatedModules>,
    /// OIDC issuer URL (workload-identity clusters, server-populated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc_issuer: Option<String>,
}

/// FIPS-validated-modules setting
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum FipsValidatedModules {
    /// FIPS-validated modules enforced
    Enabled,
    /// FIPS-validated modules not enforced
    Disabled,
}

/// Console configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleProfile {
    /// Console URL (server-populated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Service principal credentials
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePrincipalProfile {
    /// Client ID of the cluster's service principal
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Client secret of the cluster's service principal (write-only)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_secret: String,
}

/// Workload identity configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformWorkloadIdentityProfile {
    /// OpenShift version the identities have been prepared for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgradeable_to: Option<String>,
    /// Platform workload identities keyed by operator name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub platform_workload_identities: BTreeMap<String, PlatformWorkloadIdentity>,
}

/// A single platform workload identity
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformWorkloadIdentity {
    /// Resource ID of the user-assigned identity
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,
    /// Client ID (server-populated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Object ID (server-populated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub object_id: String,
}

/// Network configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    /// CIDR block for pods
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pod_cidr: String,
    /// CIDR block for services
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,
    /// Egress routing of cluster traffic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbound_type: Option<OutboundType>,
    /// Public load balancer configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_balancer_profile: Option<LoadBalancerProfile>,
    /// Whether subnets are expected to carry pre-attached NSGs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preconfigured_nsg: Option<PreconfiguredNsg>,
}

/// Egress routing of cluster traffic
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum OutboundType {
    /// Egress through the public load balancer
    Loadbalancer,
    /// Egress through customer-managed routing
    UserDefinedRouting,
}

/// Pre-attached network security group setting
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum PreconfiguredNsg {
    /// Subnets carry customer-managed NSGs
    Enabled,
    /// The provider manages NSGs
    Disabled,
}

/// Public load balancer configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerProfile {
    /// Managed outbound IP configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_outbound_ips: Option<ManagedOutboundIps>,
    /// Outbound IPs in effect (server-populated)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effective_outbound_ips: Vec<EffectiveOutboundIp>,
}

/// Managed outbound IP configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManagedOutboundIps {
    /// Desired number of managed outbound IPs
    #[serde(default)]
    pub count: i32,
}

/// An outbound IP in effect on the load balancer
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveOutboundIp {
    /// Resource ID of the public IP
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

/// Control-plane node configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MasterProfile {
    /// VM size of control-plane nodes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vm_size: String,
    /// Subnet the control-plane nodes are placed in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
    /// Host-level encryption setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_at_host: Option<EncryptionAtHost>,
    /// Disk encryption set applied to OS disks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_encryption_set_id: Option<String>,
}

/// Host-level encryption setting
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum EncryptionAtHost {
    /// Encryption at host enabled
    Enabled,
    /// Encryption at host disabled
    Disabled,
}

/// Worker node pool configuration
///
/// Worker profiles form a keyed collection: elements are identified by
/// `name`, so reordering pools between requests is never a change.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    /// Pool name, unique within the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// VM size of the pool's nodes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vm_size: String,
    /// OS disk size in GiB
    #[serde(default, skip_serializing_if = "is_zero")]
    pub disk_size_gb: i32,
    /// Subnet the pool's nodes are placed in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
    /// Number of nodes in the pool
    #[serde(default)]
    pub count: i32,
    /// Host-level encryption setting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_at_host: Option<EncryptionAtHost>,
    /// Disk encryption set applied to OS disks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk_encryption_set_id: Option<String>,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// API server configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiserverProfile {
    /// API server visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// API server URL (server-populated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// API server IP (server-populated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

/// Endpoint visibility
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum Visibility {
    /// Reachable from the internet
    Public,
    /// Reachable only from the cluster's virtual network
    Private,
}

/// Ingress configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressProfile {
    /// Ingress name, unique within the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Ingress visibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Ingress IP (server-populated)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip: String,
}

// =============================================================================
// Mutability Table
// =============================================================================
// Fields absent from the table are strictly immutable. Entries exist only
// for fields that opt out of the default: server-populated state is tagged
// "true", ARM-normalized identifiers are tagged "case", and keyed
// collections declare their element tables.

impl ImmutableConstraints for OpenShiftCluster {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(field("systemData").tag("true"))
            .field(field("tags").tag("true"))
            .field(field("identity").tag("true"))
            .field(field("properties").with(properties_constraints()))
    }
}

fn properties_constraints() -> PolicyNode {
    PolicyNode::object()
        .field(field("provisioningState").tag("true"))
        .field(
            field("clusterProfile").with(
                PolicyNode::object()
                    .field(field("pullSecret").tag("true"))
                    .field(field("resourceGroupId").tag("case"))
                    .field(field("oidcIssuer").tag("true")),
            ),
        )
        .field(field("consoleProfile").with(PolicyNode::object().field(field("url").tag("true"))))
        .field(
            field("servicePrincipalProfile").with(
                PolicyNode::object()
                    .field(field("clientId").tag("true"))
                    .field(field("clientSecret").tag("true")),
            ),
        )
        .field(
            field("platformWorkloadIdentityProfile").with(
                PolicyNode::object()
                    .field(field("upgradeableTo").tag("true"))
                    .field(
                        field("platformWorkloadIdentities").with(PolicyNode::map(
                            PolicyNode::object()
                                .field(field("resourceId").tag("case"))
                                .field(field("clientId").tag("true"))
                                .field(field("objectId").tag("true")),
                        )),
                    ),
            ),
        )
        .field(
            field("networkProfile").with(
                PolicyNode::object().field(
                    field("loadBalancerProfile").with(
                        PolicyNode::object()
                            .field(
                                field("managedOutboundIps")
                                    .with(PolicyNode::object().field(field("count").tag("true"))),
                            )
                            .field(field("effectiveOutboundIps").tag("true")),
                    ),
                ),
            ),
        )
        .field(
            field("masterProfile").with(
                PolicyNode::object()
                    .field(field("subnetId").tag("case"))
                    .field(field("diskEncryptionSetId").tag("case")),
            ),
        )
        .field(
            field("workerProfiles").with(PolicyNode::list(
                PolicyNode::object()
                    .field(field("subnetId").tag("case"))
                    .field(field("diskEncryptionSetId").tag("case")),
            )),
        )
        .field(field("workerProfilesStatus").tag("true"))
        .field(
            field("apiserverProfile").with(
                PolicyNode::object()
                    .field(field("url").tag("true"))
                    .field(field("ip").tag("true")),
            ),
        )
        .field(
            field("ingressProfiles")
                .with(PolicyNode::list(PolicyNode::object().field(field("ip").tag("true")))),
        )
}
