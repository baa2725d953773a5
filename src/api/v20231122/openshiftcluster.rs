//! OpenShiftCluster external type, API version 2023-11-22 (GA)
//!
//! The GA wire shape predates workload identity: clusters authenticate with
//! a service principal only, and there is no `platformWorkloadIdentityProfile`
//! or server-observed worker pool status. The version owns its type
//! definitions outright; it must keep serving this exact shape however the
//! preview surface evolves.

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
    /// Resource type
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
    /// Service principal credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_principal_profile: Option<ServicePrincipalProfile>,
    /// Network configuration
    #[serde(default)]
    pub network_profile: NetworkProfile,
    /// Control-plane node configuration
    #[serde(default)]
    pub master_profile: MasterProfile,
    /// Worker node pool configuration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_profiles: Vec<WorkerProfile>,
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
}

/// Egress routing of cluster traffic
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum OutboundType {
    /// Egress through the public load balancer
    Loadbalancer,
    /// Egress through customer-managed routing
    UserDefinedRouting,
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

/// Worker node pool configuration, keyed by `name`
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

/// Ingress configuration, keyed by `name`
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

impl ImmutableConstraints for OpenShiftCluster {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(field("systemData").tag("true"))
            .field(field("tags").tag("true"))
            .field(
                field("properties").with(
                    PolicyNode::object()
                        .field(field("provisioningState").tag("true"))
                        .field(
                            field("clusterProfile").with(
                                PolicyNode::object()
                                    .field(field("pullSecret").tag("true"))
                                    .field(field("resourceGroupId").tag("case")),
                            ),
                        )
                        .field(
                            field("consoleProfile")
                                .with(PolicyNode::object().field(field("url").tag("true"))),
                        )
                        .field(
                            field("servicePrincipalProfile").with(
                                PolicyNode::object()
                                    .field(field("clientId").tag("true"))
                                    .field(field("clientSecret").tag("true")),
                            ),
                        )
                        .field(
                            field("networkProfile").with(
                                PolicyNode::object().field(
                                    field("loadBalancerProfile").with(
                                        PolicyNode::object()
                                            .field(field("managedOutboundIps").with(
                                                PolicyNode::object()
                                                    .field(field("count").tag("true")),
                                            ))
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
                        .field(
                            field("apiserverProfile").with(
                                PolicyNode::object()
                                    .field(field("url").tag("true"))
                                    .field(field("ip").tag("true")),
                            ),
                        )
                        .field(field("ingressProfiles").with(PolicyNode::list(
                            PolicyNode::object().field(field("ip").tag("true")),
                        ))),
                ),
            )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::immutable::validate_delta;

    pub(crate) fn sample_cluster() -> OpenShiftCluster {
        OpenShiftCluster {
            id: "/subscriptions/sub/resourceGroups/rg/providers/Stratus.OpenShift/openShiftClusters/demo".to_string(),
            name: "demo".to_string(),
            type_: crate::CLUSTER_RESOURCE_TYPE.to_string(),
            location: "eastus".to_string(),
            system_data: None,
            tags: BTreeMap::new(),
            properties: OpenShiftClusterProperties {
                provisioning_state: Some(ProvisioningState::Succeeded),
                cluster_profile: ClusterProfile {
                    pull_secret: String::new(),
                    domain: "demo.eastus.example.io".to_string(),
                    version: "4.13.40".to_string(),
                    resource_group_id: "/subscriptions/sub/resourceGroups/rg-cluster".to_string(),
                    fips_validated_modules: Some(FipsValidatedModules::Disabled),
                },
                console_profile: None,
                service_principal_profile: Some(ServicePrincipalProfile {
                    client_id: "11111111-1111-1111-1111-111111111111".to_string(),
                    client_secret: String::new(),
                }),
                network_profile: NetworkProfile {
                    pod_cidr: "10.128.0.0/14".to_string(),
                    service_cidr: "172.30.0.0/16".to_string(),
                    outbound_type: Some(OutboundType::Loadbalancer),
                    load_balancer_profile: None,
                },
                master_profile: MasterProfile {
                    vm_size: "Standard_D8s_v3".to_string(),
                    subnet_id: "/subscriptions/sub/vnet/master".to_string(),
                    encryption_at_host: None,
                    disk_encryption_set_id: None,
                },
                worker_profiles: vec![WorkerProfile {
                    name: "worker".to_string(),
                    vm_size: "Standard_D4s_v3".to_string(),
                    disk_size_gb: 128,
                    subnet_id: "/subscriptions/sub/vnet/worker".to_string(),
                    count: 3,
                    encryption_at_host: None,
                    disk_encryption_set_id: None,
                }],
                apiserver_profile: ApiserverProfile::default(),
                ingress_profiles: vec![IngressProfile {
                    name: "default".to_string(),
                    visibility: Some(Visibility::Public),
                    ip: String::new(),
                }],
            },
        }
    }

    /// Story: The GA table enforces the same core guarantees as preview
    #[test]
    fn story_ga_core_fields_stay_frozen() {
        let current = sample_cluster();

        let mut desired = sample_cluster();
        desired.location = "westus".to_string();
        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "location");

        let mut desired = sample_cluster();
        desired.properties.cluster_profile.domain = "other.example.io".to_string();
        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "properties.clusterProfile.domain");
    }

    /// Story: A field the table never declares is immutable by default
    #[test]
    fn story_undeclared_fields_are_protected_by_default() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.properties.cluster_profile.fips_validated_modules =
            Some(FipsValidatedModules::Enabled);

        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(
            change.target,
            "properties.clusterProfile.fipsValidatedModules"
        );
    }

    /// Story: Worker pools scale nowhere in GA either
    #[test]
    fn story_ga_worker_count_is_immutable() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.properties.worker_profiles[0].count = 5;

        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "properties.workerProfiles['worker'].count");
    }
}
