//! OpenShiftCluster admin type
//!
//! The operator-facing view of a cluster, served from the admin endpoint
//! rather than through ARM. Admin PATCH exposes repair levers the customer
//! surface keeps frozen: provisioning state can be forced, maintenance state
//! toggled, and most infrastructure fields rewritten in place. The mutability
//! table is correspondingly wide; only the resource identity and a handful of
//! install-time facts stay immutable.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::immutable::{field, ImmutableConstraints, PolicyNode};

/// A managed OpenShift cluster as seen by operators
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
    /// Resource tags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    /// Cluster properties
    #[serde(default)]
    pub properties: OpenShiftClusterProperties,
}

/// Cluster properties, admin view
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftClusterProperties {
    /// Provisioning state, writable by operators to force reconciliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_state: Option<ProvisioningState>,
    /// Provisioning state before the current operation began
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_provisioning_state: Option<ProvisioningState>,
    /// Provisioning state recorded at the last failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_provisioning_state: Option<ProvisioningState>,
    /// Error recorded by the last admin update
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_admin_update_error: String,
    /// Maintenance task to run on the next admin update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_task: Option<MaintenanceTask>,
    /// Current maintenance state of the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_state: Option<MaintenanceState>,
    /// Cluster-wide configuration
    #[serde(default)]
    pub cluster_profile: ClusterProfile,
    /// Network configuration
    #[serde(default)]
    pub network_profile: NetworkProfile,
    /// Control-plane node configuration
    #[serde(default)]
    pub master_profile: MasterProfile,
    /// Worker node pool configuration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_profiles: Vec<WorkerProfile>,
    /// Worker pools as observed in the cluster (server-populated)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub worker_profiles_status: Vec<WorkerProfile>,
    /// Infra ID assigned by the installer
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub infra_id: String,
    /// Storage suffix assigned at install time
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub storage_suffix: String,
    /// Feature profile toggles
    #[serde(default)]
    pub feature_profile: FeatureProfile,
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

/// Maintenance task selectable through admin PATCH
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum MaintenanceTask {
    /// Run a full admin update
    Everything,
    /// Reconcile the service-side operator only
    Operator,
    /// Renew cluster certificates
    RenewCerts,
    /// Flag pending maintenance without acting
    PendingMaintenance,
    /// Clear a pending-maintenance flag
    None,
}

/// Maintenance state of a cluster
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum MaintenanceState {
    /// No maintenance planned or running
    None,
    /// Maintenance scheduled, not yet started
    Pending,
    /// Planned maintenance in progress
    Planned,
    /// Unplanned maintenance in progress
    Unplanned,
    /// A customer action is needed to finish maintenance
    CustomerActionNeeded,
}

/// Cluster-wide configuration, admin view
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterProfile {
    /// DNS domain of the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// OpenShift version installed in the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Managed resource group the cluster nodes live in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_group_id: String,
    /// OIDC issuer URL for workload identity clusters
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub oidc_issuer: String,
}

/// Network configuration, admin view
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    /// CIDR block for pods
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pod_cidr: String,
    /// CIDR block for services
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_cidr: String,
    /// Private endpoint IP used by the RP to reach the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub apiserver_private_endpoint_ip: String,
    /// Gateways the cluster egresses through
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gateway_private_endpoint_ips: Vec<String>,
}

/// Control-plane node configuration, admin view
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MasterProfile {
    /// VM size of control-plane nodes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vm_size: String,
    /// Subnet the control-plane nodes are placed in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
}

/// Worker node pool configuration, admin view
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    /// Pool name, unique within the cluster
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// VM size of the pool's nodes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub vm_size: String,
    /// Subnet the pool's nodes are placed in
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet_id: String,
    /// Number of nodes in the pool
    #[serde(default)]
    pub count: i32,
}

/// Feature toggles operators may flip per cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProfile {
    /// Suppress periodic reconciliation of the service-side operator
    #[serde(default)]
    pub disable_operator: bool,
}

impl ImmutableConstraints for OpenShiftCluster {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(field("tags").tag("true"))
            .field(
                field("properties").with(
                    PolicyNode::object()
                        .field(field("provisioningState").tag("true"))
                        .field(field("lastProvisioningState").tag("true"))
                        .field(field("failedProvisioningState").tag("true"))
                        .field(field("lastAdminUpdateError").tag("true"))
                        .field(field("maintenanceTask").tag("true"))
                        .field(field("maintenanceState").tag("true"))
                        .field(
                            field("clusterProfile").with(
                                PolicyNode::object()
                                    .field(field("version").tag("true"))
                                    .field(field("resourceGroupId").tag("case"))
                                    .field(field("oidcIssuer").tag("true")),
                            ),
                        )
                        .field(
                            field("networkProfile").with(
                                PolicyNode::object()
                                    .field(field("apiserverPrivateEndpointIp").tag("true"))
                                    .field(field("gatewayPrivateEndpointIps").tag("true")),
                            ),
                        )
                        .field(
                            field("masterProfile").with(
                                PolicyNode::object()
                                    .field(field("vmSize").tag("true"))
                                    .field(field("subnetId").tag("case")),
                            ),
                        )
                        .field(
                            field("workerProfiles").with(PolicyNode::list(
                                PolicyNode::object()
                                    .field(field("vmSize").tag("true"))
                                    .field(field("count").tag("true"))
                                    .field(field("subnetId").tag("case")),
                            )),
                        )
                        .field(field("workerProfilesStatus").tag("true"))
                        .field(field("featureProfile").tag("true")),
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
            tags: BTreeMap::new(),
            properties: OpenShiftClusterProperties {
                provisioning_state: Some(ProvisioningState::Succeeded),
                last_provisioning_state: None,
                failed_provisioning_state: None,
                last_admin_update_error: String::new(),
                maintenance_task: None,
                maintenance_state: Some(MaintenanceState::None),
                cluster_profile: ClusterProfile {
                    domain: "demo.eastus.example.io".to_string(),
                    version: "4.14.16".to_string(),
                    resource_group_id: "/subscriptions/sub/resourceGroups/rg-cluster".to_string(),
                    oidc_issuer: String::new(),
                },
                network_profile: NetworkProfile {
                    pod_cidr: "10.128.0.0/14".to_string(),
                    service_cidr: "172.30.0.0/16".to_string(),
                    apiserver_private_endpoint_ip: "10.0.4.4".to_string(),
                    gateway_private_endpoint_ips: vec!["10.0.8.4".to_string()],
                },
                master_profile: MasterProfile {
                    vm_size: "Standard_D8s_v3".to_string(),
                    subnet_id: "/subscriptions/sub/vnet/master".to_string(),
                },
                worker_profiles: vec![WorkerProfile {
                    name: "worker".to_string(),
                    vm_size: "Standard_D4s_v3".to_string(),
                    subnet_id: "/subscriptions/sub/vnet/worker".to_string(),
                    count: 3,
                }],
                worker_profiles_status: Vec::new(),
                infra_id: "demo-x7k2p".to_string(),
                storage_suffix: "x7k2p".to_string(),
                feature_profile: FeatureProfile::default(),
            },
        }
    }

    /// Story: Operators may force provisioning state and queue maintenance
    #[test]
    fn story_admin_patch_unlocks_repair_levers() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.properties.provisioning_state = Some(ProvisioningState::AdminUpdating);
        desired.properties.maintenance_task = Some(MaintenanceTask::Everything);
        desired.properties.worker_profiles[0].count = 9;
        desired.properties.feature_profile.disable_operator = true;

        assert_eq!(validate_delta("", &desired, &current), Ok(()));
    }

    /// Story: Even operators cannot rewrite install-time facts
    #[test]
    fn story_install_time_facts_stay_frozen() {
        let current = sample_cluster();

        let mut desired = sample_cluster();
        desired.properties.infra_id = "demo-aaaaa".to_string();
        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "properties.infraId");

        let mut desired = sample_cluster();
        desired.properties.cluster_profile.domain = "other.example.io".to_string();
        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "properties.clusterProfile.domain");
    }

    /// Story: Identity fields tolerate ARM's case normalization, nothing more
    #[test]
    fn story_identity_fields_compare_case_insensitively() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.id = desired.id.to_uppercase();

        assert_eq!(validate_delta("", &desired, &current), Ok(()));

        desired.id = format!("{}-other", current.id);
        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "id");
    }
}
