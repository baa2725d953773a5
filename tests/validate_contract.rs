//! End-to-end tests for the request validation contract
//!
//! These tests exercise the crate the way the frontend does: build external
//! documents, run them through a static validator, and assert on the error
//! envelope bytes a client would receive. No network or server is involved,
//! so the suite runs with a plain `cargo test --test validate_contract`.

use stratus::api::error::codes;
use stratus::api::v20240812preview as preview;
use stratus::api::CloudError;
use stratus::immutable::validate_delta;

fn sample_cluster() -> preview::OpenShiftCluster {
    preview::OpenShiftCluster {
        id: "/subscriptions/sub/resourceGroups/rg/providers/Stratus.OpenShift/openShiftClusters/demo".to_string(),
        name: "demo".to_string(),
        type_: stratus::CLUSTER_RESOURCE_TYPE.to_string(),
        location: "eastus".to_string(),
        properties: preview::OpenShiftClusterProperties {
            provisioning_state: Some(preview::ProvisioningState::Succeeded),
            master_profile: preview::MasterProfile {
                vm_size: "Standard_D8s_v3".to_string(),
                subnet_id: "/subscriptions/sub/vnet/master".to_string(),
                ..Default::default()
            },
            worker_profiles: vec![preview::WorkerProfile {
                name: "worker".to_string(),
                vm_size: "Standard_D4s_v3".to_string(),
                subnet_id: "/subscriptions/sub/vnet/worker".to_string(),
                count: 3,
                ..Default::default()
            }],
            ..Default::default()
        },
        ..Default::default()
    }
}

fn validator_for(cluster: &preview::OpenShiftCluster) -> preview::OpenShiftClusterStaticValidator {
    preview::OpenShiftClusterStaticValidator::new(cluster.id.clone(), cluster.name.clone())
}

// =========================================================================
// Immutability Contract Stories
// =========================================================================

/// Story: Moving a cluster to another region is refused
#[test]
fn story_location_change_is_refused() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.location = "westus".to_string();

    let err = validator_for(&current)
        .static_validate(&desired, Some(&current))
        .unwrap_err();
    assert_eq!(err.body.code, codes::PROPERTY_CHANGE_NOT_ALLOWED);
    assert_eq!(err.body.target, "location");

    // Region strings are compared byte for byte; a casing drift is a change.
    let mut desired = sample_cluster();
    desired.location = "EastUS".to_string();
    let err = validator_for(&current)
        .static_validate(&desired, Some(&current))
        .unwrap_err();
    assert_eq!(err.body.target, "location");
}

/// Story: Nested immutable fields report their full dotted path
#[test]
fn story_nested_paths_are_dotted() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.properties.master_profile.vm_size = "Standard_D16s_v3".to_string();

    let err = validator_for(&current)
        .static_validate(&desired, Some(&current))
        .unwrap_err();
    assert_eq!(err.body.target, "properties.masterProfile.vmSize");
    assert_eq!(
        err.body.message,
        "Changing property 'properties.masterProfile.vmSize' is not allowed."
    );
}

/// Story: Named collection entries report their key, not their index
#[test]
fn story_keyed_entries_report_their_key() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.properties.worker_profiles[0].count = 4;

    let err = validator_for(&current)
        .static_validate(&desired, Some(&current))
        .unwrap_err();
    assert_eq!(err.body.target, "properties.workerProfiles['worker'].count");
}

/// Story: An update body omitting id/name/type is not rejected
///
/// Clients commonly leave identity fields out of PUT bodies and let the
/// frontend fill them from the URL; an otherwise-identical update must
/// pass rather than flag the omitted fields as changes.
#[test]
fn story_omitted_identity_on_update_passes() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.id = String::new();
    desired.name = String::new();
    desired.type_ = String::new();

    assert!(validator_for(&current)
        .static_validate(&desired, Some(&current))
        .is_ok());
}

/// Story: Adding a worker pool is not a change to any existing one
#[test]
fn story_pool_addition_passes() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.properties.worker_profiles.push(preview::WorkerProfile {
        name: "worker2".to_string(),
        vm_size: "Standard_D4s_v3".to_string(),
        subnet_id: "/subscriptions/sub/vnet/worker".to_string(),
        count: 3,
        ..Default::default()
    });

    assert!(validator_for(&current)
        .static_validate(&desired, Some(&current))
        .is_ok());
}

// =========================================================================
// Envelope Stories
// =========================================================================

/// Story: The wire envelope is byte-stable
///
/// Client tooling string-matches on this body; its shape and field order are
/// part of the contract.
#[test]
fn story_envelope_bytes_are_stable() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.properties.master_profile.vm_size = "Standard_D16s_v3".to_string();

    let err = validator_for(&current)
        .static_validate(&desired, Some(&current))
        .unwrap_err();
    assert_eq!(err.status_code, 400);
    assert_eq!(
        serde_json::to_string(&err).unwrap(),
        concat!(
            r#"{"error":{"code":"PropertyChangeNotAllowed","#,
            r#""message":"Changing property 'properties.masterProfile.vmSize' is not allowed.","#,
            r#""target":"properties.masterProfile.vmSize"}}"#,
        )
    );
}

/// Story: The status code rides alongside the body, never inside it
#[test]
fn story_status_code_is_not_serialized() {
    let err = CloudError::invalid_parameter("location", "The provided location '' is invalid.");
    let body = serde_json::to_string(&err).unwrap();
    assert!(!body.contains("400"));
    assert!(body.starts_with(r#"{"error":{"#));
}

// =========================================================================
// Engine Stories (through the public seam)
// =========================================================================

/// Story: A document deserialized from client YAML validates like any other
///
/// The engine works on what serde sees, so documents arriving through any
/// serde front end (JSON bodies, YAML fixtures) are treated identically.
#[test]
fn story_documents_from_yaml_fixtures_validate() {
    let current = sample_cluster();
    let yaml = serde_yaml::to_string(&current).unwrap();
    let mut desired: preview::OpenShiftCluster = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(validate_delta("", &desired, &current), Ok(()));

    desired.properties.network_profile.pod_cidr = "10.0.0.0/14".to_string();
    let change = validate_delta("", &desired, &current).unwrap_err();
    assert_eq!(change.target, "properties.networkProfile.podCidr");
}

/// Story: Callers may scope violations under a path prefix
#[test]
fn story_prefix_scopes_reported_paths() {
    let current = sample_cluster();
    let mut desired = sample_cluster();
    desired.properties.master_profile.vm_size = "Standard_D16s_v3".to_string();

    let change = validate_delta("document", &desired, &current).unwrap_err();
    assert_eq!(change.target, "document.properties.masterProfile.vmSize");
}
