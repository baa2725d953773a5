//! Static validators, API version 2024-08-12-preview
//!
//! One validator per resource, each following the provider's composed
//! contract: check the request shape on the desired resource alone, then -
//! only when a persisted current document exists (an update, never a
//! create) - run the immutable-field engine and surface the first violation
//! in the provider's error envelope.

use tracing::debug;

use crate::api::error::CloudError;
use crate::api::validate_resource_identity;
use crate::immutable::validate_delta;

use super::maintenance::{MaintenanceManifest, MaintenanceSchedule};
use super::openshiftcluster::OpenShiftCluster;
use super::openshiftversion::OpenShiftVersion;
use super::roleset::PlatformWorkloadIdentityRoleSet;

/// Static validator for `OpenShiftCluster` PUT/PATCH requests
#[derive(Debug)]
pub struct OpenShiftClusterStaticValidator {
    /// Resource ID derived from the request URL
    pub resource_id: String,
    /// Resource name derived from the request URL
    pub resource_name: String,
}

impl OpenShiftClusterStaticValidator {
    /// Create a validator for the request addressed by `resource_id`
    pub fn new(resource_id: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            resource_name: resource_name.into(),
        }
    }

    /// Validate a desired cluster against the optionally-present current one
    pub fn static_validate(
        &self,
        desired: &OpenShiftCluster,
        current: Option<&OpenShiftCluster>,
    ) -> Result<(), CloudError> {
        validate_resource_identity(
            &desired.id,
            &desired.name,
            &desired.type_,
            &self.resource_id,
            &self.resource_name,
            crate::CLUSTER_RESOURCE_TYPE,
        )?;
        self.validate_shape(desired)?;

        if let Some(current) = current {
            let desired = self.with_identity_filled(desired);
            if let Err(change) = validate_delta("", &desired, current) {
                debug!(target = %change.target, "rejecting change to immutable cluster property");
                return Err(change.into());
            }
        }
        Ok(())
    }

    /// Copy of `desired` with omitted identity fields filled from the URL
    ///
    /// The identity check accepts empty body `id`/`name`/`type` because the
    /// frontend fills them in from the URL before persisting. The delta
    /// engine must therefore diff the document as it would be persisted, not
    /// as it arrived, or an omitted identity field would register as a
    /// removal.
    fn with_identity_filled(&self, desired: &OpenShiftCluster) -> OpenShiftCluster {
        let mut desired = desired.clone();
        if desired.id.is_empty() {
            desired.id = self.resource_id.clone();
        }
        if desired.name.is_empty() {
            desired.name = self.resource_name.clone();
        }
        if desired.type_.is_empty() {
            desired.type_ = crate::CLUSTER_RESOURCE_TYPE.to_string();
        }
        desired
    }

    fn validate_shape(&self, cluster: &OpenShiftCluster) -> Result<(), CloudError> {
        if cluster.location.is_empty() {
            return Err(CloudError::invalid_parameter(
                "location",
                "The provided location '' is invalid.",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for (i, profile) in cluster.properties.worker_profiles.iter().enumerate() {
            let path = format!("properties.workerProfiles[{i}].name");
            if profile.name.is_empty() {
                return Err(CloudError::invalid_parameter(
                    path,
                    "The provided worker profile name '' is invalid.",
                ));
            }
            // The delta engine indexes worker profiles by name; duplicates
            // must never reach it.
            if !seen.insert(profile.name.as_str()) {
                return Err(CloudError::invalid_parameter(
                    path,
                    format!(
                        "The provided worker profile name '{}' is duplicated.",
                        profile.name
                    ),
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for (i, profile) in cluster.properties.ingress_profiles.iter().enumerate() {
            if profile.name.is_empty() || !seen.insert(profile.name.as_str()) {
                return Err(CloudError::invalid_parameter(
                    format!("properties.ingressProfiles[{i}].name"),
                    format!(
                        "The provided ingress profile name '{}' is invalid.",
                        profile.name
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Static validator for `OpenShiftVersion` PUT requests
#[derive(Debug, Default)]
pub struct OpenShiftVersionStaticValidator;

impl OpenShiftVersionStaticValidator {
    /// Validate a desired version against the optionally-present current one
    pub fn static_validate(
        &self,
        desired: &OpenShiftVersion,
        current: Option<&OpenShiftVersion>,
    ) -> Result<(), CloudError> {
        if desired.properties.version.is_empty() {
            return Err(CloudError::invalid_parameter(
                "properties.version",
                "The provided version '' is invalid.",
            ));
        }
        if let Some(current) = current {
            if let Err(change) = validate_delta("", desired, current) {
                debug!(target = %change.target, "rejecting change to immutable version property");
                return Err(change.into());
            }
        }
        Ok(())
    }
}

/// Static validator for `MaintenanceManifest` PUT requests
#[derive(Debug, Default)]
pub struct MaintenanceManifestStaticValidator;

impl MaintenanceManifestStaticValidator {
    /// Validate a desired manifest against the optionally-present current one
    pub fn static_validate(
        &self,
        desired: &MaintenanceManifest,
        current: Option<&MaintenanceManifest>,
    ) -> Result<(), CloudError> {
        if desired.properties.maintenance_task_id.is_empty() {
            return Err(CloudError::invalid_parameter(
                "properties.maintenanceTaskId",
                "The provided maintenance task ID '' is invalid.",
            ));
        }
        if let (Some(after), Some(before)) =
            (desired.properties.run_after, desired.properties.run_before)
        {
            if before < after {
                return Err(CloudError::invalid_parameter(
                    "properties.runBefore",
                    "The provided runBefore is earlier than runAfter.",
                ));
            }
        }
        if let Some(current) = current {
            if let Err(change) = validate_delta("", desired, current) {
                debug!(target = %change.target, "rejecting change to immutable manifest property");
                return Err(change.into());
            }
        }
        Ok(())
    }
}

/// Static validator for `MaintenanceSchedule` PUT requests
#[derive(Debug, Default)]
pub struct MaintenanceScheduleStaticValidator;

impl MaintenanceScheduleStaticValidator {
    /// Validate a desired schedule against the optionally-present current one
    pub fn static_validate(
        &self,
        desired: &MaintenanceSchedule,
        current: Option<&MaintenanceSchedule>,
    ) -> Result<(), CloudError> {
        let mut seen = std::collections::HashSet::new();
        for (i, window) in desired.properties.maintenance_windows.iter().enumerate() {
            if window.name.is_empty() || !seen.insert(window.name.as_str()) {
                return Err(CloudError::invalid_parameter(
                    format!("properties.maintenanceWindows[{i}].name"),
                    format!(
                        "The provided maintenance window name '{}' is invalid.",
                        window.name
                    ),
                ));
            }
        }
        if let Some(current) = current {
            if let Err(change) = validate_delta("", desired, current) {
                debug!(target = %change.target, "rejecting change to immutable schedule property");
                return Err(change.into());
            }
        }
        Ok(())
    }
}

/// Static validator for `PlatformWorkloadIdentityRoleSet` PUT requests
#[derive(Debug, Default)]
pub struct PlatformWorkloadIdentityRoleSetStaticValidator;

impl PlatformWorkloadIdentityRoleSetStaticValidator {
    /// Validate a desired role set against the optionally-present current one
    pub fn static_validate(
        &self,
        desired: &PlatformWorkloadIdentityRoleSet,
        current: Option<&PlatformWorkloadIdentityRoleSet>,
    ) -> Result<(), CloudError> {
        let mut seen = std::collections::HashSet::new();
        for (i, role) in desired
            .properties
            .platform_workload_identity_roles
            .iter()
            .enumerate()
        {
            if role.operator_name.is_empty() || !seen.insert(role.operator_name.as_str()) {
                return Err(CloudError::invalid_parameter(
                    format!("properties.platformWorkloadIdentityRoles[{i}].operatorName"),
                    format!(
                        "The provided operator name '{}' is invalid.",
                        role.operator_name
                    ),
                ));
            }
        }
        if let Some(current) = current {
            if let Err(change) = validate_delta("", desired, current) {
                debug!(target = %change.target, "rejecting change to immutable role set property");
                return Err(change.into());
            }
        }
        Ok(())
    }
}
