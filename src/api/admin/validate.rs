//! Static validator for the admin PATCH surface

use tracing::debug;

use crate::api::error::CloudError;
use crate::immutable::validate_delta;

use super::openshiftcluster::{MaintenanceTask, OpenShiftCluster, ProvisioningState};

/// Static validator for admin `OpenShiftCluster` PATCH requests
///
/// Admin requests always target an existing cluster, so unlike the customer
/// surface the current document is mandatory and the delta engine always
/// runs.
#[derive(Debug, Default)]
pub struct OpenShiftClusterStaticValidator;

impl OpenShiftClusterStaticValidator {
    /// Validate a patched cluster document against the persisted one
    pub fn static_validate(
        &self,
        desired: &OpenShiftCluster,
        current: &OpenShiftCluster,
    ) -> Result<(), CloudError> {
        self.validate_shape(desired)?;

        if let Err(change) = validate_delta("", desired, current) {
            debug!(target = %change.target, "rejecting admin change to immutable cluster property");
            return Err(change.into());
        }
        Ok(())
    }

    fn validate_shape(&self, cluster: &OpenShiftCluster) -> Result<(), CloudError> {
        // Forcing a state is only meaningful for terminal states; in-flight
        // states belong to the backend.
        if let Some(state) = cluster.properties.provisioning_state {
            match state {
                ProvisioningState::Succeeded
                | ProvisioningState::Failed
                | ProvisioningState::AdminUpdating => {}
                _ => {
                    return Err(CloudError::invalid_parameter(
                        "properties.provisioningState",
                        "The provided provisioning state is invalid.",
                    ));
                }
            }
        }
        if cluster.properties.provisioning_state == Some(ProvisioningState::AdminUpdating)
            && cluster.properties.maintenance_task.is_none()
        {
            return Err(CloudError::invalid_parameter(
                "properties.maintenanceTask",
                "A maintenance task is required when setting the state to AdminUpdating.",
            ));
        }
        if cluster.properties.maintenance_task == Some(MaintenanceTask::None)
            && cluster.properties.provisioning_state == Some(ProvisioningState::AdminUpdating)
        {
            return Err(CloudError::invalid_parameter(
                "properties.maintenanceTask",
                "The maintenance task 'None' cannot drive an admin update.",
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for (i, profile) in cluster.properties.worker_profiles.iter().enumerate() {
            if profile.name.is_empty() || !seen.insert(profile.name.as_str()) {
                return Err(CloudError::invalid_parameter(
                    format!("properties.workerProfiles[{i}].name"),
                    format!(
                        "The provided worker profile name '{}' is invalid.",
                        profile.name
                    ),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::admin::openshiftcluster::tests::sample_cluster;
    use crate::api::error::codes;

    /// Story: A routine admin update passes shape and delta checks
    #[test]
    fn story_admin_update_passes() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.properties.provisioning_state = Some(ProvisioningState::AdminUpdating);
        desired.properties.maintenance_task = Some(MaintenanceTask::Everything);

        assert!(OpenShiftClusterStaticValidator
            .static_validate(&desired, &current)
            .is_ok());
    }

    /// Story: Forcing an in-flight state is rejected before the delta engine
    #[test]
    fn story_in_flight_states_cannot_be_forced() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.properties.provisioning_state = Some(ProvisioningState::Deleting);

        let err = OpenShiftClusterStaticValidator
            .static_validate(&desired, &current)
            .unwrap_err();
        assert_eq!(err.body.code, codes::INVALID_PARAMETER);
        assert_eq!(err.body.target, "properties.provisioningState");
    }

    /// Story: AdminUpdating without a task is an incomplete request
    #[test]
    fn story_admin_updating_requires_a_task() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.properties.provisioning_state = Some(ProvisioningState::AdminUpdating);
        desired.properties.maintenance_task = None;

        let err = OpenShiftClusterStaticValidator
            .static_validate(&desired, &current)
            .unwrap_err();
        assert_eq!(err.body.target, "properties.maintenanceTask");
    }

    /// Story: The delta engine still guards the admin surface
    #[test]
    fn story_admin_patch_cannot_move_the_cluster() {
        let current = sample_cluster();
        let mut desired = sample_cluster();
        desired.location = "westus".to_string();

        let err = OpenShiftClusterStaticValidator
            .static_validate(&desired, &current)
            .unwrap_err();
        assert_eq!(err.status_code, 400);
        assert_eq!(err.body.code, codes::PROPERTY_CHANGE_NOT_ALLOWED);
        assert_eq!(err.body.target, "location");
    }
}
