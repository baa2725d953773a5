//! Static validators, API version 2023-11-22 (GA)

use tracing::debug;

use crate::api::error::CloudError;
use crate::api::validate_resource_identity;
use crate::immutable::validate_delta;

use super::openshiftcluster::OpenShiftCluster;

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
