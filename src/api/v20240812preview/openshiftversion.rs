//! OpenShiftVersion external type, API version 2024-08-12-preview
//!
//! An installable OpenShift version offered by the provider in a region.
//! The version string identifies the resource and is immutable; rollout
//! state and pull specs are operator-adjustable.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::immutable::{field, ImmutableConstraints, PolicyNode};

/// An installable OpenShift version
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftVersion {
    /// Fully-qualified resource ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Resource name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resource type
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,

    /// Version properties
    #[serde(default)]
    pub properties: OpenShiftVersionProperties,
}

/// Properties of an installable OpenShift version
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OpenShiftVersionProperties {
    /// The version string (e.g. `4.14.16`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Whether the version is offered for new installs
    #[serde(default)]
    pub enabled: bool,

    /// Whether this is the default version for new installs
    #[serde(default)]
    pub default: bool,

    /// Pull spec of the OpenShift release payload
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub openshift_pullspec: String,

    /// Pull spec of the installer image
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub installer_pullspec: String,
}

impl ImmutableConstraints for OpenShiftVersion {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(
                field("properties").with(
                    PolicyNode::object()
                        .field(field("enabled").tag("true"))
                        .field(field("default").tag("true"))
                        .field(field("openshiftPullspec").tag("true"))
                        .field(field("installerPullspec").tag("true")),
                ),
            )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::immutable::validate_delta;

    pub(crate) fn sample_version() -> OpenShiftVersion {
        OpenShiftVersion {
            id: "/providers/Stratus.OpenShift/locations/eastus/openShiftVersions/4.14.16"
                .to_string(),
            name: "4.14.16".to_string(),
            type_: "Stratus.OpenShift/locations/openShiftVersions".to_string(),
            properties: OpenShiftVersionProperties {
                version: "4.14.16".to_string(),
                enabled: true,
                default: false,
                openshift_pullspec: "quay.io/openshift-release-dev/ocp-release@sha256:aaaa"
                    .to_string(),
                installer_pullspec: "example.azurecr.io/installer:4.14".to_string(),
            },
        }
    }

    /// Story: Operators may disable a version and repoint its pull specs
    #[test]
    fn story_rollout_state_and_pullspecs_are_mutable() {
        let current = sample_version();
        let mut desired = sample_version();
        desired.properties.enabled = false;
        desired.properties.installer_pullspec = "example.azurecr.io/installer:4.14-hotfix".to_string();

        assert_eq!(validate_delta("", &desired, &current), Ok(()));
    }

    /// Story: The version string identifies the resource and cannot change
    #[test]
    fn story_version_string_is_immutable() {
        let current = sample_version();
        let mut desired = sample_version();
        desired.properties.version = "4.14.17".to_string();

        let change = validate_delta("", &desired, &current).unwrap_err();
        assert_eq!(change.target, "properties.version");
        assert_eq!(
            change.message(),
            "Changing property 'properties.version' is not allowed."
        );
    }
}
