//! Maintenance external types, API version 2024-08-12-preview
//!
//! MIMO (managed infrastructure maintenance operator) resources: a
//! [`MaintenanceManifest`] is one pending unit of maintenance against a
//! cluster, and a [`MaintenanceSchedule`] describes when maintenance may
//! run. Execution state moves freely; what to run and when it was asked to
//! run are frozen once created.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::immutable::{field, ImmutableConstraints, PolicyNode};

/// One pending unit of maintenance against a cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceManifest {
    /// Fully-qualified resource ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Resource name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resource type
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,

    /// Manifest properties
    #[serde(default)]
    pub properties: MaintenanceManifestProperties,
}

/// Properties of a maintenance manifest
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceManifestProperties {
    /// Cluster the maintenance applies to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_resource_id: String,

    /// Identifier of the maintenance task to execute
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub maintenance_task_id: String,

    /// Execution state (scheduler-driven)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<MaintenanceManifestState>,

    /// Scheduling priority (scheduler-adjustable)
    #[serde(default)]
    pub priority: i32,

    /// Earliest time the task may start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_after: Option<DateTime<Utc>>,

    /// Time after which the task must not start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_before: Option<DateTime<Utc>>,

    /// Outcome description (scheduler-written)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result_text: String,
}

/// Execution state of a maintenance manifest
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum MaintenanceManifestState {
    /// Waiting to be picked up
    Pending,
    /// Currently executing
    InProgress,
    /// Finished successfully
    Completed,
    /// Finished unsuccessfully
    Failed,
    /// Not started before `runBefore`
    TimedOut,
    /// Cancelled by an operator
    Cancelled,
}

impl ImmutableConstraints for MaintenanceManifest {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(
                field("properties").with(
                    PolicyNode::object()
                        .field(field("clusterResourceId").tag("case"))
                        .field(field("state").tag("true"))
                        .field(field("priority").tag("true"))
                        .field(field("resultText").tag("true")),
                ),
            )
    }
}

/// When maintenance may run against a cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSchedule {
    /// Fully-qualified resource ID
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    /// Resource name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resource type
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,

    /// Schedule properties
    #[serde(default)]
    pub properties: MaintenanceScheduleProperties,
}

/// Properties of a maintenance schedule
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceScheduleProperties {
    /// Cluster the schedule applies to
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_resource_id: String,

    /// Whether maintenance is currently paused
    #[serde(default)]
    pub paused: bool,

    /// Named windows in which maintenance may run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenance_windows: Vec<MaintenanceWindow>,

    /// Last time maintenance ran under this schedule (server-written)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
}

/// A named window in which maintenance may run
///
/// Windows form a keyed collection identified by `name`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    /// Window name, unique within the schedule
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Day of week the window opens (`Monday`..`Sunday`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub day_of_week: String,

    /// Opening time of day, UTC (`HH:MM`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_time: String,

    /// Window length in minutes
    #[serde(default)]
    pub duration_minutes: i32,
}

impl ImmutableConstraints for MaintenanceSchedule {
    fn immutable_constraints() -> PolicyNode {
        PolicyNode::object()
            .field(field("id").tag("case"))
            .field(field("name").tag("case"))
            .field(field("type").tag("case"))
            .field(
                field("properties").with(
                    PolicyNode::object()
                        .field(field("clusterResourceId").tag("case"))
                        .field(field("paused").tag("true"))
                        .field(field("lastRun").tag("true"))
                        .field(
                            field("maintenanceWindows").with(PolicyNode::list(
                                PolicyNode::object()
                                    .field(field("dayOfWeek").tag("true"))
                                    .field(field("startTime").tag("true"))
                                    .field(field("durationMinutes").tag("true")),
                            )),
                        ),
                ),
            )
    }
}
