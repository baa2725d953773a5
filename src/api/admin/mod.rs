//! Operator-facing admin API surface
//!
//! Served off ARM on the geneva-actions path. The admin cluster document is
//! not a versioned customer contract: it exposes internal state (infra ID,
//! private endpoint IPs, maintenance plumbing) and a far wider set of
//! mutable fields, because admin PATCH exists precisely to repair clusters
//! the customer surface will not touch.

mod openshiftcluster;
mod validate;

pub use openshiftcluster::{
    ClusterProfile, FeatureProfile, MaintenanceState, MaintenanceTask, MasterProfile,
    NetworkProfile, OpenShiftCluster, OpenShiftClusterProperties, ProvisioningState, WorkerProfile,
};
pub use validate::OpenShiftClusterStaticValidator;
