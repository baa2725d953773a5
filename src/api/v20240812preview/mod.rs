//! External API, version 2024-08-12-preview
//!
//! The preview wire version of the provider's external API. Adds workload
//! identity support on clusters and exposes the OpenShift version,
//! maintenance (MIMO), and platform workload identity role set resources.

mod maintenance;
mod openshiftcluster;
mod openshiftversion;
mod roleset;
mod validate;

pub use maintenance::{
    MaintenanceManifest, MaintenanceManifestProperties, MaintenanceManifestState,
    MaintenanceSchedule, MaintenanceScheduleProperties, MaintenanceWindow,
};
pub use openshiftcluster::{
    ApiserverProfile, ClusterProfile, ConsoleProfile, EffectiveOutboundIp, EncryptionAtHost,
    FipsValidatedModules, IngressProfile, LoadBalancerProfile, ManagedOutboundIps,
    ManagedServiceIdentity, MasterProfile, NetworkProfile, OpenShiftCluster,
    OpenShiftClusterProperties, OutboundType, PlatformWorkloadIdentity,
    PlatformWorkloadIdentityProfile, PreconfiguredNsg, ProvisioningState, ServicePrincipalProfile,
    SystemData, UserAssignedIdentity, Visibility, WorkerProfile,
};
pub use openshiftversion::{OpenShiftVersion, OpenShiftVersionProperties};
pub use roleset::{
    PlatformWorkloadIdentityRole, PlatformWorkloadIdentityRoleSet,
    PlatformWorkloadIdentityRoleSetProperties,
};
pub use validate::{
    MaintenanceManifestStaticValidator, MaintenanceScheduleStaticValidator,
    OpenShiftClusterStaticValidator, OpenShiftVersionStaticValidator,
    PlatformWorkloadIdentityRoleSetStaticValidator,
};

/// Wire identifier of this API version
pub const API_VERSION: &str = "2024-08-12-preview";
