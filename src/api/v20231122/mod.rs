//! External API surface, version 2023-11-22 (GA)
//!
//! The stable cluster contract: service-principal clusters only, no workload
//! identity, no server-observed worker status. Each version owns its wire
//! types and its mutability table; nothing here is shared with the preview
//! surface.

mod openshiftcluster;
mod validate;

pub use openshiftcluster::{
    ApiserverProfile, ClusterProfile, ConsoleProfile, EffectiveOutboundIp, EncryptionAtHost,
    FipsValidatedModules, IngressProfile, LoadBalancerProfile, ManagedOutboundIps, MasterProfile,
    NetworkProfile, OpenShiftCluster, OpenShiftClusterProperties, OutboundType, ProvisioningState,
    ServicePrincipalProfile, SystemData, Visibility, WorkerProfile,
};
pub use validate::OpenShiftClusterStaticValidator;

/// API version string served by this module
pub const API_VERSION: &str = "2023-11-22";
