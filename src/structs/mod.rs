#![allow(non_snake_case)]

/// Allow normal error handling from structs
pub use super::{ErrorKind, Result, ResultExt};

// Inputs for the builders. One file per resource kind, plus the two
// value types that the workload builder shares.

/// Http health check descriptors
pub mod probes;
pub use self::probes::ProbeSpec;

/// Kubernetes resource quantities
pub mod resources;
pub use self::resources::{CpuMilli, MemoryMi, Sizing};

/// Deployments
pub mod workload;
pub use self::workload::{PullPolicy, WorkloadConfig};

/// Ingresses
pub mod routing;
pub use self::routing::{BackendPort, RoutingConfig};

/// Plain secrets and configmaps
pub mod data;
pub use self::data::{ConfigMapConfig, SecretConfig};

/// PushSecret and ExternalSecret inputs
pub mod secretsync;
pub use self::secretsync::{ExternalSecretConfig, PushSecretConfig, SecretStoreKind};

/// Traits that the structs can implement
pub mod traits;
pub use self::traits::Verify;
