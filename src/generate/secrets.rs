use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::structs::{ConfigMapConfig, SecretConfig};

fn metadata(name: &str, namespace: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.into()),
        namespace: Some(namespace.into()),
        ..ObjectMeta::default()
    }
}

/// Opaque Secret with the data as `stringData`
///
/// Values are passed as is; kube does the base64 encoding on write.
pub fn build_secret(config: &SecretConfig) -> Secret {
    Secret {
        metadata: metadata(&config.name, &config.namespace),
        type_: Some("Opaque".into()),
        string_data: Some(config.data.clone()),
        ..Secret::default()
    }
}

/// ConfigMap with the data copied verbatim
pub fn build_config_map(config: &ConfigMapConfig) -> ConfigMap {
    ConfigMap {
        metadata: metadata(&config.name, &config.namespace),
        data: Some(config.data.clone()),
        ..ConfigMap::default()
    }
}
