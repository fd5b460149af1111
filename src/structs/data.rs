use std::collections::BTreeMap;

use super::traits::{verify_data_key, verify_dns_label, verify_dns_subdomain};
use super::{Result, Verify};

/// Opaque Secret with string data
///
/// ```yaml
/// name: webapp-secrets
/// namespace: apps
/// data:
///   DATABASE_URL: postgres://...
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SecretConfig {
    pub name: String,
    pub namespace: String,
    /// Copied verbatim into `stringData`
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

/// Plain ConfigMap
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigMapConfig {
    pub name: String,
    pub namespace: String,
    /// Copied verbatim into `data`
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

fn verify_data(name: &str, namespace: &str, data: &BTreeMap<String, String>) -> Result<()> {
    verify_dns_subdomain("Name", name)?;
    verify_dns_label("Namespace", namespace)?;
    for k in data.keys() {
        verify_data_key(k)?;
    }
    Ok(())
}

impl Verify for SecretConfig {
    fn verify(&self) -> Result<()> {
        verify_data(&self.name, &self.namespace, &self.data)
    }
}

impl Verify for ConfigMapConfig {
    fn verify(&self) -> Result<()> {
        verify_data(&self.name, &self.namespace, &self.data)
    }
}
