use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use super::traits::{verify_data_key, verify_dns_label, verify_dns_subdomain};
use super::{Result, Verify};

/// Kind of the referenced secret store
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecretStoreKind {
    SecretStore,
    ClusterSecretStore,
}

impl Default for SecretStoreKind {
    fn default() -> Self {
        SecretStoreKind::SecretStore
    }
}

impl SecretStoreKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SecretStoreKind::SecretStore => "SecretStore",
            SecretStoreKind::ClusterSecretStore => "ClusterSecretStore",
        }
    }
}

fn refresh_interval_default() -> String {
    "1h".into()
}

/// Push keys of a local Secret into the remote store
///
/// Every key is pushed as a property of the same name under `targetSecretName`.
///
/// ```yaml
/// name: webapp-push
/// namespace: apps
/// sourceSecretName: webapp-generated
/// targetSecretName: apps/webapp
/// storeName: vault
/// keys: [username, password]
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PushSecretConfig {
    /// Name of the PushSecret
    pub name: String,
    /// Secret (key) in the remote store
    pub targetSecretName: String,
    /// Local Secret to read from
    pub sourceSecretName: String,
    pub namespace: String,
    /// Secret store to push to
    pub storeName: String,
    #[serde(default)]
    pub storeKind: SecretStoreKind,
    /// Local keys to push, in order
    #[serde(default)]
    pub keys: Vec<String>,
    /// How often to resync, as a duration string
    #[serde(default = "refresh_interval_default")]
    pub refreshInterval: String,
}

/// Pull properties of a remote secret into a local Secret
///
/// ```yaml
/// name: webapp-db
/// namespace: apps
/// storeName: vault
/// storeKind: ClusterSecretStore
/// targetSecretName: webapp-db
/// remoteSecretName: database/prod/webapp
/// keyMapping:
///   DB_USER: username
///   DB_PASS: password
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExternalSecretConfig {
    /// Name of the ExternalSecret
    pub name: String,
    pub namespace: String,
    /// Secret store to pull from
    pub storeName: String,
    #[serde(default)]
    pub storeKind: SecretStoreKind,
    /// Local Secret to create
    pub targetSecretName: String,
    /// Secret (key) in the remote store
    pub remoteSecretName: String,
    /// How often to resync, as a duration string
    #[serde(default = "refresh_interval_default")]
    pub refreshInterval: String,
    /// Local key -> remote property
    #[serde(default)]
    pub keyMapping: BTreeMap<String, String>,
}

fn verify_refresh_interval(s: &str) -> Result<()> {
    let re = Regex::new(r"^([0-9]+(\.[0-9]+)?(ns|us|µs|ms|s|m|h))+$").unwrap();
    if s != "0" && !re.is_match(s) {
        bail!("Refresh interval '{}' is not a duration (e.g. 30s, 1h)", s);
    }
    Ok(())
}

impl Verify for PushSecretConfig {
    fn verify(&self) -> Result<()> {
        verify_dns_subdomain("PushSecret name", &self.name)?;
        verify_dns_label("Namespace", &self.namespace)?;
        verify_dns_subdomain("Source secret", &self.sourceSecretName)?;
        verify_dns_subdomain("Secret store", &self.storeName)?;
        if self.targetSecretName.is_empty() {
            bail!("PushSecret {} has no targetSecretName", self.name);
        }
        if self.keys.is_empty() {
            bail!("PushSecret {} does not push any keys", self.name);
        }
        let mut seen = BTreeSet::new();
        for k in &self.keys {
            verify_data_key(k)?;
            if !seen.insert(k) {
                bail!("Key '{}' is pushed more than once", k);
            }
        }
        verify_refresh_interval(&self.refreshInterval)
    }
}

impl Verify for ExternalSecretConfig {
    fn verify(&self) -> Result<()> {
        verify_dns_subdomain("ExternalSecret name", &self.name)?;
        verify_dns_label("Namespace", &self.namespace)?;
        verify_dns_subdomain("Target secret", &self.targetSecretName)?;
        verify_dns_subdomain("Secret store", &self.storeName)?;
        if self.remoteSecretName.is_empty() {
            bail!("ExternalSecret {} has no remoteSecretName", self.name);
        }
        if self.keyMapping.is_empty() {
            bail!("ExternalSecret {} does not map any keys", self.name);
        }
        for (local, remote) in &self.keyMapping {
            verify_data_key(local)?;
            if remote.is_empty() {
                bail!("Key '{}' maps to an empty remote property", local);
            }
        }
        verify_refresh_interval(&self.refreshInterval)
    }
}
