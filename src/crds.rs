use std::collections::BTreeMap;

const DOMAIN: &str = "external-secrets.io";
const PUSHSECRET_VERSION: &str = "v1alpha1";
const EXTERNALSECRET_VERSION: &str = "v1beta1";
const PUSHSECRET_KIND: &str = "PushSecret";
const EXTERNALSECRET_KIND: &str = "ExternalSecret";

/// Basic CRD wrapper struct
///
/// Same top level shape as every kube object, with our own spec.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Crd<T> {
    pub apiVersion: String,
    pub kind: String,
    pub metadata: Metadata,
    pub spec: T,
}

/// Namespaced object metadata
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    pub name: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// external-secrets PushSecret
pub type PushSecret = Crd<PushSecretSpec>;
/// external-secrets ExternalSecret
pub type ExternalSecret = Crd<ExternalSecretSpec>;

impl Crd<PushSecretSpec> {
    pub fn new(name: &str, namespace: &str, spec: PushSecretSpec) -> Self {
        Crd {
            apiVersion: format!("{}/{}", DOMAIN, PUSHSECRET_VERSION),
            kind: PUSHSECRET_KIND.into(),
            metadata: Metadata {
                name: name.into(),
                namespace: namespace.into(),
                ..Metadata::default()
            },
            spec,
        }
    }
}

impl Crd<ExternalSecretSpec> {
    pub fn new(name: &str, namespace: &str, spec: ExternalSecretSpec) -> Self {
        Crd {
            apiVersion: format!("{}/{}", DOMAIN, EXTERNALSECRET_VERSION),
            kind: EXTERNALSECRET_KIND.into(),
            metadata: Metadata {
                name: name.into(),
                namespace: namespace.into(),
                ..Metadata::default()
            },
            spec,
        }
    }
}

/// Reference to a SecretStore or ClusterSecretStore
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SecretStoreRef {
    pub name: String,
    pub kind: String,
}

// PushSecret

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PushSecretSpec {
    /// Resync interval (e.g. "1h")
    pub refreshInterval: String,
    /// Stores to push into
    pub secretStoreRefs: Vec<SecretStoreRef>,
    /// Local secret to push from
    pub selector: PushSecretSelector,
    /// One entry per pushed key
    #[serde(default)]
    pub data: Vec<PushSecretData>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PushSecretSelector {
    pub secret: LocalSecretRef,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LocalSecretRef {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PushSecretData {
    #[serde(rename = "match")]
    pub matches: PushSecretMatch,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PushSecretMatch {
    /// Key in the local secret
    pub secretKey: String,
    pub remoteRef: PushRemoteRef,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PushRemoteRef {
    /// Secret in the remote store
    pub remoteKey: String,
    /// Property within the remote secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

// ExternalSecret

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExternalSecretSpec {
    /// Resync interval (e.g. "1h")
    pub refreshInterval: String,
    pub secretStoreRef: SecretStoreRef,
    /// Local secret to create
    pub target: ExternalSecretTarget,
    /// One entry per mapped key
    #[serde(default)]
    pub data: Vec<ExternalSecretData>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExternalSecretTarget {
    pub name: String,
    /// Owner, Orphan, Merge or None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creationPolicy: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExternalSecretData {
    /// Key in the local secret
    pub secretKey: String,
    pub remoteRef: RemoteRef,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RemoteRef {
    /// Secret in the remote store
    pub key: String,
    /// Property within the remote secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}
