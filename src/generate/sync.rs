use crate::crds::{
    ExternalSecret, ExternalSecretData, ExternalSecretSpec, ExternalSecretTarget, LocalSecretRef,
    PushRemoteRef, PushSecret, PushSecretData, PushSecretMatch, PushSecretSelector, PushSecretSpec,
    RemoteRef, SecretStoreRef,
};
use crate::structs::{ExternalSecretConfig, PushSecretConfig, SecretStoreKind};

fn store_ref(name: &str, kind: SecretStoreKind) -> SecretStoreRef {
    SecretStoreRef {
        name: name.into(),
        kind: kind.as_str().into(),
    }
}

/// PushSecret sending each key of a local Secret to the store
///
/// Keys keep their order and their name: local key `k` becomes property
/// `k` of the remote `targetSecretName`. There is no renaming.
pub fn build_push_secret(config: &PushSecretConfig) -> PushSecret {
    let data = config
        .keys
        .iter()
        .map(|k| PushSecretData {
            matches: PushSecretMatch {
                secretKey: k.clone(),
                remoteRef: PushRemoteRef {
                    remoteKey: config.targetSecretName.clone(),
                    property: Some(k.clone()),
                },
            },
        })
        .collect();
    let spec = PushSecretSpec {
        refreshInterval: config.refreshInterval.clone(),
        secretStoreRefs: vec![store_ref(&config.storeName, config.storeKind)],
        selector: PushSecretSelector {
            secret: LocalSecretRef {
                name: config.sourceSecretName.clone(),
            },
        },
        data,
    };
    PushSecret::new(&config.name, &config.namespace, spec)
}

/// ExternalSecret pulling remote properties into a local Secret
///
/// One data entry per mapping, sorted by local key.
pub fn build_external_secret(config: &ExternalSecretConfig) -> ExternalSecret {
    let data = config
        .keyMapping
        .iter()
        .map(|(local, remote)| ExternalSecretData {
            secretKey: local.clone(),
            remoteRef: RemoteRef {
                key: config.remoteSecretName.clone(),
                property: Some(remote.clone()),
            },
        })
        .collect();
    let spec = ExternalSecretSpec {
        refreshInterval: config.refreshInterval.clone(),
        secretStoreRef: store_ref(&config.storeName, config.storeKind),
        target: ExternalSecretTarget {
            name: config.targetSecretName.clone(),
            creationPolicy: None,
        },
        data,
    };
    ExternalSecret::new(&config.name, &config.namespace, spec)
}

#[cfg(test)]
mod tests {
    use super::{build_external_secret, build_push_secret};
    use crate::structs::{ExternalSecretConfig, PushSecretConfig, SecretStoreKind};
    use maplit::btreemap;

    fn push(keys: &[&str]) -> PushSecretConfig {
        PushSecretConfig {
            name: "push".into(),
            targetSecretName: "T".into(),
            sourceSecretName: "local".into(),
            namespace: "apps".into(),
            storeName: "vault".into(),
            storeKind: SecretStoreKind::ClusterSecretStore,
            keys: keys.iter().map(|k| k.to_string()).collect(),
            refreshInterval: "10m".into(),
        }
    }

    #[test]
    fn push_entries_follow_keys() {
        let ps = build_push_secret(&push(&["b", "a"]));
        assert_eq!(ps.kind, "PushSecret");
        assert_eq!(ps.metadata.name, "push");
        let spec = ps.spec;
        assert_eq!(spec.refreshInterval, "10m");
        assert_eq!(spec.secretStoreRefs.len(), 1);
        assert_eq!(spec.secretStoreRefs[0].kind, "ClusterSecretStore");
        assert_eq!(spec.selector.secret.name, "local");
        assert_eq!(spec.data.len(), 2);
        // input order, not sorted
        assert_eq!(spec.data[0].matches.secretKey, "b");
        assert_eq!(spec.data[1].matches.secretKey, "a");
        for d in &spec.data {
            assert_eq!(d.matches.remoteRef.remoteKey, "T");
            assert_eq!(d.matches.remoteRef.property.as_ref(), Some(&d.matches.secretKey));
        }
    }

    #[test]
    fn push_without_keys() {
        let ps = build_push_secret(&push(&[]));
        assert!(ps.spec.data.is_empty());
    }

    #[test]
    fn external_entries_follow_mapping() {
        let cfg = ExternalSecretConfig {
            name: "pull".into(),
            namespace: "apps".into(),
            storeName: "vault".into(),
            storeKind: SecretStoreKind::SecretStore,
            targetSecretName: "local".into(),
            remoteSecretName: "remote".into(),
            refreshInterval: "1h".into(),
            keyMapping: btreemap! {
                "local2".to_string() => "remote2".to_string(),
                "local1".to_string() => "remote1".to_string(),
            },
        };
        let es = build_external_secret(&cfg);
        assert_eq!(es.kind, "ExternalSecret");
        let spec = es.spec;
        assert_eq!(spec.secretStoreRef.name, "vault");
        assert_eq!(spec.secretStoreRef.kind, "SecretStore");
        assert_eq!(spec.target.name, "local");
        assert_eq!(spec.data.len(), 2);
        assert_eq!(spec.data[0].secretKey, "local1");
        assert_eq!(spec.data[0].remoteRef.key, "remote");
        assert_eq!(spec.data[0].remoteRef.property.as_deref(), Some("remote1"));
        assert_eq!(spec.data[1].secretKey, "local2");
    }
}
