use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;
use std::str::FromStr;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::api::networking::v1::Ingress;
use serde::de::DeserializeOwned;

use super::crds::{ExternalSecret, PushSecret};
use super::logging::Logger;
use super::structs::{
    ConfigMapConfig, ExternalSecretConfig, PushSecretConfig, RoutingConfig, SecretConfig, Verify,
    WorkloadConfig,
};
use super::{load_config, ErrorKind, Result, ResultExt};

mod deployment;
pub use self::deployment::{build_workload, build_workload_with};
mod ingress;
pub use self::ingress::build_route;
mod secrets;
pub use self::secrets::{build_config_map, build_secret};
mod sync;
pub use self::sync::{build_external_secret, build_push_secret};

/// Empty lists are left out of the output entirely
pub(crate) fn non_empty<T>(xs: Vec<T>) -> Option<Vec<T>> {
    if xs.is_empty() { None } else { Some(xs) }
}

pub(crate) fn non_empty_map(xs: BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    if xs.is_empty() { None } else { Some(xs) }
}

/// The resource kinds that can be built
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Deployment,
    Ingress,
    Secret,
    ConfigMap,
    PushSecret,
    ExternalSecret,
}

impl Kind {
    pub fn all() -> Vec<Kind> {
        vec![
            Kind::Deployment,
            Kind::Ingress,
            Kind::Secret,
            Kind::ConfigMap,
            Kind::PushSecret,
            Kind::ExternalSecret,
        ]
    }

    /// The lowercase name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Deployment => "deployment",
            Kind::Ingress => "ingress",
            Kind::Secret => "secret",
            Kind::ConfigMap => "configmap",
            Kind::PushSecret => "pushsecret",
            Kind::ExternalSecret => "externalsecret",
        }
    }

    /// Load a config file of this kind and build its manifest
    ///
    /// With `verify` set the config is checked first and nothing is built
    /// when it fails.
    pub fn build(self, path: &Path, verify: bool, log: &Logger) -> Result<Manifest> {
        let mf = match self {
            Kind::Deployment => {
                let cfg: WorkloadConfig = load(self, path, verify)?;
                Manifest::Deployment(build_workload_with(&cfg, log))
            }
            Kind::Ingress => Manifest::Ingress(build_route(&load::<RoutingConfig>(self, path, verify)?)),
            Kind::Secret => Manifest::Secret(build_secret(&load::<SecretConfig>(self, path, verify)?)),
            Kind::ConfigMap => {
                Manifest::ConfigMap(build_config_map(&load::<ConfigMapConfig>(self, path, verify)?))
            }
            Kind::PushSecret => {
                Manifest::PushSecret(build_push_secret(&load::<PushSecretConfig>(self, path, verify)?))
            }
            Kind::ExternalSecret => Manifest::ExternalSecret(build_external_secret(
                &load::<ExternalSecretConfig>(self, path, verify)?,
            )),
        };
        log.debug("Built manifest", &[
            ("kind", &mf.kind() as &dyn fmt::Display),
            ("name", &mf.name() as &dyn fmt::Display),
        ]);
        Ok(mf)
    }

    /// Load a config file of this kind and run its checks
    pub fn verify_file(self, path: &Path) -> Result<()> {
        match self {
            Kind::Deployment => load::<WorkloadConfig>(self, path, true).map(|_| ()),
            Kind::Ingress => load::<RoutingConfig>(self, path, true).map(|_| ()),
            Kind::Secret => load::<SecretConfig>(self, path, true).map(|_| ()),
            Kind::ConfigMap => load::<ConfigMapConfig>(self, path, true).map(|_| ()),
            Kind::PushSecret => load::<PushSecretConfig>(self, path, true).map(|_| ()),
            Kind::ExternalSecret => load::<ExternalSecretConfig>(self, path, true).map(|_| ()),
        }
    }
}

fn load<T>(kind: Kind, path: &Path, verify: bool) -> Result<T>
where
    T: DeserializeOwned + Verify,
{
    let cfg: T = load_config(path)?;
    if verify {
        cfg.verify().chain_err(|| {
            ErrorKind::InvalidConfig(kind.as_str().into(), path.display().to_string())
        })?;
    }
    Ok(cfg)
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Kind {
    type Err = super::Error;

    fn from_str(s: &str) -> Result<Kind> {
        let lower = s.to_lowercase();
        for k in Kind::all() {
            if k.as_str() == lower {
                return Ok(k);
            }
        }
        bail!(ErrorKind::UnknownKind(s.into()))
    }
}

/// One built manifest of any kind
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Manifest {
    Deployment(Deployment),
    Ingress(Ingress),
    Secret(Secret),
    ConfigMap(ConfigMap),
    PushSecret(PushSecret),
    ExternalSecret(ExternalSecret),
}

impl Manifest {
    pub fn kind(&self) -> Kind {
        match self {
            Manifest::Deployment(_) => Kind::Deployment,
            Manifest::Ingress(_) => Kind::Ingress,
            Manifest::Secret(_) => Kind::Secret,
            Manifest::ConfigMap(_) => Kind::ConfigMap,
            Manifest::PushSecret(_) => Kind::PushSecret,
            Manifest::ExternalSecret(_) => Kind::ExternalSecret,
        }
    }

    pub fn name(&self) -> String {
        let name = match self {
            Manifest::Deployment(d) => d.metadata.name.as_ref(),
            Manifest::Ingress(i) => i.metadata.name.as_ref(),
            Manifest::Secret(s) => s.metadata.name.as_ref(),
            Manifest::ConfigMap(c) => c.metadata.name.as_ref(),
            Manifest::PushSecret(p) => Some(&p.metadata.name),
            Manifest::ExternalSecret(e) => Some(&e.metadata.name),
        };
        name.cloned().unwrap_or_default()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Manifest -> stdout wrapper
pub fn manifest_stdout(mf: &Manifest) -> Result<()> {
    let encoded = mf.to_yaml()?;
    io::stdout().write_all(format!("{}\n", encoded).as_bytes())?;
    Ok(())
}

/// Manifest -> file wrapper
pub fn manifest_to_disk(mf: &Manifest, output: &Path) -> Result<()> {
    let encoded = mf.to_yaml()?;
    info!("Writing {} {} to {}", mf.kind(), mf.name(), output.display());
    let mut f = File::create(output)?;
    writeln!(f, "{}", encoded)?;
    debug!("Wrote {} {} to {}: \n{}", mf.kind(), mf.name(), output.display(), encoded);
    Ok(())
}
