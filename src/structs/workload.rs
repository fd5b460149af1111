use std::collections::{BTreeMap, BTreeSet};

use k8s_openapi::api::core::v1::{Volume, VolumeMount};

use super::traits::verify_dns_label;
use super::{ProbeSpec, Result, ResultExt, Sizing, Verify};

/// Image pull policy for the main container
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullPolicy {
    Always,
    IfNotPresent,
    Never,
}

impl Default for PullPolicy {
    fn default() -> Self {
        PullPolicy::IfNotPresent
    }
}

impl PullPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            PullPolicy::Always => "Always",
            PullPolicy::IfNotPresent => "IfNotPresent",
            PullPolicy::Never => "Never",
        }
    }
}

/// Everything needed to wire up a single container Deployment
///
/// Volumes and mounts are straight kubernetes structs, linked by name.
/// Every mount must name a volume in `volumes`, and `matchLabels` must be
/// a subset of `podLabels`. Neither is checked when building, see `Verify`.
///
/// ```yaml
/// name: webapp
/// namespace: apps
/// containerName: webapp
/// image: quay.io/org/webapp:1.2.0
/// portName: http
/// containerPort: 8080
/// imagePullSecretName: registry-creds
/// env:
///   LOG_LEVEL: info
/// envFromConfigMapNames: [webapp-config]
/// envFromSecretNames: [webapp-secrets]
/// volumes:
/// - name: config
///   configMap:
///     name: webapp-files
/// volumeMounts:
/// - name: config
///   mountPath: /etc/webapp
/// resources:
///   cpuRequestMilli: 250
///   cpuLimitMilli: 500
///   memoryRequestMi: 128
///   memoryLimitMi: 256
/// replicas: 2
/// podLabels:
///   app: webapp
///   tier: web
/// matchLabels:
///   app: webapp
/// livenessProbe:
///   httpPath: /health
///   httpPort: 8080
/// readinessProbe:
///   httpPath: /ready
///   httpPort: 8080
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkloadConfig {
    /// Name of the Deployment
    pub name: String,
    /// Namespace of the Deployment
    pub namespace: String,

    /// Name of the main container
    pub containerName: String,
    /// Image reference including tag
    pub image: String,
    /// When to pull the image
    #[serde(default)]
    pub imagePullPolicy: PullPolicy,
    /// Docker registry secret to pull the image with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagePullSecretName: Option<String>,

    /// Name of the container port
    pub portName: String,
    /// Container port number
    pub containerPort: i32,

    /// Pod volumes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    /// Mounts into the main container, referencing `volumes` by name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumeMounts: Vec<VolumeMount>,

    /// Plain environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    /// ConfigMaps to import wholesale as environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envFromConfigMapNames: Vec<String>,
    /// Secrets to import wholesale as environment variables
    ///
    /// These are applied after the configmaps and win on key collisions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envFromSecretNames: Vec<String>,

    /// Resource requests and limits
    #[serde(default)]
    pub resources: Sizing,

    /// Number of pods
    #[serde(default = "replicas_default")]
    pub replicas: i32,

    /// Labels put on the pod template
    #[serde(default)]
    pub podLabels: BTreeMap<String, String>,
    /// Selector labels for the Deployment
    #[serde(default)]
    pub matchLabels: BTreeMap<String, String>,

    /// Restart the container when this fails
    pub livenessProbe: ProbeSpec,
    /// Withhold traffic from the pod when this fails
    pub readinessProbe: ProbeSpec,
}

fn replicas_default() -> i32 {
    1
}

impl WorkloadConfig {
    /// Mount names that do not match any volume
    pub fn dangling_mounts(&self) -> Vec<&str> {
        let names = self.volumes.iter().map(|v| v.name.as_str()).collect::<BTreeSet<_>>();
        self.volumeMounts
            .iter()
            .map(|m| m.name.as_str())
            .filter(|n| !names.contains(n))
            .collect()
    }

    /// Whether the selector can ever select the pods of this template
    pub fn selector_matches_pods(&self) -> bool {
        self.matchLabels
            .iter()
            .all(|(k, v)| self.podLabels.get(k) == Some(v))
    }
}

impl Verify for WorkloadConfig {
    fn verify(&self) -> Result<()> {
        verify_dns_label("Deployment name", &self.name)?;
        verify_dns_label("Namespace", &self.namespace)?;
        verify_dns_label("Container name", &self.containerName)?;
        if self.image.trim().is_empty() {
            bail!("Deployment {} has no image", self.name);
        }

        if self.portName.is_empty() || self.portName.len() > 15 {
            bail!("Port name '{}' must be between 1 and 15 characters", self.portName);
        }
        if self.containerPort < 1 || self.containerPort > 65535 {
            bail!("Container port {} is not a valid port number", self.containerPort);
        }

        let mut seen = BTreeSet::new();
        for v in &self.volumes {
            if !seen.insert(v.name.as_str()) {
                bail!("Volume '{}' is defined more than once", v.name);
            }
        }
        if let Some(m) = self.dangling_mounts().first() {
            bail!("Volume mount '{}' does not reference a volume", m);
        }

        if self.matchLabels.is_empty() {
            bail!("Deployment {} needs at least one match label", self.name);
        }
        if !self.selector_matches_pods() {
            bail!("matchLabels of {} are not a subset of its podLabels", self.name);
        }
        if self.replicas < 0 {
            bail!("Replica count cannot be negative");
        }

        self.resources.verify()?;
        self.livenessProbe
            .verify()
            .chain_err(|| format!("invalid livenessProbe for {}", self.name))?;
        self.readinessProbe
            .verify()
            .chain_err(|| format!("invalid readinessProbe for {}", self.name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PullPolicy, WorkloadConfig};
    use crate::structs::Verify;
    use k8s_openapi::api::core::v1::VolumeMount;

    const WEBAPP: &str = r#"
name: webapp
namespace: apps
containerName: webapp
image: quay.io/org/webapp:1.2.0
portName: http
containerPort: 8080
volumes:
- name: config
  configMap:
    name: webapp-files
volumeMounts:
- name: config
  mountPath: /etc/webapp
resources:
  cpuRequestMilli: 250
  cpuLimitMilli: 500
  memoryRequestMi: 128
  memoryLimitMi: 256
podLabels:
  app: webapp
  tier: web
matchLabels:
  app: webapp
livenessProbe:
  httpPath: /health
  httpPort: 8080
readinessProbe:
  httpPath: /ready
  httpPort: 8080
"#;

    fn webapp() -> WorkloadConfig {
        serde_yaml::from_str(WEBAPP).unwrap()
    }

    #[test]
    fn workload_defaults() {
        let w = webapp();
        assert_eq!(w.replicas, 1);
        assert_eq!(w.imagePullPolicy, PullPolicy::IfNotPresent);
        assert_eq!(w.imagePullSecretName, None);
        assert!(w.env.is_empty());
        assert!(w.verify().is_ok());
    }

    #[test]
    fn workload_dangling_mount() {
        let mut w = webapp();
        w.volumeMounts.push(VolumeMount {
            name: "data".into(),
            mount_path: "/data".into(),
            ..VolumeMount::default()
        });
        assert_eq!(w.dangling_mounts(), vec!["data"]);
        assert!(w.verify().is_err());
    }

    #[test]
    fn workload_selector_mismatch() {
        let mut w = webapp();
        w.matchLabels.insert("app".into(), "other".into());
        assert!(!w.selector_matches_pods());
        assert!(w.verify().is_err());
        w.matchLabels.clear();
        assert!(w.selector_matches_pods());
        assert!(w.verify().is_err()); // empty selectors select nothing useful
    }

    #[test]
    fn workload_legacy_shape_rejected() {
        // single volume / scalar source names are not accepted
        let legacy = WEBAPP.to_string() + "envFromSecretName: foo\n";
        let res: Result<WorkloadConfig, _> = serde_yaml::from_str(&legacy);
        assert!(res.is_err());
        let legacy = WEBAPP.to_string() + "volume:\n  name: single\n";
        let res: Result<WorkloadConfig, _> = serde_yaml::from_str(&legacy);
        assert!(res.is_err());
    }

    #[test]
    fn pull_policy_names() {
        let w: WorkloadConfig =
            serde_yaml::from_str(&(WEBAPP.to_string() + "imagePullPolicy: Always\n")).unwrap();
        assert_eq!(w.imagePullPolicy.as_str(), "Always");
    }
}
