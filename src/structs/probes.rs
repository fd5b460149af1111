use k8s_openapi::api::core::v1::{HTTPGetAction, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use super::{Result, Verify};

/// Http health check policy for a liveness or readiness probe
///
/// Fields left out of the config get the kubernetes defaults.
///
/// ```yaml
/// livenessProbe:
///   httpPath: /health
///   httpPort: 8080
///   initialDelaySeconds: 15
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProbeSpec {
    /// Uri path to GET (i.e. / or /health)
    pub httpPath: String,
    /// Container port number to GET from
    pub httpPort: i32,

    /// How long to wait before kube performs first probe
    #[serde(default)]
    pub initialDelaySeconds: i32,

    /// Number of seconds after which the probe times out
    #[serde(default = "timeout_seconds_default")]
    pub timeoutSeconds: i32,

    /// How long between each probe
    #[serde(default = "period_seconds_default")]
    pub periodSeconds: i32,

    /// Min consecutive failures before considering a probe failed
    #[serde(default = "failure_threshold_default")]
    pub failureThreshold: i32,

    /// Min consecutive successes before considering a failed probe successful
    #[serde(default = "success_threshold_default")]
    pub successThreshold: i32,
}

// Default values from Kubernetes
fn timeout_seconds_default() -> i32 {
    1
}
fn period_seconds_default() -> i32 {
    10
}
fn failure_threshold_default() -> i32 {
    3
}
fn success_threshold_default() -> i32 {
    1
}

impl ProbeSpec {
    /// A probe on a path and port with kubernetes default timings
    pub fn http(path: &str, port: i32) -> Self {
        ProbeSpec {
            httpPath: path.into(),
            httpPort: port,
            initialDelaySeconds: 0,
            timeoutSeconds: timeout_seconds_default(),
            periodSeconds: period_seconds_default(),
            failureThreshold: failure_threshold_default(),
            successThreshold: success_threshold_default(),
        }
    }

    /// The container probe this descriptor describes
    pub fn to_probe(&self) -> Probe {
        Probe {
            http_get: Some(HTTPGetAction {
                path: Some(self.httpPath.clone()),
                port: IntOrString::Int(self.httpPort),
                ..HTTPGetAction::default()
            }),
            initial_delay_seconds: Some(self.initialDelaySeconds),
            timeout_seconds: Some(self.timeoutSeconds),
            period_seconds: Some(self.periodSeconds),
            failure_threshold: Some(self.failureThreshold),
            success_threshold: Some(self.successThreshold),
            ..Probe::default()
        }
    }
}

impl Verify for ProbeSpec {
    fn verify(&self) -> Result<()> {
        if !self.httpPath.starts_with('/') {
            bail!("Probe path '{}' must start with a slash", self.httpPath);
        }
        if self.httpPort < 1 || self.httpPort > 65535 {
            bail!("Probe port {} is not a valid port number", self.httpPort);
        }
        if self.initialDelaySeconds < 0 {
            bail!("Probe initialDelaySeconds cannot be negative");
        }
        if self.timeoutSeconds < 1 || self.periodSeconds < 1 {
            bail!("Probe timeoutSeconds and periodSeconds must be at least 1");
        }
        if self.failureThreshold < 1 || self.successThreshold < 1 {
            bail!("Probe thresholds must be at least 1");
        }
        Ok(())
    }
}
