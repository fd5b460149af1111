use super::traits::verify_dns_label;
use super::{Result, Verify};

/// Port on the backend Service
///
/// Named ports are fine for most services, but some service types
/// require a number, so both are accepted.
// Kube has a similar hybrid for ServiceBackendPort: name | number
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum BackendPort {
    Number(i32),
    Name(String),
}

impl From<i32> for BackendPort {
    fn from(n: i32) -> Self {
        BackendPort::Number(n)
    }
}

impl From<&str> for BackendPort {
    fn from(s: &str) -> Self {
        BackendPort::Name(s.to_string())
    }
}

/// Single host, single path Ingress
///
/// The host is `{dnsLabel}.{baseDomain}`.
///
/// ```yaml
/// name: webapp
/// namespace: apps
/// dnsLabel: webapp
/// baseDomain: example.com
/// serviceName: webapp
/// backendPort: http
/// ingressClassName: nginx
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Name of the Ingress
    pub name: String,
    /// Namespace of the Ingress and the backend Service
    pub namespace: String,
    /// Leftmost label of the host
    pub dnsLabel: String,
    /// Domain the label is put under
    pub baseDomain: String,
    /// Backend Service name
    pub serviceName: String,
    /// Backend Service port
    pub backendPort: BackendPort,
    /// Http path to route
    #[serde(default = "path_default")]
    pub path: String,
    /// Exact, Prefix or ImplementationSpecific
    #[serde(default = "path_type_default")]
    pub pathType: String,
    /// IngressClass handling this Ingress
    pub ingressClassName: String,
}

fn path_default() -> String {
    "/".into()
}
fn path_type_default() -> String {
    "Prefix".into()
}

impl RoutingConfig {
    /// Fully qualified host for the rule
    pub fn host(&self) -> String {
        format!("{}.{}", self.dnsLabel, self.baseDomain)
    }
}

impl Verify for RoutingConfig {
    fn verify(&self) -> Result<()> {
        verify_dns_label("Ingress name", &self.name)?;
        verify_dns_label("Namespace", &self.namespace)?;
        verify_dns_label("Dns label", &self.dnsLabel)?;
        verify_dns_label("Service name", &self.serviceName)?;
        if self.baseDomain.is_empty() || self.baseDomain.starts_with('.') {
            bail!("Base domain '{}' is invalid", self.baseDomain);
        }
        if !self.path.starts_with('/') {
            bail!("Ingress path '{}' must start with a slash", self.path);
        }
        match self.pathType.as_str() {
            "Exact" | "Prefix" | "ImplementationSpecific" => {}
            x => bail!("Unknown pathType '{}'", x),
        }
        match &self.backendPort {
            BackendPort::Number(n) if *n < 1 || *n > 65535 => {
                bail!("Backend port {} is not a valid port number", n)
            }
            BackendPort::Name(s) if s.is_empty() => bail!("Backend port name cannot be empty"),
            _ => {}
        }
        if self.ingressClassName.is_empty() {
            bail!("Ingress {} needs an ingressClassName", self.name);
        }
        Ok(())
    }
}
