use regex::Regex;

use super::Result;

pub trait Verify {
    /// Verifying that this struct is sane
    ///
    /// NB: The builders never call this. A config that fails here still
    /// produces a manifest, it will just be rejected by the cluster.
    fn verify(&self) -> Result<()>;
}

/// Kubernetes object names and dns labels (RFC 1123 label)
pub(crate) fn verify_dns_label(what: &str, s: &str) -> Result<()> {
    let re = Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap();
    if s.len() > 63 {
        bail!("{} '{}' is longer than 63 characters", what, s);
    }
    if !re.is_match(s) {
        bail!("{} '{}' is not a valid dns label", what, s);
    }
    Ok(())
}

/// Kubernetes object names that may contain dots (RFC 1123 subdomain)
pub(crate) fn verify_dns_subdomain(what: &str, s: &str) -> Result<()> {
    if s.len() > 253 {
        bail!("{} '{}' is longer than 253 characters", what, s);
    }
    for label in s.split('.') {
        verify_dns_label(what, label)?;
    }
    Ok(())
}

/// Keys in secret and configmap data
pub(crate) fn verify_data_key(s: &str) -> Result<()> {
    let re = Regex::new(r"^[-._a-zA-Z0-9]+$").unwrap();
    if !re.is_match(s) {
        bail!("Data key '{}' must consist of alphanumerics, '-', '_' or '.'", s);
    }
    Ok(())
}
