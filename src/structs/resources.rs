use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ResourceRequirements;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::{Result, Verify};

// Kubernetes resource quantities
//
// Configs carry plain integers (milli cores and MiB) to avoid the stringly
// typed quantity grammar. These newtypes translate them into the canonical
// quantity strings that the kube api would print back for the same amount.

/// CPU amount in milli cores (1000 == one core)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CpuMilli(pub i64);

/// Memory amount in MiB (mebibytes)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct MemoryMi(pub i64);

impl CpuMilli {
    /// Number of cores as a decimal
    pub fn cores(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Decimal SI quantity, milli scaled unless it is a whole number of cores
    pub fn to_quantity(self) -> Quantity {
        let m = self.0;
        let s = if m % 1000 == 0 {
            (m / 1000).to_string()
        } else {
            format!("{}m", m)
        };
        Quantity(s)
    }
}

const BINARY_SUFFIXES: [&str; 7] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

impl MemoryMi {
    /// Number of bytes
    ///
    /// Saturates rather than wrapping for absurd inputs.
    pub fn bytes(self) -> i64 {
        self.0.saturating_mul(1024 * 1024)
    }

    /// Binary SI quantity using the largest suffix that divides exactly
    pub fn to_quantity(self) -> Quantity {
        Quantity(binary_si(self.bytes()))
    }
}

fn binary_si(bytes: i64) -> String {
    if bytes == 0 {
        return "0".into();
    }
    let mut value = bytes;
    let mut exp = 0;
    while exp < BINARY_SUFFIXES.len() - 1 && value % 1024 == 0 {
        value /= 1024;
        exp += 1;
    }
    format!("{}{}", value, BINARY_SUFFIXES[exp])
}

/// Resource requests and limits for the main container
///
/// ```yaml
/// resources:
///   cpuRequestMilli: 250
///   cpuLimitMilli: 1000
///   memoryRequestMi: 256
///   memoryLimitMi: 512
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Sizing {
    /// CPU request in milli cores
    pub cpuRequestMilli: i64,
    /// CPU limit in milli cores
    pub cpuLimitMilli: i64,
    /// Memory request in MiB
    pub memoryRequestMi: i64,
    /// Memory limit in MiB
    pub memoryLimitMi: i64,
}

impl Sizing {
    /// Container resource requirements keyed by the kube resource names
    pub fn to_requirements(&self) -> ResourceRequirements {
        let mut requests = BTreeMap::new();
        requests.insert("cpu".to_string(), CpuMilli(self.cpuRequestMilli).to_quantity());
        requests.insert("memory".to_string(), MemoryMi(self.memoryRequestMi).to_quantity());
        let mut limits = BTreeMap::new();
        limits.insert("cpu".to_string(), CpuMilli(self.cpuLimitMilli).to_quantity());
        limits.insert("memory".to_string(), MemoryMi(self.memoryLimitMi).to_quantity());
        ResourceRequirements {
            requests: Some(requests),
            limits: Some(limits),
            ..ResourceRequirements::default()
        }
    }
}

impl Verify for Sizing {
    fn verify(&self) -> Result<()> {
        if self.cpuRequestMilli < 0 || self.cpuLimitMilli < 0 {
            bail!("CPU values cannot be negative");
        }
        if self.memoryRequestMi < 0 || self.memoryLimitMi < 0 {
            bail!("Memory values cannot be negative");
        }
        // limits >= requests
        if self.cpuRequestMilli > self.cpuLimitMilli {
            bail!("Requested more CPU than what was limited");
        }
        if self.memoryRequestMi > self.memoryLimitMi {
            bail!("Requested more memory than what was limited");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CpuMilli, MemoryMi, Sizing};
    use crate::structs::Verify;
    use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

    #[test]
    fn cpu_quantities() {
        assert_eq!(CpuMilli(500).cores(), 0.5);
        assert_eq!(CpuMilli(500).to_quantity(), Quantity("500m".into()));
        assert_eq!(CpuMilli(2000).to_quantity(), Quantity("2".into()));
        assert_eq!(CpuMilli(1500).to_quantity(), Quantity("1500m".into()));
        assert_eq!(CpuMilli(0).to_quantity(), Quantity("0".into()));
    }

    #[test]
    fn memory_quantities() {
        assert_eq!(MemoryMi(128).bytes(), 134_217_728);
        assert_eq!(MemoryMi(128).to_quantity(), Quantity("128Mi".into()));
        assert_eq!(MemoryMi(1024).to_quantity(), Quantity("1Gi".into()));
        assert_eq!(MemoryMi(1536).to_quantity(), Quantity("1536Mi".into()));
        assert_eq!(MemoryMi(0).to_quantity(), Quantity("0".into()));
        assert_eq!(MemoryMi(i64::MAX).bytes(), i64::MAX);
    }

    #[test]
    fn requirements() {
        let s = Sizing {
            cpuRequestMilli: 250,
            cpuLimitMilli: 1000,
            memoryRequestMi: 256,
            memoryLimitMi: 512,
        };
        assert!(s.verify().is_ok());
        let req = s.to_requirements();
        let requests = req.requests.unwrap();
        let limits = req.limits.unwrap();
        assert_eq!(requests["cpu"], Quantity("250m".into()));
        assert_eq!(requests["memory"], Quantity("256Mi".into()));
        assert_eq!(limits["cpu"], Quantity("1".into()));
        assert_eq!(limits["memory"], Quantity("512Mi".into()));
        assert_eq!(limits.len(), 2);
    }

    #[test]
    fn requests_above_limits() {
        let s = Sizing {
            cpuRequestMilli: 2000,
            cpuLimitMilli: 1000,
            memoryRequestMi: 256,
            memoryLimitMi: 512,
        };
        assert!(s.verify().is_err());
        let s = Sizing {
            memoryRequestMi: -1,
            ..Sizing::default()
        };
        assert!(s.verify().is_err());
    }
}
