use std::env;

use super::{ErrorKind, Result, ResultExt};

// Strict getters for process environment variables.
//
// Deploy tooling around the builders configures itself from the environment.
// An unset variable and an empty one are treated the same: both are errors,
// so a misconfigured pipeline fails early instead of running with defaults.

fn lookup(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => {
            error!("ENV {:?} must be set and not empty", key);
            bail!(ErrorKind::ValueError(key.to_string()))
        }
    }
}

/// A non-empty string
pub fn get_string(key: &str) -> Result<String> {
    lookup(key)
}

/// A boolean
///
/// Accepts 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False.
pub fn get_bool(key: &str) -> Result<bool> {
    let v = lookup(key)?;
    match v.as_str() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => {
            error!("ENV {:?} is not a boolean: {:?}", key, v);
            bail!(ErrorKind::ValueError(key.to_string()))
        }
    }
}

/// A signed integer
pub fn get_int(key: &str) -> Result<i64> {
    let v = lookup(key)?;
    let res = v
        .trim()
        .parse::<i64>()
        .chain_err(|| ErrorKind::ValueError(key.to_string()))?;
    Ok(res)
}

/// A non-negative integer
pub fn get_uint(key: &str) -> Result<u64> {
    let v = lookup(key)?;
    let v = v.trim();
    if let Ok(n) = v.parse::<i64>() {
        if n < 0 {
            error!("uint ENV {:?} must not be negative, is {}", key, n);
            bail!(ErrorKind::ValueError(key.to_string()));
        }
    }
    let res = v
        .parse::<u64>()
        .chain_err(|| ErrorKind::ValueError(key.to_string()))?;
    Ok(res)
}

/// A float
pub fn get_float(key: &str) -> Result<f64> {
    let v = lookup(key)?;
    let res = v
        .trim()
        .parse::<f64>()
        .chain_err(|| ErrorKind::ValueError(key.to_string()))?;
    Ok(res)
}
