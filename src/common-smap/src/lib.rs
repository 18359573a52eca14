use std::env::VarError;
use std::num::ParseIntError;

/// Retrieves the value of the environment variable as a positive `usize`.
/// Falls back to `default` when the variable is unset or empty.
pub fn env_usize(env_var: &str, default: usize) -> Result<usize, EnvNumberError> {
    let raw = match std::env::var(env_var) {
        Ok(v) if !v.trim().is_empty() => v,
        Ok(_) | Err(VarError::NotPresent) => return Ok(default),
        Err(e @ VarError::NotUnicode(_)) => return Err(EnvNumberError::NotUnicode(env_var.to_string(), e)),
    };

    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| EnvNumberError::ParseIntError(env_var.to_string(), e))?;

    if value == 0 {
        return Err(EnvNumberError::NonPositive(env_var.to_string()));
    }
    Ok(value)
}

#[derive(Debug)]
pub enum EnvNumberError {
    ParseIntError(String, ParseIntError),
    NonPositive(String),
    NotUnicode(String, VarError),
}

impl std::error::Error for EnvNumberError {}

impl std::fmt::Display for EnvNumberError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::ParseIntError(var, e) => write!(f, "Failed to parse {} as an integer: {}", var, e),
            Self::NonPositive(var) => write!(f, "{} must be a positive number", var),
            Self::NotUnicode(var, e) => write!(f, "Environment variable {} is not valid unicode: {}", var, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns its variable name so parallel tests never race on the environment.

    #[test]
    fn test_env_usize_missing_uses_default() {
        assert_eq!(env_usize("COMMON_SMAP_TEST_MISSING", 42).unwrap(), 42);
    }

    #[test]
    fn test_env_usize_parses_value() {
        unsafe { std::env::set_var("COMMON_SMAP_TEST_PARSE", " 1234 ") };
        assert_eq!(env_usize("COMMON_SMAP_TEST_PARSE", 1).unwrap(), 1234);
    }

    #[test]
    fn test_env_usize_rejects_garbage_and_zero() {
        unsafe { std::env::set_var("COMMON_SMAP_TEST_GARBAGE", "lots") };
        assert!(matches!(
            env_usize("COMMON_SMAP_TEST_GARBAGE", 1),
            Err(EnvNumberError::ParseIntError(_, _))
        ));

        unsafe { std::env::set_var("COMMON_SMAP_TEST_ZERO", "0") };
        assert!(matches!(
            env_usize("COMMON_SMAP_TEST_ZERO", 1),
            Err(EnvNumberError::NonPositive(_))
        ));
    }
}
