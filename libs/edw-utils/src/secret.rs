use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Errors raised while resolving `${VAR}` placeholders inside a [`Secret`].
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("environment variable '{name}' referenced by a secret is not set")]
    MissingVar { name: String },

    #[error("environment variable '{name}' referenced by a secret is not valid unicode")]
    NotUnicode { name: String },

    #[error("invalid placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Opaque credential value.
///
/// `Debug` and `Display` print `[REDACTED]`; the backing buffer is zeroed on
/// drop. Deserializes from a plain string so it can sit directly inside
/// configuration structs.
#[derive(Zeroize, ZeroizeOnDrop, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read-only access to the raw value.
    ///
    /// Callers must not log or persist the returned slice.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Expand every `${VAR}` placeholder from the process environment.
    ///
    /// Values without placeholders are returned unchanged.
    ///
    /// # Errors
    /// Returns [`SecretError::MissingVar`] when a referenced variable is unset.
    pub fn resolve(&self) -> Result<Secret, SecretError> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;
        let mut resolved = self.0.clone();

        for caps in re.captures_iter(&self.0) {
            let name = &caps[1];
            let value = std::env::var(name).map_err(|e| match e {
                std::env::VarError::NotPresent => SecretError::MissingVar {
                    name: name.to_owned(),
                },
                std::env::VarError::NotUnicode(_) => SecretError::NotUnicode {
                    name: name.to_owned(),
                },
            })?;
            resolved = resolved.replace(&caps[0], &value);
        }

        Ok(Secret(resolved))
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Secret {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Secret)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn debug_and_display_are_redacted() {
        let s = Secret::new("hunter2");
        assert_eq!(format!("{s:?}"), "[REDACTED]");
        assert_eq!(format!("{s}"), "[REDACTED]");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let s: Secret = serde_json::from_str("\"p@ss\"").unwrap();
        assert_eq!(s.expose(), "p@ss");
    }

    #[test]
    fn resolve_without_placeholders_is_identity() {
        let s = Secret::new("plain-value");
        assert_eq!(s.resolve().unwrap().expose(), "plain-value");
    }

    #[test]
    fn resolve_expands_placeholders() {
        temp_env::with_var("EDW_UTILS_TEST_PASSWORD", Some("s3cret"), || {
            let s = Secret::new("${EDW_UTILS_TEST_PASSWORD}");
            assert_eq!(s.resolve().unwrap().expose(), "s3cret");

            let embedded = Secret::new("pre-${EDW_UTILS_TEST_PASSWORD}-post");
            assert_eq!(embedded.resolve().unwrap().expose(), "pre-s3cret-post");
        });
    }

    #[test]
    fn resolve_reports_missing_variable() {
        temp_env::with_var_unset("EDW_UTILS_TEST_MISSING", || {
            let err = Secret::new("${EDW_UTILS_TEST_MISSING}")
                .resolve()
                .unwrap_err();
            assert!(matches!(err, SecretError::MissingVar { ref name } if name == "EDW_UTILS_TEST_MISSING"));
        });
    }

    #[test]
    fn zeroize_clears_buffer() {
        let mut s = Secret::new("sensitive");
        s.zeroize();
        assert!(s.0.is_empty());
    }
}
