//! Check configuration

use std::time::Duration;

use repocheck_pkg::PackageNames;

use crate::error::CoreError;

/// Settings for a single check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Product name used in advisory text
    pub product: String,
    /// Package names of both editions
    pub packages: PackageNames,
    /// Timeout for each backend query
    pub timeout: Duration,
}

fn default_product() -> String {
    "GitLab".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            product: default_product(),
            packages: PackageNames::default(),
            timeout: default_timeout(),
        }
    }
}

impl CheckConfig {
    /// Set the product name
    #[must_use]
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Set both package names
    #[must_use]
    pub fn with_packages(mut self, packages: PackageNames) -> Self {
        self.packages = packages;
        self
    }

    /// Set the per-query timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate settings before any command runs
    ///
    /// # Errors
    /// Returns `CoreError::ConfigError` for an empty product name, a zero
    /// timeout, or a package name the package tools would not accept.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.product.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "product name must not be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(CoreError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        for (edition, name) in self.packages.candidates() {
            validate_package_name(name)
                .map_err(|reason| CoreError::ConfigError(format!("{edition} package {reason}")))?;
        }
        if self.packages.community == self.packages.enterprise {
            return Err(CoreError::ConfigError(
                "community and enterprise package names must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// Package names as rpm and dpkg accept them: alphanumerics plus `+-._`,
/// not starting with `-`
fn validate_package_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.starts_with('-') {
        return Err(format!("name {name:?} must not start with '-'"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(*c, '+' | '-' | '.' | '_')))
    {
        return Err(format!("name {name:?} contains invalid character {c:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CheckConfig::default();

        assert_eq!(config.product, "GitLab");
        assert_eq!(config.packages.community, "gitlab-ce");
        assert_eq!(config.packages.enterprise, "gitlab-ee");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let config = CheckConfig::default().with_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_package_names() {
        for (community, enterprise) in [
            ("", "gitlab-ee"),
            ("gitlab-ce", "-gitlab-ee"),
            ("gitlab ce", "gitlab-ee"),
            ("gitlab-ce;reboot", "gitlab-ee"),
            ("gitlab-ce", "gitlab-ce"),
        ] {
            let config =
                CheckConfig::default().with_packages(PackageNames::new(community, enterprise));
            assert!(
                config.validate().is_err(),
                "{community:?}/{enterprise:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepts_custom_names() {
        let config = CheckConfig::default()
            .with_product("Mattermost")
            .with_packages(PackageNames::new("mattermost-team", "mattermost_ee+1.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_blank_product() {
        let err = CheckConfig::default()
            .with_product("  ")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::ConfigError("product name must not be empty".to_string())
        );
    }
}
