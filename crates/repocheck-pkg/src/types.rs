//! Type definitions shared by every backend

use serde::{Deserialize, Serialize};

/// Product edition, identified by which package name is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edition {
    /// Community edition (e.g. `gitlab-ce`)
    Community,
    /// Enterprise edition (e.g. `gitlab-ee`)
    Enterprise,
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edition::Community => write!(f, "community"),
            Edition::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// Package names for both editions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNames {
    /// Community edition package name
    pub community: String,
    /// Enterprise edition package name
    pub enterprise: String,
}

impl PackageNames {
    /// Create a new pair of package names
    pub fn new(community: impl Into<String>, enterprise: impl Into<String>) -> Self {
        Self {
            community: community.into(),
            enterprise: enterprise.into(),
        }
    }

    /// Package name for an edition
    #[must_use]
    pub fn name(&self, edition: Edition) -> &str {
        match edition {
            Edition::Community => &self.community,
            Edition::Enterprise => &self.enterprise,
        }
    }

    /// Editions in lookup order, community first
    #[must_use]
    pub fn candidates(&self) -> [(Edition, &str); 2] {
        [
            (Edition::Community, self.community.as_str()),
            (Edition::Enterprise, self.enterprise.as_str()),
        ]
    }
}

impl Default for PackageNames {
    fn default() -> Self {
        Self::new("gitlab-ce", "gitlab-ee")
    }
}

/// Where the installed package version came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Origin {
    /// A concrete repository identifier, opaque outside its backend
    Repository(String),
    /// The backend's sentinel for "not installed from any repository"
    NotFromRepository,
    /// Output could not be interpreted
    Unknown,
}

/// Why a repository counts as not enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledReason {
    /// Repository listing marks it disabled
    ExplicitlyDisabled,
    /// The backend does not know the repository at all
    UnknownRepository,
    /// The repository source is absent from the current package policy
    MissingFromPolicy,
}

/// Enablement of an origin repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum Enablement {
    /// No negative evidence found
    Enabled,
    /// Explicit negative evidence found
    Disabled(DisabledReason),
    /// Output could not be interpreted
    Indeterminate,
}

/// Supported package manager family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// yum / rpm (RHEL, CentOS)
    Yum,
    /// APT / dpkg (Debian, Ubuntu)
    Apt,
    /// zypper (openSUSE, SLES)
    Zypper,
}

impl BackendKind {
    /// All backends in probe priority order
    pub const PRIORITY: [BackendKind; 3] = [BackendKind::Yum, BackendKind::Apt, BackendKind::Zypper];

    /// Executable whose presence selects this backend
    #[must_use]
    pub fn probe_path(self) -> &'static str {
        match self {
            BackendKind::Yum => "/usr/bin/yum",
            BackendKind::Apt => "/usr/bin/apt",
            BackendKind::Zypper => "/usr/bin/zypper",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Yum => write!(f, "yum"),
            BackendKind::Apt => write!(f, "apt"),
            BackendKind::Zypper => write!(f, "zypper"),
        }
    }
}
