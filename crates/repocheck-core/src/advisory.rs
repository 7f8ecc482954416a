//! Check outcomes and the advisories they produce

use repocheck_pkg::{BackendKind, DisabledReason, Edition};
use serde::{Deserialize, Serialize};

/// Step of the check that could not reach an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Finding the installed edition
    Variant,
    /// Finding the origin repository
    Origin,
    /// Checking repository enablement
    Enablement,
}

/// Conclusion of a check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CheckOutcome {
    /// No supported package manager on this host
    NoBackend,
    /// Neither edition is in the package database
    ManualInstall,
    /// Installed package has no origin repository
    NotFromRepository,
    /// Origin repository is disabled, unknown, or missing from the policy
    RepositoryDisabled {
        /// Repository identifier as reported by the backend
        repository: String,
        /// Kind of negative evidence found
        reason: DisabledReason,
    },
    /// Origin repository shows no sign of being disabled
    Enabled {
        /// Repository identifier as reported by the backend
        repository: String,
    },
    /// A query failed or returned output that could not be interpreted
    Indeterminate {
        /// Step that failed
        stage: Stage,
        /// What went wrong
        detail: String,
    },
}

/// Recommendation shown to the administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Installed without any package
    ManualInstall,
    /// Package not installed from a repository
    NotFromRepository,
    /// Origin repository is disabled
    RepositoryDisabled,
    /// Origin repository is absent from apt's policy
    RepositoryUntracked,
}

impl Advisory {
    /// Advisory for an outcome; `None` means stay silent
    #[must_use]
    pub fn for_outcome(outcome: &CheckOutcome) -> Option<Self> {
        match outcome {
            CheckOutcome::ManualInstall => Some(Advisory::ManualInstall),
            CheckOutcome::NotFromRepository => Some(Advisory::NotFromRepository),
            CheckOutcome::RepositoryDisabled {
                reason: DisabledReason::MissingFromPolicy,
                ..
            } => Some(Advisory::RepositoryUntracked),
            CheckOutcome::RepositoryDisabled { .. } => Some(Advisory::RepositoryDisabled),
            CheckOutcome::NoBackend
            | CheckOutcome::Enabled { .. }
            | CheckOutcome::Indeterminate { .. } => None,
        }
    }

    /// Advisory text for `product`, one finding line and one recommendation line
    #[must_use]
    pub fn lines(self, product: &str) -> Vec<String> {
        match self {
            Advisory::ManualInstall => vec![
                format!(
                    "{product} has determined that you have manually installed {product} without using a package."
                ),
                format!(
                    "We recommend using the official {product} packages in the {product} repositories to ensure your installation remains up to date."
                ),
            ],
            Advisory::NotFromRepository => vec![
                format!(
                    "{product} has determined that its package was not installed from a repository."
                ),
                format!(
                    "We recommend using the official {product} repositories to ensure your installation remains up to date."
                ),
            ],
            Advisory::RepositoryDisabled => vec![
                format!(
                    "{product} has discovered that the repository used to install {product} is currently disabled."
                ),
                "We recommend that you enable the repository to stay up to date on the latest features and security updates."
                    .to_string(),
            ],
            Advisory::RepositoryUntracked => vec![
                format!(
                    "{product} has determined that the repository {product} was installed from is not enabled, or its package was not installed from a repository."
                ),
                format!(
                    "We recommend using the official {product} repositories to ensure your installation remains up to date."
                ),
            ],
        }
    }
}

/// Everything a check run found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Backend that answered, if any was found
    pub backend: Option<BackendKind>,
    /// Installed edition, if one was found
    pub edition: Option<Edition>,
    /// Conclusion
    #[serde(flatten)]
    pub outcome: CheckOutcome,
    /// Advisory lines; empty when there is nothing to report
    pub advisory: Vec<String>,
}

impl CheckReport {
    /// Build a report, rendering the advisory for `product`
    pub fn new(
        product: &str,
        backend: Option<BackendKind>,
        edition: Option<Edition>,
        outcome: CheckOutcome,
    ) -> Self {
        let advisory = Advisory::for_outcome(&outcome)
            .map(|advisory| advisory.lines(product))
            .unwrap_or_default();
        Self {
            backend,
            edition,
            outcome,
            advisory,
        }
    }

    /// Advisory kind, if the run produced one
    #[must_use]
    pub fn advisory_kind(&self) -> Option<Advisory> {
        Advisory::for_outcome(&self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_outcomes() {
        for outcome in [
            CheckOutcome::NoBackend,
            CheckOutcome::Enabled {
                repository: "R1".to_string(),
            },
            CheckOutcome::Indeterminate {
                stage: Stage::Origin,
                detail: "timed out".to_string(),
            },
        ] {
            assert_eq!(Advisory::for_outcome(&outcome), None);
            assert!(CheckReport::new("GitLab", None, None, outcome).advisory.is_empty());
        }
    }

    #[test]
    fn test_disabled_reasons_map_to_advisories() {
        let disabled = |reason| CheckOutcome::RepositoryDisabled {
            repository: "R1".to_string(),
            reason,
        };

        assert_eq!(
            Advisory::for_outcome(&disabled(DisabledReason::ExplicitlyDisabled)),
            Some(Advisory::RepositoryDisabled)
        );
        assert_eq!(
            Advisory::for_outcome(&disabled(DisabledReason::UnknownRepository)),
            Some(Advisory::RepositoryDisabled)
        );
        assert_eq!(
            Advisory::for_outcome(&disabled(DisabledReason::MissingFromPolicy)),
            Some(Advisory::RepositoryUntracked)
        );
    }

    #[test]
    fn test_lines_use_product_name() {
        let lines = Advisory::ManualInstall.lines("Mattermost");

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Mattermost has determined that you have manually installed Mattermost without using a package."
        );
    }

    #[test]
    fn test_report_json_shape() {
        let report = CheckReport::new(
            "GitLab",
            Some(BackendKind::Yum),
            Some(Edition::Enterprise),
            CheckOutcome::Enabled {
                repository: "R1".to_string(),
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["backend"], "yum");
        assert_eq!(json["edition"], "enterprise");
        assert_eq!(json["outcome"], "enabled");
        assert_eq!(json["repository"], "R1");
        assert_eq!(json["advisory"], serde_json::json!([]));
    }
}
