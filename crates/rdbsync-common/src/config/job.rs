//! Job configuration file
//!
//! ```yaml
//! job_id: orders-sync
//! source:
//!   protocol: mysql
//!   host: ${MYSQL_HOST:-localhost}
//!   database: shop
//! dist:
//!   protocol: mysql
//!   semantic: exactly-once
//!   tx_max_commit_attempts: 5
//! ```
//!
//! `${VAR}` and `${VAR:-default}` are replaced from the environment before the
//! YAML is parsed.

use crate::error::{ConnectError, Result};
use crate::job::context::{ContextMeta, PipelineProperties};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("env var pattern is valid")
});

/// One synchronization job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Job identifier
    pub job_id: String,

    /// Source properties; `protocol` selects the source helper
    pub source: PipelineProperties,

    /// Destination properties
    #[serde(default)]
    pub dist: PipelineProperties,
}

impl JobConfig {
    /// Load a job from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a job from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let config: Self = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Expand environment variables in the format ${VAR} or ${VAR:-default}
    fn expand_env_vars(content: &str) -> String {
        ENV_VAR_REGEX
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                let default = caps.get(2).map(|m| m.as_str());

                std::env::var(var_name).unwrap_or_else(|_| default.unwrap_or("").to_string())
            })
            .to_string()
    }

    /// Validate the job
    pub fn validate(&self) -> Result<()> {
        if self.job_id.trim().is_empty() {
            return Err(ConnectError::config("job_id must not be empty"));
        }
        if self.source.protocol().is_none() {
            return Err(ConnectError::config(format!(
                "Job '{}': source must have a string 'protocol'",
                self.job_id
            )));
        }
        Ok(())
    }

    /// Source protocol as written
    pub fn source_protocol(&self) -> Option<&str> {
        self.source.protocol()
    }

    /// Job metadata handed to source helpers
    pub fn into_context(self) -> ContextMeta {
        ContextMeta::new(self.job_id)
            .with_source_properties(self.source)
            .with_dist_properties(self.dist)
    }
}
