use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};
use crate::models::Role;

/// Security configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Route gates, loaded once at startup
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

/// One protected resource
///
/// An empty `roles` list admits any authenticated principal; otherwise the
/// principal needs at least one of the listed roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub resource: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl RuleConfig {
    pub fn new(resource: &str, roles: &[&str]) -> Self {
        Self {
            resource: resource.to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
        }
    }
}

fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::new("/dashboard", &[Role::ADMIN]),
        RuleConfig::new("/tools", &[Role::ADMIN, Role::USER]),
        RuleConfig::new("/profile", &[]),
    ]
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl Validate for SecurityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();

        for rule in &self.rules {
            rule.validate()?;

            if !seen.insert(rule.resource.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "security.rules has more than one rule for {}",
                    rule.resource
                )));
            }
        }

        Ok(())
    }
}

impl Validate for RuleConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.resource.is_empty() {
            return Err(ConfigError::ValidationError(
                "security.rules.resource cannot be empty".to_string(),
            ));
        }
        if self.roles.iter().any(|role| role.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "security.rules for {} contains an empty role name",
                self.resource
            )));
        }
        Ok(())
    }
}
