use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::config::{RuleConfig, SecurityConfig};
use crate::metrics::AuthMetrics;
use crate::models::{Principal, Role};

/// What a principal needs to reach a resource
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    /// Any signed-in principal
    Authenticated,
    /// At least one of these roles
    AnyRole(BTreeSet<Role>),
}

impl Requirement {
    pub fn any_role<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Requirement::AnyRole(roles.into_iter().map(Into::into).collect())
    }

    pub fn is_satisfied_by(&self, principal: &Principal) -> bool {
        match self {
            Requirement::Authenticated => true,
            Requirement::AnyRole(roles) => principal.in_any_role(roles),
        }
    }
}

/// Pairing of a resource identifier with its requirement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationRule {
    pub resource: String,
    pub requirement: Requirement,
}

impl AuthorizationRule {
    pub fn new(resource: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            resource: resource.into(),
            requirement,
        }
    }

    pub fn authenticated(resource: impl Into<String>) -> Self {
        Self::new(resource, Requirement::Authenticated)
    }

    pub fn any_role<I, R>(resource: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self::new(resource, Requirement::any_role(roles))
    }
}

impl From<&RuleConfig> for AuthorizationRule {
    fn from(rule: &RuleConfig) -> Self {
        if rule.roles.is_empty() {
            Self::authenticated(rule.resource.clone())
        } else {
            Self::any_role(rule.resource.clone(), rule.roles.iter().map(String::as_str))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
        }
    }
}

/// Static resource -> requirement table
///
/// Built once at startup and read-only afterwards. Evaluation looks only at
/// the principal handed in for the current request; nothing is cached
/// between calls. Resources without a rule are denied.
#[derive(Clone, Debug, Default)]
pub struct AuthorizationModel {
    rules: HashMap<String, Requirement>,
    metrics: AuthMetrics,
}

impl AuthorizationModel {
    /// Later rules for the same resource replace earlier ones
    pub fn new(rules: impl IntoIterator<Item = AuthorizationRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (rule.resource, rule.requirement))
            .collect();

        Self {
            rules,
            metrics: AuthMetrics::new(),
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(config.rules.iter().map(AuthorizationRule::from))
    }

    pub fn requirement(&self, resource: &str) -> Option<&Requirement> {
        self.rules.get(resource)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Gate a request against the table at the current time
    pub fn authorize(&self, principal: Option<&Principal>, resource: &str) -> Decision {
        self.authorize_at(principal, resource, Utc::now())
    }

    /// Gate a request as of `now`; an expired principal counts as anonymous
    pub fn authorize_at(&self, principal: Option<&Principal>, resource: &str, now: DateTime<Utc>) -> Decision {
        let decision = match (self.rules.get(resource), principal) {
            (None, _) => {
                tracing::debug!(resource, "No authorization rule for resource");
                Decision::Deny
            }
            (Some(_), None) => Decision::Deny,
            (Some(_), Some(principal)) if !principal.is_active_at(now) => Decision::Deny,
            (Some(requirement), Some(principal)) if requirement.is_satisfied_by(principal) => {
                Decision::Allow
            }
            (Some(_), Some(_)) => Decision::Deny,
        };

        self.metrics.record_decision(decision);
        tracing::debug!(
            resource,
            user_id = ?principal.map(|p| p.user_id),
            decision = decision.as_str(),
            "Authorization decision"
        );

        decision
    }
}
