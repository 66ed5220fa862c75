//! Role matrix for the default resource table

use std::time::Duration;

use chrono::Utc;
use safevault::config::{RuleConfig, SecurityConfig};
use safevault::models::{Principal, Role};
use safevault::services::{AuthorizationModel, Decision};
use uuid::Uuid;

fn principal(roles: &str) -> Principal {
    Principal::new(Uuid::new_v4(), Role::parse_list(roles), Utc::now(), Duration::from_secs(3600))
}

#[test]
fn test_default_role_matrix() {
    let model = AuthorizationModel::from_config(&SecurityConfig::default());

    let cases = [
        ("Admin", "/dashboard", Decision::Allow),
        ("Admin", "/tools", Decision::Allow),
        ("Admin", "/profile", Decision::Allow),
        ("User", "/dashboard", Decision::Deny),
        ("User", "/tools", Decision::Allow),
        ("User", "/profile", Decision::Allow),
        ("Guest", "/dashboard", Decision::Deny),
        ("Guest", "/tools", Decision::Deny),
        ("Guest", "/profile", Decision::Allow),
        ("Admin,User", "/dashboard", Decision::Allow),
    ];

    for (roles, resource, expected) in cases {
        assert_eq!(
            model.authorize(Some(&principal(roles)), resource),
            expected,
            "{} on {}",
            roles,
            resource
        );
    }
}

#[test]
fn test_anonymous_is_denied_everywhere() {
    let model = AuthorizationModel::from_config(&SecurityConfig::default());

    for resource in ["/dashboard", "/tools", "/profile", "/unknown"] {
        assert_eq!(model.authorize(None, resource), Decision::Deny);
    }
}

#[test]
fn test_role_names_are_case_sensitive() {
    let model = AuthorizationModel::from_config(&SecurityConfig::default());

    assert_eq!(model.authorize(Some(&principal("admin")), "/dashboard"), Decision::Deny);
}

#[test]
fn test_custom_rules() {
    let config = SecurityConfig {
        rules: vec![
            RuleConfig::new("/reports", &["Auditor"]),
            RuleConfig::new("/inbox", &[]),
        ],
    };
    let model = AuthorizationModel::from_config(&config);

    assert_eq!(model.authorize(Some(&principal("Auditor")), "/reports"), Decision::Allow);
    assert_eq!(model.authorize(Some(&principal("Admin")), "/reports"), Decision::Deny);
    assert_eq!(model.authorize(Some(&principal("Admin")), "/dashboard"), Decision::Deny);
    assert_eq!(model.authorize(Some(&principal("")), "/inbox"), Decision::Allow);
}
