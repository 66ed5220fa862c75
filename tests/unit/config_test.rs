//! Configuration loading tests
//!
//! Every test here touches process environment variables, so they run
//! serially.

use safevault::config::*;
use serial_test::serial;
use std::env;

mod utils {
    /// Remove every variable with the SAFEVAULT prefix
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("SAFEVAULT"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
        unsafe { std::env::remove_var("APP_ENV") };
    }
}

#[test]
#[serial]
fn test_load_default_config_success() {
    utils::clean_env_vars();

    let config = load();
    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());

    let config = config.unwrap();

    assert_eq!(config.app.name, "safevault");
    assert_eq!(config.app.environment, "development");

    assert_eq!(config.database.endpoint, "sqlite::memory:");
    assert_eq!(config.database.timeout, 5);
    assert!(config.database.credentials.is_none());

    assert_eq!(config.auth.argon2.memory_cost, 65536);
    assert_eq!(config.auth.argon2.time_cost, 3);
    assert_eq!(config.auth.argon2.parallelism, 4);
    assert_eq!(config.auth.session.lifetime, 3600);
    assert!(!config.auth.session.persistent);
    assert!(config.auth.equalize_timing);

    assert_eq!(
        config.security.rules,
        vec![
            RuleConfig::new("/dashboard", &["Admin"]),
            RuleConfig::new("/tools", &["Admin", "User"]),
            RuleConfig::new("/profile", &[]),
        ]
    );
}

#[test]
#[serial]
fn test_env_var_overrides_file() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("SAFEVAULT__DATABASE__TIMEOUT", "10");
        env::set_var("SAFEVAULT__AUTH__SESSION__LIFETIME", "600");
        env::set_var("SAFEVAULT__APP__NAME", "vault-test");
    };

    let config = load().unwrap();

    assert_eq!(config.database.timeout, 10);
    assert_eq!(config.database.timeout(), std::time::Duration::from_secs(10));
    assert_eq!(config.auth.session.lifetime, 600);
    assert_eq!(config.app.name, "vault-test");

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_invalid_env_value_fails_validation() {
    utils::clean_env_vars();
    unsafe { env::set_var("SAFEVAULT__AUTH__SESSION__LIFETIME", "0") };

    let result = load();

    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_unparseable_env_value_fails_loading() {
    utils::clean_env_vars();
    unsafe { env::set_var("SAFEVAULT__DATABASE__TIMEOUT", "soon") };

    let result = load();

    assert!(matches!(result, Err(ConfigError::Source(_))));

    utils::clean_env_vars();
}
