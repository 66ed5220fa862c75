use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate};

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
    /// Session configuration
    #[serde(default = "SessionConfig::default")]
    pub session: SessionConfig,
    /// Run a decoy verification when the username is unknown so that a
    /// lookup miss costs as much as a wrong password
    #[serde(default = "default_equalize_timing")]
    pub equalize_timing: bool,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of lanes)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
    /// Salt length in bytes
    #[serde(default = "default_argon2_salt_length")]
    pub salt_length: u32,
}

/// Session window handed to the session layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Principal lifetime in seconds
    #[serde(default = "default_session_lifetime")]
    pub lifetime: u64,
    /// Default persistence when the caller does not ask for one
    #[serde(default)]
    pub persistent: bool,
}

fn default_equalize_timing() -> bool {
    true
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

fn default_argon2_salt_length() -> u32 {
    16
}

fn default_session_lifetime() -> u64 {
    3600 // 1 hour
}

impl SessionConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            argon2: Argon2Config::default(),
            session: SessionConfig::default(),
            equalize_timing: default_equalize_timing(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
            salt_length: default_argon2_salt_length(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lifetime: default_session_lifetime(),
            persistent: false,
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.argon2.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.memory_cost must be > 0".to_string()));
        }
        if self.time_cost == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.time_cost must be > 0".to_string()));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::ValidationError("auth.argon2.parallelism must be > 0".to_string()));
        }
        // Argon2 needs at least 8 KiB of memory per lane
        if self.memory_cost < 8 * self.parallelism {
            return Err(ConfigError::ValidationError(
                "auth.argon2.memory_cost must be at least 8 * parallelism".to_string(),
            ));
        }
        if self.hash_length < 4 {
            return Err(ConfigError::ValidationError("auth.argon2.hash_length must be >= 4".to_string()));
        }
        if !(8..=48).contains(&self.salt_length) {
            return Err(ConfigError::ValidationError(
                "auth.argon2.salt_length must be between 8 and 48".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.lifetime == 0 {
            return Err(ConfigError::ValidationError("auth.session.lifetime must be > 0".to_string()));
        }
        Ok(())
    }
}
