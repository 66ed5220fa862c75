use argon2::{
    password_hash::{PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::config::auth::AuthConfig;

/// Error raised while building params, hashing, or inspecting a hash
pub type HashError = argon2::password_hash::Error;

/// Argon2id password hasher
///
/// Hashes are self-describing PHC strings:
/// `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`. Verification needs only
/// the stored string and the candidate password; the digest comparison is
/// constant-time.
///
/// With default settings (64MB memory, 3 iterations, 4 lanes) one hash or
/// verification takes 100-500ms. Run it off latency-sensitive threads, e.g.
/// with `tokio::task::spawn_blocking`.
///
/// # Example
/// ```no_run
/// use safevault::config::auth::AuthConfig;
/// use safevault::security::PasswordHasher;
///
/// let config = AuthConfig::default();
/// let hasher = PasswordHasher::from_config(&config).unwrap();
///
/// let hash = hasher.hash("my_secure_password").unwrap();
/// assert!(hasher.verify("my_secure_password", &hash));
/// assert!(!hasher.verify("wrong", &hash));
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    salt_length: usize,
}

impl PasswordHasher {
    /// Create PasswordHasher from AuthConfig
    ///
    /// # Errors
    /// Returns error if Argon2 parameters are invalid (e.g., memory cost too
    /// low for the number of lanes)
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &AuthConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.argon2.memory_cost,
            config.argon2.time_cost,
            config.argon2.parallelism,
            Some(config.argon2.hash_length as usize),
        )?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self {
            argon2,
            salt_length: config.argon2.salt_length as usize,
        })
    }

    /// Hash a password with a fresh random salt
    ///
    /// Each call produces a different string for the same password.
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let mut salt = vec![0u8; self.salt_length];
        OsRng.fill_bytes(&mut salt);
        let salt = SaltString::encode_b64(&salt)?;

        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    ///
    /// Uses the algorithm, params and salt embedded in `hash`, not the
    /// configured ones. A malformed hash verifies as `false`.
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(parsed_hash) => parsed_hash,
            Err(e) => {
                tracing::debug!(error = %e, "Stored password hash is malformed");
                return false;
            }
        };

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Password verification failed");
                false
            }
        }
    }

    /// Check if password hash needs rehashing (e.g., params changed)
    ///
    /// Returns `Ok(true)` when the hash was made with another algorithm or
    /// with memory/time/lane costs that differ from the configured ones.
    #[tracing::instrument(skip(self, hash))]
    pub fn needs_rehash(&self, hash: &str) -> Result<bool, HashError> {
        let parsed_hash = PasswordHash::new(hash)?;

        if parsed_hash.algorithm.as_str() != "argon2id" {
            return Ok(true);
        }

        let m_cost = parsed_hash.params.get_decimal("m").unwrap_or(0);
        let t_cost = parsed_hash.params.get_decimal("t").unwrap_or(0);
        let p_cost = parsed_hash.params.get_decimal("p").unwrap_or(0);

        let current = self.argon2.params();

        Ok(m_cost != current.m_cost() || t_cost != current.t_cost() || p_cost != current.p_cost())
    }
}
