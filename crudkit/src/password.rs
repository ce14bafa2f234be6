//! Password hashing using Argon2id
//!
//! Produces PHC string format hashes; the format is self-describing, so
//! verification needs no additional context.
//!
//! # Example
//!
//! ```rust
//! use crudkit::password::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("my_secure_password").unwrap();
//! assert!(hasher.verify("my_secure_password", &hash).unwrap());
//! assert!(!hasher.verify("wrong_password", &hash).unwrap());
//! ```

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::Error;

/// Password hashing configuration
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,
    /// Number of iterations
    pub time_cost: u32,
    /// Degree of parallelism
    pub parallelism: u32,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: 65536,
            time_cost: 3,
            parallelism: 4,
            min_password_length: 8,
        }
    }
}

/// Password hasher using Argon2id
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    min_password_length: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(PasswordConfig::default())
    }
}

impl PasswordHasher {
    /// Create a password hasher with custom parameters
    ///
    /// # Panics
    ///
    /// Panics when the Argon2 parameter combination is invalid; the
    /// defaults never are.
    pub fn new(config: PasswordConfig) -> Self {
        let params = Params::new(
            config.memory_cost_kib,
            config.time_cost,
            config.parallelism,
            None,
        )
        .expect("Invalid Argon2 parameters");

        Self {
            params,
            min_password_length: config.min_password_length,
        }
    }

    /// Hash a password into PHC string format
    ///
    /// Fails when the password is shorter than the configured minimum or
    /// when the underlying hash operation fails.
    pub fn hash(&self, password: &str) -> Result<String, Error> {
        if password.len() < self.min_password_length {
            return Err(Error::Validation(format!(
                "password must be at least {} characters",
                self.min_password_length
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::PasswordHash(format!("failed to hash password: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a PHC string hash
    ///
    /// Returns `false` for a mismatch; errors only when the hash itself is
    /// malformed.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, Error> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| Error::PasswordHash(format!("invalid password hash format: {e}")))?;

        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::PasswordHash(format!(
                "password verification failed: {e}"
            ))),
        }
    }

    /// The minimum accepted password length
    pub fn min_password_length(&self) -> usize {
        self.min_password_length
    }
}
