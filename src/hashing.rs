use anyhow::Context;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use secrecy::{ExposeSecret, Secret};

use crate::configuration::HashingSettings;
use crate::telemetry::spawn_blocking_with_tracing;

/// Argon2id hasher with a configured work factor.
#[derive(Clone, Debug)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    pub fn new(settings: &HashingSettings) -> Result<Self, anyhow::Error> {
        let params = Params::new(
            settings.memory_cost_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 work factor {:?}: {}", settings, e))?;
        Ok(Self { params })
    }

    /// Hash a plaintext password into a PHC string on the blocking pool.
    #[tracing::instrument(name = "Hashing a password", skip_all)]
    pub async fn hash(&self, password: Secret<String>) -> Result<Secret<String>, anyhow::Error> {
        let params = self.params.clone();
        spawn_blocking_with_tracing(move || compute_password_hash(password, params))
            .await
            .context("Failed to spawn blocking task.")?
    }

    /// Check a candidate plaintext against a stored hash.
    pub fn verify(
        &self,
        candidate: &Secret<String>,
        expected_password_hash: &Secret<String>,
    ) -> Result<bool, anyhow::Error> {
        let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
            .context("Failed to parse hash in PHC string format.")?;
        Ok(Argon2::default()
            .verify_password(candidate.expose_secret().as_bytes(), &expected_password_hash)
            .is_ok())
    }
}

fn compute_password_hash(
    password: Secret<String>,
    params: Params,
) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(Secret::new(password_hash))
}
