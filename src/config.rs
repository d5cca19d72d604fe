use anyhow::Context;

/// Default validity of an issued session token: 100 hours.
pub const DEFAULT_TTL_MINUTES: i64 = 60 * 100;
/// Upper bound on the validity window: one year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig::from_lookup(|key| std::env::var(key).ok())?;
        Ok(Self { database_url, jwt })
    }
}

impl JwtConfig {
    /// Builds the token settings from a key lookup. A missing or blank secret is
    /// a startup error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET").context("JWT_SECRET is not set")?;
        if secret.trim().is_empty() {
            anyhow::bail!("JWT_SECRET is blank");
        }
        let ttl_minutes = match lookup("JWT_TTL_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("JWT_TTL_MINUTES is not a number: {raw}"))?,
            None => DEFAULT_TTL_MINUTES,
        };
        if !(1..=MAX_TTL_MINUTES).contains(&ttl_minutes) {
            anyhow::bail!(
                "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {ttl_minutes}"
            );
        }
        Ok(Self {
            secret,
            ttl_minutes,
        })
    }
}
