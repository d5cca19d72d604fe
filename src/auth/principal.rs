use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use super::claims::Role;

/// Authenticated identity handed to request handlers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub authorities: Vec<Role>,
}

impl Principal {
    pub fn has_authority(&self, role: Role) -> bool {
        self.authorities.contains(&role)
    }
}

/// User store consulted after a token verifies.
#[async_trait]
pub trait UserLookup: Send + Sync {
    /// `Ok(None)` when no user carries this subject.
    async fn find_principal_by_subject(&self, subject: &str) -> anyhow::Result<Option<Principal>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserLookup {
    users: HashMap<String, Vec<Role>>,
}

impl InMemoryUserLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, subject: impl Into<String>, authorities: Vec<Role>) -> Self {
        self.users.insert(subject.into(), authorities);
        self
    }
}

#[async_trait]
impl UserLookup for InMemoryUserLookup {
    async fn find_principal_by_subject(&self, subject: &str) -> anyhow::Result<Option<Principal>> {
        Ok(self.users.get(subject).map(|authorities| Principal {
            subject: subject.to_string(),
            authorities: authorities.clone(),
        }))
    }
}
