use async_trait::async_trait;
use sqlx::PgPool;

use super::{
    claims::Role,
    principal::{Principal, UserLookup},
};
pub use crate::auth::repo_types::User;

impl User {
    /// Find a user by login id.
    pub async fn find_by_uid(db: &PgPool, uid: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, uid, password_hash, role, created_at
            FROM users
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user; `uid` is unique, so a duplicate fails.
    pub async fn create(
        db: &PgPool,
        uid: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (uid, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, uid, password_hash, role, created_at
            "#,
        )
        .bind(uid)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub fn role(&self) -> anyhow::Result<Role> {
        self.role.parse()
    }
}

/// `UserLookup` backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserLookup {
    db: PgPool,
}

impl PgUserLookup {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserLookup for PgUserLookup {
    async fn find_principal_by_subject(&self, subject: &str) -> anyhow::Result<Option<Principal>> {
        let Some(user) = User::find_by_uid(&self.db, subject).await? else {
            return Ok(None);
        };
        let role = user.role()?;
        Ok(Some(Principal {
            subject: user.uid,
            authorities: vec![role],
        }))
    }
}
