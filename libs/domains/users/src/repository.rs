//! User repository trait and the in-memory implementation

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Storage for users.
///
/// E-mail lookups and uniqueness are case-insensitive; nicknames are
/// compared exactly. Writes that would break either uniqueness rule fail
/// with [`UserError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, new_user: NewUser) -> UserResult<User>;

    /// `None` for unknown or malformed ids.
    async fn get(&self, id: &str) -> UserResult<Option<User>>;

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn get_by_nickname(&self, nickname: &str) -> UserResult<Option<User>>;

    /// Overwrite the stored record with the same id. `false` when it vanished.
    async fn update(&self, user: &User) -> UserResult<bool>;

    /// `false` when nothing was removed.
    async fn delete(&self, id: &str) -> UserResult<bool>;
}

/// Process-local store used when the service runs in testing mode.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn collides(existing: &User, candidate: &User) -> bool {
    existing.id != candidate.id
        && (existing.email.eq_ignore_ascii_case(&candidate.email)
            || existing.nickname == candidate.nickname)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, new_user), fields(nickname = %new_user.nickname))]
    async fn create(&self, new_user: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;
        let user = User::new(ObjectId::new().to_hex(), new_user);

        if users.values().any(|u| collides(u, &user)) {
            return Err(UserError::Duplicate);
        }

        users.insert(user.id.clone(), user.clone());
        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> UserResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn get_by_nickname(&self, nickname: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.nickname == nickname).cloned())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Ok(false);
        }
        if users.values().any(|u| collides(u, user)) {
            return Err(UserError::Duplicate);
        }

        users.insert(user.id.clone(), user.clone());
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> UserResult<bool> {
        let removed = self.users.write().await.remove(id).is_some();
        if removed {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }
}
