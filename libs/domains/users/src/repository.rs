use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, Role, User};

/// Repository trait for User persistence.
///
/// Listings are ordered by ascending id, which is insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn find_by_role(&self, role: Role) -> UserResult<Vec<User>>;

    async fn find_all(&self) -> UserResult<Vec<User>>;

    async fn exists_by_username(&self, username: &str) -> UserResult<bool>;

    async fn exists_by_email(&self, email: &str) -> UserResult<bool>;

    /// Persist a new user under a freshly assigned id
    async fn create(&self, user: NewUser) -> UserResult<User>;

    /// Replace the stored user with the same id
    async fn update(&self, user: User) -> UserResult<User>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl Store {
    /// Username/email collision with any user other than `except`
    fn check_unique(&self, username: &str, email: &str, except: Option<i64>) -> UserResult<()> {
        let others = || self.users.values().filter(move |u| Some(u.id) != except);

        if others().any(|u| u.username == username) {
            return Err(UserError::username_taken(username));
        }
        if others().any(|u| u.email == email) {
            return Err(UserError::email_taken(email));
        }
        Ok(())
    }
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_role(&self, role: Role) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().filter(|u| u.role == role).cloned().collect())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.users.values().any(|u| u.username == username))
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        let store = self.store.read().await;
        Ok(store.users.values().any(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;
        store.check_unique(&user.username, &user.email, None)?;

        store.last_id += 1;
        let user = user.into_user(store.last_id);
        store.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut store = self.store.write().await;

        if !store.users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }
        store.check_unique(&user.username, &user.email, Some(user.id))?;

        store.users.insert(user.id, user.clone());

        tracing::debug!(user_id = user.id, "Updated user row");
        Ok(user)
    }
}
