use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, NewUser, Role, UpdateUser, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user. Username is checked for collisions before email.
    pub async fn register_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        if self.repository.exists_by_username(&input.username).await? {
            return Err(UserError::username_taken(input.username));
        }
        if self.repository.exists_by_email(&input.email).await? {
            return Err(UserError::email_taken(input.email));
        }

        let user = self.repository.create(NewUser::from_request(input)).await?;

        tracing::info!(user_id = user.id, role = %user.role, "Registered user");
        Ok(user.into())
    }

    pub async fn get_user_by_id(&self, id: i64) -> UserResult<UserResponse> {
        Ok(self.find_existing(id).await?.into())
    }

    pub async fn get_all_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn get_users_by_role(&self, role: Role) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.find_by_role(role).await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// Partial update. A username or email is only checked when it differs
    /// from the current value; username goes first.
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<UserResponse> {
        let mut user = self.find_existing(id).await?;

        if let Some(username) = &input.username {
            if *username != user.username && self.repository.exists_by_username(username).await? {
                return Err(UserError::username_taken(username.clone()));
            }
        }
        if let Some(email) = &input.email {
            if *email != user.email && self.repository.exists_by_email(email).await? {
                return Err(UserError::email_taken(email.clone()));
            }
        }

        user.apply_update(input);
        let user = self.repository.update(user).await?;

        tracing::info!(user_id = id, "Updated user");
        Ok(user.into())
    }

    /// Soft delete: the record stays, `active` becomes false
    pub async fn deactivate_user(&self, id: i64) -> UserResult<UserResponse> {
        self.set_active(id, false).await
    }

    pub async fn activate_user(&self, id: i64) -> UserResult<UserResponse> {
        self.set_active(id, true).await
    }

    async fn set_active(&self, id: i64, active: bool) -> UserResult<UserResponse> {
        let mut user = self.find_existing(id).await?;
        user.set_active(active);
        let user = self.repository.update(user).await?;

        tracing::info!(user_id = id, active, "Changed user activation");
        Ok(user.into())
    }

    async fn find_existing(&self, id: i64) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }
}
