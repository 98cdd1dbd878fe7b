use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, Role, User},
    repository::UserRepository,
};

/// Unique index names from the users migration
const USERNAME_CONSTRAINT: &str = "uq_users_username";
const EMAIL_CONSTRAINT: &str = "uq_users_email";

pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_one(&self, column: entity::Column, value: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }
}

fn internal(err: DbErr) -> UserError {
    UserError::Internal(format!("Database error: {}", err))
}

/// Which field a unique-violation message refers to, if it names one of ours.
fn violated_field(message: &str) -> Option<&'static str> {
    if message.contains(USERNAME_CONSTRAINT) {
        Some("Username")
    } else if message.contains(EMAIL_CONSTRAINT) {
        Some("Email")
    } else {
        None
    }
}

/// Map a write failure; a lost uniqueness race surfaces as `AlreadyExists`.
fn write_error(err: DbErr, username: &str, email: &str) -> UserError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        match violated_field(&message) {
            Some("Username") => return UserError::username_taken(username),
            Some(_) => return UserError::email_taken(email),
            None => {}
        }
    }
    internal(err)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(internal)?;

        Ok(model.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        self.find_one(entity::Column::Username, username).await
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.find_one(entity::Column::Email, email).await
    }

    async fn find_by_role(&self, role: Role) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Role.eq(role.to_string()))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(internal)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn exists_by_username(&self, username: &str) -> UserResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> UserResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, user: NewUser) -> UserResult<User> {
        let (username, email) = (user.username.clone(), user.email.clone());
        let active_model: entity::ActiveModel = user.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &username, &email))?;

        tracing::debug!(user_id = model.id, "Inserted user");
        Ok(model.into())
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let id = user.id;
        let (username, email) = (user.username.clone(), user.email.clone());
        let active_model: entity::ActiveModel = user.into();

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => UserError::NotFound(id),
            other => write_error(other, &username, &email),
        })?;

        tracing::debug!(user_id = id, "Updated user row");
        Ok(model.into())
    }
}
