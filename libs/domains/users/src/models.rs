use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter, sea_query::StringLen};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Account category. Carries no authorization logic.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    #[sea_orm(string_value = "CUSTOMER")]
    Customer,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "COURIER")]
    Courier,
    #[sea_orm(string_value = "RESTAURANT_OWNER")]
    RestaurantOwner,
}

/// Stored user record
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Stored as given; never part of a response
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewUser {
    /// Active user with the requested role, or `CUSTOMER` when none was given.
    pub fn from_request(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            username: input.username,
            email: input.email,
            password: input.password,
            phone: input.phone,
            role: input.role.unwrap_or_default(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password,
            phone: self.phone,
            role: self.role,
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl User {
    /// Overwrite the fields present in `input`; the rest stay as they are.
    pub fn apply_update(&mut self, input: UpdateUser) {
        if let Some(username) = input.username {
            self.username = username;
        }
        if let Some(email) = input.email {
            self.email = email;
        }
        if let Some(password) = input.password {
            self.password = password;
        }
        if let Some(phone) = input.phone {
            self.phone = Some(phone);
        }
        if let Some(role) = input.role {
            self.role = role;
        }
        if let Some(active) = input.active {
            self.active = active;
        }
        self.touch();
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Public view of a user (no password)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone: user.phone,
            role: user.role,
            active: user.active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request body for registering a user.
///
/// Missing or `null` strings become empty so they surface as field errors
/// rather than a body parse failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "alice")]
    pub username: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(email(message = "Email should be valid"))]
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret1")]
    pub password: String,

    pub phone: Option<String>,

    /// Defaults to `CUSTOMER`
    pub role: Option<Role>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,

    pub phone: Option<String>,
    pub role: Option<Role>,
    pub active: Option<bool>,
}

/// Query filters for listing users
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserFilter {
    /// Only users with this role; an empty value lists everyone
    #[serde(default, deserialize_with = "empty_as_none")]
    pub role: Option<Role>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.is_empty() => Role::from_str(&raw)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("unknown role: {}", raw))),
        _ => Ok(None),
    }
}
