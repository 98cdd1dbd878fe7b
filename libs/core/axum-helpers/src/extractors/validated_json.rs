//! JSON body extractor that also runs `validator` rules.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body, then validates it.
///
/// Malformed JSON rejects with `{error, message}`; rule violations reject with
/// a flat `{ "field": "message" }` map. Both are 400.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(length(min = 3))]
///     username: String,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateUser>) -> String {
///     input.username
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
