use axum::Router;
use domain_users::{InMemoryUserRepository, PgUserRepository, UserService, handlers};

use crate::state::AppState;

/// Users router backed by whichever store the app was started with
pub fn router(state: &AppState) -> Router {
    match &state.db {
        Some(db) => handlers::router(UserService::new(PgUserRepository::new(db.clone()))),
        None => handlers::router(UserService::new(InMemoryUserRepository::new())),
    }
}
