//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Food Delivery Users API",
        version = "0.1.0",
        description = "User account management: registration, lookup, role filtering and activation"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(crate::api::banner::home, crate::api::banner::test_endpoint),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    ),
    tags(
        (name = "Status", description = "Plain-text liveness endpoints")
    )
)]
pub struct ApiDoc;
