use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        axum_helpers::server::health::health_handler,
        crate::api::health::ready_handler,
    ),
    components(
        schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)
    ),
    info(
        title = "Users API",
        version = "0.1.0",
        description = "CRUD API for user records"
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc)
    ),
    tags((name = "health", description = "Liveness and readiness probes"))
)]
pub struct ApiDoc;
