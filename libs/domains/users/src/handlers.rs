use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, ErrorCode, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::Operation;
use crate::models::{
    CreateUserRequest, ListUsersQuery, PaginatedUsers, UpdateUserRequest, User,
};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, CreateUserRequest, UpdateUserRequest, PaginatedUsers),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users::<R>).post(create_user::<R>))
        .route(
            "/{id}",
            get(get_user::<R>)
                .put(update_user::<R>)
                .delete(delete_user::<R>),
        )
        .with_state(shared_service)
}

fn invalid_user_id() -> AppError {
    AppError::BadRequest(ErrorCode::InvalidId.default_message().to_string())
}

/// Parse the `{id}` path segment as a 32-bit user id.
fn parse_user_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>().map_err(|_| {
        tracing::debug!(
            error_code = ErrorCode::InvalidId.code(),
            raw_id = raw,
            "Rejected user id"
        );
        invalid_user_id()
    })
}

/// Resolve the extracted `{id}` segment, including segments axum could not decode.
fn user_id(path: Result<Path<String>, PathRejection>) -> Result<i32, AppError> {
    match path {
        Ok(Path(raw)) => parse_user_id(&raw),
        Err(rejection) => {
            tracing::debug!(
                error_code = ErrorCode::InvalidId.code(),
                error = %rejection.body_text(),
                "Rejected user id"
            );
            Err(invalid_user_id())
        }
    }
}

/// List users, one page at a time
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users ordered by id", body = PaginatedUsers),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Json<PaginatedUsers>, AppError> {
    let query = query
        .map(|Query(q)| q)
        .inspect_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Ignoring undecodable list query");
        })
        .unwrap_or_default();
    let page = service
        .list_users(query.page(), query.page_size())
        .await
        .map_err(|e| e.into_app_error(Operation::List))?;
    Ok(Json(page))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = service
        .create_user(input)
        .await
        .map_err(|e| e.into_app_error(Operation::Create))?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let id = user_id(path)?;
    let user = service
        .get_user_by_id(id)
        .await
        .map_err(|e| e.into_app_error(Operation::Get))?;
    Ok(Json(user))
}

/// Replace a user's name and date of birth
///
/// The id is parsed before the body is looked at.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<ValidatedJson<UpdateUserRequest>, AppError>,
) -> Result<Json<User>, AppError> {
    let id = user_id(path)?;
    let ValidatedJson(input) = body?;
    let user = service
        .update_user(id, input)
        .await
        .map_err(|e| e.into_app_error(Operation::Update))?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = user_id(path)?;
    service
        .delete_user(id)
        .await
        .map_err(|e| e.into_app_error(Operation::Delete))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), 42);
        assert!(parse_user_id("abc").is_err());
        assert!(parse_user_id("").is_err());
        // Beyond i32 range
        assert!(parse_user_id("2147483648").is_err());
    }
}
