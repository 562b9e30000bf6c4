use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// A stored user. `id` and timestamps are always assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "1815-12-10")]
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for `POST /users`
///
/// A missing `name` decodes to an empty string so it is reported by
/// validation; a missing or malformed `date_of_birth` is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Ada Lovelace", min_length = 1, max_length = 255)]
    pub name: String,
    #[schema(example = "1815-12-10")]
    pub date_of_birth: NaiveDate,
}

/// Payload for `PUT /users/{id}`. Both fields are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Ada King", min_length = 1, max_length = 255)]
    pub name: String,
    #[schema(example = "1815-12-10")]
    pub date_of_birth: NaiveDate,
}

/// One page of users plus the total row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    #[schema(example = 12)]
    pub total_count: u64,
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 10)]
    pub page_size: i64,
}

/// Query string for `GET /users`.
///
/// Values are kept as raw strings; anything that does not parse as an
/// integer falls back to the default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size (default 10)
    #[param(example = "10")]
    pub page_size: Option<String>,
}

impl ListUsersQuery {
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}
