//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users        {"name":"Ada","email":"ada@example.com"}
//! PUT    /api/users/{id}   {"email":null}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, Resource, USER_NAME_REQUIRED, User, UserChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{deserialize_some, parse_record_id, required_change};

/// Request body for `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email,
        }
    }
}

/// Request body for `PUT /api/users/{id}`.
///
/// Omitted fields are left unchanged; `"email": null` clears the address.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            name: required_change(value.name),
            email: value.email,
        }
    }
}

/// List every user ordered by id.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security(("api_key" = []))
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    state.users.get_all().await.map(web::Json)
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security(("api_key" = []))
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_record_id::<User>(&path)?;
    state
        .users
        .get_by_id(id)
        .await?
        .map(web::Json)
        .ok_or_else(User::not_found)
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 400, description = "Name missing or body malformed", body = Error),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security(("api_key" = []))
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    if payload.name.is_none() {
        return Err(Error::invalid_request(USER_NAME_REQUIRED));
    }
    let user = state.users.create(payload.into()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Blank name or body malformed", body = Error),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security(("api_key" = []))
)]
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<User>> {
    let id = parse_record_id::<User>(&path)?;
    state
        .users
        .update(id, payload.into_inner().into())
        .await?
        .map(web::Json)
        .ok_or_else(User::not_found)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or wrong API key", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security(("api_key" = []))
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id::<User>(&path)?;
    if state.users.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(User::not_found())
    }
}
