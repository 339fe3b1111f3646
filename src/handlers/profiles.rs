use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::profile_service::ProfileInput;
use crate::auth::AuthenticatedUser;
use crate::domain::user::{User, UserChanges, WelcomeNotice};
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProfileRequest {
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

impl From<CreateProfileRequest> for ProfileInput {
    fn from(r: CreateProfileRequest) -> Self {
        ProfileInput {
            username: r.username,
            email: r.email,
            name: r.name,
            contact_number: r.contact_number,
            permanent_address: r.permanent_address,
            country: r.country,
            city: r.city,
            contact_number_2: r.contact_number_2,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub disabled: Option<bool>,
    pub contact_number: Option<String>,
    pub permanent_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub contact_number_2: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(r: UpdateUserRequest) -> Self {
        UserChanges {
            name: r.name,
            disabled: r.disabled,
            contact_number: r.contact_number,
            permanent_address: r.permanent_address,
            country: r.country,
            city: r.city,
            contact_number_2: r.contact_number_2,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub disabled: bool,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            username: u.username,
            email: u.email,
            name: u.name,
            disabled: u.disabled,
            contact_number: u.contact_number,
            permanent_address: u.permanent_address,
            country: u.country,
            city: u.city,
            contact_number_2: u.contact_number_2,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /profiles
///
/// Creates the profile of the signed-in user; the id is the token subject.
/// A welcome notice is sent after the insert commits. Its failure is logged
/// and does not fail the request.
#[utoipa::path(
    post,
    path = "/profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 200, description = "Profile created", body = UserResponse),
        (status = 401, description = "Missing token or token/email mismatch"),
        (status = 409, description = "Username or email already registered"),
    ),
    security(("bearer" = [])),
    tag = "profiles"
)]
pub async fn create_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let input = ProfileInput::from(body.into_inner());
    let identity = user.0;

    let worker = state.clone();
    let created = blocking(move || worker.profiles.create_profile(&identity, input)).await?;

    let notifier = state.notifier.clone();
    let notice = WelcomeNotice::for_user(&created);
    actix_web::rt::spawn(async move {
        if let Err(e) = notifier.send_welcome(&notice).await {
            log::error!("welcome notice to {} failed: {e}", notice.to_email);
        }
    });

    Ok(HttpResponse::Ok().json(UserResponse::from(created)))
}

/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "All users", body = [UserResponse])),
    tag = "profiles"
)]
pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = blocking(move || state.profiles.list_users()).await?;
    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /users/{user_id}
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer" = [])),
    tag = "profiles"
)]
pub async fn get_user(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = blocking(move || state.profiles.get_user(&user_id)).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /users/{user_id}
///
/// Partial update; only the owner may change a profile.
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer" = [])),
    tag = "profiles"
)]
pub async fn update_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    user.ensure_is(&user_id)?;
    let changes = UserChanges::from(body.into_inner());

    let updated = blocking(move || state.profiles.update_user(&user_id, changes)).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}
